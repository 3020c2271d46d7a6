//! Team approval-queue commands (reviewers).

use std::error::Error;

use outlay_core::{ApprovalAction, RequestId};

use outlay_client::listing;
use outlay_client::workflow::{ApprovalWorkflow, ConfirmOutcome};
use outlay_client::authz;

use super::{ListOptions, confirm_prompt, open_store, print_page_footer, require_claims, surface};

/// List the team's requests awaiting (or past) review.
pub async fn list(options: &ListOptions) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    if !authz::can_view_team_requests(&claims.role, claims.permission_level) {
        return Err("your role has no team approval queue".into());
    }

    let requests = match store.client().team_requests(claims.employee_id).await {
        Ok(requests) => requests,
        Err(e) => return Err(surface(&mut store, e)),
    };

    let rows = listing::filter(requests, &options.filter, |r| r.purpose.as_str());
    let page = listing::paginate(rows, options.page, options.page_size);

    println!(
        "{:<6} {:<10} {:<28} {:>12} {}",
        "ID", "Employee", "Purpose", "Total", "Status"
    );
    for request in page.items() {
        println!(
            "{:<6} {:<10} {:<28} {:>12} {}",
            request.request_id,
            request.company_employee_id,
            request.purpose,
            request.total().to_string(),
            request.status
        );
    }
    print_page_footer(&page, "No requests found.");
    Ok(())
}

/// Stage an approve/reject decision, confirm it, and commit.
///
/// The two-phase contract: the decision is staged first (rejected up front
/// on terminal requests and insufficient authority, before any network
/// call), then the operator confirms. Declining leaves everything untouched.
pub async fn decide(id: i32, action: ApprovalAction, yes: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    let requests = match store.client().team_requests(claims.employee_id).await {
        Ok(requests) => requests,
        Err(e) => return Err(surface(&mut store, e)),
    };

    let request_id = RequestId::new(id);
    let mut workflow = ApprovalWorkflow::new(requests);
    workflow.stage(request_id, action, claims.employee_id, claims.permission_level)?;

    let staged = workflow
        .request(request_id)
        .ok_or("request disappeared from the loaded set")?;
    println!(
        "{} {} ({}) for {}",
        match action {
            ApprovalAction::Approve => "Approving",
            ApprovalAction::Reject => "Rejecting",
        },
        staged.request_id,
        staged.purpose,
        staged.total()
    );

    let confirmed = confirm_prompt(
        &format!("Are you sure you want to {action} this request?"),
        yes,
    )?;

    match workflow.confirm(confirmed, store.client()).await {
        Ok(ConfirmOutcome::Discarded) => {
            println!("Left request {request_id} untouched.");
            Ok(())
        }
        Ok(ConfirmOutcome::Committed(_)) => {
            let status = workflow
                .request(request_id)
                .map_or_else(|| "unknown".to_owned(), |r| r.status.to_string());
            println!("Request {request_id} is now {status}.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
