//! Personal dashboard summary.

use std::error::Error;

use outlay_core::{Money, RequestStatus};

use outlay_client::api::types::ReimbursementRequest;
use outlay_client::authz;

use super::{open_store, require_claims, surface};

/// Request counts by status plus the approved total.
struct StatusSummary {
    pending: usize,
    approved: usize,
    rejected: usize,
    approved_total: Money,
}

fn summarize(requests: &[ReimbursementRequest]) -> StatusSummary {
    let count =
        |status: RequestStatus| requests.iter().filter(|r| r.status == status).count();

    StatusSummary {
        pending: count(RequestStatus::Pending),
        approved: count(RequestStatus::Approved),
        rejected: count(RequestStatus::Rejected),
        approved_total: requests
            .iter()
            .filter(|r| r.status == RequestStatus::Approved)
            .map(ReimbursementRequest::total)
            .sum(),
    }
}

fn print_summary(title: &str, summary: &StatusSummary) {
    println!("{title}");
    println!("  Pending:        {}", summary.pending);
    println!("  Approved:       {}", summary.approved);
    println!("  Rejected:       {}", summary.rejected);
    println!("  Approved total: {}", summary.approved_total);
}

/// Print request counts and approved totals for the caller, plus the team
/// queue when the caller has review authority.
pub async fn summary() -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    let mine = match store
        .client()
        .my_requests(claims.company_id, claims.employee_id)
        .await
    {
        Ok(requests) => requests,
        Err(e) => return Err(surface(&mut store, e)),
    };
    print_summary("My requests", &summarize(&mine));

    if authz::can_view_team_requests(&claims.role, claims.permission_level) {
        let team = match store.client().team_requests(claims.employee_id).await {
            Ok(requests) => requests,
            Err(e) => return Err(surface(&mut store, e)),
        };
        print_summary("Team requests", &summarize(&team));
    }

    Ok(())
}
