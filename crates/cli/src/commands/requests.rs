//! Personal reimbursement-request commands.

use std::error::Error;

use chrono::NaiveDate;
use clap::ValueEnum;
use rust_decimal::Decimal;

use outlay_core::Money;

use outlay_client::api::types::{ExpenseLine, NewRequest, expense_categories};
use outlay_client::listing;

use super::{ListOptions, open_store, print_page_footer, require_claims, surface};

/// Sort keys offered by the request listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequestSortKey {
    /// Purpose text
    Purpose,
    /// Total claimed amount
    Amount,
    /// Travel start date
    Start,
}

/// List the caller's reimbursement requests.
pub async fn list(options: &ListOptions, sort: RequestSortKey) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    let requests = match store
        .client()
        .my_requests(claims.company_id, claims.employee_id)
        .await
    {
        Ok(requests) => requests,
        Err(e) => return Err(surface(&mut store, e)),
    };

    let mut rows = listing::filter(requests, &options.filter, |r| r.purpose.as_str());
    match sort {
        RequestSortKey::Purpose => {
            listing::sort_by_key(&mut rows, |r| r.purpose.clone(), options.direction());
        }
        RequestSortKey::Amount => {
            listing::sort_by_key(&mut rows, |r| r.total(), options.direction());
        }
        RequestSortKey::Start => {
            listing::sort_by_key(&mut rows, |r| r.travel_start_date, options.direction());
        }
    }
    let page = listing::paginate(rows, options.page, options.page_size);

    println!(
        "{:<6} {:<28} {:>12} {:<10} {}",
        "ID", "Purpose", "Total", "Status", "Travel dates"
    );
    for request in page.items() {
        println!(
            "{:<6} {:<28} {:>12} {:<10} {} - {}",
            request.request_id,
            request.purpose,
            request.total().to_string(),
            request.status.to_string(),
            request.travel_start_date,
            request.travel_end_date
        );
    }
    print_page_footer(&page, "No requests found.");
    Ok(())
}

/// Flags for submitting a new reimbursement request.
#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Purpose of the trip
    #[arg(long)]
    pub purpose: String,

    /// Free-form description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Travel start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Travel end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Travel amount
    #[arg(long)]
    pub travel: Option<Decimal>,

    /// Accommodation amount
    #[arg(long)]
    pub accommodation: Option<Decimal>,

    /// Meals amount
    #[arg(long)]
    pub meals: Option<Decimal>,

    /// Miscellaneous amount
    #[arg(long)]
    pub miscellaneous: Option<Decimal>,

    /// Receipt file reference (repeatable)
    #[arg(long = "receipt")]
    pub receipts: Vec<String>,
}

impl SubmitArgs {
    /// Collect the provided amounts into labeled expense lines, in the form's
    /// fixed category order.
    fn expense_lines(&self) -> Vec<ExpenseLine> {
        [
            (expense_categories::TRAVEL, self.travel),
            (expense_categories::ACCOMMODATION, self.accommodation),
            (expense_categories::MEALS, self.meals),
            (expense_categories::MISCELLANEOUS, self.miscellaneous),
        ]
        .into_iter()
        .filter_map(|(label, amount)| {
            amount.map(|amount| ExpenseLine {
                label: label.to_owned(),
                amount: Money::new(amount),
            })
        })
        .collect()
    }
}

/// Submit a new reimbursement request.
pub async fn submit(args: SubmitArgs) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    let lines = args.expense_lines();
    if lines.is_empty() {
        return Err("provide at least one expense amount \
             (--travel, --accommodation, --meals, --miscellaneous)"
            .into());
    }

    let request = NewRequest::new(
        claims.employee_id,
        claims.company_id,
        lines,
        args.start,
        args.end,
        args.purpose,
        args.description,
        args.receipts,
    );

    match store.client().submit_request(&request).await {
        Ok(created) => {
            println!(
                "Submitted request {} for {} ({})",
                created.request_id,
                created.total(),
                created.status
            );
            Ok(())
        }
        Err(e) => Err(surface(&mut store, e)),
    }
}
