//! Company directory commands (product admin).

use std::error::Error;

use clap::ValueEnum;

use outlay_core::{CompanyId, Email};

use outlay_client::api::types::NewCompany;
use outlay_client::listing;

use super::{ListOptions, open_store, print_page_footer, require_claims, surface};

/// Sort keys offered by the company directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompanySortKey {
    /// Company name
    Name,
    /// Creation timestamp
    Created,
}

/// List all companies, shaped by the shared listing contract.
pub async fn list(options: &ListOptions, sort: CompanySortKey) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    let companies = match store.client().companies(&claims.token).await {
        Ok(companies) => companies,
        Err(e) => return Err(surface(&mut store, e)),
    };

    // filter -> sort -> paginate
    let mut rows = listing::filter(companies, &options.filter, |c| c.company_name.as_str());
    match sort {
        CompanySortKey::Name => {
            listing::sort_by_key(&mut rows, |c| c.company_name.clone(), options.direction());
        }
        CompanySortKey::Created => {
            listing::sort_by_key(&mut rows, |c| c.created_at, options.direction());
        }
    }
    let page = listing::paginate(rows, options.page, options.page_size);

    println!(
        "{:<6} {:<24} {:<28} {:<26} {}",
        "ID", "Company", "Address", "Contact", "Created"
    );
    for company in page.items() {
        println!(
            "{:<6} {:<24} {:<28} {:<26} {}",
            company.company_id,
            company.company_name,
            company.address,
            company.contact_email,
            company.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    print_page_footer(&page, "No companies found.");
    Ok(())
}

/// Create a company together with its admin account.
pub async fn create(
    name: &str,
    address: &str,
    contact_email: &str,
    admin_email: &str,
) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    require_claims(&store)?;

    let company = NewCompany {
        company_name: name.to_owned(),
        address: address.to_owned(),
        contact_email: Email::parse(contact_email)?,
        admin_email: Email::parse(admin_email)?,
    };

    match store.client().create_company(&company).await {
        Ok(created) => {
            println!(
                "Created company {} ({})",
                created.company_name, created.company_id
            );
            Ok(())
        }
        Err(e) => Err(surface(&mut store, e)),
    }
}

/// Show one company's details; defaults to the caller's own company.
pub async fn show(id: Option<i32>) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    let company_id = id.map_or(claims.company_id, CompanyId::new);
    let company = match store.client().company(&claims.token, company_id).await {
        Ok(company) => company,
        Err(e) => return Err(surface(&mut store, e)),
    };

    println!("Company:  {} ({})", company.company_name, company.company_id);
    println!("Address:  {}", company.address);
    println!("Contact:  {}", company.contact_email);
    println!("Created:  {}", company.created_at.format("%Y-%m-%d %H:%M"));
    Ok(())
}
