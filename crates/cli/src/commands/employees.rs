//! Employee roster commands (company admin).

use std::error::Error;
use std::path::Path;

use outlay_client::listing;

use super::{ListOptions, open_store, print_page_footer, require_claims, surface};

/// List the company's employee roster.
pub async fn list(options: &ListOptions) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    let employees = match store
        .client()
        .employees(&claims.token, claims.company_id)
        .await
    {
        Ok(employees) => employees,
        Err(e) => return Err(surface(&mut store, e)),
    };

    let mut rows = listing::filter(employees, &options.filter, |e| e.name.as_str());
    listing::sort_by_key(&mut rows, |e| e.name.clone(), options.direction());
    let page = listing::paginate(rows, options.page, options.page_size);

    println!("{:<6} {:<24} {:<28} {}", "ID", "Name", "Email", "Role");
    for employee in page.items() {
        println!(
            "{:<6} {:<24} {:<28} {}",
            employee.employee_id, employee.name, employee.email, employee.role_name
        );
    }
    print_page_footer(&page, "No employees found.");
    Ok(())
}

/// Upload a roster file (CSV) for the company.
///
/// One multipart POST; the backend's summary message is printed verbatim.
pub async fn upload(path: &Path) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    let contents = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or("roster path has no usable file name")?;

    match store
        .client()
        .upload_employees(file_name, contents, claims.company_id)
        .await
    {
        Ok(outcome) => {
            println!("{}", outcome.message);
            Ok(())
        }
        Err(e) => Err(surface(&mut store, e)),
    }
}
