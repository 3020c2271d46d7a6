//! Role management commands (company admin).

use std::error::Error;

use clap::ValueEnum;

use outlay_core::{PermissionLevel, RoleId};

use outlay_client::api::types::NewRole;
use outlay_client::listing;

use super::{ListOptions, open_store, print_page_footer, require_claims, surface};

/// Sort keys offered by the role table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleSortKey {
    /// Role name
    Name,
    /// Permission level
    Level,
}

/// List the company's roles.
pub async fn list(options: &ListOptions, sort: RoleSortKey) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    let roles = match store.client().roles(&claims.token, claims.company_id).await {
        Ok(roles) => roles,
        Err(e) => return Err(surface(&mut store, e)),
    };

    let mut rows = listing::filter(roles, &options.filter, |r| r.role_name.as_str());
    match sort {
        RoleSortKey::Name => {
            listing::sort_by_key(&mut rows, |r| r.role_name.clone(), options.direction());
        }
        RoleSortKey::Level => {
            listing::sort_by_key(&mut rows, |r| r.permission_level, options.direction());
        }
    }
    let page = listing::paginate(rows, options.page, options.page_size);

    println!("{:<6} {:<24} {}", "ID", "Role", "Level");
    for role in page.items() {
        println!(
            "{:<6} {:<24} {}",
            role.role_id, role.role_name, role.permission_level
        );
    }
    print_page_footer(&page, "No roles found.");
    Ok(())
}

/// Add a role to the company.
pub async fn add(name: &str, level: i32) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    let role = NewRole {
        role_name: name.to_owned(),
        permission_level: PermissionLevel::new(level),
        company_id: claims.company_id,
    };

    match store.client().create_role(&claims.token, &role).await {
        Ok(created) => {
            println!(
                "Created role {} ({}) at level {}",
                created.role_name, created.role_id, created.permission_level
            );
            Ok(())
        }
        Err(e) => Err(surface(&mut store, e)),
    }
}

/// Remove a role by ID.
pub async fn remove(id: i32) -> Result<(), Box<dyn Error>> {
    let mut store = open_store().await?;
    let claims = require_claims(&store)?;

    match store
        .client()
        .delete_role(&claims.token, RoleId::new(id))
        .await
    {
        Ok(()) => {
            println!("Deleted role {id}.");
            Ok(())
        }
        Err(e) => Err(surface(&mut store, e)),
    }
}
