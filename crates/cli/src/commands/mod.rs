//! Command implementations, one module per dashboard screen.

pub mod auth;
pub mod companies;
pub mod dashboard;
pub mod employees;
pub mod requests;
pub mod roles;
pub mod team;

use std::error::Error;
use std::io::Write;
use std::num::NonZeroUsize;

use clap::Args;

use outlay_client::api::ApiError;
use outlay_client::listing::{Page, SortDirection};
use outlay_client::{BackendClient, ClientConfig, SessionStore, TokenCache, authz};

/// Shared listing flags, applied in filter -> sort -> paginate order.
#[derive(Args, Debug)]
pub struct ListOptions {
    /// Case-insensitive substring filter
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    /// 0-based page index
    #[arg(long, default_value_t = 0)]
    pub page: usize,

    /// Rows per page
    #[arg(long, default_value = "5")]
    pub page_size: NonZeroUsize,
}

impl ListOptions {
    pub(crate) const fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Build the session store and restore any persisted session.
pub(crate) async fn open_store() -> Result<SessionStore, Box<dyn Error>> {
    let config = ClientConfig::from_env()?;
    let client = BackendClient::new(&config);
    let cache = TokenCache::new(config.token_path.clone());
    let mut store = SessionStore::new(client, cache);
    store.initialize().await;
    Ok(store)
}

/// Surface an API failure; a 401 invalidates the session first.
pub(crate) fn surface(store: &mut SessionStore, err: ApiError) -> Box<dyn Error> {
    if err.is_unauthorized() {
        store.invalidate();
        return "session expired; please log in again".into();
    }
    Box::new(err)
}

/// Copy of the claims a command needs after the session borrow ends.
#[derive(Debug, Clone)]
pub(crate) struct Claims {
    pub email: String,
    pub role: outlay_core::RoleKind,
    pub company_id: outlay_core::CompanyId,
    pub employee_id: outlay_core::EmployeeId,
    pub permission_level: outlay_core::PermissionLevel,
    pub token: secrecy::SecretString,
}

/// Require an authenticated session and copy out its claims.
pub(crate) fn require_claims(store: &SessionStore) -> Result<Claims, Box<dyn Error>> {
    let session = authz::require_authenticated(store.current())
        .map_err(|_| "not logged in; run `outlay login` first")?;
    Ok(Claims {
        email: session.email.as_str().to_owned(),
        role: session.role.clone(),
        company_id: session.company_id,
        employee_id: session.employee_id,
        permission_level: session.permission_level,
        token: session.token().clone(),
    })
}

/// Print the pagination footer shared by every listing command.
pub(crate) fn print_page_footer<T>(page: &Page<T>, empty_message: &str) {
    if page.total_items() == 0 {
        println!("{empty_message}");
        return;
    }
    let previous = if page.has_previous() { "<prev" } else { "     " };
    let next = if page.has_next() { "next>" } else { "     " };
    println!(
        "{previous} Page {} of {} {next}",
        page.page_index() + 1,
        page.total_pages()
    );
}

/// Ask the operator to confirm a staged decision. `--yes` answers for them.
pub(crate) fn confirm_prompt(question: &str, assume_yes: bool) -> Result<bool, Box<dyn Error>> {
    if assume_yes {
        return Ok(true);
    }
    print!("{question} [y/N]: ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
