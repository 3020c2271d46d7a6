//! Outlay CLI - terminal surface for the expense-reimbursement dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the token is persisted for later invocations)
//! outlay login -e reviewer@example.com -p <password>
//!
//! # Personal dashboard summary
//! outlay dashboard
//!
//! # Browse listings
//! outlay companies list --filter initech --sort name --page 0
//! outlay requests list --sort amount --desc
//!
//! # Review the team queue
//! outlay team list
//! outlay team approve 7
//! outlay team reject 9 --yes
//! ```
//!
//! # Environment Variables
//!
//! - `OUTLAY_API_URL` - Base URL of the expense backend (required)
//! - `OUTLAY_TOKEN_PATH` - Token file location (default: `~/.config/outlay/token`)

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI's product is its stdout.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

use commands::ListOptions;

#[derive(Parser)]
#[command(name = "outlay")]
#[command(author, version, about = "Outlay expense dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the bearer token
    Login {
        /// Login email
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the persisted token
    Logout,
    /// Show the current session's claims and visible screens
    Whoami,
    /// Personal dashboard: request counts and approved totals
    Dashboard,
    /// Company directory (product admin)
    Companies {
        #[command(subcommand)]
        action: CompanyAction,
    },
    /// Role management (company admin)
    Roles {
        #[command(subcommand)]
        action: RoleAction,
    },
    /// Employee roster (company admin)
    Employees {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Your reimbursement requests
    Requests {
        #[command(subcommand)]
        action: RequestAction,
    },
    /// Team approval queue (reviewers)
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },
}

#[derive(Subcommand)]
enum CompanyAction {
    /// List all companies
    List {
        #[command(flatten)]
        options: ListOptions,

        /// Sort key
        #[arg(long, value_enum, default_value_t = commands::companies::CompanySortKey::Name)]
        sort: commands::companies::CompanySortKey,
    },
    /// Create a company together with its admin account
    Create {
        /// Company name
        #[arg(long)]
        name: String,

        /// Street address
        #[arg(long)]
        address: String,

        /// Company contact email
        #[arg(long)]
        contact_email: String,

        /// Email of the person who becomes the company admin
        #[arg(long)]
        admin_email: String,
    },
    /// Show one company's details
    Show {
        /// Company ID (defaults to your own company)
        id: Option<i32>,
    },
}

#[derive(Subcommand)]
enum RoleAction {
    /// List roles
    List {
        #[command(flatten)]
        options: ListOptions,

        /// Sort key
        #[arg(long, value_enum, default_value_t = commands::roles::RoleSortKey::Name)]
        sort: commands::roles::RoleSortKey,
    },
    /// Add a role
    Add {
        /// Role name
        #[arg(long)]
        name: String,

        /// Permission level (> 1 grants team-review authority)
        #[arg(long)]
        level: i32,
    },
    /// Remove a role
    Remove {
        /// Role ID
        id: i32,
    },
}

#[derive(Subcommand)]
enum EmployeeAction {
    /// List the employee roster
    List {
        #[command(flatten)]
        options: ListOptions,
    },
    /// Upload a roster file (CSV)
    Upload {
        /// Path of the roster file
        path: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
enum RequestAction {
    /// List your reimbursement requests
    List {
        #[command(flatten)]
        options: ListOptions,

        /// Sort key
        #[arg(long, value_enum, default_value_t = commands::requests::RequestSortKey::Purpose)]
        sort: commands::requests::RequestSortKey,
    },
    /// Submit a new reimbursement request
    Submit(commands::requests::SubmitArgs),
}

#[derive(Subcommand)]
enum TeamAction {
    /// List your team's requests
    List {
        #[command(flatten)]
        options: ListOptions,
    },
    /// Approve a pending request (asks for confirmation)
    Approve {
        /// Request ID
        id: i32,

        /// Answer the confirmation step with yes
        #[arg(long)]
        yes: bool,
    },
    /// Reject a pending request (asks for confirmation)
    Reject {
        /// Request ID
        id: i32,

        /// Answer the confirmation step with yes
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&email, password).await?,
        Commands::Logout => commands::auth::logout()?,
        Commands::Whoami => commands::auth::whoami().await?,
        Commands::Dashboard => commands::dashboard::summary().await?,
        Commands::Companies { action } => match action {
            CompanyAction::List { options, sort } => {
                commands::companies::list(&options, sort).await?;
            }
            CompanyAction::Create {
                name,
                address,
                contact_email,
                admin_email,
            } => {
                commands::companies::create(&name, &address, &contact_email, &admin_email).await?;
            }
            CompanyAction::Show { id } => commands::companies::show(id).await?,
        },
        Commands::Roles { action } => match action {
            RoleAction::List { options, sort } => commands::roles::list(&options, sort).await?,
            RoleAction::Add { name, level } => commands::roles::add(&name, level).await?,
            RoleAction::Remove { id } => commands::roles::remove(id).await?,
        },
        Commands::Employees { action } => match action {
            EmployeeAction::List { options } => commands::employees::list(&options).await?,
            EmployeeAction::Upload { path } => commands::employees::upload(&path).await?,
        },
        Commands::Requests { action } => match action {
            RequestAction::List { options, sort } => {
                commands::requests::list(&options, sort).await?;
            }
            RequestAction::Submit(args) => commands::requests::submit(args).await?,
        },
        Commands::Team { action } => match action {
            TeamAction::List { options } => commands::team::list(&options).await?,
            TeamAction::Approve { id, yes } => {
                commands::team::decide(id, outlay_core::ApprovalAction::Approve, yes).await?;
            }
            TeamAction::Reject { id, yes } => {
                commands::team::decide(id, outlay_core::ApprovalAction::Reject, yes).await?;
            }
        },
    }
    Ok(())
}
