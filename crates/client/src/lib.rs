//! Outlay Client - headless core of the expense-reimbursement dashboard.
//!
//! Every surface (today the CLI, tomorrow anything else) goes through this
//! crate: it owns the authenticated session, decides what the current
//! identity may see and do, drives the approval workflow, and shapes listing
//! data. Rendering and the HTTP backend itself are external collaborators.
//!
//! # Modules
//!
//! - [`config`] - environment-driven client configuration
//! - [`api`] - typed REST client for the expense backend
//! - [`session`] - session store: token persistence, login, logout, startup
//!   validation
//! - [`authz`] - pure authorization decisions derived from session claims
//! - [`workflow`] - the approval lifecycle engine (stage, confirm, reconcile)
//! - [`listing`] - the shared filter / sort / paginate contract

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod authz;
pub mod config;
pub mod listing;
pub mod session;
pub mod workflow;

pub use api::{ApiError, BackendClient};
pub use config::{ClientConfig, ConfigError};
pub use session::{AuthError, Session, SessionStore, TokenCache};
pub use workflow::{ApprovalBackend, ApprovalWorkflow, ConfirmOutcome, IntentState, WorkflowError};
