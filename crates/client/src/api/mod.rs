//! Typed REST client for the expense backend.
//!
//! The backend is the system of record for companies, roles, employees, and
//! reimbursement requests; this module is the only place HTTP is spoken.
//! Wire shapes follow the backend exactly, casing quirks included.

mod client;
mod error;
pub mod types;

pub use client::BackendClient;
pub use error::ApiError;
