//! Session management.
//!
//! The session store is the single owner of the authenticated identity:
//! every other component reads derived claims through it and nothing else
//! touches the persisted token.

mod error;
mod store;
mod token;

pub use error::AuthError;
pub use store::{Session, SessionStore};
pub use token::TokenCache;
