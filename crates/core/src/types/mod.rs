//! Core types for Outlay.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::Money;
pub use role::{PermissionLevel, RoleKind};
pub use status::{ApprovalAction, RequestStatus};
