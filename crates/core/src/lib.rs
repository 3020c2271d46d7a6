//! Outlay Core - Shared types library.
//!
//! This crate provides common types used across all Outlay components:
//! - `client` - Headless client core (session, authorization, approval workflow)
//! - `cli` - Command-line surface over the client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, money amounts, and
//!   the request/role enumerations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
