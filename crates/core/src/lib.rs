//! Shared domain vocabulary for the civic community backend.
//!
//! This crate has no internal dependencies so it can be used by the data
//! store, the event bus, and the application layer alike.

pub mod error;
pub mod identity;
pub mod roles;
pub mod types;
pub mod validation;
