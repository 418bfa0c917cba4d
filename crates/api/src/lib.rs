//! Civic backend application library.
//!
//! Exposes the building blocks (config, state, error handling, feature
//! listeners, and the mutating actions) so integration tests and the binary
//! entrypoint can both access them.

pub mod actions;
pub mod config;
pub mod error;
pub mod listeners;
pub mod state;
pub mod telemetry;
