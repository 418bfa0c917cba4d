//! In-process data store for the civic backend.
//!
//! The hosted relational database (with per-city row isolation) is an
//! external collaborator. This crate stands in for it with the same
//! repository surface: one `*Repo` struct per table, each exposing
//! `async fn`s that take a [`DbPool`] and enforce the table's unique
//! constraints.

pub mod models;
pub mod repositories;

mod pool;

pub use pool::{create_pool, DbError, DbPool};
