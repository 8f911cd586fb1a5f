//! Mart Database — SurrealDB connection management and repository
//! implementations.
//!
//! This crate provides:
//! - A migrated store handle that hands out repositories ([`MartStore`],
//!   [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Error types ([`DbError`])
//! - Repository implementations for the `mart-core` traits
//!   ([`repository`])

mod error;
pub mod repository;
mod schema;
mod store;

pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
pub use store::{DbConfig, MartStore};
