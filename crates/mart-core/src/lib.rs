//! Mart Core — domain models, error types, repository traits and the
//! role gate shared by every other crate.

pub mod access;
pub mod catalog;
pub mod error;
pub mod models;
pub mod repository;
pub mod tenant_id;
