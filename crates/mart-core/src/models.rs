//! Domain models for the mart platform.

pub mod account;
pub mod business;
pub mod principal;
pub mod product;
pub mod session;
pub mod settings;
pub mod user;
