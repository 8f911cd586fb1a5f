//! Mart Bootstrap — configuration loading and first-run provisioning
//! used by the `mart-bootstrap` binary.

pub mod config;
pub mod provision;

pub use config::{BootstrapConfig, SuperAdminSeed};
pub use provision::ensure_super_admin;
