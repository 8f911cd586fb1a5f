//! Mart Console — the services behind the admin dashboard and the
//! public storefront.
//!
//! The directory and catalog services trust their caller: role checks
//! happen in [`AdminConsole`], tenant scoping comes from the session's
//! active tenant.

pub mod catalog;
pub mod console;
pub mod directory;
pub mod settings;
pub mod storefront;
pub mod users;

pub use catalog::CatalogStore;
pub use console::AdminConsole;
pub use directory::TenantDirectory;
pub use settings::PlatformSettingsService;
pub use storefront::{Storefront, StorefrontPage};
pub use users::UserDirectory;
