//! Mart Auth — credential sign-in, JWT issuance/validation, identity
//! resolution and the per-session tenant context.

pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod password;
pub mod service;
pub mod session;
pub mod token;

pub use config::AuthConfig;
pub use context::SessionContext;
pub use error::AuthError;
pub use identity::IdentityResolver;
pub use service::{AuthService, Credentials, SessionDescriptor};
pub use session::AdminSession;
pub use token::AccessTokenClaims;
