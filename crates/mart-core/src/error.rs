//! Error types for the mart platform.

use thiserror::Error;

use crate::models::user::Role;

#[derive(Debug, Error)]
pub enum MartError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("role {role} is not permitted here")]
    Unauthorized { role: Role },

    #[error("session is still being resolved")]
    SessionPending,

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("public registration is disabled")]
    RegistrationClosed,

    #[error("Tenant context missing or invalid")]
    TenantContext,

    #[error("Write rejected: {0}")]
    Write(String),

    #[error("Transient I/O error: {0}")]
    TransientIo(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MartError {
    pub fn not_found(entity: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Both denial kinds send the user back to the login entry point.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Unauthorized { .. })
    }
}

pub type MartResult<T> = Result<T, MartError>;
