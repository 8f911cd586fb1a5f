//! Authentication error types.

use mart_core::error::MartError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("email must not be empty")]
    MissingEmail,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for MartError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => MartError::Unauthenticated,
            AuthError::EmailTaken => MartError::AlreadyExists {
                entity: "account".into(),
            },
            AuthError::WeakPassword { .. } | AuthError::MissingEmail => {
                MartError::validation(err.to_string())
            }
            AuthError::Crypto(msg) => MartError::Crypto(msg),
        }
    }
}
