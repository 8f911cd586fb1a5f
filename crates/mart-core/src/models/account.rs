//! Credential account held by the identity provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Stable identifier handed to every other subsystem.
    pub uid: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    pub email: String,
    /// Raw password (hashed with Argon2id before storage).
    pub password: String,
}
