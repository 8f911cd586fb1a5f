//! Database-specific error types and conversions.

use mart_core::error::MartError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Statement rejected: {0}")]
    Rejected(String),

    #[error("Malformed record: {0}")]
    Decode(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for MartError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => MartError::NotFound { entity, id },
            DbError::Rejected(msg) => MartError::Write(msg),
            DbError::Hash(msg) => MartError::Crypto(msg),
            DbError::Decode(msg) | DbError::Migration(msg) => MartError::Internal(msg),
            DbError::Surreal(e) => MartError::TransientIo(e.to_string()),
        }
    }
}

pub(crate) fn parse_uuid(field: &str, raw: &str) -> Result<uuid::Uuid, DbError> {
    uuid::Uuid::parse_str(raw).map_err(|e| DbError::Decode(format!("invalid {field} UUID: {e}")))
}
