//! SurrealDB implementation of [`SessionRepository`].

use chrono::{DateTime, Utc};
use mart_core::error::MartResult;
use mart_core::models::session::{AuthSession, CreateAuthSession};
use mart_core::repository::SessionRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, parse_uuid};

#[derive(Debug, SurrealValue)]
struct SessionRow {
    uid: String,
    token_hash: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self, id: Uuid) -> Result<AuthSession, DbError> {
        Ok(AuthSession {
            id,
            uid: parse_uuid("uid", &self.uid)?,
            token_hash: self.token_hash,
            expires_at: self.expires_at,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct SessionRowWithId {
    record_id: String,
    uid: String,
    token_hash: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl SessionRowWithId {
    fn try_into_session(self) -> Result<AuthSession, DbError> {
        Ok(AuthSession {
            id: parse_uuid("session", &self.record_id)?,
            uid: parse_uuid("uid", &self.uid)?,
            token_hash: self.token_hash,
            expires_at: self.expires_at,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the session store.
#[derive(Clone)]
pub struct SurrealSessionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSessionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SessionRepository for SurrealSessionRepository<C> {
    async fn create(&self, input: CreateAuthSession) -> MartResult<AuthSession> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('auth_session', $id) SET \
                 uid = $uid, \
                 token_hash = $token_hash, \
                 expires_at = $expires_at",
            )
            .bind(("id", id_str.clone()))
            .bind(("uid", input.uid.to_string()))
            .bind(("token_hash", input.token_hash))
            .bind(("expires_at", input.expires_at))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "auth_session".into(),
            id: id_str,
        })?;

        Ok(row.into_session(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> MartResult<AuthSession> {
        let id_str = id.to_string();
        let mut result = self
            .db
            .query("SELECT * FROM type::record('auth_session', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "auth_session".into(),
            id: id_str,
        })?;

        Ok(row.into_session(id)?)
    }

    async fn get_by_token_hash(&self, token_hash: &str) -> MartResult<AuthSession> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM auth_session \
                 WHERE token_hash = $token_hash",
            )
            .bind(("token_hash", token_hash.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "auth_session".into(),
            id: "token_hash".into(),
        })?;

        Ok(row.try_into_session()?)
    }

    async fn invalidate(&self, id: Uuid) -> MartResult<()> {
        debug!(session_id = %id, "Invalidating session");
        self.db
            .query("DELETE type::record('auth_session', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        Ok(())
    }

    async fn invalidate_user_sessions(&self, uid: Uuid) -> MartResult<()> {
        self.db
            .query("DELETE auth_session WHERE uid = $uid")
            .bind(("uid", uid.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        Ok(())
    }
}
