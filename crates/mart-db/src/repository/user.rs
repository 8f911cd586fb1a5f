//! SurrealDB implementation of [`UserRepository`].

use chrono::{DateTime, Utc};
use mart_core::error::MartResult;
use mart_core::models::user::{Role, UpdateProfile, UpsertProfile, UserProfile};
use mart_core::repository::UserRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, parse_uuid};

/// Row for queries where the uid is already known.
#[derive(Debug, SurrealValue)]
struct ProfileRow {
    email: Option<String>,
    role: String,
    business_ids: Vec<String>,
    active_business_id: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Row that carries the record id via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ProfileRowWithId {
    record_id: String,
    email: Option<String>,
    role: String,
    business_ids: Vec<String>,
    active_business_id: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_role(raw: &str) -> Result<Role, DbError> {
    raw.parse::<Role>()
        .map_err(|_| DbError::Decode(format!("unknown role: {raw}")))
}

impl ProfileRow {
    fn into_profile(self, uid: Uuid) -> Result<UserProfile, DbError> {
        Ok(UserProfile {
            uid,
            email: self.email,
            role: parse_role(&self.role)?,
            business_ids: self.business_ids,
            active_business_id: self.active_business_id,
            display_name: self.display_name,
            photo_url: self.photo_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ProfileRowWithId {
    fn try_into_profile(self) -> Result<UserProfile, DbError> {
        Ok(UserProfile {
            uid: parse_uuid("user", &self.record_id)?,
            email: self.email,
            role: parse_role(&self.role)?,
            business_ids: self.business_ids,
            active_business_id: self.active_business_id,
            display_name: self.display_name,
            photo_url: self.photo_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the user directory.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// The single row returned by a statement addressed to `uid`.
    fn single(rows: Vec<ProfileRow>, uid: Uuid) -> Result<UserProfile, DbError> {
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: uid.to_string(),
        })?;
        row.into_profile(uid)
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn get_by_uid(&self, uid: Uuid) -> MartResult<UserProfile> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", uid.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProfileRow> = result.take(0).map_err(DbError::from)?;
        Ok(Self::single(rows, uid)?)
    }

    async fn upsert(&self, uid: Uuid, input: UpsertProfile) -> MartResult<UserProfile> {
        let mut sets = vec!["role = $role"];
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.display_name.is_some() {
            sets.push("display_name = $display_name");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPSERT type::record('user', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", uid.to_string()))
            .bind(("role", input.role.as_str().to_string()));
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        if let Some(display_name) = input.display_name {
            builder = builder.bind(("display_name", display_name));
        }

        let mut result = builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        let rows: Vec<ProfileRow> = result.take(0).map_err(DbError::from)?;
        Ok(Self::single(rows, uid)?)
    }

    async fn update(&self, uid: Uuid, input: UpdateProfile) -> MartResult<UserProfile> {
        let mut sets = Vec::new();
        if input.role.is_some() {
            sets.push("role = $role");
        }
        if input.business_ids.is_some() {
            sets.push("business_ids = $business_ids");
        }
        if input.active_business_id.is_some() {
            sets.push("active_business_id = $active_business_id");
        }
        if input.display_name.is_some() {
            sets.push("display_name = $display_name");
        }
        if input.photo_url.is_some() {
            sets.push("photo_url = $photo_url");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('user', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", uid.to_string()));
        if let Some(role) = input.role {
            builder = builder.bind(("role", role.as_str().to_string()));
        }
        if let Some(business_ids) = input.business_ids {
            builder = builder.bind(("business_ids", business_ids));
        }
        if let Some(active) = input.active_business_id {
            builder = builder.bind(("active_business_id", active));
        }
        if let Some(display_name) = input.display_name {
            builder = builder.bind(("display_name", display_name));
        }
        if let Some(photo_url) = input.photo_url {
            builder = builder.bind(("photo_url", photo_url));
        }

        let mut result = builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        let rows: Vec<ProfileRow> = result.take(0).map_err(DbError::from)?;
        Ok(Self::single(rows, uid)?)
    }

    async fn add_business(&self, uid: Uuid, business_id: &str) -> MartResult<UserProfile> {
        let mut result = self
            .db
            .query(
                "UPDATE type::record('user', $id) SET \
                 business_ids = array::union(business_ids, [$business_id]), \
                 role = IF role IN ['customer', 'staff'] THEN 'business_admin' ELSE role END, \
                 updated_at = time::now()",
            )
            .bind(("id", uid.to_string()))
            .bind(("business_id", business_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        let rows: Vec<ProfileRow> = result.take(0).map_err(DbError::from)?;
        Ok(Self::single(rows, uid)?)
    }

    async fn list_all(&self) -> MartResult<Vec<UserProfile>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM user")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProfileRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_profile())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
