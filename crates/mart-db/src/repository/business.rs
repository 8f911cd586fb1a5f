//! SurrealDB implementation of [`BusinessRepository`].
//!
//! The record id is the derived tenant id, so writing a business whose
//! name normalizes to an existing id replaces that record.

use chrono::{DateTime, Utc};
use mart_core::error::MartResult;
use mart_core::models::business::{Business, PutBusiness, ThemeSettings, UpdateBusiness};
use mart_core::repository::BusinessRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct BusinessRow {
    name: String,
    owner_id: String,
    theme_settings: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BusinessRow {
    fn into_business(self, id: &str) -> Result<Business, DbError> {
        Ok(Business {
            id: id.to_string(),
            name: self.name,
            owner_id: self.owner_id,
            theme_settings: decode_theme(self.theme_settings)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct BusinessRowWithId {
    record_id: String,
    name: String,
    owner_id: String,
    theme_settings: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BusinessRowWithId {
    fn try_into_business(self) -> Result<Business, DbError> {
        Ok(Business {
            id: self.record_id,
            name: self.name,
            owner_id: self.owner_id,
            theme_settings: decode_theme(self.theme_settings)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn decode_theme(value: serde_json::Value) -> Result<ThemeSettings, DbError> {
    serde_json::from_value(value).map_err(|e| DbError::Decode(format!("theme_settings: {e}")))
}

fn encode_theme(theme: &ThemeSettings) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(theme).map_err(|e| DbError::Decode(format!("theme_settings: {e}")))
}

fn first_row(rows: Vec<BusinessRow>, id: &str) -> Result<Business, DbError> {
    let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
        entity: "business".into(),
        id: id.to_string(),
    })?;
    row.into_business(id)
}

/// SurrealDB implementation of the tenant store.
#[derive(Clone)]
pub struct SurrealBusinessRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBusinessRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> BusinessRepository for SurrealBusinessRepository<C> {
    async fn put(&self, input: PutBusiness) -> MartResult<Business> {
        let theme = encode_theme(&input.theme_settings)?;

        // CONTENT replaces the whole document, including created_at.
        let mut result = self
            .db
            .query(
                "UPSERT type::record('business', $id) CONTENT { \
                 name: $name, \
                 owner_id: $owner_id, \
                 theme_settings: $theme_settings, \
                 created_at: time::now(), \
                 updated_at: time::now() }",
            )
            .bind(("id", input.id.clone()))
            .bind(("name", input.name))
            .bind(("owner_id", input.owner_id))
            .bind(("theme_settings", theme))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        let rows: Vec<BusinessRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_row(rows, &input.id)?)
    }

    async fn get_by_id(&self, id: &str) -> MartResult<Business> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('business', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BusinessRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_row(rows, id)?)
    }

    async fn update(&self, id: &str, input: UpdateBusiness) -> MartResult<Business> {
        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.owner_id.is_some() {
            sets.push("owner_id = $owner_id");
        }
        if input.theme_settings.is_some() {
            sets.push("theme_settings = $theme_settings");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('business', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id.to_string()));
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(owner_id) = input.owner_id {
            builder = builder.bind(("owner_id", owner_id));
        }
        if let Some(theme) = input.theme_settings {
            builder = builder.bind(("theme_settings", encode_theme(&theme)?));
        }

        let mut result = builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        let rows: Vec<BusinessRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_row(rows, id)?)
    }

    async fn delete(&self, id: &str) -> MartResult<()> {
        self.db
            .query("DELETE type::record('business', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        Ok(())
    }

    async fn list_all(&self) -> MartResult<Vec<Business>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM business")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BusinessRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_business())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
