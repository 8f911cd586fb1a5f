//! SurrealDB implementation of [`SettingsRepository`].

use mart_core::error::MartResult;
use mart_core::models::settings::{GlobalSettings, UpdateSettings};
use mart_core::repository::SettingsRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

const SETTINGS_RECORD: &str = "platform_config";

#[derive(Debug, SurrealValue)]
struct SettingsRow {
    allow_public_registration: bool,
    maintenance_mode: bool,
    platform_name: String,
    support_email: String,
}

impl From<SettingsRow> for GlobalSettings {
    fn from(row: SettingsRow) -> Self {
        GlobalSettings {
            allow_public_registration: row.allow_public_registration,
            maintenance_mode: row.maintenance_mode,
            platform_name: row.platform_name,
            support_email: row.support_email,
        }
    }
}

/// SurrealDB implementation of the platform settings store.
#[derive(Clone)]
pub struct SurrealSettingsRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSettingsRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SettingsRepository for SurrealSettingsRepository<C> {
    async fn get(&self) -> MartResult<Option<GlobalSettings>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('platform_settings', $id)")
            .bind(("id", SETTINGS_RECORD))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SettingsRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(GlobalSettings::from))
    }

    async fn merge(&self, input: UpdateSettings) -> MartResult<GlobalSettings> {
        // Fields left unset fall back to the schema defaults on first write.
        let mut sets = Vec::new();
        if input.allow_public_registration.is_some() {
            sets.push("allow_public_registration = $allow_public_registration");
        }
        if input.maintenance_mode.is_some() {
            sets.push("maintenance_mode = $maintenance_mode");
        }
        if input.platform_name.is_some() {
            sets.push("platform_name = $platform_name");
        }
        if input.support_email.is_some() {
            sets.push("support_email = $support_email");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPSERT type::record('platform_settings', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", SETTINGS_RECORD));
        if let Some(v) = input.allow_public_registration {
            builder = builder.bind(("allow_public_registration", v));
        }
        if let Some(v) = input.maintenance_mode {
            builder = builder.bind(("maintenance_mode", v));
        }
        if let Some(v) = input.platform_name {
            builder = builder.bind(("platform_name", v));
        }
        if let Some(v) = input.support_email {
            builder = builder.bind(("support_email", v));
        }

        let mut result = builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        let rows: Vec<SettingsRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "platform_settings".into(),
            id: SETTINGS_RECORD.into(),
        })?;

        Ok(row.into())
    }
}
