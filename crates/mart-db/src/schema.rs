//! Schema definitions and migration runner for SurrealDB.
//!
//! All tables are SCHEMAFULL. UUIDs are stored as strings and enums as
//! strings with ASSERT constraints. Records that have a natural key
//! (uid, tenant id) use it as the record id.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Accounts (identity provider credentials, record id = uid)
-- =======================================================================
DEFINE TABLE account SCHEMAFULL;
DEFINE FIELD email ON TABLE account TYPE string;
DEFINE FIELD password_hash ON TABLE account TYPE string;
DEFINE FIELD created_at ON TABLE account TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_account_email ON TABLE account COLUMNS email UNIQUE;

-- =======================================================================
-- Auth sessions (one per sign-in, rotated on refresh)
-- =======================================================================
DEFINE TABLE auth_session SCHEMAFULL;
DEFINE FIELD uid ON TABLE auth_session TYPE string;
DEFINE FIELD token_hash ON TABLE auth_session TYPE string;
DEFINE FIELD expires_at ON TABLE auth_session TYPE datetime;
DEFINE FIELD created_at ON TABLE auth_session TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_auth_session_token ON TABLE auth_session \
    COLUMNS token_hash UNIQUE;
DEFINE INDEX idx_auth_session_uid ON TABLE auth_session COLUMNS uid;

-- =======================================================================
-- User profiles (directory, record id = uid)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE option<string>;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['super_admin', 'business_admin', 'staff', \
    'customer'];
DEFINE FIELD business_ids ON TABLE user TYPE array<string> DEFAULT [];
DEFINE FIELD active_business_id ON TABLE user TYPE option<string>;
DEFINE FIELD display_name ON TABLE user TYPE option<string>;
DEFINE FIELD photo_url ON TABLE user TYPE option<string>;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Businesses (tenants, record id = derived tenant id)
-- =======================================================================
DEFINE TABLE business SCHEMAFULL;
DEFINE FIELD name ON TABLE business TYPE string;
DEFINE FIELD owner_id ON TABLE business TYPE string;
DEFINE FIELD theme_settings ON TABLE business TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD created_at ON TABLE business TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE business TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Products (tenant scope)
-- =======================================================================
DEFINE TABLE product SCHEMAFULL;
DEFINE FIELD business_id ON TABLE product TYPE string;
DEFINE FIELD name ON TABLE product TYPE string;
DEFINE FIELD description ON TABLE product TYPE string DEFAULT '';
DEFINE FIELD price ON TABLE product TYPE float ASSERT $value >= 0;
DEFINE FIELD stock ON TABLE product TYPE int ASSERT $value >= 0;
DEFINE FIELD category ON TABLE product TYPE string DEFAULT '';
DEFINE FIELD images ON TABLE product TYPE array<string> DEFAULT [];
DEFINE FIELD created_at ON TABLE product TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE product TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_product_business ON TABLE product COLUMNS business_id;

-- =======================================================================
-- Platform settings (single record `platform_config`)
-- =======================================================================
DEFINE TABLE platform_settings SCHEMAFULL;
DEFINE FIELD allow_public_registration ON TABLE platform_settings \
    TYPE bool DEFAULT true;
DEFINE FIELD maintenance_mode ON TABLE platform_settings \
    TYPE bool DEFAULT false;
DEFINE FIELD platform_name ON TABLE platform_settings TYPE string \
    DEFAULT 'Antigravity Mart';
DEFINE FIELD support_email ON TABLE platform_settings TYPE string \
    DEFAULT 'support@mart.com';
DEFINE FIELD updated_at ON TABLE platform_settings TYPE datetime \
    DEFAULT time::now();
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "Migration v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

        info!(version = migration.version, "Migration applied");
    }

    Ok(())
}

/// Raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
