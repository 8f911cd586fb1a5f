//! Bootstrap configuration sourced from `MART_*` environment variables.

use std::fs;

use anyhow::{Context, Result, bail};
use mart_auth::AuthConfig;
use mart_db::DbConfig;

/// Credentials of the super admin to provision on start-up.
#[derive(Debug, Clone)]
pub struct SuperAdminSeed {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub super_admin: Option<SuperAdminSeed>,
}

impl BootstrapConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep the
    /// `Default` values of [`DbConfig`] and [`AuthConfig`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut db = DbConfig::default();
        if let Some(v) = lookup("MART_DB_URL") {
            db.url = v;
        }
        if let Some(v) = lookup("MART_DB_NAMESPACE") {
            db.namespace = v;
        }
        if let Some(v) = lookup("MART_DB_DATABASE") {
            db.database = v;
        }
        if let Some(v) = lookup("MART_DB_USER") {
            db.username = v;
        }
        if let Some(v) = lookup("MART_DB_PASSWORD") {
            db.password = v;
        }

        let mut auth = AuthConfig::default();
        if let Some(path) = lookup("MART_JWT_PRIVATE_KEY_FILE") {
            auth.jwt_private_key_pem = fs::read_to_string(&path)
                .with_context(|| format!("read MART_JWT_PRIVATE_KEY_FILE: {path}"))?;
        }
        if let Some(path) = lookup("MART_JWT_PUBLIC_KEY_FILE") {
            auth.jwt_public_key_pem = fs::read_to_string(&path)
                .with_context(|| format!("read MART_JWT_PUBLIC_KEY_FILE: {path}"))?;
        }
        if let Some(v) = lookup("MART_JWT_ISSUER") {
            auth.jwt_issuer = v;
        }
        auth.pepper = lookup("MART_PASSWORD_PEPPER");

        let super_admin = match (
            lookup("MART_SUPER_ADMIN_EMAIL"),
            lookup("MART_SUPER_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(SuperAdminSeed { email, password }),
            (None, None) => None,
            _ => bail!("MART_SUPER_ADMIN_EMAIL and MART_SUPER_ADMIN_PASSWORD must be set together"),
        };

        if super_admin.is_some()
            && (auth.jwt_private_key_pem.is_empty() || auth.jwt_public_key_pem.is_empty())
        {
            bail!("provisioning a super admin requires MART_JWT_PRIVATE_KEY_FILE and MART_JWT_PUBLIC_KEY_FILE");
        }

        Ok(Self {
            db,
            auth,
            super_admin,
        })
    }
}
