//! Mart Bootstrap — prepares a SurrealDB instance for the platform.

use anyhow::Context;
use mart_auth::AuthService;
use mart_bootstrap::{BootstrapConfig, ensure_super_admin};
use mart_db::MartStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mart=info".parse()?))
        .json()
        .init();

    let config = BootstrapConfig::from_env().context("load bootstrap configuration")?;

    let store = MartStore::open(&config.db)
        .await
        .context("open marketplace store")?
        .with_pepper(config.auth.pepper.clone());

    if let Some(seed) = &config.super_admin {
        let auth = AuthService::new(store.accounts(), store.sessions(), config.auth.clone());
        ensure_super_admin(&auth, &store.users(), seed)
            .await
            .context("provision super admin")?;
    }

    tracing::info!("Bootstrap complete");
    Ok(())
}
