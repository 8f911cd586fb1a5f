//! The marketplace store: one migrated SurrealDB handle that hands out
//! every repository over the same connection.

use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;
use crate::repository::{
    SurrealAccountRepository, SurrealBusinessRepository, SurrealProductRepository,
    SurrealSessionRepository, SurrealSettingsRepository, SurrealUserRepository,
};
use crate::schema::run_migrations;

/// Where the store lives and how to sign in to it.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket address, `host:port`.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "mart".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

#[derive(Clone)]
pub struct MartStore<C: Connection> {
    db: Surreal<C>,
    pepper: Option<String>,
}

impl MartStore<Client> {
    /// Connect to a remote instance as root, then [`attach`](Self::attach).
    pub async fn open(config: &DbConfig) -> Result<Self, DbError> {
        info!(url = %config.url, "Opening marketplace store");

        let db = Surreal::new::<Ws>(&config.url).await?;
        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        Self::attach(db, &config.namespace, &config.database).await
    }
}

impl<C: Connection> MartStore<C> {
    /// Select the namespace and database on an existing handle and bring
    /// the schema up to date. Safe to repeat against the same database.
    pub async fn attach(
        db: Surreal<C>,
        namespace: &str,
        database: &str,
    ) -> Result<Self, DbError> {
        db.use_ns(namespace).use_db(database).await?;
        run_migrations(&db).await?;
        info!(namespace, database, "Marketplace store ready");

        Ok(Self { db, pepper: None })
    }

    /// Secret prepended to passwords by [`accounts`](Self::accounts).
    pub fn with_pepper(mut self, pepper: Option<String>) -> Self {
        self.pepper = pepper;
        self
    }

    pub fn accounts(&self) -> SurrealAccountRepository<C> {
        match &self.pepper {
            Some(pepper) => SurrealAccountRepository::with_pepper(self.db.clone(), pepper.clone()),
            None => SurrealAccountRepository::new(self.db.clone()),
        }
    }

    pub fn sessions(&self) -> SurrealSessionRepository<C> {
        SurrealSessionRepository::new(self.db.clone())
    }

    pub fn users(&self) -> SurrealUserRepository<C> {
        SurrealUserRepository::new(self.db.clone())
    }

    pub fn businesses(&self) -> SurrealBusinessRepository<C> {
        SurrealBusinessRepository::new(self.db.clone())
    }

    pub fn products(&self) -> SurrealProductRepository<C> {
        SurrealProductRepository::new(self.db.clone())
    }

    pub fn settings(&self) -> SurrealSettingsRepository<C> {
        SurrealSettingsRepository::new(self.db.clone())
    }

    pub fn client(&self) -> &Surreal<C> {
        &self.db
    }
}
