//! SurrealDB implementation of [`AccountRepository`].
//!
//! Passwords are hashed with Argon2id (memory 19 MiB, 2 iterations,
//! parallelism 1) and a random per-hash salt. An optional pepper is
//! prepended before hashing.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use chrono::{DateTime, Utc};
use mart_core::error::MartResult;
use mart_core::models::account::{Account, CreateAccount};
use mart_core::repository::AccountRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, parse_uuid};

/// Row for queries where the uid is already known.
#[derive(Debug, SurrealValue)]
struct AccountRow {
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self, uid: Uuid) -> Account {
        Account {
            uid,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}

/// Row that carries the record id via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct AccountRowWithId {
    record_id: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRowWithId {
    fn try_into_account(self) -> Result<Account, DbError> {
        Ok(Account {
            uid: parse_uuid("account", &self.record_id)?,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
        })
    }
}

fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, DbError> {
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Hash(format!("argon2 params: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| DbError::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

/// SurrealDB implementation of the credential store.
#[derive(Clone)]
pub struct SurrealAccountRepository<C: Connection> {
    db: Surreal<C>,
    pepper: Option<String>,
}

impl<C: Connection> SurrealAccountRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }
}

impl<C: Connection> AccountRepository for SurrealAccountRepository<C> {
    async fn create(&self, input: CreateAccount) -> MartResult<Account> {
        let uid = Uuid::new_v4();
        let password_hash = hash_password(&input.password, self.pepper.as_deref())?;

        let result = self
            .db
            .query(
                "CREATE type::record('account', $id) SET \
                 email = $email, password_hash = $password_hash",
            )
            .bind(("id", uid.to_string()))
            .bind(("email", input.email))
            .bind(("password_hash", password_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: uid.to_string(),
        })?;

        Ok(row.into_account(uid))
    }

    async fn get_by_uid(&self, uid: Uuid) -> MartResult<Account> {
        let id_str = uid.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('account', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: id_str,
        })?;

        Ok(row.into_account(uid))
    }

    async fn get_by_email(&self, email: &str) -> MartResult<Account> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM account WHERE email = $email")
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: format!("email={email}"),
        })?;

        Ok(row.try_into_account()?)
    }
}
