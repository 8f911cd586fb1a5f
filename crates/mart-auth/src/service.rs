//! Authentication service — sign-up, sign-in, refresh and sign-out
//! against the credential store.

use chrono::{Duration, Utc};
use mart_core::error::{MartError, MartResult};
use mart_core::models::account::CreateAccount;
use mart_core::models::session::CreateAuthSession;
use mart_core::repository::{AccountRepository, SessionRepository};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Email + password pair submitted at sign-up or sign-in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// An authenticated session as handed back to the caller.
#[derive(Debug, Clone)]
pub struct SessionDescriptor {
    pub uid: Uuid,
    pub email: String,
    /// Signed JWT access token.
    pub access_token: String,
    /// Raw opaque refresh token (never stored, only its hash is).
    pub refresh_token: String,
    pub session_id: Uuid,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

fn normalize_email(raw: &str) -> Result<String, AuthError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(AuthError::MissingEmail);
    }
    Ok(email)
}

/// Authentication service.
///
/// Generic over repository implementations so that the auth layer
/// has no dependency on the database crate.
pub struct AuthService<A: AccountRepository, S: SessionRepository> {
    account_repo: A,
    session_repo: S,
    config: AuthConfig,
}

impl<A: AccountRepository, S: SessionRepository> AuthService<A, S> {
    pub fn new(account_repo: A, session_repo: S, config: AuthConfig) -> Self {
        Self {
            account_repo,
            session_repo,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new account and open a session for it. No directory
    /// profile is written; the first resolution falls back to the
    /// first-login default.
    pub async fn sign_up(&self, input: Credentials) -> MartResult<SessionDescriptor> {
        let email = normalize_email(&input.email)?;
        if input.password.chars().count() < self.config.min_password_length {
            return Err(AuthError::WeakPassword {
                min: self.config.min_password_length,
            }
            .into());
        }

        match self.account_repo.get_by_email(&email).await {
            Ok(_) => return Err(AuthError::EmailTaken.into()),
            Err(MartError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let account = self
            .account_repo
            .create(CreateAccount {
                email,
                password: input.password,
            })
            .await?;

        info!(uid = %account.uid, "Account created");
        self.open_session(account.uid, &account.email).await
    }

    /// Authenticate with email + password and issue tokens.
    pub async fn sign_in(&self, input: Credentials) -> MartResult<SessionDescriptor> {
        let email = normalize_email(&input.email)?;

        let account = match self.account_repo.get_by_email(&email).await {
            Ok(a) => a,
            Err(MartError::NotFound { .. }) => return Err(AuthError::InvalidCredentials.into()),
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            &input.password,
            &account.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            warn!(uid = %account.uid, "Sign-in rejected: bad password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let descriptor = self.open_session(account.uid, &account.email).await?;
        info!(uid = %account.uid, session_id = %descriptor.session_id, "Signed in");
        Ok(descriptor)
    }

    /// Rotate a refresh token: consume the old session and issue a new
    /// token pair. Each refresh token is single-use.
    pub async fn refresh(&self, raw_refresh_token: &str) -> MartResult<SessionDescriptor> {
        let token_hash = token::hash_refresh_token(raw_refresh_token);
        let session = self
            .session_repo
            .get_by_token_hash(&token_hash)
            .await
            .map_err(|e| match e {
                MartError::NotFound { .. } => {
                    AuthError::TokenInvalid("refresh token not found or already used".into())
                        .into()
                }
                other => other,
            })?;

        if session.expires_at <= Utc::now() {
            self.session_repo.invalidate(session.id).await?;
            return Err(AuthError::TokenExpired.into());
        }

        self.session_repo.invalidate(session.id).await?;

        let account = self.account_repo.get_by_uid(session.uid).await?;
        self.open_session(account.uid, &account.email).await
    }

    /// Invalidate a single session.
    pub async fn sign_out(&self, session_id: Uuid) -> MartResult<()> {
        self.session_repo.invalidate(session_id).await?;
        info!(session_id = %session_id, "Signed out");
        Ok(())
    }

    /// Revoke every session of one account.
    pub async fn revoke_all_sessions(&self, uid: Uuid) -> MartResult<()> {
        self.session_repo.invalidate_user_sessions(uid).await
    }

    async fn open_session(&self, uid: Uuid, email: &str) -> MartResult<SessionDescriptor> {
        let raw_refresh = token::generate_refresh_token();
        let token_hash = token::hash_refresh_token(&raw_refresh);
        let expires_at =
            Utc::now() + Duration::seconds(self.config.refresh_token_lifetime_secs as i64);

        let session = self
            .session_repo
            .create(CreateAuthSession {
                uid,
                token_hash,
                expires_at,
            })
            .await?;

        let access_token = token::issue_access_token(uid, email, session.id, &self.config)?;

        Ok(SessionDescriptor {
            uid,
            email: email.to_string(),
            access_token,
            refresh_token: raw_refresh,
            session_id: session.id,
            expires_in: self.config.access_token_lifetime_secs,
        })
    }
}
