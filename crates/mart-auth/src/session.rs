//! Admin session driver: ties credential operations to identity
//! resolution and publishes each outcome on a [`SessionContext`].

use mart_core::error::{MartError, MartResult};
use mart_core::models::principal::Principal;
use mart_core::repository::{
    AccountRepository, SessionRepository, SettingsRepository, UserRepository,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::context::SessionContext;
use crate::identity::IdentityResolver;
use crate::service::{AuthService, Credentials, SessionDescriptor};

pub struct AdminSession<A, S, U, G>
where
    A: AccountRepository,
    S: SessionRepository,
    U: UserRepository,
    G: SettingsRepository,
{
    auth: AuthService<A, S>,
    resolver: IdentityResolver<U, S>,
    settings: G,
    context: SessionContext,
    current: Mutex<Option<SessionDescriptor>>,
}

impl<A, S, U, G> AdminSession<A, S, U, G>
where
    A: AccountRepository,
    S: SessionRepository,
    U: UserRepository,
    G: SettingsRepository,
{
    pub fn new(
        auth: AuthService<A, S>,
        resolver: IdentityResolver<U, S>,
        settings: G,
        context: SessionContext,
    ) -> Self {
        Self {
            auth,
            resolver,
            settings,
            context,
            current: Mutex::new(None),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Initial bootstrap: no remote session is held yet, so this
    /// publishes `Unauthenticated`.
    pub async fn start(&self) -> MartResult<()> {
        self.context.begin_resolution();
        let current = self.current.lock().await;
        let token = current.as_ref().map(|d| d.access_token.as_str());
        match self.resolver.resolve(token).await {
            Ok(Some(principal)) => self.context.establish(principal),
            Ok(None) => self.context.clear(),
            Err(e) => {
                self.context.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Any session already held is revoked first, so a failed attempt
    /// leaves nothing behind for [`refresh`](Self::refresh) to revive.
    pub async fn sign_in(&self, credentials: Credentials) -> MartResult<Principal> {
        self.context.begin_resolution();
        self.release_held().await;
        let descriptor = match self.auth.sign_in(credentials).await {
            Ok(d) => d,
            Err(e) => {
                self.context.clear();
                return Err(e);
            }
        };
        self.adopt(descriptor).await
    }

    /// Register and sign in, unless platform settings close public
    /// registration.
    pub async fn sign_up(&self, credentials: Credentials) -> MartResult<Principal> {
        let settings = self.settings.get().await?.unwrap_or_default();
        if !settings.allow_public_registration {
            warn!("Sign-up refused: public registration is disabled");
            return Err(MartError::RegistrationClosed);
        }

        self.context.begin_resolution();
        self.release_held().await;
        let descriptor = match self.auth.sign_up(credentials).await {
            Ok(d) => d,
            Err(e) => {
                self.context.clear();
                return Err(e);
            }
        };
        self.adopt(descriptor).await
    }

    /// Rotate the held refresh token and re-resolve the principal, so
    /// role or membership changes made since sign-in take effect.
    pub async fn refresh(&self) -> MartResult<Principal> {
        let held = self.current.lock().await.take();
        let Some(held) = held else {
            self.context.clear();
            return Err(MartError::Unauthenticated);
        };

        self.context.begin_resolution();
        let descriptor = match self.auth.refresh(&held.refresh_token).await {
            Ok(d) => d,
            Err(e) => {
                self.context.clear();
                return Err(e);
            }
        };
        self.adopt(descriptor).await
    }

    /// Revoke the remote session and clear the context. The context is
    /// cleared even when revocation fails.
    pub async fn sign_out(&self) -> MartResult<()> {
        let held = self.current.lock().await.take();
        self.context.clear();
        if let Some(held) = held {
            self.auth.sign_out(held.session_id).await?;
            info!(uid = %held.uid, "Admin session closed");
        }
        Ok(())
    }

    async fn adopt(&self, descriptor: SessionDescriptor) -> MartResult<Principal> {
        let resolved = self
            .resolver
            .resolve(Some(descriptor.access_token.as_str()))
            .await;

        match resolved {
            Ok(Some(principal)) => {
                let session_id = descriptor.session_id;
                let replaced = self.current.lock().await.replace(descriptor);
                if let Some(replaced) = replaced.filter(|r| r.session_id != session_id) {
                    self.revoke(replaced).await;
                }
                self.context.establish(principal.clone());
                Ok(principal)
            }
            Ok(None) => {
                self.context.clear();
                Err(MartError::Unauthenticated)
            }
            Err(e) => {
                self.context.clear();
                Err(e)
            }
        }
    }

    async fn release_held(&self) {
        let held = self.current.lock().await.take();
        if let Some(held) = held {
            self.revoke(held).await;
        }
    }

    /// Best effort: a session that cannot be deleted now still lapses
    /// at its expiry.
    async fn revoke(&self, held: SessionDescriptor) {
        if let Err(e) = self.auth.sign_out(held.session_id).await {
            warn!(
                uid = %held.uid,
                session_id = %held.session_id,
                error = %e,
                "Failed to revoke replaced session"
            );
        }
    }
}
