//! Identity resolution: access token → [`Principal`].

use chrono::Utc;
use mart_core::error::{MartError, MartResult};
use mart_core::models::principal::Principal;
use mart_core::repository::{SessionRepository, UserRepository};
use tracing::debug;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token;

/// Resolves the holder of an access token against the session store
/// and the user directory.
pub struct IdentityResolver<U: UserRepository, S: SessionRepository> {
    user_repo: U,
    session_repo: S,
    config: AuthConfig,
}

impl<U: UserRepository, S: SessionRepository> IdentityResolver<U, S> {
    pub fn new(user_repo: U, session_repo: S, config: AuthConfig) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// `Ok(None)` means unauthenticated: no token, one that is expired
    /// or fails verification, or one whose session was signed out,
    /// revoked or has lapsed.
    ///
    /// A verified token whose uid has no directory profile yields the
    /// first-login default (customer, no memberships). Nothing is
    /// written back.
    pub async fn resolve(&self, access_token: Option<&str>) -> MartResult<Option<Principal>> {
        let Some(access_token) = access_token else {
            return Ok(None);
        };

        let claims = match token::decode_access_token(access_token, &self.config) {
            Ok(claims) => claims,
            Err(AuthError::TokenExpired) | Err(AuthError::TokenInvalid(_)) => {
                debug!("Access token rejected during resolution");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let Ok(uid) = Uuid::parse_str(&claims.sub) else {
            debug!("Access token subject is not a uid");
            return Ok(None);
        };

        if !self.session_is_live(&claims.sid, uid).await? {
            debug!(uid = %uid, "Access token session is no longer live");
            return Ok(None);
        }

        match self.user_repo.get_by_uid(uid).await {
            Ok(profile) => {
                debug!(uid = %uid, role = %profile.role, "Resolved stored profile");
                Ok(Some(Principal::from_profile(profile, Some(claims.email))))
            }
            Err(MartError::NotFound { .. }) => {
                debug!(uid = %uid, "No profile yet, using first-login default");
                Ok(Some(Principal::first_login(uid, Some(claims.email))))
            }
            Err(e) => Err(e),
        }
    }

    async fn session_is_live(&self, sid: &str, uid: Uuid) -> MartResult<bool> {
        let Ok(session_id) = Uuid::parse_str(sid) else {
            return Ok(false);
        };

        match self.session_repo.get_by_id(session_id).await {
            Ok(session) => Ok(session.uid == uid && session.expires_at > Utc::now()),
            Err(MartError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
