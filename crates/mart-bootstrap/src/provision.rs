//! First-run provisioning of a super admin account.

use mart_auth::service::{AuthService, Credentials};
use mart_core::error::{MartError, MartResult};
use mart_core::models::user::{Role, UpsertProfile, UserProfile};
use mart_core::repository::{AccountRepository, SessionRepository, UserRepository};
use tracing::info;

use crate::config::SuperAdminSeed;

/// Make sure `seed` exists as an account with a `super_admin` profile.
///
/// An existing account must accept the configured password. The session
/// opened while provisioning is closed again before returning.
pub async fn ensure_super_admin<A, S, U>(
    auth: &AuthService<A, S>,
    users: &U,
    seed: &SuperAdminSeed,
) -> MartResult<UserProfile>
where
    A: AccountRepository,
    S: SessionRepository,
    U: UserRepository,
{
    let credentials = Credentials::new(seed.email.clone(), seed.password.clone());
    let session = match auth.sign_up(credentials.clone()).await {
        Ok(session) => session,
        Err(MartError::AlreadyExists { .. }) => auth.sign_in(credentials).await?,
        Err(e) => return Err(e),
    };

    let profile = users
        .upsert(
            session.uid,
            UpsertProfile {
                email: Some(session.email.clone()),
                role: Role::SuperAdmin,
                display_name: None,
            },
        )
        .await?;

    auth.sign_out(session.session_id).await?;
    info!(uid = %profile.uid, "Super admin provisioned");
    Ok(profile)
}
