//! User directory administration.

use mart_core::error::MartResult;
use mart_core::models::user::{Role, UpdateProfile, UpsertProfile, UserProfile};
use mart_core::repository::UserRepository;
use tracing::info;
use uuid::Uuid;

pub struct UserDirectory<U: UserRepository> {
    repo: U,
}

impl<U: UserRepository> UserDirectory<U> {
    pub fn new(repo: U) -> Self {
        Self { repo }
    }

    pub async fn get(&self, uid: Uuid) -> MartResult<UserProfile> {
        self.repo.get_by_uid(uid).await
    }

    pub async fn list_all(&self) -> MartResult<Vec<UserProfile>> {
        self.repo.list_all().await
    }

    /// Persist the first-login default (customer, no memberships).
    pub async fn create_initial_profile(
        &self,
        uid: Uuid,
        email: Option<String>,
    ) -> MartResult<UserProfile> {
        let profile = self
            .repo
            .upsert(
                uid,
                UpsertProfile {
                    email,
                    role: Role::Customer,
                    display_name: None,
                },
            )
            .await?;
        info!(uid = %uid, "Initial profile created");
        Ok(profile)
    }

    pub async fn assign_role(&self, uid: Uuid, role: Role) -> MartResult<UserProfile> {
        let profile = self
            .repo
            .update(
                uid,
                UpdateProfile {
                    role: Some(role),
                    ..Default::default()
                },
            )
            .await?;
        info!(uid = %uid, role = %role, "Role assigned");
        Ok(profile)
    }

    /// Grant membership of a business. Customers and staff become
    /// business admins in the same write; other roles are kept.
    pub async fn assign_business(&self, uid: Uuid, business_id: &str) -> MartResult<UserProfile> {
        let profile = self.repo.add_business(uid, business_id).await?;
        info!(uid = %uid, business_id, role = %profile.role, "Business assigned");
        Ok(profile)
    }
}
