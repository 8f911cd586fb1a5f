//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Product operations take the
//! owning `business_id` on every call; there is no cross-tenant listing.

use uuid::Uuid;

use crate::error::MartResult;
use crate::models::{
    account::{Account, CreateAccount},
    business::{Business, PutBusiness, UpdateBusiness},
    product::{CreateProduct, Product, UpdateProduct},
    session::{AuthSession, CreateAuthSession},
    settings::{GlobalSettings, UpdateSettings},
    user::{UpdateProfile, UpsertProfile, UserProfile},
};

// ---------------------------------------------------------------------------
// Identity provider
// ---------------------------------------------------------------------------

pub trait AccountRepository: Send + Sync {
    fn create(&self, input: CreateAccount) -> impl Future<Output = MartResult<Account>> + Send;
    fn get_by_uid(&self, uid: Uuid) -> impl Future<Output = MartResult<Account>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = MartResult<Account>> + Send;
}

pub trait SessionRepository: Send + Sync {
    fn create(
        &self,
        input: CreateAuthSession,
    ) -> impl Future<Output = MartResult<AuthSession>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = MartResult<AuthSession>> + Send;
    fn get_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = MartResult<AuthSession>> + Send;
    /// Remove a single session (logout or refresh rotation).
    fn invalidate(&self, id: Uuid) -> impl Future<Output = MartResult<()>> + Send;
    fn invalidate_user_sessions(&self, uid: Uuid) -> impl Future<Output = MartResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Directory (global scope)
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    fn get_by_uid(&self, uid: Uuid) -> impl Future<Output = MartResult<UserProfile>> + Send;
    /// Create or merge-update the profile stored under `uid`.
    fn upsert(
        &self,
        uid: Uuid,
        input: UpsertProfile,
    ) -> impl Future<Output = MartResult<UserProfile>> + Send;
    fn update(
        &self,
        uid: Uuid,
        input: UpdateProfile,
    ) -> impl Future<Output = MartResult<UserProfile>> + Send;
    /// Add a tenant id to `business_ids` (set union) and, in the same
    /// write, promote a customer or staff member to business admin.
    fn add_business(
        &self,
        uid: Uuid,
        business_id: &str,
    ) -> impl Future<Output = MartResult<UserProfile>> + Send;
    fn list_all(&self) -> impl Future<Output = MartResult<Vec<UserProfile>>> + Send;
}

pub trait BusinessRepository: Send + Sync {
    /// Write the whole record under `input.id`, replacing any existing one.
    fn put(&self, input: PutBusiness) -> impl Future<Output = MartResult<Business>> + Send;
    fn get_by_id(&self, id: &str) -> impl Future<Output = MartResult<Business>> + Send;
    fn update(
        &self,
        id: &str,
        input: UpdateBusiness,
    ) -> impl Future<Output = MartResult<Business>> + Send;
    /// Removes the business record only; its products stay behind.
    fn delete(&self, id: &str) -> impl Future<Output = MartResult<()>> + Send;
    /// Store-native order.
    fn list_all(&self) -> impl Future<Output = MartResult<Vec<Business>>> + Send;
}

pub trait SettingsRepository: Send + Sync {
    /// `None` when the settings record was never written.
    fn get(&self) -> impl Future<Output = MartResult<Option<GlobalSettings>>> + Send;
    fn merge(
        &self,
        input: UpdateSettings,
    ) -> impl Future<Output = MartResult<GlobalSettings>> + Send;
}

// ---------------------------------------------------------------------------
// Tenant-scoped repositories
// ---------------------------------------------------------------------------

pub trait ProductRepository: Send + Sync {
    fn create(
        &self,
        business_id: &str,
        input: CreateProduct,
    ) -> impl Future<Output = MartResult<Product>> + Send;
    fn get_by_id(
        &self,
        business_id: &str,
        id: Uuid,
    ) -> impl Future<Output = MartResult<Product>> + Send;
    fn update(
        &self,
        business_id: &str,
        id: Uuid,
        input: UpdateProduct,
    ) -> impl Future<Output = MartResult<Product>> + Send;
    fn delete(&self, business_id: &str, id: Uuid) -> impl Future<Output = MartResult<()>> + Send;
    /// All products of one business, unordered.
    fn list(&self, business_id: &str) -> impl Future<Output = MartResult<Vec<Product>>> + Send;
}
