//! Tenant directory: CRUD over businesses keyed by derived tenant id.

use mart_core::error::{MartError, MartResult};
use mart_core::models::business::{Business, PutBusiness, ThemeSettings, UpdateBusiness};
use mart_core::repository::BusinessRepository;
use mart_core::tenant_id;
use tracing::{debug, info};

pub struct TenantDirectory<B: BusinessRepository> {
    repo: B,
}

impl<B: BusinessRepository> TenantDirectory<B> {
    pub fn new(repo: B) -> Self {
        Self { repo }
    }

    /// Create a business with the default theme and return its id.
    ///
    /// The id is derived from the name. A second business whose name
    /// normalizes to the same id replaces the first.
    pub async fn create(&self, owner_id: &str, name: &str) -> MartResult<String> {
        let id = tenant_id::derive(name)?;
        self.repo
            .put(PutBusiness {
                id: id.clone(),
                name: name.to_string(),
                owner_id: owner_id.to_string(),
                theme_settings: ThemeSettings::default(),
            })
            .await?;
        info!(tenant_id = %id, owner_id, "Business created");
        Ok(id)
    }

    pub async fn get(&self, tenant_id: &str) -> MartResult<Business> {
        debug!(tenant_id, "Loading business");
        self.repo.get_by_id(tenant_id).await
    }

    pub async fn list_all(&self) -> MartResult<Vec<Business>> {
        self.repo.list_all().await
    }

    pub async fn update(&self, tenant_id: &str, fields: UpdateBusiness) -> MartResult<Business> {
        if let Some(name) = &fields.name {
            if name.trim().is_empty() {
                return Err(MartError::validation("business name must not be blank"));
            }
        }
        let updated = self.repo.update(tenant_id, fields).await?;
        info!(tenant_id, "Business updated");
        Ok(updated)
    }

    /// Removes the business record. Its products are left in place.
    pub async fn delete(&self, tenant_id: &str) -> MartResult<()> {
        self.repo.delete(tenant_id).await?;
        info!(tenant_id, "Business deleted");
        Ok(())
    }
}
