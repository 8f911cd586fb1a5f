//! Role-gated facade over the console services.
//!
//! Every operation first runs the role gate for its area, then (for
//! tenant work) reads the active tenant from the session context at
//! call time. The two checks stay separate: passing the gate never
//! implies access to a particular tenant.

use mart_auth::context::SessionContext;
use mart_core::access::{self, CONSOLE_ROLES, PLATFORM_ROLES};
use mart_core::error::{MartError, MartResult};
use mart_core::models::business::{Business, ThemeSettings, UpdateBusiness};
use mart_core::models::principal::Principal;
use mart_core::models::product::{CreateProduct, Product, UpdateProduct};
use mart_core::models::settings::{GlobalSettings, UpdateSettings};
use mart_core::models::user::{Role, UserProfile};
use mart_core::repository::{
    BusinessRepository, ProductRepository, SettingsRepository, UserRepository,
};
use tracing::warn;
use uuid::Uuid;

use crate::catalog::CatalogStore;
use crate::directory::TenantDirectory;
use crate::settings::PlatformSettingsService;
use crate::users::UserDirectory;

pub struct AdminConsole<B, P, U, G>
where
    B: BusinessRepository,
    P: ProductRepository,
    U: UserRepository,
    G: SettingsRepository,
{
    directory: TenantDirectory<B>,
    catalog: CatalogStore<P>,
    users: UserDirectory<U>,
    settings: PlatformSettingsService<G>,
    context: SessionContext,
}

impl<B, P, U, G> AdminConsole<B, P, U, G>
where
    B: BusinessRepository,
    P: ProductRepository,
    U: UserRepository,
    G: SettingsRepository,
{
    pub fn new(
        directory: TenantDirectory<B>,
        catalog: CatalogStore<P>,
        users: UserDirectory<U>,
        settings: PlatformSettingsService<G>,
        context: SessionContext,
    ) -> Self {
        Self {
            directory,
            catalog,
            users,
            settings,
            context,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    fn gate(&self, required: &[Role]) -> MartResult<Principal> {
        let state = self.context.state();
        let decision = access::authorize(&state, required);
        if let Some(target) = decision.redirect() {
            warn!(redirect = target, ?decision, "Console access denied");
        }
        decision.into_result()?;
        // Allow implies an authenticated state.
        state.principal().cloned().ok_or(MartError::Unauthenticated)
    }

    /// Role gate for the business dashboard, then the active tenant.
    fn tenant_scope(&self) -> MartResult<String> {
        self.gate(CONSOLE_ROLES)?;
        self.context.require_tenant()
    }

    // -------------------------------------------------------------------
    // Business dashboard (business_admin, super_admin)
    // -------------------------------------------------------------------

    pub fn switch_tenant(&self, tenant_id: &str) -> MartResult<()> {
        self.gate(CONSOLE_ROLES)?;
        self.context.switch_tenant(tenant_id)
    }

    pub async fn current_business(&self) -> MartResult<Business> {
        let tenant_id = self.tenant_scope()?;
        self.directory.get(&tenant_id).await
    }

    pub async fn update_theme(&self, theme: ThemeSettings) -> MartResult<Business> {
        let tenant_id = self.tenant_scope()?;
        self.directory
            .update(
                &tenant_id,
                UpdateBusiness {
                    theme_settings: Some(theme),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn list_products(&self) -> MartResult<Vec<Product>> {
        let tenant_id = self.tenant_scope()?;
        self.catalog.list(&tenant_id).await
    }

    pub async fn add_product(&self, fields: CreateProduct) -> MartResult<Uuid> {
        let tenant_id = self.tenant_scope()?;
        self.catalog.add(&tenant_id, fields).await
    }

    pub async fn update_product(
        &self,
        product_id: Uuid,
        fields: UpdateProduct,
    ) -> MartResult<Product> {
        let tenant_id = self.tenant_scope()?;
        self.catalog.update(&tenant_id, product_id, fields).await
    }

    pub async fn delete_product(&self, product_id: Uuid) -> MartResult<()> {
        let tenant_id = self.tenant_scope()?;
        self.catalog.delete(&tenant_id, product_id).await
    }

    // -------------------------------------------------------------------
    // Platform administration (super_admin)
    // -------------------------------------------------------------------

    /// Create a business owned by the calling super admin.
    pub async fn create_business(&self, name: &str) -> MartResult<String> {
        let principal = self.gate(PLATFORM_ROLES)?;
        self.directory
            .create(&principal.uid.to_string(), name)
            .await
    }

    pub async fn list_businesses(&self) -> MartResult<Vec<Business>> {
        self.gate(PLATFORM_ROLES)?;
        self.directory.list_all().await
    }

    pub async fn delete_business(&self, tenant_id: &str) -> MartResult<()> {
        self.gate(PLATFORM_ROLES)?;
        self.directory.delete(tenant_id).await
    }

    pub async fn list_users(&self) -> MartResult<Vec<UserProfile>> {
        self.gate(PLATFORM_ROLES)?;
        self.users.list_all().await
    }

    pub async fn assign_business(&self, uid: Uuid, tenant_id: &str) -> MartResult<UserProfile> {
        self.gate(PLATFORM_ROLES)?;
        self.users.assign_business(uid, tenant_id).await
    }

    pub async fn assign_role(&self, uid: Uuid, role: Role) -> MartResult<UserProfile> {
        self.gate(PLATFORM_ROLES)?;
        self.users.assign_role(uid, role).await
    }

    pub async fn settings(&self) -> MartResult<GlobalSettings> {
        self.gate(PLATFORM_ROLES)?;
        self.settings.get().await
    }

    pub async fn update_settings(&self, fields: UpdateSettings) -> MartResult<GlobalSettings> {
        self.gate(PLATFORM_ROLES)?;
        self.settings.update(fields).await
    }
}
