//! Integration tests for the role-gated admin console.

use mart_auth::context::SessionContext;
use mart_console::{
    AdminConsole, CatalogStore, PlatformSettingsService, TenantDirectory, UserDirectory,
};
use mart_core::access::LOGIN_PATH;
use mart_core::error::MartError;
use mart_core::models::principal::Principal;
use mart_core::models::product::CreateProduct;
use mart_core::models::settings::UpdateSettings;
use mart_core::models::user::Role;
use mart_db::repository::{
    SurrealBusinessRepository, SurrealProductRepository, SurrealSettingsRepository,
    SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type Console = AdminConsole<
    SurrealBusinessRepository<Db>,
    SurrealProductRepository<Db>,
    SurrealUserRepository<Db>,
    SurrealSettingsRepository<Db>,
>;

async fn setup() -> Console {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    mart_db::run_migrations(&db).await.unwrap();

    AdminConsole::new(
        TenantDirectory::new(SurrealBusinessRepository::new(db.clone())),
        CatalogStore::new(SurrealProductRepository::new(db.clone())),
        UserDirectory::new(SurrealUserRepository::new(db.clone())),
        PlatformSettingsService::new(SurrealSettingsRepository::new(db)),
        SessionContext::new(),
    )
}

fn principal(role: Role, tenants: &[&str]) -> Principal {
    let business_ids: Vec<String> = tenants.iter().map(|s| s.to_string()).collect();
    Principal {
        uid: Uuid::new_v4(),
        email: None,
        role,
        active_business_id: business_ids.first().cloned(),
        business_ids,
        display_name: None,
    }
}

fn product(name: &str) -> CreateProduct {
    CreateProduct {
        name: name.into(),
        price: 1.0,
        stock: 1,
        ..Default::default()
    }
}

#[tokio::test]
async fn pending_session_is_neither_allowed_nor_redirected() {
    let console = setup().await;

    let err = console.list_products().await.unwrap_err();
    assert!(matches!(err, MartError::SessionPending));
    assert!(!err.requires_login());
}

#[tokio::test]
async fn unauthenticated_and_wrong_role_share_login_redirect() {
    let console = setup().await;

    console.context().clear();
    let err = console.list_products().await.unwrap_err();
    assert!(matches!(err, MartError::Unauthenticated));
    assert!(err.requires_login());

    console.context().establish(principal(Role::Customer, &[]));
    let err = console.list_products().await.unwrap_err();
    assert!(matches!(err, MartError::Unauthorized { role: Role::Customer }));
    assert!(err.requires_login());

    assert_eq!(LOGIN_PATH, "/admin/login");
}

#[tokio::test]
async fn business_admin_works_in_active_tenant_only() {
    let console = setup().await;

    console
        .context()
        .establish(principal(Role::BusinessAdmin, &["acme"]));
    let id = console.add_product(product("Anvil")).await.unwrap();

    let listed = console.list_products().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].business_id, "acme");

    // Switching to a tenant outside the memberships is refused.
    let err = console.switch_tenant("globex").unwrap_err();
    assert!(matches!(err, MartError::TenantContext));
    assert_eq!(console.list_products().await.unwrap().len(), 1);
}

#[tokio::test]
async fn business_admin_cannot_reach_platform_area() {
    let console = setup().await;
    console
        .context()
        .establish(principal(Role::BusinessAdmin, &["acme"]));

    assert!(matches!(
        console.list_businesses().await,
        Err(MartError::Unauthorized {
            role: Role::BusinessAdmin
        })
    ));
    assert!(matches!(
        console.create_business("Globex").await,
        Err(MartError::Unauthorized { .. })
    ));
    assert!(matches!(
        console
            .update_settings(UpdateSettings::default())
            .await,
        Err(MartError::Unauthorized { .. })
    ));
}

#[tokio::test]
async fn staff_is_not_a_console_role() {
    let console = setup().await;
    console.context().establish(principal(Role::Staff, &["acme"]));

    assert!(matches!(
        console.list_products().await,
        Err(MartError::Unauthorized { role: Role::Staff })
    ));
}

#[tokio::test]
async fn super_admin_needs_an_active_tenant_for_catalog_work() {
    let console = setup().await;
    let admin = principal(Role::SuperAdmin, &[]);
    let admin_uid = admin.uid;
    console.context().establish(admin);

    // Gate passes, scope check fails.
    assert!(matches!(
        console.list_products().await,
        Err(MartError::TenantContext)
    ));

    let id = console.create_business("Acme Corp").await.unwrap();
    let businesses = console.list_businesses().await.unwrap();
    assert_eq!(businesses.len(), 1);
    assert_eq!(businesses[0].owner_id, admin_uid.to_string());

    console.switch_tenant(&id).unwrap();
    console.add_product(product("Anvil")).await.unwrap();
    assert_eq!(console.list_products().await.unwrap().len(), 1);
    assert_eq!(console.current_business().await.unwrap().id, "acme-corp");
}

#[tokio::test]
async fn super_admin_manages_users_and_settings() {
    let console = setup().await;
    console.context().establish(principal(Role::SuperAdmin, &[]));

    let uid = Uuid::new_v4();
    let err = console.assign_business(uid, "acme").await.unwrap_err();
    assert!(matches!(err, MartError::NotFound { .. }));

    console.assign_role(uid, Role::Customer).await.unwrap_err();

    let settings = console
        .update_settings(UpdateSettings {
            maintenance_mode: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(settings.maintenance_mode);
    assert!(console.settings().await.unwrap().maintenance_mode);
    assert!(console.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn active_tenant_is_read_at_call_time() {
    let console = setup().await;
    console
        .context()
        .establish(principal(Role::BusinessAdmin, &["acme", "globex"]));

    console.add_product(product("A")).await.unwrap();
    console.switch_tenant("globex").unwrap();
    console.add_product(product("G")).await.unwrap();

    let globex = console.list_products().await.unwrap();
    assert_eq!(globex.len(), 1);
    assert_eq!(globex[0].name, "G");
    assert_eq!(globex[0].business_id, "globex");
}
