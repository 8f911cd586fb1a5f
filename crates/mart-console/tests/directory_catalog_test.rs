//! Integration tests for the tenant directory and catalog store using
//! in-memory SurrealDB.

use mart_console::catalog::CatalogStore;
use mart_console::directory::TenantDirectory;
use mart_core::error::MartError;
use mart_core::models::business::{ThemeSettings, UpdateBusiness};
use mart_core::models::product::{CreateProduct, UpdateProduct};
use mart_db::repository::{SurrealBusinessRepository, SurrealProductRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> (
    TenantDirectory<SurrealBusinessRepository<Db>>,
    CatalogStore<SurrealProductRepository<Db>>,
) {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    mart_db::run_migrations(&db).await.unwrap();
    (
        TenantDirectory::new(SurrealBusinessRepository::new(db.clone())),
        CatalogStore::new(SurrealProductRepository::new(db)),
    )
}

fn mug() -> CreateProduct {
    CreateProduct {
        name: "Mug".into(),
        description: "Stoneware, 350ml".into(),
        price: 14.0,
        stock: 12,
        category: "kitchen".into(),
        images: vec![
            "https://cdn.example/mug-1.png".into(),
            "https://cdn.example/mug-2.png".into(),
        ],
    }
}

// -----------------------------------------------------------------------
// Tenant directory
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_derives_id_and_default_theme() {
    let (directory, _) = setup().await;

    let id = directory.create("owner-1", "Acme Corp").await.unwrap();
    assert_eq!(id, "acme-corp");

    let business = directory.get(&id).await.unwrap();
    assert_eq!(business.name, "Acme Corp");
    assert_eq!(business.owner_id, "owner-1");
    assert_eq!(business.theme_settings, ThemeSettings::default());
}

#[tokio::test]
async fn never_created_tenant_is_not_found() {
    let (directory, _) = setup().await;
    directory.create("o", "Acme").await.unwrap();

    for id in ["globex", "acme-corp"] {
        let err = directory.get(id).await.unwrap_err();
        assert!(matches!(err, MartError::NotFound { .. }), "{id}");
    }
}

#[tokio::test]
async fn colliding_name_overwrites_existing_tenant() {
    let (directory, _) = setup().await;

    let first = directory.create("owner-1", "Acme Corp").await.unwrap();
    let second = directory.create("owner-2", "Acme   Corp").await.unwrap();
    assert_eq!(first, second);

    let all = directory.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Acme   Corp");
    assert_eq!(all[0].owner_id, "owner-2");
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let (directory, _) = setup().await;

    let err = directory.create("o", "   ").await.unwrap_err();
    assert!(matches!(err, MartError::Validation { .. }));
    assert!(directory.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_merges_fields() {
    let (directory, _) = setup().await;
    let id = directory.create("o", "Acme").await.unwrap();

    let updated = directory
        .update(
            &id,
            UpdateBusiness {
                theme_settings: Some(ThemeSettings {
                    animations_enabled: false,
                    ..ThemeSettings::default()
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Acme");
    assert!(!updated.theme_settings.animations_enabled);

    let err = directory
        .update(
            &id,
            UpdateBusiness {
                name: Some(" ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MartError::Validation { .. }));
}

#[tokio::test]
async fn deleting_tenant_leaves_products_behind() {
    let (directory, catalog) = setup().await;
    let id = directory.create("o", "Acme").await.unwrap();
    catalog.add(&id, mug()).await.unwrap();

    directory.delete(&id).await.unwrap();

    assert!(matches!(
        directory.get(&id).await,
        Err(MartError::NotFound { .. })
    ));
    let orphans = catalog.list(&id).await.unwrap();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].name, "Mug");
}

// -----------------------------------------------------------------------
// Catalog store
// -----------------------------------------------------------------------

#[tokio::test]
async fn add_then_list_returns_submitted_fields() {
    let (_, catalog) = setup().await;

    let id = catalog.add("acme-corp", mug()).await.unwrap();
    assert!(!id.is_nil());

    let products = catalog.list("acme-corp").await.unwrap();
    let p = products.iter().find(|p| p.id == id).unwrap();
    let submitted = mug();
    assert_eq!(p.business_id, "acme-corp");
    assert_eq!(p.name, submitted.name);
    assert_eq!(p.description, submitted.description);
    assert_eq!(p.price, submitted.price);
    assert_eq!(p.stock, submitted.stock);
    assert_eq!(p.category, submitted.category);
    assert_eq!(p.images, submitted.images);
}

#[tokio::test]
async fn delete_is_isolated_to_one_tenant() {
    let (_, catalog) = setup().await;
    let a1 = catalog.add("acme", mug()).await.unwrap();
    let a2 = catalog.add("acme", mug()).await.unwrap();
    let g1 = catalog.add("globex", mug()).await.unwrap();

    catalog.delete("acme", a1).await.unwrap();

    let acme: Vec<Uuid> = catalog
        .list("acme")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(acme, vec![a2]);

    let globex: Vec<Uuid> = catalog
        .list("globex")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(globex, vec![g1]);
}

#[tokio::test]
async fn invalid_products_are_rejected_before_writing() {
    let (_, catalog) = setup().await;

    let nameless = CreateProduct {
        name: "".into(),
        ..mug()
    };
    assert!(matches!(
        catalog.add("acme", nameless).await,
        Err(MartError::Validation { .. })
    ));

    let negative = CreateProduct {
        price: -1.0,
        ..mug()
    };
    assert!(matches!(
        catalog.add("acme", negative).await,
        Err(MartError::Validation { .. })
    ));

    assert!(catalog.list("acme").await.unwrap().is_empty());
}

#[tokio::test]
async fn update_is_a_field_merge() {
    let (_, catalog) = setup().await;
    let id = catalog.add("acme", mug()).await.unwrap();

    let updated = catalog
        .update(
            "acme",
            id,
            UpdateProduct {
                stock: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.stock, 3);
    assert_eq!(updated.name, "Mug");
    assert_eq!(updated.price, 14.0);

    let err = catalog
        .update(
            "acme",
            id,
            UpdateProduct {
                price: Some(f64::NAN),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MartError::Validation { .. }));
}

#[tokio::test]
async fn other_tenant_cannot_reach_product() {
    let (_, catalog) = setup().await;
    let id = catalog.add("acme", mug()).await.unwrap();

    assert!(matches!(
        catalog.get("globex", id).await,
        Err(MartError::NotFound { .. })
    ));
    assert!(catalog.get("acme", id).await.is_ok());
}
