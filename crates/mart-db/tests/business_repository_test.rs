//! Integration tests for the business (tenant) and platform settings
//! repositories using in-memory SurrealDB.

use mart_core::error::MartError;
use mart_core::models::business::{PutBusiness, ThemeSettings, UpdateBusiness};
use mart_core::models::settings::{GlobalSettings, UpdateSettings};
use mart_core::repository::{BusinessRepository, SettingsRepository};
use mart_core::tenant_id;
use mart_db::repository::{SurrealBusinessRepository, SurrealSettingsRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    mart_db::run_migrations(&db).await.unwrap();
    db
}

fn put(name: &str, owner: &str) -> PutBusiness {
    PutBusiness {
        id: tenant_id::derive(name).unwrap(),
        name: name.into(),
        owner_id: owner.into(),
        theme_settings: ThemeSettings::default(),
    }
}

// -----------------------------------------------------------------------
// Business tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn put_and_get_business() {
    let db = setup().await;
    let repo = SurrealBusinessRepository::new(db);

    let created = repo.put(put("Acme Corp", "owner-1")).await.unwrap();
    assert_eq!(created.id, "acme-corp");
    assert_eq!(created.name, "Acme Corp");
    assert_eq!(created.owner_id, "owner-1");
    assert_eq!(created.theme_settings, ThemeSettings::default());

    let fetched = repo.get_by_id("acme-corp").await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.theme_settings.primary_color, "#6366f1");
    assert_eq!(fetched.theme_settings.secondary_color, "#ec4899");
    assert_eq!(fetched.theme_settings.font_family, "Inter");
    assert!(fetched.theme_settings.animations_enabled);
    assert!(fetched.theme_settings.logo_url.is_none());
}

#[tokio::test]
async fn get_unknown_business_is_not_found() {
    let db = setup().await;
    let repo = SurrealBusinessRepository::new(db);

    let err = repo.get_by_id("nope").await.unwrap_err();
    assert!(matches!(err, MartError::NotFound { .. }));
}

#[tokio::test]
async fn colliding_names_overwrite_the_same_record() {
    let db = setup().await;
    let repo = SurrealBusinessRepository::new(db);

    repo.put(put("Acme Corp", "owner-1")).await.unwrap();
    repo.put(put("Acme   Corp", "owner-2")).await.unwrap();

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "acme-corp");
    assert_eq!(all[0].name, "Acme   Corp");
    assert_eq!(all[0].owner_id, "owner-2");
}

#[tokio::test]
async fn list_all_returns_every_business() {
    let db = setup().await;
    let repo = SurrealBusinessRepository::new(db);

    repo.put(put("Acme", "o")).await.unwrap();
    repo.put(put("Globex", "o")).await.unwrap();
    repo.put(put("Initech", "o")).await.unwrap();

    let mut ids: Vec<String> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["acme", "globex", "initech"]);
}

#[tokio::test]
async fn update_business_theme_and_name() {
    let db = setup().await;
    let repo = SurrealBusinessRepository::new(db);
    repo.put(put("Acme", "o")).await.unwrap();

    let theme = ThemeSettings {
        primary_color: "#000000".into(),
        logo_url: Some("https://cdn.example/logo.png".into()),
        ..ThemeSettings::default()
    };
    let updated = repo
        .update(
            "acme",
            UpdateBusiness {
                name: Some("Acme Holdings".into()),
                theme_settings: Some(theme.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // The id is fixed at creation.
    assert_eq!(updated.id, "acme");
    assert_eq!(updated.name, "Acme Holdings");
    assert_eq!(updated.theme_settings, theme);
    assert_eq!(updated.owner_id, "o");
}

#[tokio::test]
async fn update_unknown_business_is_not_found() {
    let db = setup().await;
    let repo = SurrealBusinessRepository::new(db);

    let err = repo
        .update(
            "ghost",
            UpdateBusiness {
                name: Some("x".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MartError::NotFound { .. }));
}

#[tokio::test]
async fn delete_business() {
    let db = setup().await;
    let repo = SurrealBusinessRepository::new(db);
    repo.put(put("Acme", "o")).await.unwrap();

    repo.delete("acme").await.unwrap();
    assert!(repo.get_by_id("acme").await.is_err());
    assert!(repo.list_all().await.unwrap().is_empty());
}

// -----------------------------------------------------------------------
// Settings tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn settings_absent_until_first_write() {
    let db = setup().await;
    let repo = SurrealSettingsRepository::new(db);

    assert!(repo.get().await.unwrap().is_none());
}

#[tokio::test]
async fn settings_merge_keeps_unset_fields() {
    let db = setup().await;
    let repo = SurrealSettingsRepository::new(db);

    let first = repo
        .merge(UpdateSettings {
            maintenance_mode: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        first,
        GlobalSettings {
            maintenance_mode: true,
            ..GlobalSettings::default()
        }
    );

    let second = repo
        .merge(UpdateSettings {
            platform_name: Some("Bazaar".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(second.maintenance_mode);
    assert_eq!(second.platform_name, "Bazaar");
    assert_eq!(second.support_email, "support@mart.com");

    let stored = repo.get().await.unwrap().unwrap();
    assert_eq!(stored, second);
}
