//! Live integration tests for promodesk-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. They need `DATABASE_URL` pointing at a server that
//! allows database creation, so they are ignored by default:
//!
//! ```text
//! cargo test -p promodesk-db --test live -- --ignored
//! ```

use promodesk_core::{Brand, BrandCategory, Fixtures, PlatformSettings};
use promodesk_db::{
    load_settings, save_settings, seed_fixtures, DbError, DocumentStore, PgDocumentStore,
    Repositories,
};

fn brand(id: &str, name: &str) -> Brand {
    Brand {
        id: id.to_string(),
        name: name.to_string(),
        description: Some("Seeded for a live test".to_string()),
        category: BrandCategory::Technology,
        logo_url: None,
        website_url: None,
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a Postgres server"]
async fn create_list_update_delete_round_trip(pool: sqlx::PgPool) {
    let repos = Repositories::postgres(&pool);

    repos.brands.create(brand("b1", "First")).await.unwrap();
    repos.brands.create(brand("b2", "Second")).await.unwrap();
    repos.brands.create(brand("b3", "Third")).await.unwrap();

    repos.brands.update(brand("b1", "First Renamed")).await.unwrap();
    repos.brands.delete("b2").await.unwrap();

    let names: Vec<String> = repos
        .brands
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, ["First Renamed", "Third"]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a Postgres server"]
async fn duplicate_create_conflicts(pool: sqlx::PgPool) {
    let repos = Repositories::postgres(&pool);
    repos.brands.create(brand("b1", "First")).await.unwrap();

    let err = repos.brands.create(brand("b1", "Again")).await.unwrap_err();
    assert!(matches!(err, DbError::Conflict { .. }), "got: {err:?}");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a Postgres server"]
async fn kinds_are_isolated(pool: sqlx::PgPool) {
    let repos = Repositories::postgres(&pool);
    repos.brands.create(brand("shared", "Brand")).await.unwrap();

    assert!(repos.campaigns.list().await.unwrap().is_empty());
    assert!(matches!(
        repos.campaigns.delete("shared").await,
        Err(DbError::NotFound { .. })
    ));
}

// ---------------------------------------------------------------------------
// Seed + documents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a Postgres server"]
async fn seed_is_idempotent_and_keeps_settings_edits(pool: sqlx::PgPool) {
    let fixtures = Fixtures::builtin().unwrap();

    let first = seed_fixtures(&pool, &fixtures).await.unwrap();
    assert!(first.settings_created);

    let store = PgDocumentStore::new(pool.clone());
    let edited = PlatformSettings {
        site_name: "Edited".to_string(),
        ..PlatformSettings::default()
    };
    save_settings(&store, &edited).await.unwrap();

    let second = seed_fixtures(&pool, &fixtures).await.unwrap();
    assert_eq!(second.records, first.records);
    assert!(!second.settings_created);
    assert_eq!(load_settings(&store).await.unwrap().site_name, "Edited");

    let repos = Repositories::postgres(&pool);
    let brands = repos.brands.list().await.unwrap();
    assert_eq!(brands.len(), fixtures.brands.len());
    assert_eq!(brands[0].id, "brand001");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a Postgres server"]
async fn document_merge_preserves_other_keys(pool: sqlx::PgPool) {
    let store = PgDocumentStore::new(pool);
    let mut a = serde_json::Map::new();
    a.insert("one".to_string(), serde_json::json!(1));
    a.insert("two".to_string(), serde_json::json!(2));
    store.set_merge("doc", a).await.unwrap();

    let mut b = serde_json::Map::new();
    b.insert("two".to_string(), serde_json::json!(22));
    let merged = store.set_merge("doc", b).await.unwrap();

    assert_eq!(merged["one"], 1);
    assert_eq!(merged["two"], 22);
}
