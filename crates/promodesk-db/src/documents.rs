//! Singleton JSON documents keyed by id, written with top-level key merge.
//!
//! The platform settings screen is the only consumer. Its backing store may
//! be deliberately absent, in which case every call fails with
//! [`DbError::Unavailable`] and callers surface that state instead of
//! pretending the write succeeded.

use std::collections::HashMap;

use async_trait::async_trait;
use promodesk_core::{PlatformSettings, PLATFORM_SETTINGS_DOC_ID};
use serde_json::{Map, Value};
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::DbError;

pub type Document = Map<String, Value>;

const SETTINGS_KIND: &str = "settings";

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Document>, DbError>;

    /// Merge `fields` into the stored document, creating it if absent.
    /// Keys not present in `fields` are left as they were.
    async fn set_merge(&self, id: &str, fields: Document) -> Result<Document, DbError>;
}

/// A store with no backend configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableDocumentStore;

#[async_trait]
impl DocumentStore for UnavailableDocumentStore {
    async fn get(&self, _id: &str) -> Result<Option<Document>, DbError> {
        Err(DbError::Unavailable("settings store"))
    }

    async fn set_merge(&self, _id: &str, _fields: Document) -> Result<Document, DbError> {
        Err(DbError::Unavailable("settings store"))
    }
}

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, id: &str) -> Result<Option<Document>, DbError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn set_merge(&self, id: &str, fields: Document) -> Result<Document, DbError> {
        let mut documents = self.documents.write().await;
        let doc = documents.entry(id.to_string()).or_default();
        doc.extend(fields);
        Ok(doc.clone())
    }
}

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn as_document(kind: &'static str, value: Value) -> Result<Document, DbError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DbError::Serde {
            kind,
            source: <serde_json::Error as serde::de::Error>::custom(format!(
                "expected a JSON object, found {other}"
            )),
        }),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, id: &str) -> Result<Option<Document>, DbError> {
        let body = sqlx::query_scalar::<_, Value>("SELECT body FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        body.map(|b| as_document("document", b)).transpose()
    }

    async fn set_merge(&self, id: &str, fields: Document) -> Result<Document, DbError> {
        let body = sqlx::query_scalar::<_, Value>(
            "INSERT INTO documents (id, body) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET \
                 body = documents.body || EXCLUDED.body, \
                 updated_at = NOW() \
             RETURNING body",
        )
        .bind(id)
        .bind(Value::Object(fields))
        .fetch_one(&self.pool)
        .await?;
        as_document("document", body)
    }
}

fn settings_to_document(settings: &PlatformSettings) -> Result<Document, DbError> {
    let value = serde_json::to_value(settings).map_err(|source| DbError::Serde {
        kind: SETTINGS_KIND,
        source,
    })?;
    as_document(SETTINGS_KIND, value)
}

fn settings_from_document(stored: Document) -> Result<PlatformSettings, DbError> {
    // Stored keys win; anything missing comes from the defaults.
    let mut merged = settings_to_document(&PlatformSettings::default())?;
    merged.extend(stored);
    serde_json::from_value(Value::Object(merged)).map_err(|source| DbError::Serde {
        kind: SETTINGS_KIND,
        source,
    })
}

/// Read platform settings, falling back to defaults when nothing is stored.
///
/// # Errors
///
/// Returns [`DbError::Unavailable`] when the store has no backend, or a
/// decode error when the stored document does not fit [`PlatformSettings`].
pub async fn load_settings(store: &dyn DocumentStore) -> Result<PlatformSettings, DbError> {
    match store.get(PLATFORM_SETTINGS_DOC_ID).await? {
        Some(doc) => settings_from_document(doc),
        None => Ok(PlatformSettings::default()),
    }
}

/// Merge-write platform settings and return the stored result.
///
/// # Errors
///
/// Returns [`DbError::Unavailable`] when the store has no backend.
pub async fn save_settings(
    store: &dyn DocumentStore,
    settings: &PlatformSettings,
) -> Result<PlatformSettings, DbError> {
    let stored = store
        .set_merge(PLATFORM_SETTINGS_DOC_ID, settings_to_document(settings)?)
        .await?;
    tracing::info!(site_name = %settings.site_name, "platform settings saved");
    settings_from_document(stored)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().expect("object literal")
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = UnavailableDocumentStore;
        assert!(matches!(
            store.get("x").await,
            Err(DbError::Unavailable(_))
        ));
        assert!(matches!(
            load_settings(&store).await,
            Err(DbError::Unavailable(_))
        ));
        assert!(matches!(
            save_settings(&store, &PlatformSettings::default()).await,
            Err(DbError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn missing_settings_fall_back_to_defaults() {
        let store = MemoryDocumentStore::new();
        assert_eq!(
            load_settings(&store).await.unwrap(),
            PlatformSettings::default()
        );
    }

    #[tokio::test]
    async fn set_merge_keeps_untouched_keys() {
        let store = MemoryDocumentStore::new();
        store
            .set_merge("doc", doc(json!({"site_name": "Promo", "maintenance_mode": true})))
            .await
            .unwrap();
        let merged = store
            .set_merge("doc", doc(json!({"site_name": "PromoDesk Pro"})))
            .await
            .unwrap();

        assert_eq!(merged["site_name"], "PromoDesk Pro");
        assert_eq!(merged["maintenance_mode"], true);
    }

    #[tokio::test]
    async fn partial_stored_settings_are_completed_from_defaults() {
        let store = MemoryDocumentStore::new();
        store
            .set_merge(PLATFORM_SETTINGS_DOC_ID, doc(json!({"maintenance_mode": true})))
            .await
            .unwrap();

        let settings = load_settings(&store).await.unwrap();
        assert!(settings.maintenance_mode);
        assert_eq!(settings.site_name, "PromoDesk");
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryDocumentStore::new();
        let settings = PlatformSettings {
            site_name: "Creator Hub".to_string(),
            allow_new_registrations: false,
            ..PlatformSettings::default()
        };
        let saved = save_settings(&store, &settings).await.unwrap();
        assert_eq!(saved, settings);
        assert_eq!(load_settings(&store).await.unwrap(), settings);
    }
}
