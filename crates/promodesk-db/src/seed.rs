use promodesk_core::{Entity, Fixtures, PLATFORM_SETTINGS_DOC_ID};
use sqlx::{PgPool, Postgres, Transaction};

use crate::postgres::encode;
use crate::DbError;

/// Rows written by [`seed_fixtures`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub records: usize,
    pub settings_created: bool,
}

/// Upsert every fixture record into `entity_records`.
///
/// Existing rows with the same `(kind, id)` get the fixture body but keep
/// their list position. The settings document is only created when absent,
/// so edits made through the settings screen survive a reseed. All writes
/// run in one transaction.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; nothing is written in that case.
pub async fn seed_fixtures(pool: &PgPool, fixtures: &Fixtures) -> Result<SeedSummary, DbError> {
    let mut tx = pool.begin().await?;
    let mut records = 0usize;

    records += upsert_all(&mut tx, &fixtures.brands).await?;
    records += upsert_all(&mut tx, &fixtures.promotional_items).await?;
    records += upsert_all(&mut tx, &fixtures.campaigns).await?;
    records += upsert_all(&mut tx, &fixtures.content).await?;
    records += upsert_all(&mut tx, &fixtures.affiliate_links).await?;
    records += upsert_all(&mut tx, &fixtures.earnings).await?;
    records += upsert_all(&mut tx, std::slice::from_ref(&fixtures.profile)).await?;

    let settings = serde_json::to_value(&fixtures.settings).map_err(|source| DbError::Serde {
        kind: "settings",
        source,
    })?;
    let settings_created = sqlx::query(
        "INSERT INTO documents (id, body) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
    )
    .bind(PLATFORM_SETTINGS_DOC_ID)
    .bind(settings)
    .execute(&mut *tx)
    .await?
    .rows_affected()
        > 0;

    tx.commit().await?;

    tracing::info!(records, settings_created, "fixtures seeded");
    Ok(SeedSummary {
        records,
        settings_created,
    })
}

async fn upsert_all<T: Entity>(
    tx: &mut Transaction<'_, Postgres>,
    records: &[T],
) -> Result<usize, DbError> {
    for record in records {
        sqlx::query(
            "INSERT INTO entity_records (kind, id, body) VALUES ($1, $2, $3) \
             ON CONFLICT (kind, id) DO UPDATE SET \
                 body = EXCLUDED.body, \
                 updated_at = NOW()",
        )
        .bind(T::KIND)
        .bind(record.id())
        .bind(encode(record)?)
        .execute(&mut **tx)
        .await?;
    }
    Ok(records.len())
}
