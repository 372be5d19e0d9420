use std::marker::PhantomData;

use async_trait::async_trait;
use promodesk_core::Entity;
use sqlx::PgPool;

use crate::repository::Repository;
use crate::DbError;

/// Collection stored as JSONB rows in `entity_records`, scoped by [`Entity::KIND`].
#[derive(Debug, Clone)]
pub struct PgRepository<T> {
    pool: PgPool,
    _record: PhantomData<fn() -> T>,
}

impl<T: Entity> PgRepository<T> {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

fn decode<T: Entity>(body: serde_json::Value) -> Result<T, DbError> {
    serde_json::from_value(body).map_err(|source| DbError::Serde {
        kind: T::KIND,
        source,
    })
}

pub(crate) fn encode<T: Entity>(record: &T) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(record).map_err(|source| DbError::Serde {
        kind: T::KIND,
        source,
    })
}

#[async_trait]
impl<T: Entity> Repository<T> for PgRepository<T> {
    async fn list(&self) -> Result<Vec<T>, DbError> {
        let bodies = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT body FROM entity_records WHERE kind = $1 ORDER BY position",
        )
        .bind(T::KIND)
        .fetch_all(&self.pool)
        .await?;
        bodies.into_iter().map(decode).collect()
    }

    async fn get(&self, id: &str) -> Result<T, DbError> {
        let body = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT body FROM entity_records WHERE kind = $1 AND id = $2",
        )
        .bind(T::KIND)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(T::KIND, id))?;
        decode(body)
    }

    async fn create(&self, record: T) -> Result<T, DbError> {
        let inserted = sqlx::query_scalar::<_, String>(
            "INSERT INTO entity_records (kind, id, body) VALUES ($1, $2, $3) \
             ON CONFLICT (kind, id) DO NOTHING \
             RETURNING id",
        )
        .bind(T::KIND)
        .bind(record.id())
        .bind(encode(&record)?)
        .fetch_optional(&self.pool)
        .await?;
        if inserted.is_none() {
            return Err(DbError::conflict(T::KIND, record.id()));
        }
        tracing::debug!(kind = T::KIND, id = record.id(), "record created");
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T, DbError> {
        let result = sqlx::query(
            "UPDATE entity_records SET body = $3, updated_at = NOW() \
             WHERE kind = $1 AND id = $2",
        )
        .bind(T::KIND)
        .bind(record.id())
        .bind(encode(&record)?)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found(T::KIND, record.id()));
        }
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM entity_records WHERE kind = $1 AND id = $2")
            .bind(T::KIND)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found(T::KIND, id));
        }
        tracing::debug!(kind = T::KIND, id, "record deleted");
        Ok(())
    }
}
