use async_trait::async_trait;
use promodesk_core::Entity;
use tokio::sync::RwLock;

use crate::repository::Repository;
use crate::DbError;

/// Process-local collection. State is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Entity> MemoryRepository<T> {
    #[must_use]
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn list(&self) -> Result<Vec<T>, DbError> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<T, DbError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| DbError::not_found(T::KIND, id))
    }

    async fn create(&self, record: T) -> Result<T, DbError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(DbError::conflict(T::KIND, record.id()));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T, DbError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| DbError::not_found(T::KIND, record.id()))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), DbError> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| DbError::not_found(T::KIND, id))?;
        records.remove(index);
        Ok(())
    }
}
