use std::sync::Arc;

use async_trait::async_trait;
use promodesk_core::{
    AffiliateLink, Brand, Campaign, ContentPiece, Earning, Entity, Fixtures, PromotionalItem,
    UserProfile,
};
use sqlx::PgPool;

use crate::memory::MemoryRepository;
use crate::postgres::PgRepository;
use crate::DbError;

/// Identifier-keyed storage for one entity collection.
///
/// `list` returns records in insertion order; edits keep a record's position.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, DbError>;

    async fn get(&self, id: &str) -> Result<T, DbError>;

    /// Append `record`. Fails with [`DbError::Conflict`] if its id is taken.
    async fn create(&self, record: T) -> Result<T, DbError>;

    /// Replace the stored record with the same id.
    async fn update(&self, record: T) -> Result<T, DbError>;

    async fn delete(&self, id: &str) -> Result<(), DbError>;
}

/// One repository per collection.
#[derive(Clone)]
pub struct Repositories {
    pub brands: Arc<dyn Repository<Brand>>,
    pub promotional_items: Arc<dyn Repository<PromotionalItem>>,
    pub campaigns: Arc<dyn Repository<Campaign>>,
    pub content: Arc<dyn Repository<ContentPiece>>,
    pub affiliate_links: Arc<dyn Repository<AffiliateLink>>,
    pub earnings: Arc<dyn Repository<Earning>>,
    pub profiles: Arc<dyn Repository<UserProfile>>,
}

impl Repositories {
    /// In-memory collections seeded from `fixtures`.
    #[must_use]
    pub fn in_memory(fixtures: &Fixtures) -> Self {
        Self {
            brands: Arc::new(MemoryRepository::new(fixtures.brands.clone())),
            promotional_items: Arc::new(MemoryRepository::new(
                fixtures.promotional_items.clone(),
            )),
            campaigns: Arc::new(MemoryRepository::new(fixtures.campaigns.clone())),
            content: Arc::new(MemoryRepository::new(fixtures.content.clone())),
            affiliate_links: Arc::new(MemoryRepository::new(fixtures.affiliate_links.clone())),
            earnings: Arc::new(MemoryRepository::new(fixtures.earnings.clone())),
            profiles: Arc::new(MemoryRepository::new(vec![fixtures.profile.clone()])),
        }
    }

    /// Collections backed by the `entity_records` table.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            brands: Arc::new(PgRepository::new(pool.clone())),
            promotional_items: Arc::new(PgRepository::new(pool.clone())),
            campaigns: Arc::new(PgRepository::new(pool.clone())),
            content: Arc::new(PgRepository::new(pool.clone())),
            affiliate_links: Arc::new(PgRepository::new(pool.clone())),
            earnings: Arc::new(PgRepository::new(pool.clone())),
            profiles: Arc::new(PgRepository::new(pool.clone())),
        }
    }
}
