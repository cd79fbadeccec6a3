use std::sync::Arc;

use models::product::{seed_products, Product, ProductPatch};
use models::Record;

use crate::entity_store::EntityStore;
use crate::errors::ServiceError;
use crate::latency::Latency;
use crate::storage::SlotStorage;

/// Product catalogue backed by the `products` slot.
#[derive(Clone)]
pub struct ProductService {
    store: EntityStore<Product>,
}

impl ProductService {
    pub async fn new(storage: Arc<dyn SlotStorage>, latency: Latency) -> Result<Self, ServiceError> {
        let store = EntityStore::for_entity(storage)?.with_latency(latency);
        Self::from_store(store).await
    }

    pub async fn from_store(store: EntityStore<Product>) -> Result<Self, ServiceError> {
        store.seed(seed_products()).await?;
        Ok(Self { store })
    }

    pub fn store(&self) -> &EntityStore<Product> {
        &self.store
    }

    pub async fn update(&self, id: &str, patch: &ProductPatch) -> Result<Option<Record<Product>>, ServiceError> {
        self.store.update(id, patch).await
    }

    pub async fn in_stock(&self) -> Result<Vec<Record<Product>>, ServiceError> {
        self.store.search(|p| p.in_stock).await
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<Record<Product>>, ServiceError> {
        self.store.search(|p| p.category.eq_ignore_ascii_case(category)).await
    }
}
