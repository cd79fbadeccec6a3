use async_trait::async_trait;
use models::{Entity, Record};
use serde_json::Value;

use crate::entity_store::EntityStore;
use crate::errors::ServiceError;

/// Record filter passed across the service boundary.
pub type Predicate<'a, T> = &'a (dyn Fn(&Record<T>) -> bool + Send + Sync);

/// Trait abstraction for entity CRUD as seen by UI callers.
/// Implementations can be slot-backed (`EntityStore`) or a real remote API.
#[async_trait]
pub trait EntityService<T: Entity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Record<T>>, ServiceError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Record<T>>, ServiceError>;
    async fn create(&self, data: T) -> Result<Record<T>, ServiceError>;
    /// `patch` must be a JSON object of the fields to overwrite.
    async fn update(&self, id: &str, patch: Value) -> Result<Option<Record<T>>, ServiceError>;
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<usize, ServiceError>;
    async fn search(&self, predicate: Predicate<'_, T>) -> Result<Vec<Record<T>>, ServiceError>;
}

#[async_trait]
impl<T: Entity> EntityService<T> for EntityStore<T> {
    async fn get_all(&self) -> Result<Vec<Record<T>>, ServiceError> { EntityStore::get_all(self).await }
    async fn get_by_id(&self, id: &str) -> Result<Option<Record<T>>, ServiceError> { EntityStore::get_by_id(self, id).await }
    async fn create(&self, data: T) -> Result<Record<T>, ServiceError> { EntityStore::create(self, data).await }
    async fn update(&self, id: &str, patch: Value) -> Result<Option<Record<T>>, ServiceError> { EntityStore::update(self, id, &patch).await }
    async fn delete(&self, id: &str) -> Result<bool, ServiceError> { EntityStore::delete(self, id).await }
    async fn count(&self) -> Result<usize, ServiceError> { EntityStore::count(self).await }
    async fn search(&self, predicate: Predicate<'_, T>) -> Result<Vec<Record<T>>, ServiceError> {
        EntityStore::search(self, predicate).await
    }
}
