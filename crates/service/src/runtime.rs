//! Runtime wiring
//!
//! Builds the slot storage, latency model and id generator from `configs::StoreConfig`
//! and hands out stores bound to their slots. The context remembers which entity type
//! owns each slot so two types cannot share one.

use std::any::type_name;
use std::sync::Arc;

use configs::{StoreBackend, StoreConfig};
use dashmap::DashMap;
use models::Entity;
use tracing::info;

use crate::entity_store::EntityStore;
use crate::errors::ServiceError;
use crate::ids::{self, IdGenerator};
use crate::latency::Latency;
use crate::members::MemberService;
use crate::products::ProductService;
use crate::storage::{validate_slot_name, FileSlotStorage, MemorySlotStorage, SlotStorage};

/// Open the configured slot storage backend.
pub async fn open_storage(cfg: &StoreConfig) -> Result<Arc<dyn SlotStorage>, ServiceError> {
    match cfg.backend {
        StoreBackend::File => {
            common::env::ensure_data_dir(&cfg.data_dir)
                .await
                .map_err(|e| ServiceError::Storage(e.to_string()))?;
            let storage: Arc<dyn SlotStorage> = FileSlotStorage::new(&cfg.data_dir).await?;
            Ok(storage)
        }
        StoreBackend::Memory => Ok(Arc::new(MemorySlotStorage::new())),
    }
}

/// Shared storage handle plus the per-store defaults derived from config.
#[derive(Clone)]
pub struct StoreContext {
    storage: Arc<dyn SlotStorage>,
    latency: Latency,
    ids: Arc<dyn IdGenerator>,
    bound: Arc<DashMap<String, &'static str>>,
}

impl StoreContext {
    pub fn new(storage: Arc<dyn SlotStorage>, latency: Latency, ids: Arc<dyn IdGenerator>) -> Self {
        Self { storage, latency, ids, bound: Arc::new(DashMap::new()) }
    }

    pub async fn from_config(cfg: &StoreConfig) -> Result<Self, ServiceError> {
        let storage = open_storage(cfg).await?;
        info!(
            backend = ?cfg.backend,
            data_dir = %cfg.data_dir,
            id_strategy = ?cfg.id_strategy,
            "store context ready"
        );
        Ok(Self::new(storage, Latency::from(&cfg.latency), ids::from_strategy(cfg.id_strategy)))
    }

    pub fn storage(&self) -> Arc<dyn SlotStorage> {
        Arc::clone(&self.storage)
    }

    /// A store for `T` bound to `slot`.
    ///
    /// Fails with `SlotConflict` if `slot` was already handed out for a different type.
    /// Invalid slot names are rejected before anything is recorded.
    pub fn store_at<T: Entity>(&self, slot: &str) -> Result<EntityStore<T>, ServiceError> {
        validate_slot_name(slot)?;
        let wanted = type_name::<T>();
        let owner = *self.bound.entry(slot.to_string()).or_insert(wanted);
        if owner != wanted {
            return Err(ServiceError::SlotConflict { slot: slot.to_string(), bound: owner.to_string() });
        }
        Ok(EntityStore::new(self.storage(), slot)?
            .with_latency(self.latency)
            .with_ids(Arc::clone(&self.ids)))
    }

    /// A store for `T` bound to its default slot.
    pub fn store<T: Entity>(&self) -> Result<EntityStore<T>, ServiceError> {
        self.store_at::<T>(T::COLLECTION)
    }

    pub async fn members(&self) -> Result<MemberService, ServiceError> {
        MemberService::from_store(self.store()?).await
    }

    pub async fn products(&self) -> Result<ProductService, ServiceError> {
        ProductService::from_store(self.store()?).await
    }
}
