//! Generic entity store
//!
//! One `EntityStore<T>` owns one slot. Every mutation is a whole-collection
//! read, in-memory change and whole-collection write. Nothing serializes
//! concurrent writers: two mutations in flight against the same slot race and
//! the later write wins. Callers needing multi-step atomicity must order their
//! own calls.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use models::{Entity, Record};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::ids::{IdGenerator, UuidIds};
use crate::latency::{Latency, OpKind};
use crate::storage::{validate_slot_name, SlotStorage};

/// Candidate identifiers drawn per `create` before giving up.
const MAX_ID_ATTEMPTS: usize = 64;

/// Typed CRUD store over a single slot.
pub struct EntityStore<T> {
    storage: Arc<dyn SlotStorage>,
    slot: String,
    latency: Latency,
    ids: Arc<dyn IdGenerator>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            slot: self.slot.clone(),
            latency: self.latency,
            ids: Arc::clone(&self.ids),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> EntityStore<T> {
    /// Bind a store to `slot` in `storage`, with default latency and UUID ids.
    pub fn new(storage: Arc<dyn SlotStorage>, slot: impl Into<String>) -> Result<Self, ServiceError> {
        let slot = slot.into();
        validate_slot_name(&slot)?;
        Ok(Self {
            storage,
            slot,
            latency: Latency::default(),
            ids: Arc::new(UuidIds),
            _entity: PhantomData,
        })
    }

    /// Bind a store to the entity's default slot (`T::COLLECTION`).
    pub fn for_entity(storage: Arc<dyn SlotStorage>) -> Result<Self, ServiceError> {
        Self::new(storage, T::COLLECTION)
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn latency(&self) -> &Latency {
        &self.latency
    }

    async fn load(&self) -> Result<Vec<Record<T>>, ServiceError> {
        let Some(raw) = self.storage.read(&self.slot).await? else {
            return Ok(Vec::new());
        };
        let items: Vec<Record<T>> = serde_json::from_str(&raw).map_err(|e| {
            warn!(slot = %self.slot, error = %e, "slot contents cannot be decoded");
            ServiceError::corrupt(&self.slot, e)
        })?;
        check_ids(&items).map_err(|reason| {
            warn!(slot = %self.slot, %reason, "slot holds invalid ids");
            ServiceError::corrupt(&self.slot, reason)
        })?;
        Ok(items)
    }

    async fn save(&self, items: &[Record<T>]) -> Result<(), ServiceError> {
        let data = serde_json::to_string(items).map_err(|e| ServiceError::Serialize(e.to_string()))?;
        self.storage.write(&self.slot, data).await
    }

    fn fresh_id(&self, items: &[Record<T>]) -> Result<String, ServiceError> {
        for r in items {
            self.ids.observe(r.id());
        }
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !candidate.is_empty() && !items.iter().any(|r| r.id() == candidate) {
                return Ok(candidate);
            }
        }
        Err(ServiceError::IdGeneration(format!(
            "no unused id for slot '{}' after {} attempts",
            self.slot, MAX_ID_ATTEMPTS
        )))
    }

    /// All records, in storage order. An absent slot reads as empty.
    pub async fn get_all(&self) -> Result<Vec<Record<T>>, ServiceError> {
        self.latency.simulate(OpKind::GetAll).await;
        let items = self.load().await?;
        debug!(slot = %self.slot, op = OpKind::GetAll.as_str(), count = items.len(), "store op");
        Ok(items)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Record<T>>, ServiceError> {
        self.latency.simulate(OpKind::GetById).await;
        let found = self.load().await?.into_iter().find(|r| r.id() == id);
        debug!(slot = %self.slot, op = OpKind::GetById.as_str(), %id, found = found.is_some(), "store op");
        Ok(found)
    }

    /// Append a new record with a freshly generated id.
    pub async fn create(&self, data: T) -> Result<Record<T>, ServiceError> {
        data.validate()?;
        self.latency.simulate(OpKind::Create).await;
        let mut items = self.load().await?;
        let record = Record::new(self.fresh_id(&items)?, data);
        items.push(record.clone());
        self.save(&items).await?;
        debug!(slot = %self.slot, op = OpKind::Create.as_str(), id = %record.id(), "store op");
        Ok(record)
    }

    /// Shallow-merge `patch` into the record with `id`.
    ///
    /// `patch` must serialize to an object. Its fields replace the record's
    /// fields of the same name; an `id` key is ignored. Returns `None` and
    /// leaves the slot untouched when no record matches.
    pub async fn update<P>(&self, id: &str, patch: &P) -> Result<Option<Record<T>>, ServiceError>
    where
        P: Serialize + ?Sized,
    {
        let fields = patch_fields(patch)?;
        self.latency.simulate(OpKind::Update).await;
        let mut items = self.load().await?;
        let Some(pos) = items.iter().position(|r| r.id() == id) else {
            debug!(slot = %self.slot, op = OpKind::Update.as_str(), %id, found = false, "store op");
            return Ok(None);
        };
        let merged = merge_fields(&items[pos].data, fields)?;
        merged.validate()?;
        items[pos].data = merged;
        self.save(&items).await?;
        debug!(slot = %self.slot, op = OpKind::Update.as_str(), %id, found = true, "store op");
        Ok(Some(items.swap_remove(pos)))
    }

    /// Remove the record with `id`; returns whether one was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        self.latency.simulate(OpKind::Delete).await;
        let mut items = self.load().await?;
        let Some(pos) = items.iter().position(|r| r.id() == id) else {
            debug!(slot = %self.slot, op = OpKind::Delete.as_str(), %id, removed = false, "store op");
            return Ok(false);
        };
        items.remove(pos);
        self.save(&items).await?;
        debug!(slot = %self.slot, op = OpKind::Delete.as_str(), %id, removed = true, "store op");
        Ok(true)
    }

    pub async fn count(&self) -> Result<usize, ServiceError> {
        self.latency.simulate(OpKind::Count).await;
        let n = self.load().await?.len();
        debug!(slot = %self.slot, op = OpKind::Count.as_str(), count = n, "store op");
        Ok(n)
    }

    /// Records matching `predicate`, in storage order.
    pub async fn search<F>(&self, predicate: F) -> Result<Vec<Record<T>>, ServiceError>
    where
        F: Fn(&Record<T>) -> bool,
    {
        self.latency.simulate(OpKind::Search).await;
        let matches: Vec<Record<T>> = self.load().await?.into_iter().filter(|r| predicate(r)).collect();
        debug!(slot = %self.slot, op = OpKind::Search.as_str(), count = matches.len(), "store op");
        Ok(matches)
    }

    /// Write `records` as the initial collection if the slot holds no records.
    ///
    /// Returns whether anything was written. Existing data is never replaced.
    pub async fn seed(&self, records: Vec<Record<T>>) -> Result<bool, ServiceError> {
        if !self.load().await?.is_empty() {
            debug!(slot = %self.slot, "slot already populated; seed skipped");
            return Ok(false);
        }
        check_ids(&records).map_err(ServiceError::InvalidSeed)?;
        self.save(&records).await?;
        info!(slot = %self.slot, count = records.len(), "slot seeded");
        Ok(true)
    }

    /// Remove the slot entirely, as if it had never been seeded.
    pub async fn clear(&self) -> Result<(), ServiceError> {
        let existed = self.storage.remove(&self.slot).await?;
        info!(slot = %self.slot, existed, "slot cleared");
        Ok(())
    }
}

fn patch_fields<P: Serialize + ?Sized>(patch: &P) -> Result<Map<String, Value>, ServiceError> {
    match serde_json::to_value(patch).map_err(|e| ServiceError::InvalidPatch(e.to_string()))? {
        Value::Object(mut fields) => {
            fields.remove("id");
            Ok(fields)
        }
        other => Err(ServiceError::InvalidPatch(format!("expected an object, got {}", json_kind(&other)))),
    }
}

fn merge_fields<T: Entity>(current: &T, fields: Map<String, Value>) -> Result<T, ServiceError> {
    let mut base = serde_json::to_value(current).map_err(|e| ServiceError::Serialize(e.to_string()))?;
    let Value::Object(existing) = &mut base else {
        return Err(ServiceError::InvalidPatch("entity does not serialize to an object".into()));
    };
    existing.extend(fields);
    serde_json::from_value(base).map_err(|e| ServiceError::InvalidPatch(e.to_string()))
}

/// Every id non-empty and unique within the collection.
fn check_ids<T>(records: &[Record<T>]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if r.id().is_empty() {
            return Err("record with empty id".into());
        }
        if !seen.insert(r.id()) {
            return Err(format!("duplicate id '{}'", r.id()));
        }
    }
    Ok(())
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
