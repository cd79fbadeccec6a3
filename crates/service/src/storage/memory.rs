use async_trait::async_trait;
use dashmap::DashMap;

use super::{validate_slot_name, SlotStorage};
use crate::errors::ServiceError;

/// Process-local slot storage. Contents vanish with the process.
#[derive(Default, Debug)]
pub struct MemorySlotStorage {
    slots: DashMap<String, String>,
}

impl MemorySlotStorage {
    pub fn new() -> Self { Self::default() }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    pub fn slot_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

#[async_trait]
impl SlotStorage for MemorySlotStorage {
    async fn read(&self, slot: &str) -> Result<Option<String>, ServiceError> {
        Ok(self.slots.get(slot).map(|v| v.value().clone()))
    }

    async fn write(&self, slot: &str, contents: String) -> Result<(), ServiceError> {
        validate_slot_name(slot)?;
        self.slots.insert(slot.to_string(), contents);
        Ok(())
    }

    async fn remove(&self, slot: &str) -> Result<bool, ServiceError> {
        Ok(self.slots.remove(slot).is_some())
    }
}
