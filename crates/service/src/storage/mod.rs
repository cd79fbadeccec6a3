//! Slot storage abstractions for the entity store
//!
//! A slot is a named location holding the serialized form of one collection.
//! The store only needs whole-value get/set/remove by name, so backends stay small:
//! an in-memory map for tests and single-process use, and one JSON file per slot.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod memory;
pub mod json_file;

pub use json_file::FileSlotStorage;
pub use memory::MemorySlotStorage;

/// Durable medium holding one serialized collection per slot name.
///
/// `write` replaces the whole slot; a reader sees either the previous or the
/// new contents, never a mix.
#[async_trait]
pub trait SlotStorage: Send + Sync {
    async fn read(&self, slot: &str) -> Result<Option<String>, ServiceError>;
    async fn write(&self, slot: &str, contents: String) -> Result<(), ServiceError>;
    /// Remove a slot; returns whether it existed.
    async fn remove(&self, slot: &str) -> Result<bool, ServiceError>;
}

/// Slot names double as file names, so keep them to `[A-Za-z0-9_-]`.
pub fn validate_slot_name(slot: &str) -> Result<(), ServiceError> {
    if slot.is_empty() {
        return Err(ServiceError::Validation("slot name must not be empty".into()));
    }
    if !slot.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(ServiceError::Validation(format!("slot name '{}' may only contain [A-Za-z0-9_-]", slot)));
    }
    Ok(())
}
