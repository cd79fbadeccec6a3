use std::ops::Deref;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::ModelError;

/// A payload type stored in its own collection.
///
/// Payloads never carry the identifier themselves; the store wraps them in
/// a [`Record`] and owns the `id` field. A payload must not declare a field
/// named `id`, since it is flattened next to it when persisted.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Default slot name for this entity type.
    const COLLECTION: &'static str;

    /// Check field-level constraints before a record is written.
    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }
}

/// One stored entity instance.
///
/// Serialized as a flat object: `{"id": "...", <payload fields>}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    id: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    pub fn new(id: impl Into<String>, data: T) -> Self {
        Self { id: id.into(), data }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}
