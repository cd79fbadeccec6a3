use std::{io::ErrorKind, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use super::{validate_slot_name, SlotStorage};
use crate::errors::ServiceError;

/// File-backed slot storage: one JSON document per slot under a data directory.
///
/// Writes go to a temporary sibling file which is then renamed over the slot
/// file, so a concurrent reader never sees a half-written collection.
#[derive(Clone, Debug)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    /// Initialize the storage rooted at `dir`, creating the directory if missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, ServiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(Arc::new(Self { dir }))
    }

    fn path_for(&self, slot: &str) -> Result<PathBuf, ServiceError> {
        validate_slot_name(slot)?;
        Ok(common::env::slot_file(&self.dir, slot))
    }
}

#[async_trait]
impl SlotStorage for FileSlotStorage {
    async fn read(&self, slot: &str) -> Result<Option<String>, ServiceError> {
        let path = self.path_for(slot)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::Storage(format!("read {}: {}", path.display(), e))),
        }
    }

    async fn write(&self, slot: &str, contents: String) -> Result<(), ServiceError> {
        let path = self.path_for(slot)?;
        let tmp = self.dir.join(format!(".{}.{}.tmp", slot, Uuid::new_v4()));
        fs::write(&tmp, contents.as_bytes())
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {}", tmp.display(), e)))?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::Storage(format!("replace {}: {}", path.display(), e)));
        }
        debug!(%slot, bytes = contents.len(), "slot file replaced");
        Ok(())
    }

    async fn remove(&self, slot: &str) -> Result<bool, ServiceError> {
        let path = self.path_for(slot)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ServiceError::Storage(format!("remove {}: {}", path.display(), e))),
        }
    }
}
