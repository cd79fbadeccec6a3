//! Environment/runtime helpers
//!
//! Sanity checks to ensure the slot data directory exists at startup.

use std::path::Path;
use tracing::{debug, warn};

/// Ensure the data directory exists and is a directory.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(data_dir).await {
        Ok(meta) if meta.is_dir() => {
            debug!(%data_dir, "data directory present");
            Ok(())
        }
        Ok(_) => Err(anyhow::anyhow!("{data_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%data_dir, "data directory not found; creating it");
            tokio::fs::create_dir_all(data_dir)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
            Ok(())
        }
    }
}

/// Path of the file backing a slot inside `data_dir`.
pub fn slot_file(data_dir: impl AsRef<Path>, slot: &str) -> std::path::PathBuf {
    data_dir.as_ref().join(format!("{slot}.json"))
}
