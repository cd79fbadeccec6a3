use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
}

/// Which durable medium backs the entity slots.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    File,
    Memory,
}

/// How new record identifiers are produced.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default)]
    pub latency: LatencyConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
            id_strategy: IdStrategy::default(),
            latency: LatencyConfig::default(),
        }
    }
}

/// Simulated per-operation latency in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct LatencyConfig {
    #[serde(default = "default_read_all_ms")]
    pub get_all_ms: u64,
    #[serde(default = "default_read_one_ms")]
    pub get_by_id_ms: u64,
    #[serde(default = "default_write_ms")]
    pub create_ms: u64,
    #[serde(default = "default_write_ms")]
    pub update_ms: u64,
    #[serde(default = "default_write_ms")]
    pub delete_ms: u64,
    #[serde(default = "default_count_ms")]
    pub count_ms: u64,
    #[serde(default = "default_read_one_ms")]
    pub search_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            get_all_ms: default_read_all_ms(),
            get_by_id_ms: default_read_one_ms(),
            create_ms: default_write_ms(),
            update_ms: default_write_ms(),
            delete_ms: default_write_ms(),
            count_ms: default_count_ms(),
            search_ms: default_read_one_ms(),
        }
    }
}

impl LatencyConfig {
    /// All operations complete without suspension.
    pub fn zero() -> Self {
        Self { get_all_ms: 0, get_by_id_ms: 0, create_ms: 0, update_ms: 0, delete_ms: 0, count_ms: 0, search_ms: 0 }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_read_all_ms() -> u64 { 300 }
fn default_read_one_ms() -> u64 { 200 }
fn default_write_ms() -> u64 { 300 }
fn default_count_ms() -> u64 { 100 }

/// Upper bound for a single simulated delay.
const MAX_LATENCY_MS: u64 = 60_000;

/// `CONFIG_PATH`, or `config.toml` when unset.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from `CONFIG_PATH` (or `config.toml`) and validate; a missing file yields the defaults.
    pub fn load_or_default() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 允许通过环境变量覆盖数据目录
        self.store.normalize_from_env();
        self.store.validate()?;
        Ok(())
    }
}

impl StoreConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("STORE_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.latency.validate()
    }
}

impl LatencyConfig {
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("get_all_ms", self.get_all_ms),
            ("get_by_id_ms", self.get_by_id_ms),
            ("create_ms", self.create_ms),
            ("update_ms", self.update_ms),
            ("delete_ms", self.delete_ms),
            ("count_ms", self.count_ms),
            ("search_ms", self.search_ms),
        ];
        for (name, ms) in all {
            if ms > MAX_LATENCY_MS {
                return Err(anyhow!("store.latency.{name} must be <= {MAX_LATENCY_MS}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() -> Result<()> {
        let cfg = load_from_str("")?;
        assert_eq!(cfg.store.backend, StoreBackend::File);
        assert_eq!(cfg.store.data_dir, "data");
        assert_eq!(cfg.store.id_strategy, IdStrategy::Uuid);
        assert_eq!(cfg.store.latency, LatencyConfig::default());
        assert_eq!(cfg.store.latency.get_all_ms, 300);
        assert_eq!(cfg.store.latency.count_ms, 100);
        Ok(())
    }

    #[test]
    fn parses_store_section() -> Result<()> {
        let cfg = load_from_str(
            r#"
            [store]
            backend = "memory"
            data_dir = "var/slots"
            id_strategy = "sequential"

            [store.latency]
            get_all_ms = 0
            update_ms = 5
            "#,
        )?;
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.store.data_dir, "var/slots");
        assert_eq!(cfg.store.id_strategy, IdStrategy::Sequential);
        assert_eq!(cfg.store.latency.get_all_ms, 0);
        assert_eq!(cfg.store.latency.update_ms, 5);
        // untouched keys keep their defaults
        assert_eq!(cfg.store.latency.get_by_id_ms, 200);
        Ok(())
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(load_from_str("[store]\nbackend = \"redis\"\n").is_err());
    }

    #[test]
    fn validate_rejects_excessive_latency() {
        let mut latency = LatencyConfig::zero();
        latency.search_ms = MAX_LATENCY_MS + 1;
        assert!(latency.validate().is_err());
        assert!(LatencyConfig::default().validate().is_ok());
    }
}
