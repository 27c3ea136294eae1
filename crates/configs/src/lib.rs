use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How new claim ids are derived.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClaimIdPolicy {
    /// `1_000_001 + claim count`; can reuse an id after a claim is deleted.
    #[default]
    Length,
    /// One past the highest numeric claim id on record.
    Monotonic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
    #[serde(default)]
    pub claim_ids: ClaimIdPolicy,
    /// Fail on unparseable documents instead of loading them as empty.
    #[serde(default)]
    pub strict_documents: bool,
    #[serde(default = "default_seed_defaults")]
    pub seed_defaults: bool,
    #[serde(default = "default_max_id_attempts")]
    pub max_id_attempts: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backup_dir: default_backup_dir(),
            claim_ids: ClaimIdPolicy::default(),
            strict_documents: false,
            seed_defaults: default_seed_defaults(),
            max_id_attempts: default_max_id_attempts(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_backup_dir() -> String { "backup".into() }
fn default_seed_defaults() -> bool { true }
fn default_max_id_attempts() -> u32 { 10_000 }
fn default_log_format() -> String { "compact".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Like [`AppConfig::load_and_validate`], but a missing config file yields the defaults.
    pub fn load_or_default() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.logging.normalize();
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("CHOCAN_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
        if self.backup_dir.trim().is_empty() {
            self.backup_dir = default_backup_dir();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_id_attempts == 0 {
            return Err(anyhow!("storage.max_id_attempts must be >= 1"));
        }
        if self.data_dir == self.backup_dir {
            return Err(anyhow!("storage.backup_dir must differ from storage.data_dir"));
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        let format = self.format.trim().to_ascii_lowercase();
        self.format = if format == "json" { format } else { default_log_format() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.storage.data_dir, "data");
        assert_eq!(cfg.storage.backup_dir, "backup");
        assert_eq!(cfg.storage.claim_ids, ClaimIdPolicy::Length);
        assert!(!cfg.storage.strict_documents);
        assert!(cfg.storage.seed_defaults);
        assert_eq!(cfg.storage.max_id_attempts, 10_000);
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn parses_storage_section() {
        let cfg = parse(
            r#"
            [storage]
            data_dir = "/var/lib/chocan"
            claim_ids = "monotonic"
            strict_documents = true
            seed_defaults = false

            [logging]
            format = "JSON"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.storage.data_dir, "/var/lib/chocan");
        assert_eq!(cfg.storage.claim_ids, ClaimIdPolicy::Monotonic);
        assert!(cfg.storage.strict_documents);
        assert!(!cfg.storage.seed_defaults);
        assert_eq!(cfg.storage.backup_dir, "backup");
        assert_eq!(cfg.logging.format, "JSON");
    }

    #[test]
    fn rejects_unknown_claim_policy() {
        assert!(parse("[storage]\nclaim_ids = \"random\"").is_err());
    }

    #[test]
    fn validate_rejects_zero_attempts() {
        let storage = StorageConfig { max_id_attempts: 0, ..StorageConfig::default() };
        assert!(storage.validate().is_err());
    }

    #[test]
    fn validate_rejects_backup_equal_to_data_dir() {
        let storage = StorageConfig { backup_dir: "data".into(), ..StorageConfig::default() };
        assert!(storage.validate().is_err());
    }

    #[test]
    fn logging_format_normalizes() {
        let mut logging = LoggingConfig { format: " Json ".into() };
        logging.normalize();
        assert_eq!(logging.format, "json");
        let mut logging = LoggingConfig { format: "pretty".into() };
        logging.normalize();
        assert_eq!(logging.format, "compact");
    }
}
