//! Configuration loading and root folder resolution
//!
//! Resolution order for every setting:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Items 1 and 2 are handled by each service's argument parser; this module
//! covers the TOML file and the compiled defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Directory name used under the platform config/data directories
pub const APP_DIR: &str = "skureg";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "skureg.db";

/// How a bulk submission commits its writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitMode {
    /// Each record's aggregate commits on its own
    #[default]
    PerRecord,
    /// One enclosing transaction for the whole batch
    Batch,
}

impl FromStr for CommitMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-record" | "per_record" | "record" => Ok(CommitMode::PerRecord),
            "batch" => Ok(CommitMode::Batch),
            other => Err(Error::Config(format!(
                "Unknown commit mode '{}' (expected 'per-record' or 'batch')",
                other
            ))),
        }
    }
}

impl fmt::Display for CommitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitMode::PerRecord => f.write_str("per-record"),
            CommitMode::Batch => f.write_str("batch"),
        }
    }
}

/// `[bulk]` section of the TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkSettings {
    /// Inventory slots created for every new SKU
    pub inventory_slots: u32,
    pub commit_mode: CommitMode,
    /// Attribution used when a submission carries no creator
    pub default_creator: String,
    /// Upper bound for an uploaded spreadsheet
    pub max_upload_bytes: usize,
}

impl Default for BulkSettings {
    fn default() -> Self {
        Self {
            inventory_slots: 5,
            commit_mode: CommitMode::PerRecord,
            default_creator: "system".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Contents of `skureg.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub bulk: BulkSettings,
}

/// Default location of the TOML file for the platform
///
/// `~/.config/skureg/skureg.toml` on Linux, the equivalent per-user config
/// directory elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(format!("{}.toml", APP_DIR)))
}

/// Load the TOML config file
///
/// A missing file is not an error: a warning is logged and defaults are
/// returned. A file that exists but cannot be parsed is a Config error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file not found at {} - using defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Write a TOML config file, creating parent directories as needed
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Resolve the root folder holding the database
///
/// `cli_arg` already carries the environment override (argument parsers read
/// both), so only the TOML value and the compiled default remain here.
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    // ~/.local/share/skureg on Linux, %LOCALAPPDATA%\skureg on Windows,
    // ~/Library/Application Support/skureg on macOS
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./skureg_data"))
}

/// Database path inside a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_mode_parsing() {
        assert_eq!("per-record".parse::<CommitMode>().unwrap(), CommitMode::PerRecord);
        assert_eq!("Batch".parse::<CommitMode>().unwrap(), CommitMode::Batch);
        assert!("sometimes".parse::<CommitMode>().is_err());
    }

    #[test]
    fn test_bulk_defaults() {
        let settings = BulkSettings::default();
        assert_eq!(settings.inventory_slots, 5);
        assert_eq!(settings.commit_mode, CommitMode::PerRecord);
        assert_eq!(settings.default_creator, "system");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: TomlConfig = toml::from_str(
            r#"
            bind_address = "0.0.0.0:4000"

            [bulk]
            commit_mode = "batch"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_address.as_deref(), Some("0.0.0.0:4000"));
        assert_eq!(config.bulk.commit_mode, CommitMode::Batch);
        assert_eq!(config.bulk.inventory_slots, 5);
        assert!(config.root_folder.is_none());
    }

    #[test]
    fn test_cli_root_folder_wins() {
        let toml_config = TomlConfig {
            root_folder: Some(PathBuf::from("/srv/from-toml")),
            ..Default::default()
        };

        let resolved = resolve_root_folder(Some(Path::new("/srv/from-cli")), &toml_config);
        assert_eq!(resolved, PathBuf::from("/srv/from-cli"));

        let resolved = resolve_root_folder(None, &toml_config);
        assert_eq!(resolved, PathBuf::from("/srv/from-toml"));
    }

    #[test]
    fn test_database_path() {
        assert_eq!(
            database_path(Path::new("/data")),
            PathBuf::from("/data/skureg.db")
        );
    }
}
