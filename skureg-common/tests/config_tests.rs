//! Integration tests for TOML config loading
//!
//! - Missing files fall back to defaults without failing startup
//! - Malformed files are reported as Config errors
//! - Written configs load back unchanged
//! - Unreadable paths surface as Io errors

use skureg_common::config::{
    load_toml_config, write_toml_config, BulkSettings, CommitMode, TomlConfig,
};
use skureg_common::Error;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_config_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let config = load_toml_config(&path).expect("Missing file should not be an error");
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_malformed_config_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "bind_address = [not toml").unwrap();

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_written_config_loads_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("skureg.toml");

    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/srv/skureg")),
        bind_address: Some("0.0.0.0:4100".to_string()),
        bulk: BulkSettings {
            inventory_slots: 3,
            commit_mode: CommitMode::Batch,
            default_creator: "importer".to_string(),
            max_upload_bytes: 1024,
        },
    };

    write_toml_config(&config, &path).unwrap();
    let loaded = load_toml_config(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_unreadable_config_path_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    // A directory exists but cannot be read as a file
    let result = load_toml_config(temp_dir.path());
    assert!(matches!(result, Err(Error::Io(_))));
}
