//! Configuration resolution for skureg-bulk
//!
//! **Priority:** CLI flag → ENV (`SKUREG_*`) → TOML file → compiled default

use clap::Parser;
use skureg_common::config::{
    database_path, default_config_path, load_toml_config, resolve_root_folder, BulkSettings,
    CommitMode,
};
use skureg_common::{Error, Result};
use std::path::PathBuf;

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:4000";

/// Command-line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "skureg-bulk", version, about = "Bulk SKU registration service")]
pub struct Args {
    /// TOML config file
    #[arg(long, env = "SKUREG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Folder holding skureg.db
    #[arg(long, env = "SKUREG_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:4000
    #[arg(long, env = "SKUREG_BIND")]
    pub bind: Option<String>,

    /// Inventory slots created per new SKU
    #[arg(long, env = "SKUREG_INVENTORY_SLOTS")]
    pub inventory_slots: Option<u32>,

    /// per-record | batch
    #[arg(long, env = "SKUREG_COMMIT_MODE")]
    pub commit_mode: Option<CommitMode>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub database_path: PathBuf,
    pub bulk: BulkSettings,
}

impl ServiceConfig {
    /// Merge arguments over the TOML file over defaults
    pub fn resolve(args: &Args) -> Result<Self> {
        let toml_config = match args.config.clone().or_else(default_config_path) {
            Some(path) => load_toml_config(&path)?,
            None => Default::default(),
        };

        let root_folder = resolve_root_folder(args.root_folder.as_deref(), &toml_config);

        let bind_address = args
            .bind
            .clone()
            .or_else(|| toml_config.bind_address.clone())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let mut bulk = toml_config.bulk;
        if let Some(slots) = args.inventory_slots {
            bulk.inventory_slots = slots;
        }
        if let Some(mode) = args.commit_mode {
            bulk.commit_mode = mode;
        }

        if bulk.inventory_slots == 0 {
            return Err(Error::Config(
                "inventory_slots must be at least 1".to_string(),
            ));
        }
        if bulk.default_creator.trim().is_empty() {
            return Err(Error::Config("default_creator must not be blank".to_string()));
        }

        Ok(Self {
            bind_address,
            database_path: database_path(&root_folder),
            bulk,
        })
    }
}
