use std::path::PathBuf;

use anyhow::Result;

use devcloak_core::config::{ConfigPaths, FileFlagStore};

pub mod config;
pub mod decide;
pub mod replay;

/// The preference store the engine resolves flags from: an explicit path,
/// or the per-user config location.
pub fn flag_store(config_path: Option<PathBuf>) -> Result<FileFlagStore> {
    match config_path {
        Some(path) => Ok(FileFlagStore::new(path)),
        None => FileFlagStore::default_location(),
    }
}

pub fn effective_config_path(config_path: Option<PathBuf>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path),
        None => Ok(ConfigPaths::resolve()?.config_path),
    }
}
