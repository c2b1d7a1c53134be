// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration loading from files.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::UlogConfig;

/// Config file names to search for (in order).
pub const CONFIG_FILES: &[&str] = &["ulog.json", ".ulog.json", "ulog.yaml", "ulog.yml"];

/// Find the first config file present in `dir`.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load configuration from a directory.
///
/// Searches for config files in the following order:
/// 1. ulog.json
/// 2. .ulog.json
/// 3. ulog.yaml
/// 4. ulog.yml
pub fn load_workspace_config(dir: &Path) -> Result<Option<UlogConfig>, ConfigError> {
    match find_config_file(dir) {
        Some(path) => load_config_file(&path).map(Some),
        None => Ok(None),
    }
}

/// Load a configuration file (JSON or YAML, chosen by extension).
pub fn load_config_file(path: &Path) -> Result<UlogConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(ConfigError::from),
        _ => serde_json::from_str(&content).map_err(ConfigError::from),
    }
}
