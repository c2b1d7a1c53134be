// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration module for ulog.
//!
//! Settings come from three sources:
//! - Config file: ulog.json, .ulog.json, ulog.yaml or ulog.yml
//! - Overrides: command-line arguments or code
//! - Built-in defaults
//!
//! Configuration is merged with precedence (overrides > file > defaults).

mod loader;
mod merger;
mod types;

pub use loader::{find_config_file, load_config_file, load_workspace_config, CONFIG_FILES};
pub use merger::{default_config, merge_config, ConfigOverrides};
pub use types::{ResolvedConfig, TelemetryFileConfig, UlogConfig};

use crate::error::ConfigError;
use std::path::Path;

/// Load and merge the config file found in `dir`, if any.
pub fn load_config(dir: &Path, overrides: ConfigOverrides) -> Result<ResolvedConfig, ConfigError> {
    let file = load_workspace_config(dir)?;
    merge_config(file, overrides)
}

/// Load and merge one explicit config file. The file must exist.
pub fn load_config_from(path: &Path, overrides: ConfigOverrides) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_file(path)?;
    merge_config(Some(file), overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_with_no_files() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), ConfigOverrides::default()).unwrap();
        assert_eq!(config, ResolvedConfig::default());
    }

    #[test]
    fn test_load_config_with_workspace_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("ulog.yml"), "threshold: info\n").unwrap();

        let config = load_config(
            temp.path(),
            ConfigOverrides {
                logger_name: Some("cli".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.threshold, Severity::Info);
        assert_eq!(config.logger_name, "cli");
    }

    #[test]
    fn test_load_config_from_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_config_from(&temp.path().join("nope.yaml"), ConfigOverrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
