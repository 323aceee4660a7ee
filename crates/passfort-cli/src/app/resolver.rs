//! Path resolution for config and vault files.

use std::path::PathBuf;

use crate::config::{default_config_path, default_vault_path, PassfortConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking `PASSFORT_CONFIG` first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the vault path: `--vault` / `PASSFORT_VAULT`, then the config
/// file, then the XDG data directory.
pub fn resolve_vault_path(
    flag: Option<&str>,
    config: Option<&PassfortConfig>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag.filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.vault.path));
    }
    default_vault_path()
}
