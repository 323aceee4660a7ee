//! Application context for the PassFort CLI.
//!
//! Bundles the parsed arguments with the lazily-loaded config file so
//! handlers don't thread paths and defaults through every call.

use std::io::IsTerminal;
use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use tracing::debug;

use passfort_core::crypto::KdfParams;
use passfort_core::generator::GeneratorOptions;
use passfort_core::{SqliteStore, VaultService};

use crate::cli::Cli;
use crate::config::{read_config, PassfortConfig};
use crate::ui::UiContext;

use super::resolver::{resolve_config_path, resolve_vault_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<PassfortConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&PassfortConfig>> {
        let config = self.config.get_or_try_init(|| -> anyhow::Result<Option<PassfortConfig>> {
            let path = resolve_config_path()?;
            if !path.exists() {
                debug!(path = %path.display(), "no config file");
                return Ok(None);
            }
            debug!(path = %path.display(), "loading config");
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    pub fn vault_path(&self) -> anyhow::Result<PathBuf> {
        resolve_vault_path(self.cli.vault.as_deref(), self.config()?)
    }

    /// KDF cost for new vaults.
    pub fn kdf_params(&self) -> anyhow::Result<KdfParams> {
        Ok(self
            .config()?
            .map(|c| KdfParams::from(c.kdf))
            .unwrap_or_default())
    }

    /// Generator defaults from config.
    pub fn generator_options(&self) -> anyhow::Result<GeneratorOptions> {
        Ok(self
            .config()?
            .map(|c| GeneratorOptions::from(c.generator))
            .unwrap_or_default())
    }

    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color)
    }

    /// Whether prompting is possible.
    pub fn interactive(&self, no_input: bool) -> bool {
        !no_input && std::io::stdin().is_terminal()
    }

    /// Open the resolved vault.
    pub fn open_vault(&self) -> anyhow::Result<VaultService<SqliteStore>> {
        let path = self.vault_path()?;
        debug!(path = %path.display(), "opening vault");
        Ok(VaultService::new(SqliteStore::open(&path)?))
    }
}
