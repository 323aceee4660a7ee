use std::path::PathBuf;

use passfort_core::crypto::KdfParams;
use passfort_core::storage::EntryStore;
use passfort_core::SqliteStore;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, KdfSection, PassfortConfig};
use crate::errors::CliError;
use crate::ui::{badge, details, hint, print, Badge};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);

    let path = match args.path.as_deref() {
        Some(p) => PathBuf::from(p),
        None => ctx.vault_path()?,
    };
    if path.exists() {
        return Err(CliError::invalid_input(format!(
            "A vault already exists at {}",
            path.display()
        ))
        .into());
    }

    let defaults = ctx.kdf_params()?;
    let params = KdfParams::new(
        args.memory_kib.unwrap_or(defaults.memory_kib),
        args.iterations.unwrap_or(defaults.iterations),
        args.parallelism.unwrap_or(defaults.parallelism),
    );
    params
        .validate()
        .map_err(|e| CliError::invalid_input(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
        })?;
    }
    let store = SqliteStore::create(&path, &params)?;
    let vault_id = store.metadata()?.vault_id;

    let absolute = if path.is_absolute() {
        path.clone()
    } else {
        std::env::current_dir()?.join(&path)
    };
    let config_path = resolve_config_path()?;
    let wrote_config = if config_path.exists() {
        false
    } else {
        write_config(
            &config_path,
            &PassfortConfig::new(absolute.clone(), KdfSection::from(params)),
        )?;
        true
    };

    if !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Ok, "Vault created"));
        let mut items = vec![
            ("Path", absolute.display().to_string()),
            ("Vault ID", vault_id.to_string()),
            (
                "KDF",
                format!(
                    "argon2id m={}KiB t={} p={}",
                    params.memory_kib, params.iterations, params.parallelism
                ),
            ),
        ];
        if wrote_config {
            items.push(("Config", config_path.display().to_string()));
        }
        print(&ui, &details(&ui, &items));
        print(
            &ui,
            &hint(
                &ui,
                "Entries are encrypted with the PIN you give to `passfort add`. There is no PIN reset.",
            ),
        );
    }
    Ok(())
}
