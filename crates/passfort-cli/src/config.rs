use std::path::{Path, PathBuf};

use passfort_core::crypto::KdfParams;
use passfort_core::generator::GeneratorOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct PassfortConfig {
    pub vault: VaultSection,
    #[serde(default)]
    pub kdf: KdfSection,
    #[serde(default)]
    pub generator: GeneratorSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VaultSection {
    pub path: String,
}

/// Argon2id cost used when creating a vault. Existing vaults keep the
/// parameters they were created with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfSection {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfSection {
    fn default() -> Self {
        Self::from(KdfParams::default())
    }
}

impl From<KdfParams> for KdfSection {
    fn from(params: KdfParams) -> Self {
        Self {
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
        }
    }
}

impl From<KdfSection> for KdfParams {
    fn from(section: KdfSection) -> Self {
        KdfParams::new(section.memory_kib, section.iterations, section.parallelism)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    pub length: usize,
    pub uppercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        let options = GeneratorOptions::default();
        Self {
            length: options.length,
            uppercase: options.uppercase,
            numbers: options.numbers,
            symbols: options.symbols,
        }
    }
}

impl From<GeneratorSection> for GeneratorOptions {
    fn from(section: GeneratorSection) -> Self {
        GeneratorOptions::new(
            section.length,
            section.uppercase,
            section.numbers,
            section.symbols,
        )
    }
}

impl PassfortConfig {
    pub fn new(vault_path: PathBuf, kdf: KdfSection) -> Self {
        Self {
            vault: VaultSection {
                path: vault_path.to_string_lossy().to_string(),
            },
            kdf,
            generator: GeneratorSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_vault_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("vault.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<PassfortConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &PassfortConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("passfort"));
        }
    }
    Ok(home_dir()?.join(".config").join("passfort"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("passfort"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("passfort"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
