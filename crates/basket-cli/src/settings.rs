//! User settings, persisted as TOML.
//!
//! The settings file lives in the platform config folder:
//! - macOS: ~/Library/Application Support/dev.basket.Basket/
//! - Windows: %APPDATA%/basket/Basket/config/
//! - Linux: ~/.config/basket/
//!
//! A missing or unreadable file never stops the program; defaults are used.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use basket_export::ExportOptions;
use basket_query::DEFAULT_PAGE_SIZE;
use basket_store::DEFAULT_STORAGE_KEY;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "basket";
const APP_NAME: &str = "Basket";
const CONFIG_FILENAME: &str = "settings.toml";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV_VAR: &str = "BASKET_DATA_DIR";

/// Simulated latency between requesting and applying another page.
pub const DEFAULT_LOAD_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where item data is stored; the platform data folder when unset.
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub page_size: usize,
    pub load_delay_ms: u64,
    pub export: ExportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            load_delay_ms: DEFAULT_LOAD_DELAY_MS,
            export: ExportSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub delimiter: char,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl ExportSettings {
    pub fn options(&self) -> Result<ExportOptions> {
        ExportOptions::with_delimiter(self.delimiter).context("invalid export.delimiter setting")
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Path of the settings file in the platform config folder.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `explicit`, or from the platform config folder.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    match explicit.map(Path::to_path_buf).or_else(settings_path) {
        Some(path) => load_settings_from(&path),
        None => {
            tracing::warn!("could not determine settings path, using defaults");
            Settings::default()
        }
    }
}

/// Load settings from `path`, falling back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to parse settings, using defaults");
                Settings::default()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no settings file found, using defaults");
            Settings::default()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "failed to read settings, using defaults");
            Settings::default()
        }
    }
}

/// Write `settings` to `path`, creating the parent folder if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(settings).context("serialize settings")?;
    fs::write(path, content).with_context(|| format!("write settings file {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}

/// Resolve the data directory.
///
/// Precedence: command-line flag, `BASKET_DATA_DIR`, settings file, then the
/// platform data folder.
pub fn resolve_data_dir(flag: Option<&Path>, settings: &Settings) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV_VAR).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = &settings.data_dir {
        return Ok(dir.clone());
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("could not determine a data directory; pass --data-dir"))
}
