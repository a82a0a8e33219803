use crate::error::AppError;
use media_picker::PickerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "snapsheet.toml";
const SETTINGS_ENV: &str = "SNAPSHEET_CONFIG";

/// App settings, read once at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// UI language, e.g. "de-DE"
    pub language: Option<String>,
    /// Where saved photos and their metadata go
    pub output_dir: PathBuf,
    pub picker: PickerConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: None,
            output_dir: default_output_dir(),
            picker: PickerConfig::default(),
        }
    }
}

/// Get the storage path based on platform
fn default_output_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        PathBuf::from("/storage/emulated/0/Android/data/de.teilgedanken.snapsheet/files/media")
    }

    #[cfg(not(target_os = "android"))]
    {
        PathBuf::from("./media")
    }
}

pub fn parse(s: &str) -> Result<AppSettings, AppError> {
    let settings: AppSettings = toml::from_str(s)?;
    settings.picker.validate()?;
    Ok(settings)
}

pub fn load_from(path: &Path) -> Result<AppSettings, AppError> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Loads `$SNAPSHEET_CONFIG` or `./snapsheet.toml`, falling back to defaults
pub fn load() -> AppSettings {
    let path = std::env::var_os(SETTINGS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));

    if !path.exists() {
        log::info!("No settings at {:?}, using defaults", path);
        return AppSettings::default();
    }

    match load_from(&path) {
        Ok(settings) => {
            log::info!("Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            log::warn!("Ignoring settings at {:?}: {}", path, e);
            AppSettings::default()
        }
    }
}
