use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::ExportFormat;

const APP_DIR_NAME: &str = "tickex";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const FORMAT_ENV: &str = "TICKEX_FORMAT";
pub const OUTPUT_DIR_ENV: &str = "TICKEX_OUTPUT_DIR";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_format: ExportFormat,
    pub output_dir: Option<PathBuf>,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    pub fn load(workspace_hint: &Path) -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::from_sources(stored, |key| env::var(key).ok(), workspace_hint)
    }

    /// Merge stored settings with overrides; `lookup` resolves env vars.
    pub fn from_sources(
        stored: StoredConfig,
        lookup: impl Fn(&str) -> Option<String>,
        workspace_hint: &Path,
    ) -> AppResult<Self> {
        let format_value = lookup(FORMAT_ENV)
            .filter(|v| !v.trim().is_empty())
            .or(stored.default_format);
        let default_format = match format_value {
            Some(value) => ExportFormat::from_str(&value).ok_or_else(|| {
                AppError::Configuration(format!("unknown export format '{value}'"))
            })?,
            None => ExportFormat::default(),
        };

        let output_dir = lookup(OUTPUT_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .or(stored.output_dir)
            .map(|dir| {
                let dir = PathBuf::from(dir);
                if dir.is_absolute() {
                    dir
                } else {
                    workspace_hint.join(dir)
                }
            });

        Ok(Self {
            default_format,
            output_dir,
            workspace_root: workspace_hint.to_path_buf(),
        })
    }
}

/// Settings persisted by `tickex config init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("could not determine the user config directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
