use std::path::{Path, PathBuf};

use crate::args::DEFAULT_CONFIG_FILES;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }),
            None => Err(ConfigError::MissingExtension),
        }
    }

    fn parse(self, path: &Path, content: &str) -> Result<ConfigFile, ConfigError> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|source| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source,
            }),
            Self::Json => serde_json::from_str(content).map_err(|source| ConfigError::ParseJson {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Loads the run settings file.
///
/// An explicit `path` must exist. Without one, the first of
/// `barrage.toml` / `barrage.json` found in the working directory is used,
/// and having neither is not an error.
///
/// # Errors
///
/// Returns an error when the file cannot be read, has an unknown extension,
/// or does not parse.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let selected = match path {
        Some(path) => Some(PathBuf::from(path)),
        None => DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists()),
    };

    let Some(selected) = selected else {
        return Ok(None);
    };
    tracing::debug!("Using config file {}", selected.display());
    load_config_file(&selected).map(Some)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let format = ConfigFormat::from_path(path).map_err(AppError::config)?;
    let content = std::fs::read_to_string(path).map_err(|source| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })
    })?;
    format.parse(path, &content).map_err(AppError::config)
}
