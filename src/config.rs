use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use directories::BaseDirs;
use serde::Deserialize;

use crate::error::ReportError;
use crate::statusdb::StatusDbSettings;

pub const CONFIG_FILE: &str = "ngi_reports.json";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub statusdb: Option<StatusDbSettings>,
    #[serde(default)]
    pub store_dir: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSettings {
    StatusDb(StatusDbSettings),
    Directory(Utf8PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub store: StoreSettings,
    pub default_project: Option<String>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, ReportError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => Self::default_path().ok_or(ReportError::MissingConfig)?,
        };
        tracing::debug!(path = %config_path.display(), "reading config");

        let content = fs::read_to_string(&config_path)
            .map_err(|_| ReportError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| ReportError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    /// `./ngi_reports.json`, then the per-user config directory.
    pub fn default_path() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("ngi_reports").join(CONFIG_FILE))
            .filter(|path| path.exists())
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, ReportError> {
        let store = match (config.store_dir, config.statusdb) {
            (Some(dir), _) => StoreSettings::Directory(Utf8PathBuf::from(dir)),
            (None, Some(statusdb)) => StoreSettings::StatusDb(statusdb),
            (None, None) => {
                return Err(ReportError::ConfigParse(
                    "either 'statusdb' or 'store_dir' must be set".to_string(),
                ));
            }
        };
        let default_project = config.project.filter(|name| !name.trim().is_empty());

        Ok(ResolvedConfig {
            store,
            default_project,
        })
    }
}
