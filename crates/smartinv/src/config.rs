use crate::error::{Result, SmartinvError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use xdg::BaseDirectories;

const DEFAULT_SMARTCTL: &str = "smartctl";

/// Settings read from `smartinv.toml`. Every key is optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub smartctl_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub parallel: Option<bool>,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SmartinvError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Values the command line can override.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub smartctl_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub parallel: Option<bool>,
}

pub struct Config {
    pub smartctl_path: PathBuf,
    pub timeout: Option<Duration>,
    pub parallel: bool,
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Layers command line, environment, config file and defaults, in that order.
    pub fn new(overrides: Overrides) -> Result<Self> {
        let config_path = match overrides.config_path {
            Some(path) => Some(path),
            None => BaseDirectories::with_prefix("smartinv")
                .ok()
                .and_then(|xdg| xdg.find_config_file("smartinv.toml")),
        };

        let file = match &config_path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let smartctl_path = if let Some(path) = overrides.smartctl_path {
            path
        } else if let Ok(env_path) = std::env::var("SMARTINV_SMARTCTL") {
            PathBuf::from(env_path)
        } else {
            file.smartctl_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SMARTCTL))
        };

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => Some(secs),
            None => match std::env::var("SMARTINV_TIMEOUT") {
                Ok(value) => Some(value.trim().parse::<u64>().map_err(|e| {
                    SmartinvError::Config(format!("Invalid SMARTINV_TIMEOUT '{}': {}", value, e))
                })?),
                Err(_) => file.timeout_secs,
            },
        };

        Ok(Self {
            smartctl_path,
            timeout: timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
            parallel: overrides.parallel.or(file.parallel).unwrap_or(false),
            config_path,
        })
    }
}
