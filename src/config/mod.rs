//! Configuration for buildinfo
//!
//! Settings are read from a single TOML file. The path is taken from
//! `--config` / `BUILDINFO_CONFIG` when given, otherwise from the platform
//! config directory. A missing file means defaults; nothing is written until
//! `config init` or `config set` runs.

pub mod schema;

pub use schema::Config;

use crate::error::{BuildInfoError, BuildInfoResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// What `init` did with the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// No file existed; defaults were written
    Created,
    /// An existing file was overwritten with defaults
    Replaced,
    /// An existing file was left alone
    Kept,
}

/// Reads and writes the config file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for an explicit path, or the platform default
    pub fn resolve(path: Option<PathBuf>) -> Self {
        Self {
            config_path: path.unwrap_or_else(Self::default_config_path),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// `<config dir>/buildinfo/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("buildinfo")
            .join("config.toml")
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config file; a missing file yields the defaults
    pub async fn load(&self) -> BuildInfoResult<Config> {
        let content = match fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.config_path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(BuildInfoError::io(
                    format!("reading config from {}", self.config_path.display()),
                    e,
                ))
            }
        };

        toml::from_str(&content).map_err(|e| BuildInfoError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write the default config unless a file exists and `force` is off.
    ///
    /// The existing file is never parsed, so a broken one can be replaced.
    pub async fn init(&self, force: bool) -> BuildInfoResult<InitOutcome> {
        let exists = fs::try_exists(&self.config_path).await.map_err(|e| {
            BuildInfoError::io(format!("checking {}", self.config_path.display()), e)
        })?;

        match (exists, force) {
            (true, false) => Ok(InitOutcome::Kept),
            (true, true) => {
                self.save(&Config::default()).await?;
                Ok(InitOutcome::Replaced)
            }
            (false, _) => {
                self.save(&Config::default()).await?;
                Ok(InitOutcome::Created)
            }
        }
    }

    /// Apply `edit` to a copy of `base` and persist it.
    ///
    /// Nothing is written when `edit` fails.
    pub async fn update<F>(&self, base: &Config, edit: F) -> BuildInfoResult<Config>
    where
        F: FnOnce(&mut Config) -> BuildInfoResult<()>,
    {
        let mut config = base.clone();
        edit(&mut config)?;
        self.save(&config).await?;
        Ok(config)
    }

    /// Serialize `config` to the file, creating its directory
    pub async fn save(&self, config: &Config) -> BuildInfoResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BuildInfoError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            BuildInfoError::io(format!("writing config to {}", self.config_path.display()), e)
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }
}
