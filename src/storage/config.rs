//! Configuration handling for hexcast
//!
//! Configuration is stored in `.hexcast/config.toml` (project) and
//! `~/.config/hexcast/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{HexagramId, UNKNOWN_ADDRESS};

/// Environment variable consulted for the requester identifier
pub const REQUESTER_ENV: &str = "HEXCAST_REQUESTER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("No requester identifier: pass --requester, set 'requester' in config, or set $HEXCAST_REQUESTER")]
    MissingRequester,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Default requester identifier for this project
    pub requester: Option<String>,

    /// Client address used in seeds when none is given
    pub address: String,

    /// Append readings to the journal
    pub record: bool,

    /// Deployment override for the main hexagram
    pub override_hexagram: Option<HexagramId>,

    /// Entries shown by `hexcast history` when no limit is given
    pub history_limit: usize,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            requester: None,
            address: UNKNOWN_ADDRESS.to_string(),
            record: true,
            override_hexagram: None,
            history_limit: 20,
        }
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Requester identifier used when the project sets none
    pub requester: Option<String>,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project()?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "hexcast", "hexcast").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Finds and loads project configuration
    fn load_project() -> Result<(ProjectConfig, Option<PathBuf>)> {
        match Self::find_project_root() {
            Some(root) => {
                let config = Self::load_project_config(&root)?;
                Ok((config, Some(root)))
            }
            None => Ok((ProjectConfig::default(), None)),
        }
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(".hexcast").join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        if config.address.trim().is_empty() {
            return Err(ConfigError::Invalid("'address' must not be empty".to_string()).into());
        }

        Ok(config)
    }

    /// Finds the project root by looking for `.hexcast/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(".hexcast").is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if we're in a hexcast project
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Resolves the requester identifier from the flag, config and environment
    pub fn effective_requester(&self, flag: Option<&str>) -> Result<String, ConfigError> {
        self.resolve_requester(flag, |key| std::env::var(key).ok())
    }

    /// Resolution order: flag, project, global, `$HEXCAST_REQUESTER`, `$USER`
    fn resolve_requester<F>(&self, flag: Option<&str>, env: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        flag.map(str::to_string)
            .or_else(|| self.project.requester.clone())
            .or_else(|| self.global.requester.clone())
            .or_else(|| env(REQUESTER_ENV))
            .or_else(|| env("USER"))
            .filter(|r| !r.trim().is_empty())
            .ok_or(ConfigError::MissingRequester)
    }

    /// Resolves the client address from the flag or config
    pub fn effective_address(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .unwrap_or_else(|| self.project.address.clone())
    }

    /// Saves the project configuration
    pub fn save_project(&self) -> Result<()> {
        let root = self
            .project_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not in a hexcast project. Run 'hexcast init' first."))?;
        let config_path = root.join(".hexcast").join("config.toml");

        let content =
            toml::to_string_pretty(&self.project).context("Failed to serialize project config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write project config: {}", config_path.display()))
    }
}
