//! Project management
//!
//! Handles project initialization and provides access to the journal.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, Journal};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a hexcast project. Run 'hexcast init' first.")]
    NotInProject,
}

/// A hexcast project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(".hexcast").is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let hex_dir = root.join(".hexcast");

        fs::create_dir_all(&hex_dir).with_context(|| {
            format!("Failed to create .hexcast directory: {}", hex_dir.display())
        })?;

        let config_path = hex_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# hexcast configuration

# Requester identifier used in seeds (falls back to $HEXCAST_REQUESTER, then $USER)
# requester = "u1"

# Client address used in seeds when none is given
address = "0.0.0.0"

# Append every reading to .hexcast/readings.jsonl
record = true

# Fix the main hexagram for every cast (deployment override)
# override_hexagram = "Q1"

# Entries shown by 'hexcast history'
history_limit = 20
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let gitignore_path = hex_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# Readings are personal; delete this line to commit them
readings.jsonl
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .hexcast directory path
    pub fn hexcast_dir(&self) -> PathBuf {
        self.root.join(".hexcast")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Returns the reading journal
    pub fn journal(&self) -> Journal {
        Journal::for_project(&self.root)
    }
}
