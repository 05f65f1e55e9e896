//! # Storage Layer
//!
//! Persistence for hexcast. The reading algorithm never touches storage;
//! the CLI records readings here after casting.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Readings | JSONL (one JSON per line) | `.hexcast/readings.jsonl` |
//! | Config | TOML | `.hexcast/config.toml` |
//!
//! ## Concurrency Safety
//!
//! [`Journal`] takes a shared `fs2` lock for reads and an exclusive lock
//! for appends.
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a hexcast project
//! - [`Journal`] - Append/read readings as JSONL
//! - [`Config`] - Project and global configuration

mod config;
mod journal;
mod project;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, REQUESTER_ENV};
pub use journal::{Journal, JournalEntry};
pub use project::{Project, ProjectError};
