//! JSONL journal of readings
//!
//! Readings are stored in `.hexcast/readings.jsonl` with one JSON object
//! per line. Uses file locking for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::Reading;

/// A journalled reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub recorded_at: DateTime<Utc>,
    /// True when the main hexagram came from an override, not a draw
    #[serde(default)]
    pub overridden: bool,
    pub reading: Reading,
}

impl JournalEntry {
    /// Creates an entry stamped with the current time
    pub fn new(reading: Reading, overridden: bool) -> Self {
        Self {
            recorded_at: Utc::now(),
            overridden,
            reading,
        }
    }
}

/// Store for readings in JSONL format
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    /// Creates a journal at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default journal for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".hexcast").join("readings.jsonl"))
    }

    /// Returns the path to the journal file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all entries in file order
    pub fn read_all(&self) -> Result<Vec<JournalEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open journal: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on journal")?;

        let reader = BufReader::new(&file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: JournalEntry = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse reading at line {}", line_num + 1))?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Returns up to `limit` entries, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<JournalEntry>> {
        let mut entries = self.read_all()?;
        entries.reverse();
        entries.truncate(limit);
        Ok(entries)
    }

    /// Appends a single entry
    pub fn append(&self, entry: &JournalEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open journal: {}", self.path.display()))?;

        // Acquire exclusive lock
        file.lock_exclusive()
            .context("Failed to acquire write lock on journal")?;

        let mut writer = BufWriter::new(&file);
        let line = serde_json::to_string(entry).context("Failed to serialize reading")?;
        writeln!(writer, "{}", line).context("Failed to write reading")?;

        writer.flush().context("Failed to flush journal")?;

        Ok(())
    }
}
