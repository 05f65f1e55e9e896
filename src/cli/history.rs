//! Journal history command

use anyhow::Result;

use super::output::Output;
use crate::storage::Project;

/// Lists journalled readings, newest first
pub fn run(output: &Output, limit: Option<usize>) -> Result<()> {
    let project = Project::open_current()?;
    let limit = limit.unwrap_or(project.config().project.history_limit);
    output.verbose_ctx("history", &format!("Reading up to {} entries", limit));

    let entries = project.journal().recent(limit)?;

    if output.is_json() {
        output.data(&entries);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No readings recorded yet");
        return Ok(());
    }

    println!(
        "{:<22} {:<6} {:<8} {:<8} SEED",
        "RECORDED", "MAIN", "CHANGED", "MUTUAL"
    );
    println!("{}", "-".repeat(80));

    for entry in &entries {
        let hex = &entry.reading.hexagrams;
        let marker = if entry.overridden { " (override)" } else { "" };
        println!(
            "{:<22} {:<6} {:<8} {:<8} {}{}",
            entry.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            hex.main.id.to_string(),
            hex.changed.id.to_string(),
            hex.mutual.id.to_string(),
            entry.reading.seed.seed_string,
            marker
        );
    }

    println!();
    println!("{} reading(s)", entries.len());

    Ok(())
}
