//! Line distribution check over consecutive timestamps

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::cast::SeedArgs;
use super::output::Output;
use crate::domain::{self, Line};
use crate::storage::Config;

#[derive(Debug, Serialize)]
struct LineFrequency {
    value: u8,
    label: &'static str,
    count: usize,
    frequency: f64,
    expected: f64,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    samples: usize,
    start: i64,
    lines: Vec<LineFrequency>,
    distinct_main: usize,
}

fn expected(line: Line) -> f64 {
    if line.is_old() {
        0.125
    } else {
        0.375
    }
}

/// Draws `samples` readings at `start, start + 1, ...` and tallies line values
pub fn run(output: &Output, seed: &SeedArgs, samples: usize, start: Option<i64>) -> Result<()> {
    if samples == 0 {
        anyhow::bail!("--samples must be at least 1");
    }

    let config = Config::load()?;
    let start = start.unwrap_or_else(|| Utc::now().timestamp_millis());
    output.verbose_ctx("stats", &format!("Drawing {} readings from timestamp {}", samples, start));

    let count = i64::try_from(samples).context("--samples is too large")?;
    if start.checked_add(count - 1).is_none() {
        anyhow::bail!(
            "--start {} leaves no room for {} consecutive timestamps",
            start,
            samples
        );
    }

    let mut input = seed.to_input(&config, start)?;
    let mut counts = [0usize; 4];
    let mut seen = [false; 64];

    for offset in 0..count {
        input.timestamp = start + offset;
        let reading = domain::generate(&input)?;

        seen[reading.main_id().bits() as usize] = true;
        for line in reading.hexagrams.main.lines {
            if let Some(slot) = Line::ALL.iter().position(|l| *l == line) {
                counts[slot] += 1;
            }
        }
    }

    let total = samples as f64 * 6.0;
    let lines: Vec<LineFrequency> = Line::ALL
        .iter()
        .zip(counts)
        .map(|(line, count)| LineFrequency {
            value: line.value(),
            label: line.label(),
            count,
            frequency: count as f64 / total,
            expected: expected(*line),
        })
        .collect();

    let report = StatsReport {
        samples,
        start,
        lines,
        distinct_main: seen.iter().filter(|s| **s).count(),
    };

    if output.is_json() {
        output.data(&report);
        return Ok(());
    }

    println!("{} readings from timestamp {}", report.samples, report.start);
    output.blank();
    println!("{:<6} {:<12} {:>8} {:>10} {:>10}", "VALUE", "LINE", "COUNT", "OBSERVED", "EXPECTED");
    println!("{}", "-".repeat(50));
    for f in &report.lines {
        println!(
            "{:<6} {:<12} {:>8} {:>10.4} {:>10.4}",
            f.value, f.label, f.count, f.frequency, f.expected
        );
    }
    output.blank();
    println!("Distinct main hexagrams: {} of 64", report.distinct_main);

    Ok(())
}
