//! Cast and seed commands
//!
//! This is the caller boundary around the reading algorithm: it captures
//! the clock, resolves requester and address, applies the override, and
//! records readings in the journal.

use anyhow::Result;
use chrono::Utc;
use clap::Args;

use super::output::Output;
use crate::domain::{self, Coordinates, Hexagram, HexagramId, Reading, SeedInput};
use crate::storage::{Config, Journal, JournalEntry};

/// Seed arguments shared by commands that build a seed
#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    /// Requester identifier (defaults to config, $HEXCAST_REQUESTER, then $USER)
    #[arg(long, short = 'r')]
    pub requester: Option<String>,

    /// Client address (defaults to config, then 0.0.0.0)
    #[arg(long, short = 'a')]
    pub address: Option<String>,

    /// Tap x coordinate
    #[arg(long, requires = "y", allow_hyphen_values = true)]
    pub x: Option<f64>,

    /// Tap y coordinate
    #[arg(long, requires = "x", allow_hyphen_values = true)]
    pub y: Option<f64>,
}

impl SeedArgs {
    /// Builds seed inputs for the given timestamp
    pub fn to_input(&self, config: &Config, timestamp: i64) -> Result<SeedInput> {
        let requester = config.effective_requester(self.requester.as_deref())?;
        let address = config.effective_address(self.address.as_deref());

        let mut input = SeedInput::new(requester, address, timestamp);
        if let (Some(x), Some(y)) = (self.x, self.y) {
            input = input.with_coordinates(Coordinates::new(x, y));
        }
        Ok(input)
    }
}

/// Casts a reading and optionally records it
pub fn cast(
    output: &Output,
    seed: &SeedArgs,
    timestamp: Option<i64>,
    hexagram: Option<HexagramId>,
    no_record: bool,
) -> Result<()> {
    let config = Config::load()?;

    let timestamp = timestamp.unwrap_or_else(|| Utc::now().timestamp_millis());
    let input = seed.to_input(&config, timestamp)?;
    output.verbose_ctx("cast", &format!("Seed inputs: {:?}", input));

    let override_id = hexagram.or(config.project.override_hexagram);
    let reading = match override_id {
        Some(id) => {
            output.verbose_ctx("cast", &format!("Main hexagram overridden to {}", id));
            Reading::with_override(&input, id)?
        }
        None => domain::generate(&input)?,
    };
    output.verbose_ctx("cast", &format!("Seed string: {}", reading.seed.seed_string));

    let recorded = match &config.project_root {
        Some(root) if config.project.record && !no_record => {
            let journal = Journal::for_project(root);
            journal.append(&JournalEntry::new(reading.clone(), override_id.is_some()))?;
            output.verbose_ctx("cast", &format!("Recorded in {}", journal.path().display()));
            true
        }
        _ => false,
    };

    if output.is_json() {
        output.data(&reading);
    } else {
        print_reading(&reading);
        if override_id.is_some() {
            println!();
            println!("(main hexagram fixed by override)");
        }
        if recorded {
            println!();
            println!("Recorded in journal");
        }
    }

    Ok(())
}

/// Prints the seed string and hashed seed without drawing lines
pub fn seed(output: &Output, seed: &SeedArgs, timestamp: i64) -> Result<()> {
    let config = Config::load()?;
    let input = seed.to_input(&config, timestamp)?;
    let (seed_string, hashed) = input.hashed()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "seedStr": seed_string,
            "hash": hashed,
            "hashHex": format!("{:08x}", hashed),
        }));
    } else {
        println!("Seed:   {}", seed_string);
        println!("Hash:   {:08x} ({})", hashed, hashed);
    }

    Ok(())
}

/// Describes a single hexagram identifier
pub fn show(output: &Output, id: HexagramId) -> Result<()> {
    let hexagram = Hexagram::from_lines(id.young_lines());

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "number": id.number(),
            "bits": format!("{:06b}", id.bits()),
            "yaos": hexagram.values(),
            "lower": id.lower().name(),
            "upper": id.upper().name(),
        }));
        return Ok(());
    }

    println!("{}", id);
    println!("Bits:   {:06b} (line 1 is the rightmost bit)", id.bits());
    println!("Upper:  {}", id.upper());
    println!("Lower:  {}", id.lower());
    output.blank();
    for row in hexagram.render() {
        println!("  {}", row);
    }

    Ok(())
}

/// Renders a reading: seed line, then the three figures side by side
pub fn print_reading(reading: &Reading) {
    let hex = &reading.hexagrams;
    let figures = [("MAIN", &hex.main), ("CHANGED", &hex.changed), ("MUTUAL", &hex.mutual)];

    println!("Seed: {}", reading.seed.seed_string);
    println!();

    for (label, figure) in &figures {
        print!("{:<14}", format!("{} {}", label, figure.id));
    }
    println!();

    let rows: Vec<Vec<&str>> = figures.iter().map(|(_, figure)| figure.render()).collect();
    for i in 0..6 {
        for column in &rows {
            print!("{:<14}", column[i]);
        }
        println!();
    }

    let changing: Vec<String> = hex
        .main
        .changing_positions()
        .iter()
        .map(|p| (p + 1).to_string())
        .collect();
    println!();
    if changing.is_empty() {
        println!("No changing lines");
    } else {
        println!("Changing lines: {}", changing.join(", "));
    }
}
