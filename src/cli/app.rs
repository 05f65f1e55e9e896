//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::cast::{self, SeedArgs};
use super::output::{Output, OutputFormat};
use super::{history, stats};
use crate::domain::HexagramId;
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "hexcast")]
#[command(author, version, about = "Deterministic hexagram casting from timestamped seeds")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new hexcast project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Store a default requester identifier in the project config
        #[arg(long, short = 'r')]
        requester: Option<String>,
    },

    /// Cast a reading
    Cast {
        #[command(flatten)]
        seed: SeedArgs,

        /// Timestamp in milliseconds since the epoch (defaults to now)
        #[arg(long, short = 't', allow_hyphen_values = true)]
        timestamp: Option<i64>,

        /// Fix the main hexagram instead of drawing it (e.g. Q1)
        #[arg(long)]
        hexagram: Option<HexagramId>,

        /// Do not record the reading in the journal
        #[arg(long)]
        no_record: bool,
    },

    /// Show the seed string and its hash without casting
    Seed {
        #[command(flatten)]
        seed: SeedArgs,

        /// Timestamp in milliseconds since the epoch
        #[arg(long, short = 't', allow_hyphen_values = true)]
        timestamp: i64,
    },

    /// Describe a hexagram identifier
    Show {
        /// Hexagram ID (Q1..Q64)
        id: HexagramId,
    },

    /// List recorded readings, newest first
    History {
        /// Maximum number of readings (defaults to config history_limit)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Tally line values over many consecutive timestamps
    Stats {
        #[command(flatten)]
        seed: SeedArgs,

        /// Number of readings to draw
        #[arg(long, default_value = "10000")]
        samples: usize,

        /// First timestamp (defaults to now)
        #[arg(long, allow_hyphen_values = true)]
        start: Option<i64>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None => Config::load()?.global.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("hexcast starting");

    match cli.command {
        Commands::Init { path, requester } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let mut project = Project::init(&path)?;
            output.verbose_ctx("init", &format!("Created .hexcast directory at: {}", project.hexcast_dir().display()));

            if let Some(requester) = requester {
                project.config_mut().project.requester = Some(requester);
                project.config().save_project()?;
                output.verbose_ctx("init", "Saved default requester");
            }

            output.success(&format!("Initialized hexcast project at {}", project.root().display()));
        }

        Commands::Cast { seed, timestamp, hexagram, no_record } => {
            cast::cast(&output, &seed, timestamp, hexagram, no_record)?
        }

        Commands::Seed { seed, timestamp } => cast::seed(&output, &seed, timestamp)?,

        Commands::Show { id } => cast::show(&output, id)?,

        Commands::History { limit } => history::run(&output, limit)?,

        Commands::Stats { seed, samples, start } => stats::run(&output, &seed, samples, start)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
