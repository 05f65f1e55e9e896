//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting. The CLI is the caller
//! of the reading algorithm: it owns the clock, the address sentinel,
//! overrides and persistence.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create a `.hexcast/` project |
//! | `cast` | Cast a reading (optionally recorded in the journal) |
//! | `seed` | Show the seed string and hashed seed |
//! | `show` | Describe a hexagram identifier |
//! | `history` | List recorded readings |
//! | `stats` | Tally line values over many timestamps |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! hexcast --verbose cast --requester u1
//! ```

mod app;
mod output;
mod cast;
mod history;
mod stats;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
