//! hexcast - Deterministic hexagram casting

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = hexcast::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
