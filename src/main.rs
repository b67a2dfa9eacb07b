//! Recap CLI - Yearly GitHub activity summaries for your README

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = recap_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        eprintln!("Run with --verbose for per-stage diagnostics.");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
