//! Neosapiens: plan a team of AI agents for a goal, then put them to work.
//!
//! This is the main entry point for the `neosapiens` CLI. It loads `.env`,
//! installs logging, parses arguments, dispatches to the appropriate command
//! handler, and handles errors with proper exit codes.

mod agent;
mod backend;
mod cli;
mod commands;
mod config;
mod context;
mod error;
mod exit_codes;
mod fs;
mod network;
mod plan;
mod swarm;
mod telemetry;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is normal; credentials may come from the environment.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse_args();
    telemetry::init_tracing(
        cli.global.log_json,
        telemetry::default_level(cli.global.verbose),
    );
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "failed to load .env"),
    }

    match commands::dispatch(&cli.global, cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            tracing::debug!(exit_code = err.exit_code(), "command failed");
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
