//! Conduit CLI - demo host
//!
//! Loads host configuration, initializes logging and runs one command,
//! printing its report as JSON on stdout.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod telemetry;

pub use cli::{Cli, Command};
pub use config::{HostConfig, LoggingConfig};
pub use error::{CliError, CliResult};

/// Run a parsed command line and return the rendered output.
pub fn execute(cli: &Cli) -> CliResult<String> {
    let config = HostConfig::load(cli.config.as_deref())?;
    telemetry::init(
        config.logging.filter_or_default(),
        cli.json_logs || config.logging.json,
    )?;

    let value = commands::run(&cli.command, &config)?;
    let rendered = if cli.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(rendered)
}
