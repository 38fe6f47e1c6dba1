//! Fitrack CLI - training programs, sessions and exercises from the terminal

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "fitrack")]
#[command(about = "Client for the Fitrack training tracker")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Configuration file (TOML). Defaults to fitrack.toml in the user config directory.
    #[arg(short = 'c', long, global = true, env = "FITRACK_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration file
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the stored session
    #[arg(short = 'd', long, global = true, env = "FITRACK_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Timeout for operations in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.into());

    let settings = config::Settings::load(cli.config.as_deref(), cli.api_url, cli.state_dir)?;
    debug!(api_url = %settings.client.api_url, "Loaded configuration");

    let outcome = if cli.timeout == 0 {
        cli.command.execute(&settings).await
    } else {
        let timeout_duration = Duration::from_secs(cli.timeout);
        match tokio::time::timeout(timeout_duration, cli.command.execute(&settings)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(anyhow::anyhow!(
                "Command timed out after {} seconds",
                cli.timeout
            )),
        }
    };

    if let Err(e) = outcome {
        error!("Command failed: {e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
