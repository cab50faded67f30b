//! Command-line interface module for mediasort.
//!
//! This module owns the argument surface (`--config`, `--loglevel`), logging
//! setup, and the orchestration of one sort run: load and compile the
//! configuration, run the sorter, print the summary.

use crate::config::SortConfig;
use crate::output::OutputFormatter;
use crate::sorter::MediaSorter;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{Level, info};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "mediasort")]
#[command(about = "Sort photos and videos into date-based folder trees", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: PathBuf,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub loglevel: String,
}

/// Runs one sort invocation from parsed arguments.
///
/// This is the entry point used by `main`. It initializes logging from
/// `--loglevel`, loads and compiles the configuration from `--config`, runs
/// the sorter, and prints the summary table.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use mediasort::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["mediasort", "--config", "mediasort.toml"]);
/// if let Err(e) = run_cli(&cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<(), String> {
    let level =
        Level::from_str(&cli.loglevel).map_err(|_| format!("Unknown log level: {}", cli.loglevel))?;
    // try_init rather than init: tests and embedders may already have a
    // subscriber installed.
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();

    info!("Welcome to mediasort!");
    info!("Loading config {}...", cli.config.display());

    let config =
        SortConfig::load(&cli.config).map_err(|e| format!("Error loading configuration: {}", e))?;
    let compiled = config
        .compile()
        .map_err(|e| format!("Error in configuration: {}", e))?;
    info!("Config loaded");

    OutputFormatter::info(&format!(
        "Sorting media under {}",
        compiled.source_path.display()
    ));
    if !compiled.execute {
        OutputFormatter::dry_run_notice("No files or folders will be modified.");
    }

    let spinner = OutputFormatter::create_spinner("Sorting media...");
    let outcome = MediaSorter::new(&compiled).sort();
    spinner.finish_and_clear();

    OutputFormatter::summary(&outcome, compiled.execute);

    if outcome.success {
        Ok(())
    } else {
        Err(outcome
            .error_detail
            .unwrap_or_else(|| "sort failed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_flag() {
        let cli = Cli::parse_from(["mediasort", "--config", "/etc/mediasort.toml"]);
        assert_eq!(cli.config, PathBuf::from("/etc/mediasort.toml"));
        assert_eq!(cli.loglevel, "info");
    }

    #[test]
    fn test_parse_loglevel_flag() {
        let cli = Cli::parse_from([
            "mediasort",
            "--config",
            "mediasort.toml",
            "--loglevel",
            "debug",
        ]);
        assert_eq!(cli.loglevel, "debug");
    }

    #[test]
    fn test_config_flag_is_required() {
        let result = Cli::try_parse_from(["mediasort"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_cli_rejects_unknown_level() {
        let cli = Cli {
            config: PathBuf::from("mediasort.toml"),
            loglevel: "chatty".to_string(),
        };
        let result = run_cli(&cli);
        assert!(result.is_err());
    }
}
