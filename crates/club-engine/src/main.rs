//! Command-line driver for the computer club day simulation.
//!
//! ```text
//! club-engine <input_file> [--config club-config.yaml] [--format text|json]
//! ```
//!
//! # Run Sequence
//!
//! 1. Parse command-line arguments
//! 2. Load engine settings from the config file, if present
//! 3. Initialize structured logging (tracing) on stderr
//! 4. Read the input log and run the simulation
//! 5. Print the report to stdout
//!
//! Any failure prints one line to stderr and exits with status 1. For
//! malformed input that line is the offending input line.

mod config;
mod error;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use club_core::Report;

use crate::config::{EngineConfig, LogFormat, LoggingConfig, OutputFormat};
use crate::error::EngineError;

/// Replay a computer club day log and print the report.
#[derive(Debug, Parser)]
#[command(name = "club-engine", version, about)]
struct Args {
    /// Path to the input event log.
    input: PathBuf,

    /// Engine settings file; defaults apply when it does not exist.
    #[arg(long, default_value = "club-config.yaml")]
    config: PathBuf,

    /// Report format; overrides the config file and environment.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let usage_error = err.use_stderr();
            if err.print().is_err() || usage_error {
                return ExitCode::FAILURE;
            }
            return ExitCode::SUCCESS;
        }
    };

    let (config, loaded) = match load_config(&args.config) {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging);
    if loaded {
        info!(path = %args.config.display(), "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    let format = args.format.unwrap_or(config.output.format);
    match run(&args.input, format) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let EngineError::Fatal { source } = &err {
                error!(diagnostic = %source.diagnostic(), "Input rejected");
            }
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Load engine settings, falling back to defaults when the file is absent.
///
/// Returns the settings and whether the file was read.
fn load_config(path: &Path) -> Result<(EngineConfig, bool), EngineError> {
    if path.exists() {
        Ok((EngineConfig::from_file(path)?, true))
    } else {
        let mut config = EngineConfig::default();
        config.apply_env_overrides()?;
        Ok((config, false))
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Read the input log, run the day, and render the report.
fn run(input: &Path, format: OutputFormat) -> Result<String, EngineError> {
    let text = std::fs::read_to_string(input).map_err(|source| EngineError::Input {
        path: input.to_path_buf(),
        source,
    })?;
    let report = club_core::run_simulation(&text)?;
    render(&report, format)
}

/// Render the report in the requested format.
fn render(report: &Report, format: OutputFormat) -> Result<String, EngineError> {
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => {
            let mut json = report.to_json()?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    const INPUT: &str = "1\n09:00 19:00\n10\n09:00 1 a\n09:10 2 a 1\n10:00 4 a\n";

    fn input_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::try_parse_from(["club-engine", "day.txt"]).unwrap();
        assert_eq!(args.input, PathBuf::from("day.txt"));
        assert_eq!(args.config, PathBuf::from("club-config.yaml"));
        assert_eq!(args.format, None);
    }

    #[test]
    fn args_accept_format_flag() {
        let args = Args::try_parse_from(["club-engine", "day.txt", "--format", "json"]).unwrap();
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(Args::try_parse_from(["club-engine", "day.txt", "--format", "xml"]).is_err());
        assert!(Args::try_parse_from(["club-engine"]).is_err());
    }

    #[test]
    fn run_renders_text_report() {
        let file = input_file(INPUT);
        let output = run(file.path(), OutputFormat::Text).unwrap();
        assert_eq!(
            output,
            "09:00\n09:00 1 a\n09:10 2 a 1\n10:00 4 a\n19:00\n1 10 00:50\n"
        );
    }

    #[test]
    fn run_renders_json_report() {
        let file = input_file(INPUT);
        let output = run(file.path(), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["close_time"], "19:00");
        assert_eq!(json["tables"][0]["revenue"], 10);
    }

    #[test]
    fn fatal_input_displays_offending_line() {
        let file = input_file("1\n09:00 19:00\n10\n09:00 1 a\nbogus\n");
        let err = run(file.path(), OutputFormat::Text).unwrap_err();
        assert!(matches!(err, EngineError::Fatal { .. }));
        assert_eq!(err.to_string(), "bogus");
    }

    #[test]
    fn missing_input_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("absent.txt"), OutputFormat::Text).unwrap_err();
        assert!(matches!(err, EngineError::Input { .. }));
    }

    #[test]
    fn absent_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, loaded) = load_config(&dir.path().join("club-config.yaml")).unwrap();
        assert!(!loaded);
        assert_eq!(config.logging.format, LogFormat::Text);
    }
}
