//! runfmt - Console formatter for remote command execution
//!
//! CLI entry point: renders a JSONL stream of executor events.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use runfmt::config::{CommandOutput, FormatterConfig};
use runfmt::console::{ColorMode, ConsoleFormatter};
use runfmt::log::EventLogger;
use runfmt::replay::Replayer;
use runfmt::StreamType;

/// Console formatter for remote command execution
///
/// Reads executor events (one JSON object per line) and prints them as
/// numbered, colorized lines grouped under task banners.
#[derive(Parser, Debug)]
#[command(name = "runfmt", version, about)]
struct Cli {
    /// Event stream to render; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Path to a runfmt.toml configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// When to color output
    #[arg(long, value_enum)]
    color: Option<ColorMode>,

    /// Show command output from this stream (repeatable)
    #[arg(long = "command-output", value_enum)]
    command_output: Vec<StreamType>,

    /// Write a JSONL transcript of every event here
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Line to print before any events
    #[arg(long)]
    banner: Option<String>,
}

/// Load the config file if given, then apply command-line overrides.
fn resolve_config(cli: &Cli) -> Result<FormatterConfig> {
    let mut config = match &cli.config {
        Some(path) => FormatterConfig::from_path(path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()))?,
        None => FormatterConfig::default(),
    };

    if let Some(color) = cli.color {
        config.color = color;
    }
    if !cli.command_output.is_empty() {
        config.command_output = CommandOutput::Streams(cli.command_output.clone());
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }
    if let Some(banner) = &cli.banner {
        config.banner = Some(banner.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Open the event stream: a file, or stdin for `None` and `-`.
fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open event stream: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let logger = config
        .log_file
        .as_ref()
        .map(EventLogger::new)
        .transpose()
        .context("Failed to initialize event log")?;
    let input = open_input(cli.input.as_deref())?;

    let formatter = ConsoleFormatter::new(io::stdout().lock(), config)?;
    let mut replayer = Replayer::new(formatter, logger);
    let summary = replayer.run(input)?;

    if summary.failed_commands > 0 {
        eprintln!("{} command(s) failed.", summary.failed_commands);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use runfmt::Verbosity;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["runfmt"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config, FormatterConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
banner = "from file"
color = "always"
command_output = true
debug_threshold = "info"
"#
        )
        .unwrap();

        let cli = Cli::parse_from([
            "runfmt",
            "--config",
            file.path().to_str().unwrap(),
            "--color",
            "never",
            "--command-output",
            "stderr",
            "--banner",
            "from flag",
        ]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(
            config.command_output,
            CommandOutput::Streams(vec![StreamType::Stderr])
        );
        assert_eq!(config.banner.as_deref(), Some("from flag"));
        assert_eq!(config.debug_threshold, Verbosity::Info);
    }

    #[test]
    fn test_repeated_command_output_flag() {
        let cli = Cli::parse_from([
            "runfmt",
            "--command-output",
            "stdout",
            "--command-output",
            "stderr",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert!(config.show_command_output(StreamType::Stdout));
        assert!(config.show_command_output(StreamType::Stderr));
    }

    #[test]
    fn test_empty_banner_flag_rejected() {
        let cli = Cli::parse_from(["runfmt", "--banner", " "]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let cli = Cli::parse_from(["runfmt", "--config", "/nonexistent/runfmt.toml"]);
        let err = resolve_config(&cli).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_open_missing_input_is_error() {
        assert!(open_input(Some(Path::new("/nonexistent/events.jsonl"))).is_err());
    }

    #[test]
    fn test_open_input_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type":"task","name":"deploy"}}"#).unwrap();

        let reader = open_input(Some(file.path())).unwrap();
        assert_eq!(reader.lines().count(), 1);
    }
}
