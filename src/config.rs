//! Formatter configuration
//!
//! Parses `runfmt.toml` into a `FormatterConfig`. The config is handed to the
//! formatter's constructor; nothing reads it from global state.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::command::StreamType;
use crate::console::colors::ColorMode;
use crate::event::Verbosity;

/// Which command output streams are echoed to the console
///
/// Accepts `true`/`false`, a single stream name, or a list of stream names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandOutput {
    /// Show every stream, or none
    Toggle(bool),
    /// Show one stream
    Stream(StreamType),
    /// Show the listed streams
    Streams(Vec<StreamType>),
}

impl Default for CommandOutput {
    fn default() -> Self {
        Self::Toggle(false)
    }
}

impl CommandOutput {
    /// Whether lines from `stream` should be printed
    #[must_use]
    pub fn shows(&self, stream: StreamType) -> bool {
        match self {
            Self::Toggle(all) => *all,
            Self::Stream(only) => *only == stream,
            Self::Streams(streams) => streams.contains(&stream),
        }
    }
}

/// Display policy for the console formatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Line printed once when the formatter is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    /// Which output streams to echo
    #[serde(default)]
    pub command_output: CommandOutput,
    /// When to emit colors
    #[serde(default)]
    pub color: ColorMode,
    /// Full transcript location, referenced from failure lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Events at or below this verbosity are not shown (default: debug)
    #[serde(default = "default_debug_threshold")]
    pub debug_threshold: Verbosity,
}

const fn default_debug_threshold() -> Verbosity {
    Verbosity::Debug
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            banner: None,
            command_output: CommandOutput::default(),
            color: ColorMode::default(),
            log_file: None,
            debug_threshold: default_debug_threshold(),
        }
    }
}

impl FormatterConfig {
    /// Parse a config file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse config content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse runfmt.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Whether output lines from `stream` should be printed
    #[must_use]
    pub fn show_command_output(&self, stream: StreamType) -> bool {
        self.command_output.shows(stream)
    }

    /// Whether an event at `verbosity` is hidden from the console
    #[must_use]
    pub fn is_debug(&self, verbosity: Verbosity) -> bool {
        verbosity <= self.debug_threshold
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(banner) = &self.banner {
            if banner.trim().is_empty() {
                bail!("Banner cannot be empty; omit it to disable the banner");
            }
        }

        if let Some(log_file) = &self.log_file {
            if log_file.as_os_str().is_empty() {
                bail!("Log file path cannot be empty");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
banner = "Using runfmt format."
command_output = ["stdout"]
color = "never"
log_file = "log/deploy.log"
debug_threshold = "info"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = FormatterConfig::parse(FULL_CONFIG).unwrap();

        assert_eq!(config.banner.as_deref(), Some("Using runfmt format."));
        assert_eq!(
            config.command_output,
            CommandOutput::Streams(vec![StreamType::Stdout])
        );
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.log_file, Some(PathBuf::from("log/deploy.log")));
        assert_eq!(config.debug_threshold, Verbosity::Info);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FormatterConfig::parse("").unwrap();
        assert_eq!(config, FormatterConfig::default());
        assert!(!config.show_command_output(StreamType::Stdout));
        assert!(!config.show_command_output(StreamType::Stderr));
        assert_eq!(config.debug_threshold, Verbosity::Debug);
    }

    #[test]
    fn test_command_output_toggle() {
        let config = FormatterConfig::parse("command_output = true").unwrap();
        assert!(config.show_command_output(StreamType::Stdout));
        assert!(config.show_command_output(StreamType::Stderr));

        let config = FormatterConfig::parse("command_output = false").unwrap();
        assert!(!config.show_command_output(StreamType::Stdout));
    }

    #[test]
    fn test_command_output_single_stream() {
        let config = FormatterConfig::parse(r#"command_output = "stderr""#).unwrap();
        assert!(!config.show_command_output(StreamType::Stdout));
        assert!(config.show_command_output(StreamType::Stderr));
    }

    #[test]
    fn test_command_output_stream_list() {
        let config = FormatterConfig::parse(r#"command_output = ["stdout", "stderr"]"#).unwrap();
        assert!(config.show_command_output(StreamType::Stdout));
        assert!(config.show_command_output(StreamType::Stderr));
    }

    #[test]
    fn test_unknown_stream_rejected() {
        assert!(FormatterConfig::parse(r#"command_output = "stdin""#).is_err());
    }

    #[test]
    fn test_empty_banner_rejected() {
        let err = FormatterConfig::parse(r#"banner = "  ""#).unwrap_err();
        assert!(err.to_string().contains("Banner cannot be empty"));
    }

    #[test]
    fn test_empty_log_file_rejected() {
        let err = FormatterConfig::parse(r#"log_file = """#).unwrap_err();
        assert!(err.to_string().contains("Log file path cannot be empty"));
    }

    #[test]
    fn test_is_debug_threshold() {
        let config = FormatterConfig::default();
        assert!(config.is_debug(Verbosity::Debug));
        assert!(!config.is_debug(Verbosity::Info));

        let config = FormatterConfig {
            debug_threshold: Verbosity::Warn,
            ..FormatterConfig::default()
        };
        assert!(config.is_debug(Verbosity::Info));
        assert!(config.is_debug(Verbosity::Warn));
        assert!(!config.is_debug(Verbosity::Error));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = FormatterConfig::from_path("/nonexistent/runfmt.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
