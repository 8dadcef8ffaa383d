//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use crate::command::{Command, Host};
use crate::config::{CommandOutput, FormatterConfig};
use crate::console::colors::ColorMode;
use crate::console::formatter::ConsoleFormatter;

/// Create a running `Command` on `deploy@web1` at `position`.
#[must_use]
pub fn make_test_command(position: usize, text: &str) -> Command {
    Command::new(position, Host::new("web1").with_user("deploy"), text)
}

/// Config with colors off and both output streams shown.
#[must_use]
pub fn plain_config() -> FormatterConfig {
    FormatterConfig {
        color: ColorMode::Never,
        command_output: CommandOutput::Toggle(true),
        ..FormatterConfig::default()
    }
}

/// Formatter writing into an in-memory buffer.
#[must_use]
pub fn make_test_formatter(config: FormatterConfig) -> ConsoleFormatter<Vec<u8>> {
    ConsoleFormatter::new(Vec::new(), config).unwrap()
}

/// Everything the formatter has printed so far, split into lines.
#[must_use]
pub fn printed_lines(formatter: &ConsoleFormatter<Vec<u8>>) -> Vec<String> {
    String::from_utf8_lossy(formatter.sink())
        .lines()
        .map(String::from)
        .collect()
}
