//! Display helpers derived from a `Command`
//!
//! `CommandView` renders the three lines a command contributes to the
//! console: its start line, each output line, and its exit line.

use std::path::Path;

use crate::command::Command;
use crate::console::colors::Colors;

/// Read-only view over a `Command` with string rendering helpers
pub struct CommandView<'a> {
    command: &'a Command,
    colors: &'a dyn Colors,
}

impl<'a> CommandView<'a> {
    /// Wrap `command`, painting with `colors`
    #[must_use]
    pub fn new(command: &'a Command, colors: &'a dyn Colors) -> Self {
        Self { command, colors }
    }

    /// The wrapped command
    #[must_use]
    pub const fn command(&self) -> &'a Command {
        self.command
    }

    /// One-based position, zero-padded to two digits (`"01"`)
    #[must_use]
    pub fn number(&self) -> String {
        format!("{:02}", self.command.position + 1)
    }

    /// Command text with a leading `/usr/bin/env ` launcher removed
    #[must_use]
    pub fn abbreviated(&self) -> &'a str {
        let text = self.command.command.as_str();
        text.strip_prefix("/usr/bin/env ").unwrap_or(text)
    }

    /// Runtime as seconds with three decimals, e.g. `"0.084s"`
    #[must_use]
    pub fn runtime(&self) -> String {
        format!("{:5.3}s", self.command.runtime.as_secs_f64())
    }

    /// `user@host`; an unknown user renders as `@host`
    #[must_use]
    pub fn user_at_host(&self) -> String {
        format!(
            "{}@{}",
            self.command.effective_user().unwrap_or_default(),
            self.command.host
        )
    }

    /// `"01 echo hello"` with the command text in yellow
    #[must_use]
    pub fn start_message(&self) -> String {
        format!("{} {}", self.number(), self.colors.yellow(self.abbreviated()))
    }

    /// Prefix an output line with the command number and drop its newline.
    #[must_use]
    pub fn format_output(&self, line: &str) -> String {
        format!("{} {}", self.number(), chomp(line))
    }

    /// Green `"✔ 01 user@host"` or red `"✘ 01 user@host"`, followed by the
    /// runtime in gray.
    ///
    /// On failure, `log_file` is mentioned as the place to look for details.
    #[must_use]
    pub fn exit_message(&self, log_file: Option<&Path>) -> String {
        let message = if self.command.is_failure() {
            self.colors.red(&self.failure_message(log_file))
        } else {
            self.colors.green(&self.success_message())
        };
        format!("{message} {}", self.colors.gray(&self.runtime()))
    }

    fn success_message(&self) -> String {
        format!("✔ {} {}", self.number(), self.user_at_host())
    }

    fn failure_message(&self, log_file: Option<&Path>) -> String {
        let mut message = format!("✘ {} {}", self.number(), self.user_at_host());
        if let Some(path) = log_file {
            message.push_str(&format!(" (see {} for details)", path.display()));
        }
        message
    }
}

/// Strip a single trailing line terminator.
fn chomp(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix(&['\n', '\r'][..]))
        .unwrap_or(line)
}
