//! Executor events
//!
//! The execution engine reports command lifecycle events and free-form log
//! messages. On the wire they are JSON Lines, one event per line, tagged by
//! a `"type"` field.

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::command::{Command, StreamType};

/// Severity of a command or log message, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Diagnostic detail, hidden from the console by default
    Debug,
    /// Normal progress information
    #[default]
    Info,
    /// Something unexpected that did not stop execution
    Warn,
    /// A failed operation
    Error,
    /// An unrecoverable failure
    Fatal,
}

/// A free-form log message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    /// Message text
    pub message: String,
    /// Severity of the message
    #[serde(default)]
    pub verbosity: Verbosity,
}

impl LogMessage {
    /// Create a message at `verbosity`
    #[must_use]
    pub fn new(message: &str, verbosity: Verbosity) -> Self {
        Self {
            message: message.to_string(),
            verbosity,
        }
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// An event emitted by the execution engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecutorEvent {
    /// The active task changed; `None` leaves task context
    Task {
        /// Name of the task now running
        #[serde(default)]
        name: Option<String>,
    },
    /// A command is about to run
    CommandStart {
        /// The command
        command: Command,
    },
    /// A command produced a line of output
    CommandData {
        /// The command
        command: Command,
        /// Stream the line came from
        stream: StreamType,
        /// The line, usually with its trailing newline
        line: String,
    },
    /// A command finished
    CommandExit {
        /// The command, with exit status and runtime filled in
        command: Command,
    },
    /// A command with its output buffered on the record itself
    #[serde(rename = "command")]
    Buffered {
        /// The command
        command: Command,
    },
    /// A log message
    Log(LogMessage),
}

/// Parse a single line of the event stream.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_event(line: &str) -> Result<Option<ExecutorEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let event = serde_json::from_str(line).context("Failed to parse executor event")?;
    Ok(Some(event))
}
