//! Executed command records
//!
//! A `Command` is owned by the execution engine that ran it. This crate only
//! reads it, apart from clearing output buffers once they have been printed.

pub mod view;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::event::Verbosity;

pub use view::CommandView;

/// Output stream a line of command output was captured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
}

impl StreamType {
    /// Lowercase stream name as used in config files and event streams
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target host a command ran on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Hostname or address
    pub hostname: String,
    /// Login user configured for the host, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl Host {
    /// Create a host without a configured user
    #[must_use]
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            user: None,
        }
    }

    /// Set the login user for this host
    #[must_use]
    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hostname)
    }
}

/// A single executed (or executing) shell command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Zero-based sequence position within the current task
    #[serde(default)]
    pub position: usize,
    /// Host the command ran on
    pub host: Host,
    /// User the command ran as, overriding the host's user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Raw command text
    pub command: String,
    /// Buffered stdout not yet printed
    #[serde(default)]
    pub stdout: String,
    /// Buffered stderr not yet printed
    #[serde(default)]
    pub stderr: String,
    /// Elapsed runtime, serialized as fractional seconds
    #[serde(default, with = "runtime_secs")]
    pub runtime: Duration,
    /// Exit status; `None` while the command is still running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_status: Option<i32>,
    /// Verbosity the command was logged at
    #[serde(default)]
    pub verbosity: Verbosity,
    /// Whether this is the first time this command is reported
    #[serde(default = "default_first_execution")]
    pub first_execution: bool,
}

const fn default_first_execution() -> bool {
    true
}

impl Command {
    /// Create a running command at `position` on `host`.
    #[must_use]
    pub fn new(position: usize, host: Host, command: &str) -> Self {
        Self {
            position,
            host,
            user: None,
            command: command.to_string(),
            stdout: String::new(),
            stderr: String::new(),
            runtime: Duration::ZERO,
            exit_status: None,
            verbosity: Verbosity::default(),
            first_execution: true,
        }
    }

    /// True once an exit status has been recorded
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.exit_status.is_some()
    }

    /// True if the command finished with a non-zero exit status
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.exit_status.is_some_and(|status| status != 0)
    }

    /// User the command ran as: the command's own user, else the host's.
    #[must_use]
    pub fn effective_user(&self) -> Option<&str> {
        self.user.as_deref().or(self.host.user.as_deref())
    }

    /// Buffered output for `stream`
    #[must_use]
    pub fn output(&self, stream: StreamType) -> &str {
        match stream {
            StreamType::Stdout => &self.stdout,
            StreamType::Stderr => &self.stderr,
        }
    }

    /// Drop buffered output for `stream` once it has been consumed.
    pub fn clear_output(&mut self, stream: StreamType) {
        match stream {
            StreamType::Stdout => self.stdout.clear(),
            StreamType::Stderr => self.stderr.clear(),
        }
    }
}

mod runtime_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(runtime: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(runtime.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
