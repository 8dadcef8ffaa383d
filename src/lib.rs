//! runfmt - Console formatter for remote command execution
//!
//! Renders the events of a command execution engine (command started, output
//! produced, command finished, log messages) as numbered, colorized lines:
//!
//! ```text
//! 00:00 deploy:check
//!       01 mkdir -p /srv/app
//!     ✔ 01 deploy@web1 0.084s
//! ```

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod command;
pub mod config;
pub mod console;
pub mod event;
pub mod log;
pub mod replay;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used types
pub use command::{Command, CommandView, Host, StreamType};
pub use config::{CommandOutput, FormatterConfig};
pub use console::{ColorMode, ConsoleFormatter, Record};
pub use event::{parse_event, ExecutorEvent, LogMessage, Verbosity};
pub use log::{EventLogger, LoggedEvent};
pub use replay::{ReplaySummary, Replayer};
