//! JSONL (JSON Lines) transcript of executor events
//!
//! Provides append-only logging of every received event to a log file such as
//! `log/deploy.log`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::event::ExecutorEvent;

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// When the event was received
    pub timestamp: DateTime<Utc>,
    /// The event as received, before any output buffers were drained
    pub event: ExecutorEvent,
}

/// JSONL transcript writer
///
/// Each line is a JSON object holding one received event.
pub struct EventLogger {
    log_path: PathBuf,
}

impl EventLogger {
    /// Create a logger appending to `log_path`
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created
    pub fn new<P: AsRef<Path>>(log_path: P) -> Result<Self> {
        let log_path = log_path.as_ref();

        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path: log_path.to_path_buf(),
        })
    }

    /// Path of the transcript file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append an event to the transcript, stamped with the current time.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The log file cannot be opened or created
    /// - The event cannot be serialized to JSON
    /// - Writing to the file fails
    pub fn append(&self, event: &ExecutorEvent) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open log file: {}", self.log_path.display()))?;

        let entry = LoggedEventRef {
            timestamp: Utc::now(),
            event,
        };
        let json = serde_json::to_string(&entry).context("Failed to serialize event to JSON")?;

        writeln!(file, "{json}").context("Failed to write to log file")?;

        Ok(())
    }

    /// Read every entry from the transcript, oldest first.
    ///
    /// A missing file reads as an empty transcript.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The log file cannot be read
    /// - Any line cannot be parsed as valid JSON
    pub fn read_all(&self) -> Result<Vec<LoggedEvent>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read log file: {}", self.log_path.display()))?;

        let mut entries = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let entry: LoggedEvent = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))?;

            entries.push(entry);
        }

        Ok(entries)
    }
}

/// Borrowing form of `LoggedEvent` so appending never clones the event
#[derive(Serialize)]
struct LoggedEventRef<'a> {
    timestamp: DateTime<Utc>,
    event: &'a ExecutorEvent,
}
