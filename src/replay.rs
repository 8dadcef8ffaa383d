//! Event stream replay
//!
//! Reads a JSONL stream of executor events, records each one in the
//! transcript, and hands it to the console formatter in arrival order.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::console::formatter::{ConsoleFormatter, Record};
use crate::event::{parse_event, ExecutorEvent};
use crate::log::EventLogger;

/// Counts gathered while replaying a stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Events dispatched
    pub events: usize,
    /// Commands that exited with a non-zero status
    pub failed_commands: usize,
}

/// Dispatches executor events to a console formatter
pub struct Replayer<W: Write> {
    formatter: ConsoleFormatter<W>,
    logger: Option<EventLogger>,
    summary: ReplaySummary,
}

impl<W: Write> Replayer<W> {
    /// Create a replayer, optionally recording a transcript
    #[must_use]
    pub fn new(formatter: ConsoleFormatter<W>, logger: Option<EventLogger>) -> Self {
        Self {
            formatter,
            logger,
            summary: ReplaySummary::default(),
        }
    }

    /// Counts so far
    #[must_use]
    pub const fn summary(&self) -> ReplaySummary {
        self.summary
    }

    /// The wrapped formatter
    #[must_use]
    pub const fn formatter(&self) -> &ConsoleFormatter<W> {
        &self.formatter
    }

    /// Consume the replayer, returning the formatter
    pub fn into_formatter(self) -> ConsoleFormatter<W> {
        self.formatter
    }

    /// Record and print a single event.
    pub fn dispatch(&mut self, event: ExecutorEvent) -> Result<()> {
        if let Some(logger) = &self.logger {
            logger.append(&event)?;
        }
        self.summary.events += 1;

        match event {
            ExecutorEvent::Task { name } => {
                self.formatter.set_current_task(name.as_deref());
            }
            ExecutorEvent::CommandStart { command } => {
                self.formatter.on_command_start(&command)?;
            }
            ExecutorEvent::CommandData {
                command,
                stream,
                line,
            } => {
                self.formatter.on_command_data(&command, stream, &line)?;
            }
            ExecutorEvent::CommandExit { command } => {
                self.count_failure(command.is_failure());
                self.formatter.on_command_exit(&command)?;
            }
            ExecutorEvent::Buffered { mut command } => {
                self.count_failure(command.is_failure());
                self.formatter.write(Record::Command(&mut command))?;
            }
            ExecutorEvent::Log(message) => {
                self.formatter.write(Record::Log(&message))?;
            }
        }
        Ok(())
    }

    /// Replay every event in `reader`, one JSON object per line.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<ReplaySummary> {
        for (line_num, line) in reader.lines().enumerate() {
            let line = line.context("Failed to read event stream")?;
            let parsed = parse_event(&line)
                .with_context(|| format!("Invalid event on line {}", line_num + 1))?;
            let Some(event) = parsed else {
                continue;
            };
            self.dispatch(event)
                .with_context(|| format!("Failed to handle event on line {}", line_num + 1))?;
        }
        Ok(self.summary)
    }

    fn count_failure(&mut self, failed: bool) {
        if failed {
            self.summary.failed_commands += 1;
        }
    }
}
