//! Console formatter
//!
//! Receives command lifecycle events and log messages from the executor and
//! prints them as indented, numbered lines. Whenever the active task changes
//! a banner with the elapsed clock and task name is printed first:
//!
//! ```text
//! 00:02 deploy:check
//!       01 mkdir -p /srv/app
//!     ✔ 01 deploy@web1 0.084s
//! ```

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::command::{Command, CommandView, StreamType};
use crate::config::FormatterConfig;
use crate::console::colors::Colors;
use crate::console::sink::Console;
use crate::event::LogMessage;

/// Indentation of body lines
const BODY_INDENT: usize = 6;

/// Exit lines hang two columns left of the body so the status glyph stands out
const EXIT_INDENT: usize = BODY_INDENT - 2;

/// Something handed to `ConsoleFormatter::write`
#[derive(Debug)]
pub enum Record<'a> {
    /// A command whose output is buffered on the record; buffers are cleared
    /// once printed
    Command(&'a mut Command),
    /// A free-form log message
    Log(&'a LogMessage),
}

/// Tracks the active task and which task banner was printed last
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTracker {
    current: Option<String>,
    last_printed: Option<String>,
}

impl TaskTracker {
    /// Create a tracker with no active task
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active task
    pub fn set_current(&mut self, name: Option<&str>) {
        self.current = name.map(String::from);
    }

    /// Name of the active task
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Return the active task name if its banner has not been printed yet,
    /// marking it as printed.
    pub fn take_change(&mut self) -> Option<String> {
        let current = self.current.as_ref()?;
        if self.last_printed.as_ref() == Some(current) {
            return None;
        }
        self.last_printed = Some(current.clone());
        Some(current.clone())
    }
}

/// Render an elapsed duration as `MM:SS`.
#[must_use]
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Event sink that prints executor events to a console
pub struct ConsoleFormatter<W: Write> {
    config: FormatterConfig,
    colors: Box<dyn Colors>,
    console: Console<W>,
    tasks: TaskTracker,
    started_at: Option<Instant>,
}

impl<W: Write> ConsoleFormatter<W> {
    /// Create a formatter writing to `out`, coloring per `config.color`.
    ///
    /// Prints the configured banner, if any.
    pub fn new(out: W, config: FormatterConfig) -> Result<Self> {
        let colors = config.color.palette();
        Self::with_colors(out, config, colors)
    }

    /// Create a formatter with an explicit color strategy.
    pub fn with_colors(out: W, config: FormatterConfig, colors: Box<dyn Colors>) -> Result<Self> {
        let mut formatter = Self {
            config,
            colors,
            console: Console::new(out),
            tasks: TaskTracker::new(),
            started_at: None,
        };
        formatter.write_banner()?;
        Ok(formatter)
    }

    /// The display policy in use
    #[must_use]
    pub const fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Set the task subsequent events belong to
    pub fn set_current_task(&mut self, name: Option<&str>) {
        self.tasks.set_current(name);
    }

    /// Name of the active task
    #[must_use]
    pub fn current_task_name(&self) -> Option<&str> {
        self.tasks.current()
    }

    /// Everything written so far
    pub const fn sink(&self) -> &W {
        self.console.get_ref()
    }

    /// Consume the formatter, returning its writer
    pub fn into_sink(self) -> W {
        self.console.into_inner()
    }

    /// A command is about to run.
    ///
    /// The start line is printed only on the command's first execution.
    pub fn on_command_start(&mut self, command: &Command) -> Result<()> {
        if self.config.is_debug(command.verbosity) {
            return Ok(());
        }
        self.print_task_if_changed()?;
        if command.first_execution {
            let line = CommandView::new(command, self.colors.as_ref()).start_message();
            self.print_indented_line(&line, BODY_INDENT)?;
        }
        Ok(())
    }

    /// A command produced one line of output on `stream`.
    pub fn on_command_data(
        &mut self,
        command: &Command,
        stream: StreamType,
        line: &str,
    ) -> Result<()> {
        if !self.config.show_command_output(stream) || self.config.is_debug(command.verbosity) {
            return Ok(());
        }
        self.print_task_if_changed()?;
        let line = CommandView::new(command, self.colors.as_ref()).format_output(line);
        self.print_indented_line(&line, BODY_INDENT)
    }

    /// A command finished.
    pub fn on_command_exit(&mut self, command: &Command) -> Result<()> {
        if self.config.is_debug(command.verbosity) {
            return Ok(());
        }
        let line = CommandView::new(command, self.colors.as_ref())
            .exit_message(self.config.log_file.as_deref());
        self.print_indented_line(&line, EXIT_INDENT)
    }

    /// Print a command with buffered output, or a log message.
    ///
    /// A command is replayed as start, stderr lines, stdout lines, then exit
    /// if it has finished. Its output buffers are cleared afterwards.
    pub fn write(&mut self, record: Record<'_>) -> Result<()> {
        match record {
            Record::Command(command) => self.write_command(command),
            Record::Log(message) => self.write_log_message(message),
        }
    }

    fn write_banner(&mut self) -> Result<()> {
        if let Some(banner) = &self.config.banner {
            self.console.print_line(banner)?;
        }
        Ok(())
    }

    fn write_command(&mut self, command: &mut Command) -> Result<()> {
        self.on_command_start(command)?;
        self.write_command_output(command, StreamType::Stderr)?;
        self.write_command_output(command, StreamType::Stdout)?;
        if command.is_finished() {
            self.on_command_exit(command)?;
        }
        Ok(())
    }

    fn write_command_output(&mut self, command: &mut Command, stream: StreamType) -> Result<()> {
        if command.output(stream).is_empty() {
            return Ok(());
        }
        {
            let record: &Command = command;
            for line in record.output(stream).split_inclusive('\n') {
                self.on_command_data(record, stream, line)?;
            }
        }
        command.clear_output(stream);
        Ok(())
    }

    fn write_log_message(&mut self, message: &LogMessage) -> Result<()> {
        if self.config.is_debug(message.verbosity) {
            return Ok(());
        }
        self.print_task_if_changed()?;
        let line = self.colors.gray(&message.to_string());
        self.print_indented_line(&line, BODY_INDENT)
    }

    fn print_task_if_changed(&mut self) -> Result<()> {
        let Some(task) = self.tasks.take_change() else {
            return Ok(());
        };
        let line = format!("{} {}", self.clock(), self.colors.blue(&task));
        self.console.print_line(&line)
    }

    fn clock(&mut self) -> String {
        let started_at = *self.started_at.get_or_insert_with(Instant::now);
        format_clock(started_at.elapsed())
    }

    fn print_indented_line(&mut self, line: &str, indent: usize) -> Result<()> {
        self.console.print_line(&format!("{:indent$}{line}", ""))
    }
}
