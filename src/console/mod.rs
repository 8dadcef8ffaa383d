//! Console output
//!
//! Turns executor events into numbered, colorized terminal lines.

pub mod colors;
pub mod formatter;
pub mod sink;

pub use colors::{AnsiColors, ColorMode, Colors, PlainColors};
pub use formatter::{format_clock, ConsoleFormatter, Record, TaskTracker};
pub use sink::Console;
