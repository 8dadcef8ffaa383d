//! Line-oriented output sink

use std::io::Write;

use anyhow::{Context, Result};

/// Append-only line writer over any `Write`
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    /// Wrap `out`
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Write `line` followed by a newline, then flush.
    pub fn print_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}").context("Failed to write to console")?;
        self.out.flush().context("Failed to flush console")?;
        Ok(())
    }

    /// The underlying writer
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the console, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_print_line_appends_newline() {
        let mut console = Console::new(Vec::new());
        console.print_line("first").unwrap();
        console.print_line("second").unwrap();
        assert_eq!(console.into_inner(), b"first\nsecond\n");
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut console = Console::new(BrokenPipe);
        let err = console.print_line("lost").unwrap_err();
        assert!(err.to_string().contains("Failed to write to console"));
    }
}
