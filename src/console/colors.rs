//! Terminal color strategies
//!
//! The formatter paints text through a `Colors` implementation chosen once at
//! construction: `AnsiColors` emits escape sequences, `PlainColors` passes
//! text through untouched.

use colored::Color;
use serde::{Deserialize, Serialize};

/// Paints text in a named color
pub trait Colors {
    /// Wrap `text` so it renders in `color`
    fn paint(&self, text: &str, color: Color) -> String;

    /// Red text
    fn red(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    /// Green text
    fn green(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    /// Yellow text
    fn yellow(&self, text: &str) -> String {
        self.paint(text, Color::Yellow)
    }

    /// Blue text
    fn blue(&self, text: &str) -> String {
        self.paint(text, Color::Blue)
    }

    /// Gray text
    fn gray(&self, text: &str) -> String {
        self.paint(text, Color::BrightBlack)
    }
}

/// Emits ANSI SGR escape sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiColors;

impl Colors for AnsiColors {
    fn paint(&self, text: &str, color: Color) -> String {
        format!("\x1b[{}m{text}\x1b[0m", color.to_fg_str())
    }
}

/// Leaves text uncolored
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainColors;

impl Colors for PlainColors {
    fn paint(&self, text: &str, _color: Color) -> String {
        text.to_string()
    }
}

/// When to emit colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorMode {
    /// Whether this mode colors output in the current environment
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => colored::control::SHOULD_COLORIZE.should_colorize(),
            Self::Always => true,
            Self::Never => false,
        }
    }

    /// The color strategy for this mode
    #[must_use]
    pub fn palette(self) -> Box<dyn Colors> {
        if self.enabled() {
            Box::new(AnsiColors)
        } else {
            Box::new(PlainColors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_codes() {
        assert_eq!(AnsiColors.red("x"), "\x1b[31mx\x1b[0m");
        assert_eq!(AnsiColors.green("x"), "\x1b[32mx\x1b[0m");
        assert_eq!(AnsiColors.yellow("x"), "\x1b[33mx\x1b[0m");
        assert_eq!(AnsiColors.blue("x"), "\x1b[34mx\x1b[0m");
        assert_eq!(AnsiColors.gray("x"), "\x1b[90mx\x1b[0m");
    }

    #[test]
    fn test_plain_is_passthrough() {
        assert_eq!(PlainColors.red("✘ 01"), "✘ 01");
        assert_eq!(PlainColors.gray(""), "");
    }

    #[test]
    fn test_explicit_modes() {
        assert!(ColorMode::Always.enabled());
        assert!(!ColorMode::Never.enabled());
        assert_eq!(ColorMode::Never.palette().blue("deploy"), "deploy");
        assert_eq!(
            ColorMode::Always.palette().blue("deploy"),
            "\x1b[34mdeploy\x1b[0m"
        );
    }

    #[test]
    fn test_color_mode_default_is_auto() {
        assert_eq!(ColorMode::default(), ColorMode::Auto);
    }
}
