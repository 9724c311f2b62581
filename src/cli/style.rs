//! Terminal styling helpers.
//!
//! `anstream` strips the escapes when stdout is not a terminal, so these can
//! be used unconditionally.

use owo_colors::OwoColorize;

/// Extension trait for the handful of styles the CLI uses.
pub trait Stylize {
    /// Green, for accepted outcomes.
    fn success(&self) -> String;
    /// Yellow, for warnings.
    fn warn(&self) -> String;
    /// Red, for blocked outcomes.
    fn error(&self) -> String;
    /// Dimmed, for secondary detail.
    fn muted(&self) -> String;
}

impl<T: std::fmt::Display> Stylize for T {
    fn success(&self) -> String {
        self.green().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }

    fn error(&self) -> String {
        self.red().to_string()
    }

    fn muted(&self) -> String {
        self.dimmed().to_string()
    }
}
