//! Verbosity-aware diagnostics on stderr.
//!
//! The list of affected files is the program's output and goes to stdout;
//! everything routed through [`Logger`] is commentary and goes to stderr.

use std::fmt::Display;

/// Level at which per-run summaries are shown.
pub const SUMMARY: u8 = 1;
/// Level at which every file touched by a rotation is shown.
pub const PER_FILE: u8 = 2;

#[derive(Clone, Copy, Debug, Default)]
pub struct Logger {
    verbose: u8,
    quiet: bool,
}

impl Logger {
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// A logger that never prints.
    pub fn silent() -> Self {
        Self::new(0, true)
    }

    pub fn info(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Warnings are shown even in quiet mode.
    pub fn warn(&self, message: impl Display) {
        eprintln!("Warning: {message}");
    }

    pub fn verbose(&self, level: u8, message: impl Display) {
        if self.enabled(level) {
            eprintln!("{message}");
        }
    }

    pub fn enabled(&self, level: u8) -> bool {
        !self.quiet && self.verbose >= level
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }
}
