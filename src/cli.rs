//! Command-line interface definitions for folder-rotate.
//!
//! This module defines the CLI structure using clap. The main entry point is
//! the [`Cli`] struct, which can also be assembled programmatically with
//! [`Cli::builder`].
//!
//! # Example
//!
//! ```no_run
//! use folder_rotate::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! if cli.simulate() {
//!     println!("Dry run of {}", cli.path().display());
//! }
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{Result, RotateError};
use crate::rotate::{FilesRegex, RotateConfig};

/// Restrict a directory to a size or file-count budget.
///
/// Files are filtered by name, ordered, and everything at the end of that
/// order which exceeds the budget is deleted. Only regular files directly
/// inside the directory are considered; directories are never selected.
#[derive(Debug, Parser)]
#[command(
    name = "folder-rotate",
    bin_name = "folder-rotate",
    author,
    version,
    about = "Keep a directory within a size or file-count budget",
    long_about = None
)]
pub struct Cli {
    /// Directory to delete files in
    #[arg(short, long, env = "FOLDER_ROTATE_PATH")]
    path: PathBuf,

    /// Regular expression literal selecting files by name, e.g.
    /// '/^app.+?\.log$/i'
    #[arg(short, long, default_value = "/.*/i", env = "FOLDER_ROTATE_REGEX")]
    regex: String,

    /// One of "size", "name", "date_atime", "date_mtime", "date_ctime",
    /// "date_birthtime"
    #[arg(short = 'b', long, env = "FOLDER_ROTATE_ORDER_BY")]
    order_by: String,

    /// One of "asc", "desc". Deletion always happens at the end of the
    /// ordered list: to delete the oldest files use date_birthtime with desc
    #[arg(short = 'd', long, env = "FOLDER_ROTATE_ORDER_DIR")]
    order_dir: String,

    /// Maximum size of the selected files, in --rotation-unit
    #[arg(short, long, env = "FOLDER_ROTATE_MAX_SIZE")]
    max_size: f64,

    /// One of "b", "kb", "mb", "gb", "tb" (powers of 1000) or "qty" (number
    /// of files)
    #[arg(short = 'u', long, env = "FOLDER_ROTATE_ROTATION_UNIT")]
    rotation_unit: String,

    /// Print the configuration as understood before rotating
    #[arg(short, long)]
    config: bool,

    /// Wait for confirmation before rotating
    #[arg(short, long)]
    wait: bool,

    /// Only report what would be deleted
    #[arg(short, long, env = "FOLDER_ROTATE_SIMULATE")]
    simulate: bool,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, env = "FOLDER_ROTATE_VERBOSE")]
    verbose: u8,

    /// Silence all output except for errors and the list of files
    #[arg(short, long, conflicts_with = "verbose", env = "FOLDER_ROTATE_QUIET")]
    quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn regex(&self) -> &str {
        &self.regex
    }

    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    pub fn order_dir(&self) -> &str {
        &self.order_dir
    }

    pub fn max_size(&self) -> f64 {
        self.max_size
    }

    pub fn rotation_unit(&self) -> &str {
        &self.rotation_unit
    }

    pub fn print_config(&self) -> bool {
        self.config
    }

    pub fn wait(&self) -> bool {
        self.wait
    }

    pub fn simulate(&self) -> bool {
        self.simulate
    }

    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Turn the arguments into a [`RotateConfig`].
    ///
    /// Fails only if the regex argument is not a `/pattern/flags` literal.
    pub fn to_config(&self) -> Result<RotateConfig> {
        RotateConfig::builder()
            .path(&self.path)
            .files_regex(FilesRegex::from_literal(&self.regex)?)
            .order_by(&self.order_by)
            .order_dir(&self.order_dir)
            .max_size(self.max_size)
            .unit(&self.rotation_unit)
            .build()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    path: Option<PathBuf>,
    regex: Option<String>,
    order_by: Option<String>,
    order_dir: Option<String>,
    max_size: Option<f64>,
    rotation_unit: Option<String>,
    config: bool,
    wait: bool,
    simulate: bool,
    verbose: u8,
    quiet: bool,
}

impl CliBuilder {
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn order_dir(mut self, order_dir: impl Into<String>) -> Self {
        self.order_dir = Some(order_dir.into());
        self
    }

    pub fn max_size(mut self, max_size: f64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn rotation_unit(mut self, unit: impl Into<String>) -> Self {
        self.rotation_unit = Some(unit.into());
        self
    }

    pub fn print_config(mut self, enabled: bool) -> Self {
        self.config = enabled;
        self
    }

    pub fn wait(mut self, enabled: bool) -> Self {
        self.wait = enabled;
        self
    }

    pub fn simulate(mut self, enabled: bool) -> Self {
        self.simulate = enabled;
        self
    }

    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        fn required<T>(value: Option<T>, flag: &str) -> Result<T> {
            value.ok_or_else(|| RotateError::InvalidConfig(format!("--{flag} is required")))
        }

        Ok(Cli {
            path: required(self.path, "path")?,
            regex: self.regex.unwrap_or_else(|| "/.*/i".to_string()),
            order_by: required(self.order_by, "order-by")?,
            order_dir: required(self.order_dir, "order-dir")?,
            max_size: required(self.max_size, "max-size")?,
            rotation_unit: required(self.rotation_unit, "rotation-unit")?,
            config: self.config,
            wait: self.wait,
            simulate: self.simulate,
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}
