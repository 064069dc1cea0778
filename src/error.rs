//! Error types for folder-rotate.
//!
//! This module defines all error types used throughout folder-rotate, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`RotateError`]
//! - Every failure aborts the current rotation and is returned unmodified
//! - Files deleted before a [`RotateError::Deletion`] stay deleted
//! - Errors are automatically converted to `miette::Result` for CLI output
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folder_rotate::error::{Result, RotateError};
//!
//! fn check_dir(path: &Path) -> Result<()> {
//!     std::fs::read_dir(path).map_err(|source| RotateError::DirectoryAccess {
//!         path: path.to_path_buf(),
//!         source,
//!     })?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in folder-rotate operations
#[derive(Error, Debug, Diagnostic)]
pub enum RotateError {
    /// A configuration value was rejected at its point of use.
    ///
    /// Raised lazily: when compiling the file-name pattern, when sorting
    /// with an unrecognized `orderBy`/`orderDir`, when looking up the byte
    /// multiplier of a unit, or when `maxSize` cannot be used as a budget.
    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(folder_rotate::config::invalid),
        help(
            "Check --order-by (name, size, date_atime, date_mtime, date_ctime, date_birthtime), \
             --order-dir (asc, desc), --rotation-unit (b, kb, mb, gb, tb, qty) and --regex."
        )
    )]
    InvalidConfig(
        /// Description of the rejected value
        String,
    ),

    /// The directory to rotate is missing, not a directory, or unreadable.
    #[error("Cannot access directory '{path}'")]
    #[diagnostic(
        code(folder_rotate::dir::access),
        help("Ensure the path exists, is a directory and is readable.")
    )]
    DirectoryAccess {
        /// The directory that could not be listed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Metadata retrieval failed for a candidate file.
    ///
    /// Common causes: dangling symlinks, permission denied, or the entry
    /// being removed between listing and stat.
    #[error("Cannot read metadata of '{path}'")]
    #[diagnostic(code(folder_rotate::file::access))]
    FileAccess {
        /// The entry whose metadata could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A selected file could not be removed.
    ///
    /// Rotation stops at the first failing path. Files removed before it are
    /// not restored.
    #[error("Failed to delete '{path}'")]
    #[diagnostic(
        code(folder_rotate::file::delete),
        help("Files listed before this one have already been deleted.")
    )]
    Deletion {
        /// The file that could not be deleted
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading the confirmation keypress from stdin failed.
    #[error("Failed to read confirmation from stdin")]
    #[diagnostic(code(folder_rotate::cli::prompt))]
    Prompt(#[source] std::io::Error),
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RotateError>;
