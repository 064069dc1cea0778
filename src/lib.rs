//! # folder-rotate
//!
//! Keeps the contents of a single flat directory within a size or file-count
//! budget by deleting the least-prioritized files.
//!
//! ## Overview
//!
//! Log directories, backup targets and caches grow without bound unless
//! something trims them. folder-rotate lists the files of one directory,
//! keeps those whose names match a pattern, orders them by name, size or a
//! timestamp, and deletes everything at the end of that order which exceeds
//! the configured budget.
//!
//! ## Key Features
//!
//! - **Two budget kinds**: cumulative bytes (`b` through `tb`, powers of
//!   1000) or a plain file count (`qty`)
//! - **Deterministic selection**: ties are broken by file name, and `desc` is
//!   the exact reverse of `asc`
//! - **Simulate mode**: report what would be deleted without touching disk
//! - **Fail fast**: the first unreadable entry or failed deletion aborts the
//!   run and is reported with the offending path
//!
//! ## Architecture
//!
//! - [`rotate`]: file selection and deletion
//! - [`cli`]: command-line interface definitions using clap
//! - [`commands`]: execution of a parsed command line
//! - [`error`]: error types and handling with thiserror + miette
//! - [`logging`]: verbosity-aware stderr output
//!
//! ## Command Line
//!
//! ```bash
//! # Keep the 30 newest archives, dry run first
//! folder-rotate -p /srv/backups -r '/\.tar\.gz$/' -b date_birthtime -d desc \
//!     -m 30 -u qty --simulate
//!
//! # Cap a log directory at 2 GB, deleting the oldest logs
//! folder-rotate -p /var/log/myapp -b date_mtime -d desc -m 2 -u gb
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use folder_rotate::rotate::{FolderRotate, RotateConfig};
//!
//! let config = RotateConfig::builder()
//!     .path("/var/log/myapp")
//!     .order_by("size")
//!     .order_dir("asc")
//!     .max_size(500.0)
//!     .unit("mb")
//!     .build()?;
//!
//! // Dry run: nothing is deleted
//! let selected = FolderRotate::new(config).rotate(true)?;
//! println!("{} files exceed the budget", selected.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod rotate;

mod timestamp;
