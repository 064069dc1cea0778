//! Budget enforcement for a single flat directory.
//!
//! A rotation lists the direct children of a directory, keeps the regular
//! files whose names match a pattern, orders them, and deletes the tail of
//! that order that no longer fits the budget.
//!
//! # Features
//!
//! - Size budgets in `b`, `kb`, `mb`, `gb` or `tb` (powers of 1000)
//! - Count budgets with `qty`
//! - Ordering by name, size, or any of the four file timestamps
//! - Simulate mode that reports without deleting
//! - Parallel metadata retrieval with rayon; deletion is strictly sequential
//!
//! # Example
//!
//! ```no_run
//! use folder_rotate::rotate::{FilesRegex, FolderRotate, RotateConfig};
//!
//! // Keep the 10 newest log files, delete the rest
//! let config = RotateConfig::builder()
//!     .path("/var/log/myapp")
//!     .files_regex(FilesRegex::new(r"\.log$", ['i']))
//!     .order_by("date_mtime")
//!     .order_dir("desc")
//!     .max_size(10.0)
//!     .unit("qty")
//!     .build()?;
//!
//! let deleted = FolderRotate::new(config).rotate(false)?;
//! for file in &deleted {
//!     println!("Deleted {}", file.path().display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod apply;
mod config;
mod select;
#[cfg(test)]
mod tests;
mod unit;

pub use apply::apply;
pub use config::{FilesRegex, OrderBy, OrderDir, RotateConfig, RotateConfigBuilder};
pub use select::{
    FileEntry, FileStat, FolderRotate, deletion_suffix, list_files, sort_entries, stat_file,
};
pub use unit::{Budget, RotationUnit, byte_size_for_unit};
