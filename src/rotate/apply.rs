use std::fs;

use super::select::{FileEntry, FolderRotate};
use crate::error::{Result, RotateError};
use crate::logging::{self, Logger};

/// Delete `entries` one at a time, in order.
///
/// In simulate mode nothing is touched. The first failing deletion stops the
/// run; files removed before it stay removed. On success the input list is
/// returned unchanged so simulated and real runs report the same way.
pub fn apply(entries: Vec<FileEntry>, simulate: bool, log: Logger) -> Result<Vec<FileEntry>> {
    for entry in &entries {
        if simulate {
            log.verbose(
                logging::PER_FILE,
                format!("  Would delete {}", entry.path().display()),
            );
            continue;
        }

        log.verbose(
            logging::PER_FILE,
            format!("  Deleting {}", entry.path().display()),
        );
        fs::remove_file(entry.path()).map_err(|source| RotateError::Deletion {
            path: entry.path().to_path_buf(),
            source,
        })?;
    }

    Ok(entries)
}

impl FolderRotate {
    /// Select the files exceeding the budget and delete them.
    ///
    /// Returns the files that were deleted, or would have been when
    /// `simulate` is set.
    pub fn rotate(&self, simulate: bool) -> Result<Vec<FileEntry>> {
        let files = self.files_to_delete()?;
        apply(files, simulate, self.logger())
    }
}
