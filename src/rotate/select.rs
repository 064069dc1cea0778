use std::cmp::Ordering;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rayon::prelude::*;
use walkdir::WalkDir;

use super::config::{OrderBy, OrderDir, RotateConfig};
use super::unit::{Budget, format_size};
use crate::error::{Result, RotateError};
use crate::logging::{self, Logger};
use crate::timestamp::status_changed;

/// Metadata snapshot of a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub(crate) size: u64,
    pub(crate) accessed: SystemTime,
    pub(crate) modified: SystemTime,
    pub(crate) changed: SystemTime,
    pub(crate) created: Option<SystemTime>,
    pub(crate) is_file: bool,
}

impl FileStat {
    fn from_metadata(metadata: &Metadata) -> io::Result<Self> {
        Ok(Self {
            size: metadata.len(),
            accessed: metadata.accessed()?,
            modified: metadata.modified()?,
            changed: status_changed(metadata)?,
            // not every filesystem records a birth time
            created: metadata.created().ok(),
            is_file: metadata.is_file(),
        })
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Last access time
    pub fn accessed(&self) -> SystemTime {
        self.accessed
    }

    /// Last modification time
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Last status-change time
    pub fn changed(&self) -> SystemTime {
        self.changed
    }

    /// Creation time, if the filesystem records one
    pub fn created(&self) -> Option<SystemTime> {
        self.created
    }

    /// Creation time used for ordering, falling back to the status-change
    /// time
    pub fn birth_time(&self) -> SystemTime {
        self.created.unwrap_or(self.changed)
    }

    pub fn is_file(&self) -> bool {
        self.is_file
    }
}

/// A directory entry that passed the name filter, with its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) stat: FileStat,
}

impl FileEntry {
    /// File name (lossily converted to UTF-8)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stat(&self) -> &FileStat {
        &self.stat
    }
}

/// Retrieve the metadata of a single file, following symlinks.
pub fn stat_file(path: &Path) -> Result<FileEntry> {
    let file_access = |source: io::Error| RotateError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(file_access)?;
    let stat = FileStat::from_metadata(&metadata).map_err(file_access)?;

    Ok(FileEntry {
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: path.to_path_buf(),
        stat,
    })
}

/// List the direct children of `dir` whose name satisfies `predicate`,
/// together with their metadata.
///
/// Metadata is fetched in parallel; the result keeps listing order. Errors
/// from the predicate or from any stat call abort the listing.
pub fn list_files<P>(dir: &Path, predicate: P) -> Result<Vec<FileEntry>>
where
    P: Fn(&str) -> Result<bool>,
{
    let dir_access = |source: io::Error| RotateError::DirectoryAccess {
        path: dir.to_path_buf(),
        source,
    };

    // walkdir yields nothing below a plain file, so check the root up front
    let metadata = fs::metadata(dir).map_err(dir_access)?;
    if !metadata.is_dir() {
        return Err(dir_access(io::Error::new(
            io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| dir_access(io::Error::from(err)))?;
        if predicate(&entry.file_name().to_string_lossy())? {
            candidates.push(entry.into_path());
        }
    }

    candidates
        .par_iter()
        .map(|path| stat_file(path))
        .collect()
}

/// Compare two entries by `order_by`, ascending.
///
/// Equal keys fall back to the file name so that the order is total.
fn compare(order_by: OrderBy, a: &FileEntry, b: &FileEntry) -> Ordering {
    let by_key = match order_by {
        OrderBy::Name => Ordering::Equal,
        OrderBy::Size => a.stat.size.cmp(&b.stat.size),
        OrderBy::AccessTime => a.stat.accessed.cmp(&b.stat.accessed),
        OrderBy::ModifiedTime => a.stat.modified.cmp(&b.stat.modified),
        OrderBy::ChangedTime => a.stat.changed.cmp(&b.stat.changed),
        OrderBy::BirthTime => a.stat.birth_time().cmp(&b.stat.birth_time()),
    };

    by_key.then_with(|| a.name.cmp(&b.name))
}

/// Sort entries in place.
///
/// `order_by` and `order_dir` are parsed here; an unrecognized value is an
/// [`RotateError::InvalidConfig`]. `desc` is the exact reverse of `asc`.
pub fn sort_entries(entries: &mut [FileEntry], order_by: &str, order_dir: &str) -> Result<()> {
    let order_by: OrderBy = order_by.parse()?;
    let order_dir: OrderDir = order_dir.parse()?;

    entries.sort_by(|a, b| {
        let ordering = compare(order_by, a, b);
        match order_dir {
            OrderDir::Asc => ordering,
            OrderDir::Desc => ordering.reverse(),
        }
    });

    Ok(())
}

/// Split off the part of a sorted list that exceeds the budget.
///
/// With a count budget the first `n` entries are kept. With a byte budget
/// the list is walked from the front and everything from the first entry
/// that pushes the cumulative size over the threshold is returned.
pub fn deletion_suffix(mut sorted: Vec<FileEntry>, budget: Budget) -> Vec<FileEntry> {
    let keep = match budget {
        Budget::Count(max_files) => max_files.min(sorted.len()),
        Budget::Bytes(max_bytes) => {
            let mut total: u64 = 0;
            sorted
                .iter()
                .position(|entry| {
                    total = total.saturating_add(entry.stat.size);
                    total as f64 > max_bytes
                })
                .unwrap_or(sorted.len())
        }
    };

    sorted.split_off(keep)
}

/// Rotation of one directory according to a [`RotateConfig`].
#[derive(Debug)]
pub struct FolderRotate {
    config: RotateConfig,
    log: Logger,
}

impl FolderRotate {
    pub fn new(config: RotateConfig) -> Self {
        Self {
            config,
            log: Logger::silent(),
        }
    }

    /// Report progress through `log`
    pub fn with_logger(mut self, log: Logger) -> Self {
        self.log = log;
        self
    }

    pub fn config(&self) -> &RotateConfig {
        &self.config
    }

    pub(crate) fn logger(&self) -> Logger {
        self.log
    }

    /// Compute the files that should be deleted, in deletion order.
    ///
    /// Lists the directory, filters names, drops everything that is not a
    /// regular file, sorts and cuts the list at the budget. Nothing is
    /// modified on disk.
    pub fn files_to_delete(&self) -> Result<Vec<FileEntry>> {
        let config = &self.config;
        let regex = config.files_regex().compile()?;

        let mut files: Vec<FileEntry> = list_files(config.path(), |name| Ok(regex.is_match(name)))?
            .into_iter()
            .filter(|entry| entry.stat.is_file)
            .collect();

        self.log.verbose(
            logging::SUMMARY,
            format!(
                "Found {} matching files in {}",
                files.len(),
                config.path().display()
            ),
        );

        sort_entries(&mut files, config.order_by(), config.order_dir())?;

        let budget = Budget::resolve(config.max_size(), config.unit())?;
        let to_delete = deletion_suffix(files, budget);

        if self.log.enabled(logging::SUMMARY) {
            let bytes: u64 = to_delete.iter().map(|entry| entry.stat.size).sum();
            self.log.verbose(
                logging::SUMMARY,
                format!(
                    "Selected {} files ({}) exceeding the budget",
                    to_delete.len(),
                    format_size(bytes)
                ),
            );
        }

        Ok(to_delete)
    }
}
