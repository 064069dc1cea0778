#![allow(dead_code)]

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use folder_rotate::rotate::{FileEntry, FolderRotate, RotateConfig};

/// Long enough for every filesystem timestamp to move forward.
const TIMESTAMP_GAP: Duration = Duration::from_millis(50);

/// Create `name` in `dir` filled with `size` bytes and return its path.
pub fn create_file(dir: &Path, name: &str, size: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![b'a'; size]).unwrap();
    path
}

/// Append a byte to an existing file without recreating it.
pub fn touch_file(path: &Path) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(b"a").unwrap();
    file.sync_all().unwrap();
}

/// Set a file's access and modification time to `age_days` ago.
pub fn set_age_days(path: &Path, age_days: u64) {
    let time = SystemTime::now() - Duration::from_secs(age_days * 24 * 60 * 60);
    let time = filetime::FileTime::from_system_time(time);
    filetime::set_file_times(path, time, time).unwrap();
}

/// Wait so that files created afterwards get strictly later timestamps.
pub fn pause() {
    thread::sleep(TIMESTAMP_GAP);
}

pub fn config(
    dir: &Path,
    order_by: &str,
    order_dir: &str,
    max_size: f64,
    unit: &str,
) -> RotateConfig {
    RotateConfig::builder()
        .path(dir)
        .order_by(order_by)
        .order_dir(order_dir)
        .max_size(max_size)
        .unit(unit)
        .build()
        .unwrap()
}

/// Simulated rotation, returning the selected names in deletion order.
pub fn simulate(
    dir: &Path,
    order_by: &str,
    order_dir: &str,
    max_size: f64,
    unit: &str,
) -> Vec<String> {
    let files = FolderRotate::new(config(dir, order_by, order_dir, max_size, unit))
        .rotate(true)
        .unwrap();
    names(&files)
}

pub fn names(files: &[FileEntry]) -> Vec<String> {
    files.iter().map(|f| f.name().to_string()).collect()
}
