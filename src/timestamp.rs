//! Conversions between file timestamps and epoch offsets.

use std::fs::Metadata;
use std::io;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Convert SystemTime to nanoseconds since UNIX_EPOCH, clamping earlier times
/// to zero
pub fn system_time_to_nanos(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
}

/// Convert SystemTime to fractional milliseconds since UNIX_EPOCH
pub fn system_time_to_millis(time: SystemTime) -> f64 {
    system_time_to_nanos(time) as f64 / NANOS_PER_MILLI
}

/// Build a SystemTime from signed epoch seconds plus a nanosecond part.
#[cfg_attr(not(unix), allow(dead_code))]
fn system_time_from_parts(secs: i64, nanos: i64) -> SystemTime {
    let nanos = Duration::from_nanos(nanos.clamp(0, 999_999_999) as u64);
    let base = if secs >= 0 {
        UNIX_EPOCH.checked_add(Duration::from_secs(secs as u64))
    } else {
        UNIX_EPOCH.checked_sub(Duration::from_secs(secs.unsigned_abs()))
    };

    base.and_then(|t| t.checked_add(nanos)).unwrap_or(UNIX_EPOCH)
}

/// Last status-change time (`ctime`) of a file.
#[cfg(unix)]
pub fn status_changed(metadata: &Metadata) -> io::Result<SystemTime> {
    use std::os::unix::fs::MetadataExt;

    Ok(system_time_from_parts(metadata.ctime(), metadata.ctime_nsec()))
}

/// Last status-change time of a file. Platforms without a `ctime` report the
/// last modification.
#[cfg(not(unix))]
pub fn status_changed(metadata: &Metadata) -> io::Result<SystemTime> {
    metadata.modified()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis() {
        let time = UNIX_EPOCH + Duration::new(1, 500_000);
        assert_eq!(system_time_to_nanos(time), 1_000_500_000);
        assert_eq!(system_time_to_millis(time), 1000.5);

        let before_epoch = UNIX_EPOCH - Duration::from_secs(10);
        assert_eq!(system_time_to_nanos(before_epoch), 0);
    }

    #[test]
    fn test_system_time_from_parts() {
        assert_eq!(
            system_time_from_parts(2, 3),
            UNIX_EPOCH + Duration::new(2, 3)
        );
        assert_eq!(
            system_time_from_parts(-2, 0),
            UNIX_EPOCH - Duration::from_secs(2)
        );
        // out-of-range nanos are clamped
        assert_eq!(
            system_time_from_parts(0, 5_000_000_000),
            UNIX_EPOCH + Duration::from_nanos(999_999_999)
        );
    }
}
