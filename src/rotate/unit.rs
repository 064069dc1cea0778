use std::str::FromStr;

use crate::error::{Result, RotateError};

/// Unit of a rotation budget.
///
/// Byte units are powers of 1000, not 1024: one `kb` is 1,000 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationUnit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
    Terabytes,
    /// The budget is a number of files
    Quantity,
}

impl RotationUnit {
    /// Bytes per unit, or `None` for [`RotationUnit::Quantity`]
    pub fn byte_multiplier(self) -> Option<u64> {
        match self {
            RotationUnit::Bytes => Some(1),
            RotationUnit::Kilobytes => Some(1_000),
            RotationUnit::Megabytes => Some(1_000_000),
            RotationUnit::Gigabytes => Some(1_000_000_000),
            RotationUnit::Terabytes => Some(1_000_000_000_000),
            RotationUnit::Quantity => None,
        }
    }
}

impl FromStr for RotationUnit {
    type Err = RotateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "b" => Ok(RotationUnit::Bytes),
            "kb" => Ok(RotationUnit::Kilobytes),
            "mb" => Ok(RotationUnit::Megabytes),
            "gb" => Ok(RotationUnit::Gigabytes),
            "tb" => Ok(RotationUnit::Terabytes),
            "qty" => Ok(RotationUnit::Quantity),
            _ => Err(RotateError::InvalidConfig(format!(
                "The unit '{s}' is not known."
            ))),
        }
    }
}

/// Look up the number of bytes in one `unit`.
///
/// Fails for `qty`, which counts files rather than bytes, and for any value
/// that is not a unit at all.
pub fn byte_size_for_unit(unit: &str) -> Result<u64> {
    unit.parse::<RotationUnit>()?
        .byte_multiplier()
        .ok_or_else(|| {
            RotateError::InvalidConfig(format!("The unit '{unit}' is not a byte-size unit."))
        })
}

/// A resolved rotation budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Budget {
    /// Keep at most this many files
    Count(usize),
    /// Keep the leading files whose cumulative size stays within this many
    /// bytes
    Bytes(f64),
}

impl Budget {
    /// Resolve `max_size` in `unit` into a budget.
    ///
    /// `max_size` must be a non-negative number; with `qty` it must also be
    /// integral.
    pub fn resolve(max_size: f64, unit: &str) -> Result<Self> {
        let unit: RotationUnit = unit.parse()?;

        if max_size.is_nan() || max_size < 0.0 {
            return Err(RotateError::InvalidConfig(format!(
                "maxSize must be a non-negative number, got {max_size}"
            )));
        }

        match unit.byte_multiplier() {
            Some(multiplier) => Ok(Budget::Bytes(max_size * multiplier as f64)),
            None => {
                if max_size.fract() != 0.0 || max_size > usize::MAX as f64 {
                    return Err(RotateError::InvalidConfig(format!(
                        "maxSize must be a whole number of files with unit 'qty', got {max_size}"
                    )));
                }
                Ok(Budget::Count(max_size as usize))
            }
        }
    }
}

/// Format size in human-readable decimal units
pub(crate) fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "kB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1000.0 && unit_idx < UNITS.len() - 1 {
        size /= 1000.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit_idx])
    }
}
