use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use regex::{Regex, RegexBuilder};

use crate::error::{Result, RotateError};

/// Rotation configuration for a single directory.
///
/// `order_by`, `order_dir` and `unit` are kept as given and only parsed
/// where they are used (sorting and budget computation), so an invalid value
/// surfaces when a rotation is attempted rather than when the configuration
/// is built.
#[derive(Debug, Clone)]
pub struct RotateConfig {
    /// Absolute path of the directory to rotate
    path: PathBuf,
    /// File-name filter
    files_regex: FilesRegex,
    /// One of `name`, `size`, `date_atime`, `date_mtime`, `date_ctime`,
    /// `date_birthtime`
    order_by: String,
    /// `asc` or `desc`
    order_dir: String,
    /// Budget value, interpreted according to `unit`
    max_size: f64,
    /// One of `b`, `kb`, `mb`, `gb`, `tb`, `qty`
    unit: String,
}

impl RotateConfig {
    /// Creates a new builder for [`RotateConfig`]
    pub fn builder() -> RotateConfigBuilder {
        RotateConfigBuilder::default()
    }

    /// Get the directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file-name filter
    pub fn files_regex(&self) -> &FilesRegex {
        &self.files_regex
    }

    /// Get the raw `orderBy` value
    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    /// Get the raw `orderDir` value
    pub fn order_dir(&self) -> &str {
        &self.order_dir
    }

    /// Get the budget value
    pub fn max_size(&self) -> f64 {
        self.max_size
    }

    /// Get the raw unit value
    pub fn unit(&self) -> &str {
        &self.unit
    }
}

impl fmt::Display for RotateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  path:      {}", self.path.display())?;
        writeln!(f, "  regex:     {}", self.files_regex)?;
        writeln!(f, "  order by:  {}", self.order_by)?;
        writeln!(f, "  order dir: {}", self.order_dir)?;
        writeln!(f, "  max size:  {}", self.max_size)?;
        write!(f, "  unit:      {}", self.unit)
    }
}

/// Builder for [`RotateConfig`]
#[derive(Debug, Default)]
pub struct RotateConfigBuilder {
    path: Option<PathBuf>,
    files_regex: Option<FilesRegex>,
    order_by: Option<String>,
    order_dir: Option<String>,
    max_size: Option<f64>,
    unit: Option<String>,
}

impl RotateConfigBuilder {
    /// Set the directory to rotate. Relative paths are made absolute.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the file-name filter (defaults to `.*`, case-insensitive)
    pub fn files_regex(mut self, files_regex: FilesRegex) -> Self {
        self.files_regex = Some(files_regex);
        self
    }

    /// Set what to order the files by
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Set the order direction
    pub fn order_dir(mut self, order_dir: impl Into<String>) -> Self {
        self.order_dir = Some(order_dir.into());
        self
    }

    /// Set the budget value
    pub fn max_size(mut self, max_size: f64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Set the budget unit
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Build the configuration.
    ///
    /// Only checks that every mandatory field is present.
    pub fn build(self) -> Result<RotateConfig> {
        Ok(RotateConfig {
            path: normalize_path(required(self.path, "path")?),
            files_regex: self.files_regex.unwrap_or_default(),
            order_by: required(self.order_by, "order_by")?,
            order_dir: required(self.order_dir, "order_dir")?,
            max_size: required(self.max_size, "max_size")?,
            unit: required(self.unit, "unit")?,
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| RotateError::InvalidConfig(format!("{name} is required")))
}

/// A file-name pattern with single-letter flags, as in `/pattern/flags`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesRegex {
    regex: String,
    flags: Vec<char>,
}

impl Default for FilesRegex {
    fn default() -> Self {
        Self::new(".*", ['i'])
    }
}

impl FilesRegex {
    pub fn new(regex: impl Into<String>, flags: impl IntoIterator<Item = char>) -> Self {
        Self {
            regex: regex.into(),
            flags: flags.into_iter().collect(),
        }
    }

    /// Parse a regular expression literal such as `/^app.+?\.log$/i`.
    ///
    /// Everything between the first and the last `/` is the pattern and
    /// everything after the last `/` are flags. Flags are not checked here.
    pub fn from_literal(literal: &str) -> Result<Self> {
        let invalid =
            || RotateError::InvalidConfig(format!("Invalid regular expression given: {literal}"));

        let first = literal.find('/').ok_or_else(invalid)?;
        let last = literal.rfind('/').ok_or_else(invalid)?;
        if first == last {
            return Err(invalid());
        }

        Ok(Self::new(
            &literal[first + 1..last],
            literal[last + 1..].chars(),
        ))
    }

    pub fn regex(&self) -> &str {
        &self.regex
    }

    pub fn flags(&self) -> &[char] {
        &self.flags
    }

    /// Compile the pattern with its flags.
    ///
    /// Supported flags: `i` (case-insensitive), `m` (multi-line), `s` (dot
    /// matches newline), `x` (ignore whitespace), `u` (unicode) and `U`
    /// (swap greed).
    pub fn compile(&self) -> Result<Regex> {
        let mut builder = RegexBuilder::new(&self.regex);
        for flag in &self.flags {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'x' => {
                    builder.ignore_whitespace(true);
                }
                'u' => {
                    builder.unicode(true);
                }
                'U' => {
                    builder.swap_greed(true);
                }
                other => {
                    return Err(RotateError::InvalidConfig(format!(
                        "Unsupported regex flag '{other}' in /{}/{}",
                        self.regex,
                        self.flags.iter().collect::<String>()
                    )));
                }
            }
        }

        builder.build().map_err(|err| {
            RotateError::InvalidConfig(format!("Invalid files regex '{}': {err}", self.regex))
        })
    }
}

impl fmt::Display for FilesRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.regex)?;
        self.flags.iter().try_for_each(|flag| write!(f, "{flag}"))
    }
}

/// Sort key for the files of a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Name,
    Size,
    AccessTime,
    ModifiedTime,
    ChangedTime,
    BirthTime,
}

impl OrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderBy::Name => "name",
            OrderBy::Size => "size",
            OrderBy::AccessTime => "date_atime",
            OrderBy::ModifiedTime => "date_mtime",
            OrderBy::ChangedTime => "date_ctime",
            OrderBy::BirthTime => "date_birthtime",
        }
    }
}

impl FromStr for OrderBy {
    type Err = RotateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(OrderBy::Name),
            "size" => Ok(OrderBy::Size),
            "date_atime" => Ok(OrderBy::AccessTime),
            "date_mtime" => Ok(OrderBy::ModifiedTime),
            "date_ctime" => Ok(OrderBy::ChangedTime),
            "date_birthtime" => Ok(OrderBy::BirthTime),
            _ => Err(RotateError::InvalidConfig(format!(
                "The value for orderBy '{s}' is not recognized."
            ))),
        }
    }
}

/// Sort direction. Deletion always happens at the end of the ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDir {
    Asc,
    Desc,
}

impl FromStr for OrderDir {
    type Err = RotateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(OrderDir::Asc),
            "desc" => Ok(OrderDir::Desc),
            _ => Err(RotateError::InvalidConfig(format!(
                "The value for orderDir '{s}' is not recognized."
            ))),
        }
    }
}

/// Normalize a path to be absolute and clean, without requiring it to exist.
///
/// Relative paths are joined onto the current directory, `.` components are
/// dropped and `..` pops the previous component. Symlinks are not resolved.
pub(crate) fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    let absolute = if path.is_relative() {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    } else {
        path.to_path_buf()
    };

    let mut components = Vec::new();
    for component in absolute.components() {
        match component {
            Component::ParentDir => {
                if let Some(last) = components.last()
                    && !matches!(last, Component::ParentDir | Component::RootDir)
                {
                    components.pop();
                    continue;
                }
                if matches!(components.last(), Some(Component::RootDir)) {
                    continue;
                }
                components.push(component);
            }
            Component::CurDir => continue,
            _ => components.push(component),
        }
    }

    components.into_iter().collect()
}
