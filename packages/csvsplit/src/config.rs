//! Configuration defaults, the split configuration value and its validation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};

/// Default prefix for output file names.
pub const DEFAULT_OUTPUT_PREFIX: &str = "output";

/// Default output directory (the current directory).
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Default maximum number of data records per part.
pub const DEFAULT_MAX_RECORDS: u64 = 10_000;

/// Default I/O buffer size in bytes (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// File extension of every output part.
pub const OUTPUT_EXTENSION: &str = "csv";

/// Settings for one split run.
///
/// Built once before the engine runs and never mutated by it. Use
/// [`validate_config`] before handing it to [`crate::Splitter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// Source CSV file.
    pub input_path: PathBuf,
    /// File name prefix for parts (`{prefix}_{n}.csv`).
    pub output_prefix: String,
    /// Directory the parts are written to.
    pub output_dir: PathBuf,
    /// Maximum data records per part, excluding the header.
    pub max_records: u64,
    /// Buffer capacity for the reader and each part writer.
    pub buffer_size: usize,
    /// Drop records whose fields are all empty.
    pub skip_empty: bool,
    /// Field delimiter used for reading and writing.
    pub delimiter: u8,
    /// Report progress while splitting.
    pub verbose: bool,
}

impl SplitConfig {
    /// Create a configuration for `input_path` with all other settings at their defaults.
    #[must_use]
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_records: DEFAULT_MAX_RECORDS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            skip_empty: true,
            delimiter: DEFAULT_DELIMITER,
            verbose: false,
        }
    }

    /// Set the output file prefix.
    #[must_use]
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the maximum number of data records per part.
    #[must_use]
    pub fn with_max_records(mut self, max_records: u64) -> Self {
        self.max_records = max_records;
        self
    }

    /// Set the I/O buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Set whether all-empty records are dropped.
    #[must_use]
    pub fn with_skip_empty(mut self, skip_empty: bool) -> Self {
        self.skip_empty = skip_empty;
        self
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set verbose progress reporting.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Path of the part with the given 1-based index.
    ///
    /// # Examples
    /// ```
    /// use csvsplit::config::SplitConfig;
    /// use std::path::Path;
    ///
    /// let config = SplitConfig::new("data.csv")
    ///     .with_output_prefix("chunk")
    ///     .with_output_dir("out");
    /// assert_eq!(config.part_path(3), Path::new("out/chunk_3.csv"));
    /// ```
    #[must_use]
    pub fn part_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{index}.{OUTPUT_EXTENSION}",
            self.output_prefix
        ))
    }
}

/// Parse a delimiter argument.
///
/// Exactly one byte is accepted. Anything else (empty, several characters,
/// a multi-byte character) falls back to [`DEFAULT_DELIMITER`].
///
/// # Examples
/// ```
/// use csvsplit::config::parse_delimiter;
///
/// assert_eq!(parse_delimiter(";"), b';');
/// assert_eq!(parse_delimiter("\t"), b'\t');
/// assert_eq!(parse_delimiter("::"), b',');
/// ```
#[must_use]
pub fn parse_delimiter(value: &str) -> u8 {
    match value.as_bytes() {
        [byte] => *byte,
        _ => {
            tracing::debug!(
                delimiter = %value,
                "Delimiter is not a single byte, using ','"
            );
            DEFAULT_DELIMITER
        }
    }
}

/// Validate a configuration and prepare the output directory.
///
/// Rejects an empty or missing input path, a zero record limit and a zero
/// buffer size, then creates the output directory (recursively) if needed.
/// The engine relies on these checks and does not repeat them.
pub fn validate_config(config: &SplitConfig) -> Result<()> {
    if config.input_path.as_os_str().is_empty() {
        return Err(SplitError::MissingInput);
    }

    if config.max_records == 0 {
        return Err(SplitError::InvalidLimit);
    }

    if config.buffer_size == 0 {
        return Err(SplitError::InvalidBufferSize);
    }

    if !config.input_path.exists() {
        return Err(SplitError::InputNotFound(config.input_path.clone()));
    }

    ensure_output_dir(&config.output_dir)
}

fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| SplitError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}
