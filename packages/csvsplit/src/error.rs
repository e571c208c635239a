//! Error types for the splitter.
//!
//! Every failure is fatal to a run. Variants carry the path or record line
//! the engine was working on, plus the underlying I/O or CSV cause.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitError {
    /// No input path was given.
    #[error("Input file path is required")]
    MissingInput,

    /// The input path does not exist.
    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Record limit was zero.
    #[error("Limit must be greater than 0")]
    InvalidLimit,

    /// Buffer size was zero.
    #[error("Buffer size must be greater than 0")]
    InvalidBufferSize,

    /// The output directory could not be created.
    #[error("Failed to create output directory '{}': {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file could not be opened.
    #[error("Failed to open input CSV file '{}': {source}", .path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input yielded no records at all.
    #[error("Input file is empty: {}", .path.display())]
    EmptyInput { path: PathBuf },

    /// The header record could not be parsed.
    #[error("Failed to read header: {source}")]
    HeaderRead {
        #[source]
        source: csv::Error,
    },

    /// A data record could not be parsed.
    #[error("Error reading record at line {line}: {source}")]
    RecordRead {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// A part file could not be created.
    #[error("Failed to create output file '{}': {source}", .path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header could not be written into a new part.
    #[error("Failed to write header to file '{}': {source}", .path.display())]
    HeaderWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data record could not be written.
    #[error("Error writing record at line {line}: {source}")]
    RecordWrite {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// Buffered part contents could not be flushed to disk.
    #[error("Failed to flush output file '{}': {source}", .path.display())]
    OutputFlush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitError>;
