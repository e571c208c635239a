//! csvsplit - Split large CSV files into smaller parts.
//!
//! Every part starts with a copy of the input's header row and holds at most
//! a configured number of data records. The input is streamed once; records
//! are never buffered beyond the one being written.
//!
//! # Example
//!
//! ```no_run
//! use csvsplit::{validate_config, SplitConfig, Splitter};
//!
//! let config = SplitConfig::new("export.csv")
//!     .with_output_dir("parts")
//!     .with_max_records(5_000);
//! validate_config(&config)?;
//!
//! let summary = Splitter::new(config).split()?;
//! println!("{} parts", summary.parts_created());
//! # Ok::<(), csvsplit::SplitError>(())
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Defaults, the split configuration and its validation
//! - [`error`]: Error types and Result alias
//! - [`splitting`]: The streaming split engine
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod splitting;

// Re-export commonly used items
pub use config::{parse_delimiter, validate_config, SplitConfig};
pub use error::{Result, SplitError};
pub use splitting::{NoopObserver, PartSummary, SplitObserver, SplitSummary, Splitter};
