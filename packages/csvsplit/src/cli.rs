//! Command-line interface for csvsplit.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    parse_delimiter, validate_config, SplitConfig, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_RECORDS,
    DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_PREFIX,
};
use crate::error::Result;
use crate::splitting::{PartSummary, SplitObserver, Splitter};

/// Split large CSV files into smaller chunks while preserving headers.
#[derive(Parser, Debug)]
#[command(name = "csvsplit")]
#[command(version, about, long_about = None)]
#[command(after_help = "Examples:\n  \
    csvsplit --input data.csv --limit 5000\n  \
    csvsplit -i data.csv -o chunk -d ./output -l 1000 -v")]
pub struct Cli {
    /// Path to the input CSV file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Prefix for the output files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PREFIX)]
    pub out: String,

    /// Output directory for split files (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub dir: PathBuf,

    /// Maximum number of records per output file
    #[arg(short, long, default_value_t = DEFAULT_MAX_RECORDS)]
    pub limit: u64,

    /// Buffer size for file I/O in bytes
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    pub buffer: usize,

    /// Skip records whose fields are all empty (--skip-empty=false to keep them)
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub skip_empty: bool,

    /// CSV delimiter character (anything but a single character falls back to ',')
    #[arg(long, default_value = ",")]
    pub delimiter: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Turn parsed flags into a split configuration.
    #[must_use]
    pub fn into_config(self) -> SplitConfig {
        SplitConfig::new(self.input)
            .with_output_prefix(self.out)
            .with_output_dir(self.dir)
            .with_max_records(self.limit)
            .with_buffer_size(self.buffer)
            .with_skip_empty(self.skip_empty)
            .with_delimiter(parse_delimiter(&self.delimiter))
            .with_verbose(self.verbose)
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    split_command(cli.into_config())
}

/// Validate the configuration, split, and report.
fn split_command(config: SplitConfig) -> Result<()> {
    validate_config(&config)?;

    let verbose = config.verbose;
    if verbose {
        println!(
            "{} {}",
            style("Starting to split CSV file:").bold(),
            style(config.input_path.display()).cyan()
        );
        println!("Max records per file: {}", config.max_records);
    }

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} ({pos} records)")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut reporter = ProgressReporter {
        pb: pb.clone(),
        verbose,
    };
    let result = Splitter::new(config).split_with(&mut reporter);
    pb.finish_and_clear();
    let summary = result?;

    if verbose {
        println!("Processed {} total records", summary.records_read);
        println!(
            "{} Created {} files.",
            style("Splitting completed successfully.").green().bold(),
            summary.parts_created()
        );
    }

    Ok(())
}

/// Drives the spinner and prints per-part lines in verbose mode.
struct ProgressReporter {
    pb: ProgressBar,
    verbose: bool,
}

impl SplitObserver for ProgressReporter {
    fn part_created(&mut self, index: usize, path: &Path) {
        self.pb.set_message(format!("Writing part {index}"));
        if self.verbose {
            // suspend() still prints when the spinner is hidden (non-tty stderr)
            self.pb.suspend(|| {
                println!("Created output file: {}", style(path.display()).green());
            });
        }
    }

    fn part_finished(&mut self, part: &PartSummary) {
        tracing::debug!(index = part.index, records = part.records, "Part finished");
    }

    fn record_written(&mut self, _line: u64) {
        self.pb.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["csvsplit", "--input", "data.csv"]);

        assert_eq!(cli.input, PathBuf::from("data.csv"));
        assert_eq!(cli.out, "output");
        assert_eq!(cli.dir, PathBuf::from("."));
        assert_eq!(cli.limit, 10_000);
        assert_eq!(cli.buffer, 65_536);
        assert!(cli.skip_empty);
        assert_eq!(cli.delimiter, ",");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_short_flags() {
        let cli = Cli::parse_from([
            "csvsplit", "-i", "data.csv", "-o", "chunk", "-d", "parts", "-l", "1000", "-v",
        ]);

        assert_eq!(cli.out, "chunk");
        assert_eq!(cli.dir, PathBuf::from("parts"));
        assert_eq!(cli.limit, 1000);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_skip_empty_forms() {
        let cli = Cli::parse_from(["csvsplit", "-i", "a.csv", "--skip-empty=false"]);
        assert!(!cli.skip_empty);

        let cli = Cli::parse_from(["csvsplit", "-i", "a.csv", "--skip-empty"]);
        assert!(cli.skip_empty);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["csvsplit"]).is_err());
    }

    #[test]
    fn test_into_config_parses_delimiter() {
        let cli = Cli::parse_from(["csvsplit", "-i", "a.csv", "--delimiter", ";"]);
        assert_eq!(cli.into_config().delimiter, b';');

        let cli = Cli::parse_from(["csvsplit", "-i", "a.csv", "--delimiter", "||"]);
        assert_eq!(cli.into_config().delimiter, b',');
    }

    #[test]
    fn test_into_config_carries_all_flags() {
        let cli = Cli::parse_from([
            "csvsplit",
            "-i",
            "a.csv",
            "--buffer",
            "1024",
            "--skip-empty=false",
            "-v",
        ]);
        let config = cli.into_config();

        assert_eq!(config.input_path, PathBuf::from("a.csv"));
        assert_eq!(config.buffer_size, 1024);
        assert!(!config.skip_empty);
        assert!(config.verbose);
    }
}
