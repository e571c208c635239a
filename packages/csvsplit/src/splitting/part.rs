//! Writer for a single output part.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, QuoteStyle, Terminator, WriterBuilder};

use super::types::PartSummary;
use crate::config::SplitConfig;
use crate::error::{Result, SplitError};

/// An open part file with its header already written.
pub(crate) struct PartWriter {
    index: usize,
    path: PathBuf,
    writer: csv::Writer<File>,
    records: u64,
}

impl PartWriter {
    /// Create part `index` and write the header into it.
    pub(crate) fn create(config: &SplitConfig, index: usize, header: &ByteRecord) -> Result<Self> {
        let path = config.part_path(index);
        let file = File::create(&path).map_err(|source| SplitError::OutputCreate {
            path: path.clone(),
            source,
        })?;

        let mut writer = WriterBuilder::new()
            .delimiter(config.delimiter)
            .terminator(Terminator::Any(b'\n'))
            .quote_style(QuoteStyle::Necessary)
            .buffer_capacity(config.buffer_size)
            .from_writer(file);

        writer
            .write_byte_record(header)
            .map_err(|source| SplitError::HeaderWrite {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            index,
            path,
            writer,
            records: 0,
        })
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Data records written so far.
    pub(crate) fn records(&self) -> u64 {
        self.records
    }

    pub(crate) fn write_record(&mut self, record: &ByteRecord) -> csv::Result<()> {
        self.writer.write_byte_record(record)?;
        self.records += 1;
        Ok(())
    }

    /// Flush buffered output and close the file.
    pub(crate) fn finish(mut self) -> Result<PartSummary> {
        self.writer
            .flush()
            .map_err(|source| SplitError::OutputFlush {
                path: self.path.clone(),
                source,
            })?;

        Ok(PartSummary {
            index: self.index,
            path: self.path,
            records: self.records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_part_writes_header_then_records() {
        let dir = TempDir::new().unwrap();
        let config = SplitConfig::new("in.csv").with_output_dir(dir.path());
        let header = ByteRecord::from(vec!["id", "note"]);

        let mut part = PartWriter::create(&config, 1, &header).unwrap();
        part.write_record(&ByteRecord::from(vec!["1", "a, b"]))
            .unwrap();
        assert_eq!(part.records(), 1);

        let summary = part.finish().unwrap();
        assert_eq!(summary.index, 1);
        assert_eq!(summary.records, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("output_1.csv")).unwrap(),
            "id,note\n1,\"a, b\"\n"
        );
    }

    #[test]
    fn test_part_uses_configured_delimiter() {
        let dir = TempDir::new().unwrap();
        let config = SplitConfig::new("in.csv")
            .with_output_dir(dir.path())
            .with_output_prefix("semi")
            .with_delimiter(b';');
        let header = ByteRecord::from(vec!["a", "b"]);

        let mut part = PartWriter::create(&config, 2, &header).unwrap();
        part.write_record(&ByteRecord::from(vec!["x,y", "z"]))
            .unwrap();
        part.finish().unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("semi_2.csv")).unwrap(),
            "a;b\nx,y;z\n"
        );
    }

    #[test]
    fn test_part_create_fails_in_missing_dir() {
        let dir = TempDir::new().unwrap();
        let config = SplitConfig::new("in.csv").with_output_dir(dir.path().join("absent"));
        let header = ByteRecord::from(vec!["a"]);

        let result = PartWriter::create(&config, 1, &header);
        assert!(matches!(result, Err(SplitError::OutputCreate { .. })));
    }
}
