//! Split engine: streams the input once and rotates output parts.

use std::fs::File;

use csv::{ByteRecord, Reader, ReaderBuilder};

use super::observer::{NoopObserver, SplitObserver};
use super::part::PartWriter;
use super::record::is_empty_record;
use super::trim::LeadingSpaceTrimmer;
use super::types::SplitSummary;
use crate::config::SplitConfig;
use crate::error::{Result, SplitError};

/// CSV reader over the trimmed input file.
type InputReader = Reader<LeadingSpaceTrimmer<File>>;

/// Splits one CSV file into header-prefixed parts of bounded record count.
///
/// Construction does no I/O. [`Splitter::split`] consumes the engine, so a
/// fresh instance is needed for every run.
#[derive(Debug, Clone)]
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    /// Create an engine for an already validated configuration.
    ///
    /// See [`crate::config::validate_config`].
    #[must_use]
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine runs with.
    #[must_use]
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Run the split without progress reporting.
    pub fn split(self) -> Result<SplitSummary> {
        self.split_with(&mut NoopObserver)
    }

    /// Run the split, reporting progress to `observer`.
    ///
    /// The first error stops the run. Parts already written stay on disk.
    pub fn split_with(self, observer: &mut dyn SplitObserver) -> Result<SplitSummary> {
        let mut reader = self.open_reader()?;
        let header = self.read_header(&mut reader)?;

        tracing::debug!(
            input = %self.config.input_path.display(),
            max_records = self.config.max_records,
            fields = header.len(),
            "Starting split"
        );

        let mut session = SplitSession::new(&self.config, header);
        let outcome = session.run(&mut reader, observer);

        match outcome {
            Ok(()) => {
                session.close_current_part(observer)?;
                tracing::debug!(
                    parts = session.summary.parts_created(),
                    records_read = session.summary.records_read,
                    records_written = session.summary.records_written,
                    "Split complete"
                );
                Ok(session.summary)
            }
            Err(err) => {
                // The run error wins over any failure while closing
                if let Err(close_err) = session.close_current_part(observer) {
                    tracing::warn!(error = %close_err, "Failed to close part after error");
                }
                Err(err)
            }
        }
    }

    fn open_reader(&self) -> Result<InputReader> {
        let path = &self.config.input_path;
        let file = File::open(path).map_err(|source| SplitError::InputOpen {
            path: path.clone(),
            source,
        })?;

        let trimmed =
            LeadingSpaceTrimmer::new(file, self.config.delimiter, self.config.buffer_size);
        Ok(ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.config.delimiter)
            .flexible(false)
            .buffer_capacity(self.config.buffer_size)
            .from_reader(trimmed))
    }

    fn read_header(&self, reader: &mut InputReader) -> Result<ByteRecord> {
        let mut header = ByteRecord::new();
        match reader.read_byte_record(&mut header) {
            Ok(true) => Ok(header),
            Ok(false) => Err(SplitError::EmptyInput {
                path: self.config.input_path.clone(),
            }),
            Err(source) => Err(SplitError::HeaderRead { source }),
        }
    }
}

/// Mutable state of one run: the open part and the running counters.
struct SplitSession<'a> {
    config: &'a SplitConfig,
    header: ByteRecord,
    current: Option<PartWriter>,
    next_index: usize,
    summary: SplitSummary,
}

impl<'a> SplitSession<'a> {
    fn new(config: &'a SplitConfig, header: ByteRecord) -> Self {
        Self {
            config,
            header,
            current: None,
            next_index: 1,
            summary: SplitSummary::default(),
        }
    }

    fn run(&mut self, reader: &mut InputReader, observer: &mut dyn SplitObserver) -> Result<()> {
        // The first part exists even when no data record follows the header
        self.open_next_part(observer)?;

        let mut record = ByteRecord::new();
        loop {
            // Header is line 1, so the next data record sits at read + 2
            let line = self.summary.records_read + 2;
            match reader.read_byte_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(source) => return Err(SplitError::RecordRead { line, source }),
            }
            self.summary.records_read += 1;

            if self.config.skip_empty && is_empty_record(&record) {
                tracing::trace!(line, "Skipping empty record");
                self.summary.records_skipped += 1;
                observer.record_skipped(line);
                continue;
            }

            self.write_record(&record, line, observer)?;
        }

        Ok(())
    }

    fn write_record(
        &mut self,
        record: &ByteRecord,
        line: u64,
        observer: &mut dyn SplitObserver,
    ) -> Result<()> {
        let max_records = self.config.max_records;
        let part = match self.current.as_mut() {
            Some(part) if part.records() < max_records => part,
            _ => self.open_next_part(observer)?,
        };
        part.write_record(record)
            .map_err(|source| SplitError::RecordWrite { line, source })?;

        self.summary.records_written += 1;
        observer.record_written(line);
        Ok(())
    }

    /// Close the open part (if any) and open the next one with the header.
    fn open_next_part(&mut self, observer: &mut dyn SplitObserver) -> Result<&mut PartWriter> {
        self.close_current_part(observer)?;

        let index = self.next_index;
        let part = PartWriter::create(self.config, index, &self.header)?;
        self.next_index += 1;

        tracing::debug!(index, path = %part.path().display(), "Created part");
        observer.part_created(index, part.path());

        Ok(self.current.insert(part))
    }

    /// Flush and close the open part. Does nothing when no part is open.
    fn close_current_part(&mut self, observer: &mut dyn SplitObserver) -> Result<()> {
        let Some(part) = self.current.take() else {
            return Ok(());
        };

        let index = part.index();
        let finished = part.finish()?;
        tracing::debug!(index, records = finished.records, "Closed part");
        observer.part_finished(&finished);
        self.summary.parts.push(finished);
        Ok(())
    }
}
