//! Record sinks.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::SinkError;
use crate::record::StackerRecord;

/// Destination for harvested records.
pub trait RecordSink {
    fn write_record(&mut self, record: &StackerRecord) -> Result<(), SinkError>;

    fn flush(&mut self) -> Result<(), SinkError>;

    /// Write all records and flush. Returns the number written.
    fn write_all(&mut self, records: &[StackerRecord]) -> Result<usize, SinkError> {
        for record in records {
            self.write_record(record)?;
        }
        self.flush()?;
        Ok(records.len())
    }
}

/// CSV writer; the header row is emitted with the first record.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Io(e.into_error()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &StackerRecord) -> Result<(), SinkError> {
        self.writer.serialize(record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
