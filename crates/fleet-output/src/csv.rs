//! CSV trajectory backend.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use csv::Writer;
use fleet_sim::{PositionEvent, PositionSink};
use tracing::{debug, warn};

use crate::{OutputError, OutputResult, TrajectoryRow};

/// Writes every emitted position as a CSV row.
///
/// Errors are stored internally because [`PositionSink`] methods have no
/// return value.  Check [`take_error`][Self::take_error] after the run, and
/// call [`finish`][Self::finish] to flush.
pub struct CsvPositionSink<W: Write = File> {
    writer:     Writer<W>,
    seq:        u64,
    finished:   bool,
    last_error: Option<OutputError>,
}

impl CsvPositionSink<File> {
    /// Create (or truncate) the file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let sink = Self::from_writer(File::create(path)?)?;
        debug!(path = %path.display(), "trajectory file created");
        Ok(sink)
    }
}

impl<W: Write> CsvPositionSink<W> {
    /// Wrap any `Write` and write the header row.
    pub fn from_writer(inner: W) -> OutputResult<Self> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(TrajectoryRow::HEADER)?;
        Ok(Self {
            writer,
            seq:        0,
            finished:   false,
            last_error: None,
        })
    }

    /// Rows written so far.
    #[inline]
    pub fn rows_written(&self) -> u64 {
        self.seq
    }

    pub fn write_row(&mut self, row: &TrajectoryRow) -> OutputResult<()> {
        self.writer.write_record(&[
            row.seq.to_string(),
            row.vehicle_id.to_string(),
            row.lat.to_string(),
            row.lng.to_string(),
            row.progress.to_string(),
        ])?;
        Ok(())
    }

    /// Flush buffered rows.
    ///
    /// Idempotent — safe to call more than once.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        debug!(rows = self.seq, "trajectory flushed");
        Ok(())
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush and unwrap the underlying writer.
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(io::Error::new(e.error().kind(), e.to_string())))
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "trajectory write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: Write> PositionSink for CsvPositionSink<W> {
    fn on_position(&mut self, event: &PositionEvent) {
        let row = TrajectoryRow::from_event(self.seq, event);
        let result = self.write_row(&row);
        if result.is_ok() {
            self.seq += 1;
        }
        self.store_err(result);
    }
}
