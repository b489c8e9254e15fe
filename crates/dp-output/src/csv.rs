//! CSV output backend.
//!
//! Creates one file with the header `elapsed_ms,philosopher,event`.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use dp_core::Event;
use dp_table::EventSink;

use crate::{OutputError, OutputResult};

/// Writes the event stream to a CSV file.
pub struct CsvWriter {
    events:     Writer<File>,
    finished:   bool,
    last_error: Option<OutputError>,
}

impl CsvWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(path)?;
        events.write_record(["elapsed_ms", "philosopher", "event"])?;
        Ok(Self { events, finished: false, last_error: None })
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write(&mut self, event: &Event) -> OutputResult<()> {
        self.events.write_record(&[
            event.at.0.to_string(),
            event.philosopher.0.to_string(),
            event.action.as_str().to_owned(),
        ])?;
        Ok(())
    }
}

impl EventSink for CsvWriter {
    fn record(&mut self, event: &Event) {
        let result = self.write(event);
        self.store_err(result);
    }

    /// Idempotent — safe to call more than once.
    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        let result = self.events.flush().map_err(OutputError::from);
        self.store_err(result);
    }
}
