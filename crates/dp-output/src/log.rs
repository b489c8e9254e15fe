//! Plain-text event log, one `<elapsed_ms> <philosopher> <action>` per line.

use std::io::{self, BufRead, Stdout, Write};

use dp_core::Event;
use dp_table::EventSink;

use crate::{OutputError, OutputResult};

/// Writes each event as one line to any [`Write`].
///
/// Lines are written as they arrive; nothing is batched, so a log on a
/// terminal keeps up with the simulation.
pub struct LogWriter<W: Write> {
    out:        W,
    lines:      u64,
    last_error: Option<OutputError>,
}

impl LogWriter<Stdout> {
    /// Log to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LogWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0, last_error: None }
    }

    /// Number of lines successfully written.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn store_err(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e.into());
            }
        }
    }
}

impl<W: Write + Send> EventSink for LogWriter<W> {
    fn record(&mut self, event: &Event) {
        let result = writeln!(self.out, "{event}");
        if result.is_ok() {
            self.lines += 1;
        }
        self.store_err(result);
    }

    fn finish(&mut self) {
        let result = self.out.flush();
        self.store_err(result);
    }
}

/// Parse an event log produced by [`LogWriter`].  Blank lines are skipped.
pub fn read_log<R: BufRead>(reader: R) -> OutputResult<Vec<Event>> {
    let mut events = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = line
            .parse::<Event>()
            .map_err(|source| OutputError::Parse { line: i + 1, source })?;
        events.push(event);
    }
    Ok(events)
}
