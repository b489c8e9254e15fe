//! Event sink trait — where the board sends every accepted event.

use dp_core::Event;

/// Receives events in log order.
///
/// The board calls `record` while holding its lock, so implementations see
/// a single totally ordered stream and never need their own
/// synchronisation.  Methods have no return value; writers that can fail
/// keep the first error and expose it after the run (see `dp-output`).
pub trait EventSink: Send {
    fn record(&mut self, event: &Event);

    /// Flush buffered output.  Called once after all threads have joined.
    fn finish(&mut self) {}
}

/// An [`EventSink`] that discards everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: &Event) {}
}

/// An [`EventSink`] that keeps every event in memory.
#[derive(Default, Debug)]
pub struct VecSink {
    pub events: Vec<Event>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl EventSink for VecSink {
    fn record(&mut self, event: &Event) {
        self.events.push(*event);
    }
}

/// Disabled sinks are `None`.
impl<S: EventSink> EventSink for Option<S> {
    fn record(&mut self, event: &Event) {
        if let Some(sink) = self {
            sink.record(event);
        }
    }

    fn finish(&mut self) {
        if let Some(sink) = self {
            sink.finish();
        }
    }
}

/// Fan out to two sinks, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn record(&mut self, event: &Event) {
        self.0.record(event);
        self.1.record(event);
    }

    fn finish(&mut self) {
        self.0.finish();
        self.1.finish();
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&mut self, event: &Event) {
        (**self).record(event);
    }

    fn finish(&mut self) {
        (**self).finish();
    }
}
