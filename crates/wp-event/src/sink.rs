//! The `EventSink` trait and the in-process sinks.

use tracing::info;

use crate::{Event, EventResult, Metric};

/// Append-only consumer of [`Event`]s.
///
/// `record` must not return until the event is accepted: written, or handed
/// to a buffer that `finish` is guaranteed to flush.
pub trait EventSink {
    fn record(&mut self, event: &Event) -> EventResult<()>;

    /// Flush and close underlying handles.  Idempotent.
    fn finish(&mut self) -> EventResult<()> {
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&mut self, event: &Event) -> EventResult<()> {
        (**self).record(event)
    }

    fn finish(&mut self) -> EventResult<()> {
        (**self).finish()
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: &Event) -> EventResult<()> {
        (**self).record(event)
    }

    fn finish(&mut self) -> EventResult<()> {
        (**self).finish()
    }
}

/// Tee: records to `A` then `B`.  Stops at the first failure.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn record(&mut self, event: &Event) -> EventResult<()> {
        self.0.record(event)?;
        self.1.record(event)
    }

    fn finish(&mut self) -> EventResult<()> {
        self.0.finish()?;
        self.1.finish()
    }
}

// ── MemorySink ────────────────────────────────────────────────────────────────

/// Keeps every event in a `Vec`, in emission order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Vec<Event>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events emitted by `agent`, in order.
    pub fn for_agent<'a>(&'a self, agent: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.agent == agent)
    }

    /// The metric sequence of `agent`.
    pub fn metrics_for(&self, agent: &str) -> Vec<Metric> {
        self.for_agent(agent).map(|e| e.metric).collect()
    }
}

impl EventSink for MemorySink {
    fn record(&mut self, event: &Event) -> EventResult<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

// ── TracingSink ───────────────────────────────────────────────────────────────

/// Logs each event as one `info` line under the `wp_event` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: &Event) -> EventResult<()> {
        info!(target: "wp_event", tick = event.tick.0, "{event}");
        Ok(())
    }
}
