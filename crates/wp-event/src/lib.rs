//! `wp-event` — agent lifecycle events and the sinks that record them.
//!
//! Agents never hold a sink.  The driver owns one and lends it (`&mut`) to
//! each agent call that may emit, so recording is synchronous: an event has
//! been accepted by the sink, or an error returned, before the emitting call
//! returns.
//!
//! Backends:
//!
//! | Feature   | Sink           | Files created          |
//! |-----------|----------------|------------------------|
//! | *(none)*  | `MemorySink`   | —                      |
//! | *(none)*  | `TracingSink`  | — (one `info` line per event) |
//! | *(none)*  | `CsvSink`      | `agent_events.csv`     |
//! | `sqlite`  | `SqliteSink`   | `agent_events.db`      |
//! | `parquet` | `ParquetSink`  | `agent_events.parquet` |
//!
//! A pair `(A, B)` of sinks is itself a sink that records to both.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wp_event::{CsvSink, EventSink, TracingSink};
//!
//! let sink = (CsvSink::new(Path::new("./output"))?, TracingSink);
//! let mut sim = SimBuilder::new(config, topology, DijkstraRouter, sink)
//!     .agents(specs)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! sim.into_sink().finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod event;
pub mod sink;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvSink;
pub use error::{EventError, EventResult};
pub use event::{Event, Metric};
pub use sink::{EventSink, MemorySink, TracingSink};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSink;

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetSink;
