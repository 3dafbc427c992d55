//! CSV event sink.
//!
//! Creates `agent_events.csv` in the configured output directory.  Missing
//! positions are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::sink::EventSink;
use crate::{Event, EventError, EventResult};

pub const HEADER: [&str; 7] = ["tick", "timestamp", "agent", "metric", "value", "pos_x", "pos_y"];

/// Writes one CSV row per event.
pub struct CsvSink {
    writer:   Writer<File>,
    finished: bool,
}

impl CsvSink {
    /// Create `agent_events.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> EventResult<Self> {
        Self::from_path(&dir.join("agent_events.csv"))
    }

    /// Create (truncating) the CSV file at `path` and write the header row.
    pub fn from_path(path: &Path) -> EventResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(HEADER)?;
        Ok(Self { writer, finished: false })
    }
}

impl EventSink for CsvSink {
    fn record(&mut self, event: &Event) -> EventResult<()> {
        if self.finished {
            return Err(EventError::Closed);
        }
        let (x, y) = match event.position {
            Some(p) => (p.x.to_string(), p.y.to_string()),
            None    => (String::new(), String::new()),
        };
        self.writer.write_record(&[
            event.tick.0.to_string(),
            event.timestamp.to_string(),
            event.agent.clone(),
            event.metric.as_str().to_owned(),
            event.value.to_string(),
            x,
            y,
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> EventResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
