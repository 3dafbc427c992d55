//! Parquet event sink (feature `parquet`).
//!
//! Creates `agent_events.parquet` in the configured output directory.  Events
//! are buffered into column builders and written as one record batch every
//! [`BATCH_ROWS`] events; the remainder is written by `finish`.
//!
//! `finish()` **must** be called: it writes the file footer, and a file
//! without one cannot be opened by Parquet readers.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::sink::EventSink;
use crate::{Event, EventError, EventResult};

/// Buffered rows per record batch.
pub const BATCH_ROWS: usize = 4_096;

fn event_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",      DataType::UInt64,  false),
        Field::new("timestamp", DataType::Float64, false),
        Field::new("agent",     DataType::Utf8,    false),
        Field::new("metric",    DataType::Utf8,    false),
        Field::new("value",     DataType::Float64, false),
        Field::new("pos_x",     DataType::Float64, true),
        Field::new("pos_y",     DataType::Float64, true),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

#[derive(Default)]
struct Columns {
    ticks:      UInt64Builder,
    timestamps: Float64Builder,
    agents:     StringBuilder,
    metrics:    StringBuilder,
    values:     Float64Builder,
    pos_x:      Float64Builder,
    pos_y:      Float64Builder,
    rows:       usize,
}

impl Columns {
    fn push(&mut self, event: &Event) {
        self.ticks.append_value(event.tick.0);
        self.timestamps.append_value(event.timestamp);
        self.agents.append_value(&event.agent);
        self.metrics.append_value(event.metric.as_str());
        self.values.append_value(event.value);
        self.pos_x.append_option(event.position.map(|p| p.x));
        self.pos_y.append_option(event.position.map(|p| p.y));
        self.rows += 1;
    }

    /// Drain the builders into a batch.  Builders are reset by `finish()`.
    fn take_batch(&mut self, schema: &Arc<Schema>) -> EventResult<RecordBatch> {
        self.rows = 0;
        Ok(RecordBatch::try_new(
            Arc::clone(schema),
            vec![
                Arc::new(self.ticks.finish()),
                Arc::new(self.timestamps.finish()),
                Arc::new(self.agents.finish()),
                Arc::new(self.metrics.finish()),
                Arc::new(self.values.finish()),
                Arc::new(self.pos_x.finish()),
                Arc::new(self.pos_y.finish()),
            ],
        )?)
    }
}

/// Writes events to a single Parquet file.
pub struct ParquetSink {
    writer:  Option<ArrowWriter<File>>,
    schema:  Arc<Schema>,
    pending: Columns,
}

impl ParquetSink {
    /// Create `agent_events.parquet` in `dir`.
    pub fn new(dir: &Path) -> EventResult<Self> {
        let schema = event_schema();
        let file = File::create(dir.join("agent_events.parquet"))?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;
        Ok(Self {
            writer: Some(writer),
            schema,
            pending: Columns::default(),
        })
    }

    fn flush_pending(&mut self) -> EventResult<()> {
        if self.pending.rows == 0 {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Err(EventError::Closed);
        };
        let batch = self.pending.take_batch(&self.schema)?;
        writer.write(&batch)?;
        Ok(())
    }
}

impl EventSink for ParquetSink {
    fn record(&mut self, event: &Event) -> EventResult<()> {
        if self.writer.is_none() {
            return Err(EventError::Closed);
        }
        self.pending.push(event);
        if self.pending.rows >= BATCH_ROWS {
            self.flush_pending()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> EventResult<()> {
        if self.writer.is_none() {
            return Ok(());
        }
        self.flush_pending()?;
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}
