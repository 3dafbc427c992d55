//! Tests for wp-event sinks.

#[cfg(test)]
fn sample(tick: u64, agent: &str, metric: crate::Metric, value: f64, pos: Option<(f64, f64)>) -> crate::Event {
    crate::Event::new(
        wp_core::Stamp { tick: wp_core::Tick(tick), unix_secs: 100.0 + tick as f64 * 0.05 },
        agent,
        metric,
        value,
        pos.map(wp_core::Point2::from),
    )
}

// ── Event & in-process sinks ──────────────────────────────────────────────────

#[cfg(test)]
mod event_tests {
    use super::sample;
    use crate::{EventSink, MemorySink, Metric, TracingSink};

    #[test]
    fn metric_names() {
        assert_eq!(Metric::RouteEnter.as_str(), "route_enter");
        assert_eq!(Metric::DistanceTraveled.to_string(), "distance_traveled");
        assert_eq!(Metric::RouteExit.as_str(), "route_exit");
    }

    #[test]
    fn display_matches_log_line() {
        let e = sample(2, "Apollo", Metric::DistanceTraveled, 5.0, Some((10.0, 0.0)));
        assert_eq!(e.to_string(), "Apollo distance_traveled=5.00 at pos=(10.00, 0.00)");
        let none = sample(0, "Apollo", Metric::RouteEnter, 0.0, None);
        assert_eq!(none.to_string(), "Apollo route_enter=0.00 at pos=(none)");
    }

    #[test]
    fn memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.record(&sample(0, "a", Metric::RouteEnter, 0.0, Some((0.0, 0.0)))).unwrap();
        sink.record(&sample(1, "b", Metric::RouteEnter, 0.0, Some((1.0, 1.0)))).unwrap();
        sink.record(&sample(1, "a", Metric::DistanceTraveled, 1.0, Some((1.0, 0.0)))).unwrap();
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.metrics_for("a"), [Metric::RouteEnter, Metric::DistanceTraveled]);
        assert_eq!(sink.for_agent("b").count(), 1);
        assert_eq!(sink.into_events()[2].value, 1.0);
    }

    #[test]
    fn tee_records_to_both() {
        let mut sink = (MemorySink::new(), (TracingSink, MemorySink::new()));
        sink.record(&sample(3, "x", Metric::RouteExit, 0.5, None)).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.1.1.len(), 1);
    }

    #[test]
    fn boxed_and_borrowed_sinks_forward() {
        fn record_one<S: EventSink>(mut sink: S, tick: u64) {
            sink.record(&sample(tick, "x", Metric::DistanceTraveled, 1.0, None)).unwrap();
            sink.finish().unwrap();
        }

        let mut inner = MemorySink::new();
        record_one(&mut inner, 0);
        assert_eq!(inner.len(), 1);

        let boxed: Box<dyn EventSink> = Box::new(inner);
        record_one(boxed, 1);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::sample;
    use crate::{CsvSink, EventError, EventSink, Metric};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_file_created_with_header() {
        let dir = tmp();
        let mut sink = CsvSink::new(dir.path()).unwrap();
        sink.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_events.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "timestamp", "agent", "metric", "value", "pos_x", "pos_y"]);
        assert_eq!(rdr.records().count(), 0);
    }

    #[test]
    fn csv_rows_in_emission_order() {
        let dir = tmp();
        let mut sink = CsvSink::new(dir.path()).unwrap();
        sink.record(&sample(0, "Apollo", Metric::RouteEnter, 0.0, Some((0.0, 0.0)))).unwrap();
        sink.record(&sample(1, "Apollo", Metric::DistanceTraveled, 5.0, Some((5.0, 0.0)))).unwrap();
        sink.record(&sample(1, "Odyssey", Metric::RouteExit, 2.5, None)).unwrap();
        sink.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_events.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][2], "Apollo");
        assert_eq!(&rows[0][3], "route_enter");
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][4], "5");
        assert_eq!(&rows[1][5], "5");
        assert_eq!(&rows[1][6], "0");
        assert_eq!(&rows[2][3], "route_exit");
        assert_eq!(&rows[2][5], "");
        assert_eq!(&rows[2][6], "");
    }

    #[test]
    fn csv_finish_idempotent_and_closes() {
        let dir = tmp();
        let mut sink = CsvSink::new(dir.path()).unwrap();
        sink.finish().unwrap();
        sink.finish().unwrap();
        let err = sink.record(&sample(0, "a", Metric::RouteEnter, 0.0, None)).unwrap_err();
        assert!(matches!(err, EventError::Closed));
    }

    #[test]
    fn csv_missing_directory_is_an_error() {
        let dir = tmp();
        let result = CsvSink::new(&dir.path().join("does/not/exist"));
        assert!(result.is_err());
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::sample;
    use crate::{EventSink, Metric, SqliteSink};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _s = SqliteSink::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_events.db").exists());
    }

    #[test]
    fn sqlite_rows_visible_before_finish() {
        let dir = tmp();
        let mut sink = SqliteSink::new(dir.path()).unwrap();
        sink.record(&sample(0, "Apollo", Metric::RouteEnter, 0.0, Some((0.0, 0.0)))).unwrap();
        sink.record(&sample(1, "Apollo", Metric::DistanceTraveled, 5.0, Some((4.47, 2.24)))).unwrap();

        let count: i64 = sink
            .connection()
            .query_row("SELECT COUNT(*) FROM agent_events", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn sqlite_null_position() {
        let dir = tmp();
        let mut sink = SqliteSink::new(dir.path()).unwrap();
        sink.record(&sample(4, "Odyssey", Metric::RouteExit, 1.5, None)).unwrap();
        sink.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("agent_events.db")).unwrap();
        let (metric, x, y): (String, Option<f64>, Option<f64>) = conn
            .query_row("SELECT metric, pos_x, pos_y FROM agent_events WHERE tick = 4", [], |r| {
                Ok((r.get(0)?, r.get(1)?, r.get(2)?))
            })
            .unwrap();
        assert_eq!(metric, "route_exit");
        assert_eq!(x, None);
        assert_eq!(y, None);
    }

    #[test]
    fn sqlite_reopen_starts_empty() {
        let dir = tmp();
        {
            let mut sink = SqliteSink::new(dir.path()).unwrap();
            sink.record(&sample(0, "a", Metric::RouteEnter, 0.0, None)).unwrap();
            sink.finish().unwrap();
        }
        let sink = SqliteSink::new(dir.path()).unwrap();
        let count: i64 = sink
            .connection()
            .query_row("SELECT COUNT(*) FROM agent_events", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn sqlite_in_memory() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let mut sink = SqliteSink::open(conn).unwrap();
        sink.record(&sample(2, "b", Metric::DistanceTraveled, 3.0, Some((3.0, 0.0)))).unwrap();
        let value: f64 = sink
            .connection()
            .query_row("SELECT value FROM agent_events WHERE agent = 'b'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(value, 3.0);
    }
}

// ── Parquet ───────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::sample;
    use crate::parquet::BATCH_ROWS;
    use crate::{EventSink, Metric, ParquetSink};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_rows(dir: &TempDir) -> usize {
        let file = std::fs::File::open(dir.path().join("agent_events.parquet")).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        reader.map(|b| b.unwrap().num_rows()).sum()
    }

    #[test]
    fn parquet_schema() {
        let dir = tmp();
        let mut sink = ParquetSink::new(dir.path()).unwrap();
        sink.record(&sample(0, "a", Metric::RouteEnter, 0.0, None)).unwrap();
        sink.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("agent_events.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, ["tick", "timestamp", "agent", "metric", "value", "pos_x", "pos_y"]);
        let pos_x = schema.field_with_name("pos_x").unwrap();
        assert_eq!(*pos_x.data_type(), DataType::Float64);
        assert!(pos_x.is_nullable());
    }

    #[test]
    fn parquet_flushes_full_batches_and_tail() {
        let dir = tmp();
        let mut sink = ParquetSink::new(dir.path()).unwrap();
        let total = BATCH_ROWS + 7;
        for i in 0..total {
            sink.record(&sample(i as u64, "a", Metric::DistanceTraveled, 1.0, Some((i as f64, 0.0)))).unwrap();
        }
        sink.finish().unwrap();
        assert_eq!(read_rows(&dir), total);
    }

    #[test]
    fn parquet_closed_after_finish() {
        let dir = tmp();
        let mut sink = ParquetSink::new(dir.path()).unwrap();
        sink.finish().unwrap();
        sink.finish().unwrap();
        assert!(sink.record(&sample(0, "a", Metric::RouteEnter, 0.0, None)).is_err());
    }
}
