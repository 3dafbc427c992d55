//! SQLite event sink (feature `sqlite`).
//!
//! Creates `agent_events.db` in the configured output directory.  The
//! `agent_events` table is dropped and recreated on open, so each run starts
//! from an empty table.  Every insert autocommits before `record` returns.

use std::path::Path;

use rusqlite::Connection;

use crate::sink::EventSink;
use crate::{Event, EventError, EventResult};

/// Writes one table row per event.
pub struct SqliteSink {
    conn:     Connection,
    finished: bool,
}

impl SqliteSink {
    /// Open (or create) `agent_events.db` in `dir` and reset the schema.
    pub fn new(dir: &Path) -> EventResult<Self> {
        Self::open(Connection::open(dir.join("agent_events.db"))?)
    }

    /// Use an already-open connection, e.g. `Connection::open_in_memory()`.
    pub fn open(conn: Connection) -> EventResult<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS agent_events;
             CREATE TABLE agent_events (
                 id        INTEGER PRIMARY KEY,
                 tick      INTEGER NOT NULL,
                 timestamp REAL    NOT NULL,
                 agent     TEXT    NOT NULL,
                 metric    TEXT    NOT NULL,
                 value     REAL    NOT NULL,
                 pos_x     REAL,
                 pos_y     REAL
             );",
        )?;
        Ok(Self { conn, finished: false })
    }

    /// Borrow the connection, e.g. to query what has been recorded so far.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl EventSink for SqliteSink {
    fn record(&mut self, event: &Event) -> EventResult<()> {
        if self.finished {
            return Err(EventError::Closed);
        }
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO agent_events (tick, timestamp, agent, metric, value, pos_x, pos_y) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        stmt.execute(rusqlite::params![
            event.tick.0 as i64,
            event.timestamp,
            event.agent,
            event.metric.as_str(),
            event.value,
            event.position.map(|p| p.x),
            event.position.map(|p| p.y),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> EventResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
