//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one frame:
//! every active agent advances exactly once per tick, and agent speeds are
//! expressed in distance units per tick.  The mapping to wall-clock time is
//! held in `SimClock`:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_ms / 1000
//!
//! The wall-clock mapping only stamps events; it never feeds back into the
//! kinematics, so changing `tick_duration_ms` cannot change any trajectory.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.  Tick 0 is setup (path assignment);
/// the first movement happens on tick 1.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Stamp ─────────────────────────────────────────────────────────────────────

/// The moment an event is emitted: logical tick plus its wall-clock image.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stamp {
    pub tick:      Tick,
    pub unix_secs: f64,
}

impl Stamp {
    /// A stamp at `tick` with the Unix epoch as tick 0.  Handy in tests.
    pub fn at(tick: u64) -> Self {
        Self { tick: Tick(tick), unix_secs: 0.0 }
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock seconds.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// Wall-clock milliseconds represented by one tick.
    pub tick_duration_ms: u32,
    /// The current tick, advanced by `SimClock::advance()` each frame.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_unix_secs: i64, tick_duration_ms: u32) -> Self {
        Self {
            start_unix_secs,
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick and return the new current tick.
    #[inline]
    pub fn advance(&mut self) -> Tick {
        self.current_tick = self.current_tick + 1;
        self.current_tick
    }

    /// Unix timestamp (fractional seconds) of `tick`.
    #[inline]
    pub fn unix_secs_at(&self, tick: Tick) -> f64 {
        self.start_unix_secs as f64 + tick.0 as f64 * self.tick_duration_ms as f64 / 1000.0
    }

    /// Stamp for the current tick.
    #[inline]
    pub fn stamp(&self) -> Stamp {
        Stamp {
            tick:      self.current_tick,
            unix_secs: self.unix_secs_at(self.current_tick),
        }
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{:.3} s)", self.current_tick, self.unix_secs_at(self.current_tick) - self.start_unix_secs as f64)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically embedded in a scenario TOML file under `[sim]`; every field is
/// optional there and falls back to [`SimConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Unix timestamp stamped on tick 0 events.
    pub start_unix_secs: i64,

    /// Wall-clock milliseconds per tick.  Default: 50 (20 frames per second).
    pub tick_duration_ms: u32,

    /// Safety bound: the driver stops after this many frames even if some
    /// agent is still en route.  Default: 1000.
    pub max_ticks: u64,
}

impl SimConfig {
    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_duration_ms)
    }

    /// The tick after which no further frames are run (inclusive bound).
    #[inline]
    pub fn last_tick(&self) -> Tick {
        Tick(self.max_ticks)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:  0,
            tick_duration_ms: 50,
            max_ticks:        1_000,
        }
    }
}
