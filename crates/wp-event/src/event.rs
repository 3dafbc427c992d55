//! The event record emitted by agents.

use std::fmt;

use wp_core::{Point2, Stamp, Tick};

/// Which lifecycle transition or telemetry reading an event carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Metric {
    /// The agent started a leg.  Value is always 0.
    RouteEnter,
    /// One tick of movement.  Value is the step length.
    DistanceTraveled,
    /// The agent reached the end of a leg.  Value is the distance that
    /// remained at the start of the arriving tick.
    RouteExit,
}

impl Metric {
    /// Stable name used in every persisted format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Metric::RouteEnter       => "route_enter",
            Metric::DistanceTraveled => "distance_traveled",
            Metric::RouteExit        => "route_exit",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable event record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub tick:      Tick,
    /// Unix seconds of `tick` under the run's clock.
    pub timestamp: f64,
    pub agent:     String,
    pub metric:    Metric,
    pub value:     f64,
    pub position:  Option<Point2>,
}

impl Event {
    pub fn new(stamp: Stamp, agent: &str, metric: Metric, value: f64, position: Option<Point2>) -> Self {
        Self {
            tick:      stamp.tick,
            timestamp: stamp.unix_secs,
            agent:     agent.to_owned(),
            metric,
            value,
            position,
        }
    }
}

impl fmt::Display for Event {
    /// `"{agent} {metric}={value:.2} at pos={position}"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}={:.2} at pos=", self.agent, self.metric, self.value)?;
        match self.position {
            Some(p) => write!(f, "{p}"),
            None    => f.write_str("(none)"),
        }
    }
}
