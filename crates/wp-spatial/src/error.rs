//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `wp-spatial`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpatialError {
    /// The search exhausted every reachable waypoint without meeting the goal.
    #[error("no route from {from} to {to}")]
    NoRoute { from: String, to: String },

    #[error("waypoint {0:?} not found in topology")]
    WaypointNotFound(String),

    #[error("waypoint {0:?} defined more than once")]
    DuplicateWaypoint(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
