//! `wp-core` — foundational types for the waypoint routing engine.
//!
//! This crate is a dependency of every other `wp-*` crate.  It has no `wp-*`
//! dependencies and no required external ones (only optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                          |
//! |----------|---------------------------------------------------|
//! | [`ids`]  | `AgentId`, `WaypointId`, `EdgeId`                 |
//! | [`geo`]  | `Point2`, planar Euclidean arithmetic             |
//! | [`time`] | `Tick`, `SimClock`, `Stamp`, `SimConfig`          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::Point2;
pub use ids::{AgentId, EdgeId, WaypointId};
pub use time::{SimClock, SimConfig, Stamp, Tick};
