//! `wp-mobility` — agent kinematics along a resolved waypoint path.
//!
//! # Crate layout
//!
//! | Module    | Contents                                      |
//! |-----------|-----------------------------------------------|
//! | [`state`] | `AgentState` — `Idle` / `EnRoute`             |
//! | [`agent`] | `Agent` — position, path, and the tick step   |
//!
//! # Movement model (fixed-speed stepping)
//!
//! 1. `Agent::set_path` takes the coordinate sequence produced by the router
//!    and aims the agent at the second point (the first is where it stands).
//! 2. Each `Agent::tick` moves the agent `min(speed, remaining)` toward its
//!    target.  A step never overshoots; leftover speed budget is not carried
//!    into the next leg.
//! 3. When the remaining distance at the start of a tick is within one step,
//!    the agent exits the leg and immediately enters the next one, or goes
//!    idle after the last waypoint.
//!
//! Every transition is reported to the `EventSink` passed into the call.

pub mod agent;
pub mod state;


pub use agent::Agent;
pub use state::AgentState;
