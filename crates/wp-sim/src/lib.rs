//! `wp-sim` — scenario loading, setup-time routing, and the frame loop.
//!
//! # Setup, then lockstep frames
//!
//! ```text
//! build():
//!   for each agent spec, in configuration order:
//!     route start → end at the agent's speed
//!       NoRoute    → record as unroutable (warn), skip
//!       Ok(route)  → Agent::set_path(coords) at tick 0  (route_enter)
//!
//! run():
//!   while some agent is en route and tick < max_ticks:
//!     tick += 1
//!     for each agent, in configuration order: agent.tick(sink)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs setup-time routing on Rayon's thread pool.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wp_event::MemorySink;
//! use wp_sim::{NoopObserver, Scenario, SimBuilder};
//! use wp_spatial::DijkstraRouter;
//!
//! let scenario = Scenario::default_solar();
//! let mut sim = SimBuilder::from_scenario(scenario, DijkstraRouter, MemorySink::new())?
//!     .build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! assert!(summary.completed);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scenario;
pub mod sim;


pub use builder::{SimBuilder, Unroutable};
pub use error::{SimError, SimResult};
pub use observer::{AgentSample, Frame, NoopObserver, SimObserver, TrackRecorder};
pub use scenario::{AgentSpec, Scenario, WaypointSpec};
pub use sim::{RunSummary, Sim};
