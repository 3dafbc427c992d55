//! `wp-spatial` — waypoint topology and time-weighted routing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`topology`] | `Topology` (CSR adjacency + name index), `TopologyBuilder` |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`, `find_path`     |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Route`.                |

pub mod error;
pub mod router;
pub mod topology;


pub use error::{SpatialError, SpatialResult};
pub use router::{DijkstraRouter, Route, Router, find_path};
pub use topology::{Topology, TopologyBuilder};
