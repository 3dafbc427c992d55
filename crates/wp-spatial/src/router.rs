//! Routing trait and default time-weighted Dijkstra implementation.
//!
//! # Pluggability
//!
//! `wp-sim` calls routing via the [`Router`] trait, so applications can swap
//! in other implementations (A*, predecessor-pointer Dijkstra for large
//! topologies) without touching the driver.
//!
//! # Cost units
//!
//! Edge cost is `length / speed`, where speed is in distance units per tick,
//! so every time in this module is measured in **ticks** (fractional).  The
//! same topology yields different costs for agents of different speeds.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use wp_core::{Point2, WaypointId};

use crate::{SpatialError, SpatialResult, Topology};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: waypoints from start to end inclusive, and
/// the total travel time at the queried speed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Waypoints in travel order.  First is the start, last is the end.
    pub waypoints: Vec<WaypointId>,
    /// Sum of per-edge `length / speed`, in ticks.
    pub total_time: f64,
}

impl Route {
    /// `true` when start and end coincide; such a route has one waypoint and
    /// gives an agent nothing to do.
    pub fn is_trivial(&self) -> bool {
        self.waypoints.len() < 2
    }

    /// Number of legs travelled.
    pub fn hop_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Waypoint names in travel order.
    pub fn names<'t>(&self, topology: &'t Topology) -> Vec<&'t str> {
        self.waypoints.iter().map(|&w| topology.name(w)).collect()
    }

    /// Waypoint coordinates in travel order, as taken by `Agent::set_path`.
    pub fn coordinates(&self, topology: &Topology) -> Vec<Point2> {
        self.waypoints.iter().map(|&w| topology.position(w)).collect()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so that setup-time routing can fan
/// out across Rayon workers.
pub trait Router: Send + Sync {
    /// Compute the minimum-time route from `from` to `to` at `speed`.
    ///
    /// `from == to` yields a one-waypoint route with zero time.  Returns
    /// [`SpatialError::NoRoute`] when `to` is unreachable.
    fn route(
        &self,
        topology: &Topology,
        from:     WaypointId,
        to:       WaypointId,
        speed:    f64,
    ) -> SpatialResult<Route>;
}

/// Look up `start` and `end` by name and route between them with
/// [`DijkstraRouter`].
pub fn find_path(topology: &Topology, start: &str, end: &str, speed: f64) -> SpatialResult<Route> {
    let from = topology.require(start)?;
    let to   = topology.require(end)?;
    DijkstraRouter.route(topology, from, to, speed)
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra over travel time with whole-path queue entries.
///
/// Each heap entry owns a copy of the path that reached it, so the answer is
/// read straight off the goal entry without a predecessor walk.  Memory is
/// O(E · path length); fine for tens of waypoints.  Nodes are closed lazily:
/// there is no decrease-key, stale entries are discarded when popped.
///
/// Equal times pop in push order (a sequence number is part of the key), so
/// identical inputs always give identical routes.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        topology: &Topology,
        from:     WaypointId,
        to:       WaypointId,
        speed:    f64,
    ) -> SpatialResult<Route> {
        dijkstra(topology, from, to, speed)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap entry.  Ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// `(time, seq)` first.
struct Frontier {
    time: f64,
    seq:  u64,
    node: WaypointId,
    path: Vec<WaypointId>,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

fn dijkstra(
    topology: &Topology,
    from:     WaypointId,
    to:       WaypointId,
    speed:    f64,
) -> SpatialResult<Route> {
    debug_assert!(speed > 0.0, "routing speed must be positive, got {speed}");

    // best[v] = time with which v was closed; INFINITY while open.
    let mut best = vec![f64::INFINITY; topology.waypoint_count()];
    let mut seq  = 0u64;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier { time: 0.0, seq, node: from, path: vec![from] });

    while let Some(Frontier { time, node, path, .. }) = heap.pop() {
        if node == to {
            return Ok(Route { waypoints: path, total_time: time });
        }

        // Skip entries no better than the time this node was closed with.
        if best[node.index()] <= time {
            continue;
        }
        best[node.index()] = time;

        for edge in topology.out_edges(node) {
            let neighbor = topology.edge_to[edge.index()];
            let mut next = Vec::with_capacity(path.len() + 1);
            next.extend_from_slice(&path);
            next.push(neighbor);

            seq += 1;
            heap.push(Frontier {
                time: time + topology.edge_length[edge.index()] / speed,
                seq,
                node: neighbor,
                path: next,
            });
        }
    }

    Err(SpatialError::NoRoute {
        from: topology.name(from).to_owned(),
        to:   topology.name(to).to_owned(),
    })
}
