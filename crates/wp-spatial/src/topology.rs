//! Waypoint topology and builder.
//!
//! # Data layout
//!
//! Adjacency uses **Compressed Sparse Row (CSR)** format.  Given a
//! `WaypointId w`, its outgoing adjacency entries occupy the `EdgeId` range:
//!
//! ```text
//! edge_to[ out_start[w] .. out_start[w+1] ]
//! ```
//!
//! Every undirected route `(a, b)` is stored as two directed entries `a→b`
//! and `b→a`.  Within one waypoint's range, entries keep the order in which
//! their routes were added, so neighbor enumeration is reproducible and the
//! router's tie-breaking is deterministic.  Duplicate routes are kept as
//! duplicate entries.
//!
//! Edge lengths are Euclidean and computed once at build time; travel time is
//! derived per query from the agent's speed.

use rustc_hash::FxHashMap;

use wp_core::{EdgeId, Point2, WaypointId};

use crate::{SpatialError, SpatialResult};

// ── Topology ──────────────────────────────────────────────────────────────────

/// Immutable waypoint graph: names, coordinates, and undirected adjacency.
///
/// Do not construct directly; use [`TopologyBuilder`].
pub struct Topology {
    // ── Waypoint data (indexed by WaypointId) ─────────────────────────────
    names:    Vec<String>,
    position: Vec<Point2>,
    by_name:  FxHashMap<String, WaypointId>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Row pointer.  Length = `waypoint_count + 1`.
    out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    pub edge_to:     Vec<WaypointId>,
    /// Euclidean length of each entry.
    pub edge_length: Vec<f64>,
}

impl Topology {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn waypoint_count(&self) -> usize {
        self.names.len()
    }

    /// Number of directed adjacency entries (twice the number of routes).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    // ── Waypoint lookup ───────────────────────────────────────────────────

    /// Resolve a waypoint name.
    pub fn id(&self, name: &str) -> Option<WaypointId> {
        self.by_name.get(name).copied()
    }

    /// Resolve a waypoint name, failing with [`SpatialError::WaypointNotFound`].
    pub fn require(&self, name: &str) -> SpatialResult<WaypointId> {
        self.id(name)
            .ok_or_else(|| SpatialError::WaypointNotFound(name.to_owned()))
    }

    #[inline]
    pub fn name(&self, id: WaypointId) -> &str {
        &self.names[id.index()]
    }

    #[inline]
    pub fn position(&self, id: WaypointId) -> Point2 {
        self.position[id.index()]
    }

    /// All waypoints in insertion order.
    pub fn waypoints(&self) -> impl Iterator<Item = (WaypointId, &str, Point2)> + '_ {
        self.names
            .iter()
            .zip(&self.position)
            .enumerate()
            .map(|(i, (name, &pos))| (WaypointId(i as u32), name.as_str(), pos))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// `EdgeId`s of every adjacency entry leaving `id`.  Contiguous range, no
    /// allocation.
    #[inline]
    pub fn out_edges(&self, id: WaypointId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.out_start[id.index()] as usize;
        let end   = self.out_start[id.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Neighbors of `id` in route insertion order, duplicates included.
    pub fn neighbors(&self, id: WaypointId) -> impl Iterator<Item = WaypointId> + '_ {
        self.out_edges(id).map(|e| self.edge_to[e.index()])
    }

    #[inline]
    pub fn out_degree(&self, id: WaypointId) -> usize {
        (self.out_start[id.index() + 1] - self.out_start[id.index()]) as usize
    }
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Construct a [`Topology`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use wp_core::Point2;
/// use wp_spatial::TopologyBuilder;
///
/// let mut b = TopologyBuilder::new();
/// b.add_waypoint("Earth", Point2::new(0.0, 0.0)).unwrap();
/// b.add_waypoint("Mars", Point2::new(100.0, 50.0)).unwrap();
/// b.add_route_by_name("Earth", "Mars").unwrap();
/// let topo = b.build();
/// assert_eq!(topo.waypoint_count(), 2);
/// assert_eq!(topo.edge_count(), 2); // both directions
/// ```
pub struct TopologyBuilder {
    names:     Vec<String>,
    position:  Vec<Point2>,
    by_name:   FxHashMap<String, WaypointId>,
    raw_edges: Vec<(WaypointId, WaypointId)>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self {
            names:     Vec::new(),
            position:  Vec::new(),
            by_name:   FxHashMap::default(),
            raw_edges: Vec::new(),
        }
    }

    /// Add a waypoint and return its `WaypointId` (sequential from 0).
    pub fn add_waypoint(&mut self, name: impl Into<String>, pos: Point2) -> SpatialResult<WaypointId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(SpatialError::DuplicateWaypoint(name));
        }
        let id = WaypointId(self.names.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        self.position.push(pos);
        Ok(id)
    }

    /// Add an undirected route between two existing waypoints.
    ///
    /// # Panics
    /// Panics at [`build`](Self::build) if either id was not returned by
    /// [`add_waypoint`](Self::add_waypoint) on this builder.
    pub fn add_route(&mut self, a: WaypointId, b: WaypointId) {
        self.raw_edges.push((a, b));
        self.raw_edges.push((b, a));
    }

    /// Add an undirected route between two waypoints given by name.
    pub fn add_route_by_name(&mut self, a: &str, b: &str) -> SpatialResult<()> {
        let a = self.lookup(a)?;
        let b = self.lookup(b)?;
        self.add_route(a, b);
        Ok(())
    }

    pub fn waypoint_count(&self) -> usize { self.names.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    fn lookup(&self, name: &str) -> SpatialResult<WaypointId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SpatialError::WaypointNotFound(name.to_owned()))
    }

    /// Consume the builder and produce a [`Topology`].
    ///
    /// Time complexity: O(E log E) for the edge sort.
    pub fn build(self) -> Topology {
        let count = self.names.len();

        // Stable sort keeps insertion order within each source waypoint.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|&(from, _)| from.0);

        let edge_to:   Vec<WaypointId> = raw.iter().map(|&(_, to)| to).collect();
        let edge_length: Vec<f64> = raw
            .iter()
            .map(|&(from, to)| self.position[from.index()].distance(self.position[to.index()]))
            .collect();

        let mut out_start = vec![0u32; count + 1];
        for &(from, _) in &raw {
            out_start[from.index() + 1] += 1;
        }
        for i in 1..=count {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[count] as usize, raw.len());

        Topology {
            names:    self.names,
            position: self.position,
            by_name:  self.by_name,
            out_start,
            edge_to,
            edge_length,
        }
    }
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
