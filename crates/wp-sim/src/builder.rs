//! Fluent builder for constructing a [`Sim`].

use std::fmt;

use tracing::{debug, info, warn};
use wp_core::{AgentId, SimConfig};
use wp_event::EventSink;
use wp_mobility::Agent;
use wp_spatial::{Route, Router, SpatialError, Topology};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{AgentSpec, Scenario, Sim, SimResult};

/// An agent whose destination cannot be reached from its start.  It is left
/// out of the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unroutable {
    pub agent: String,
    pub start: String,
    pub end:   String,
}

impl fmt::Display for Unroutable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No path found for {} from {} to {}", self.agent, self.start, self.end)
    }
}

/// Fluent builder for [`Sim<S>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — frame bound and wall-clock mapping
/// - [`Topology`] — the waypoint graph
/// - `R: Router` — the routing algorithm (e.g. [`wp_spatial::DijkstraRouter`])
/// - `S: EventSink` — where lifecycle events go; owned by the built `Sim`
///
/// Agents are added with [`agent`](Self::agent) / [`agents`](Self::agents)
/// and keep the order they were added in.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, topology, DijkstraRouter, MemorySink::new())
///     .agent(AgentSpec::new("Apollo", "Earth", "Mars", 5.0))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: Router, S: EventSink> {
    config:   SimConfig,
    topology: Topology,
    router:   R,
    sink:     S,
    specs:    Vec<AgentSpec>,
}

impl<R: Router, S: EventSink> SimBuilder<R, S> {
    /// Create a builder with all required inputs and no agents.
    pub fn new(config: SimConfig, topology: Topology, router: R, sink: S) -> Self {
        Self { config, topology, router, sink, specs: Vec::new() }
    }

    /// Validate `scenario`, build its topology, and queue its agents.
    pub fn from_scenario(scenario: Scenario, router: R, sink: S) -> SimResult<Self> {
        scenario.validate()?;
        let topology = scenario.build_topology()?;
        Ok(Self::new(scenario.sim, topology, router, sink).agents(scenario.agents))
    }

    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn agents(mut self, specs: impl IntoIterator<Item = AgentSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Route every agent, hand each routed agent its path at tick 0, and
    /// return a ready-to-run [`Sim`].
    ///
    /// Agents with no route, including those whose destination is not a
    /// known waypoint, are recorded in [`Sim::unroutable`] and skipped.  An
    /// unknown start, a bad speed, or a sink failure is an error.
    pub fn build(mut self) -> SimResult<Sim<S>> {
        for spec in &self.specs {
            spec.check_speed()?;
        }

        let routes = route_all(&self.topology, &self.router, &self.specs);

        let clock = self.config.make_clock();
        let stamp = clock.stamp();
        let mut agents = Vec::with_capacity(self.specs.len());
        let mut unroutable = Vec::new();

        // Applied in configuration order whether or not routing ran in
        // parallel, so event order is the same either way.
        for (i, (spec, route)) in self.specs.into_iter().zip(routes).enumerate() {
            let route = match route {
                Ok(route) => route,
                Err(SpatialError::NoRoute { .. }) => {
                    let u = Unroutable { agent: spec.name, start: spec.start, end: spec.end };
                    warn!("{u}");
                    unroutable.push(u);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            debug!(agent = %spec.name, route = ?route.names(&self.topology), time = route.total_time, "routed");
            let start = self.topology.position(route.waypoints[0]);
            let mut agent = Agent::new(AgentId(i as u32), spec.name, start, spec.speed);
            if !agent.set_path(route.coordinates(&self.topology), stamp, &mut self.sink)? {
                debug!(agent = %agent.name(), "start and end coincide; agent stays idle");
            }
            agents.push(agent);
        }

        info!(
            agents = agents.len(),
            unroutable = unroutable.len(),
            waypoints = self.topology.waypoint_count(),
            "simulation built"
        );

        Ok(Sim {
            config:   self.config,
            clock,
            topology: self.topology,
            agents,
            unroutable,
            sink:     self.sink,
        })
    }
}

// ── Setup-time routing ────────────────────────────────────────────────────────

fn route_one<R: Router>(topology: &Topology, router: &R, spec: &AgentSpec) -> Result<Route, SpatialError> {
    let from = topology.require(&spec.start)?;
    let Some(to) = topology.id(&spec.end) else {
        return Err(SpatialError::NoRoute { from: spec.start.clone(), to: spec.end.clone() });
    };
    router.route(topology, from, to, spec.speed)
}

#[cfg(not(feature = "parallel"))]
fn route_all<R: Router>(topology: &Topology, router: &R, specs: &[AgentSpec]) -> Vec<Result<Route, SpatialError>> {
    specs.iter().map(|s| route_one(topology, router, s)).collect()
}

/// Queries are independent; `collect` keeps them in input order.
#[cfg(feature = "parallel")]
fn route_all<R: Router>(topology: &Topology, router: &R, specs: &[AgentSpec]) -> Vec<Result<Route, SpatialError>> {
    specs.par_iter().map(|s| route_one(topology, router, s)).collect()
}
