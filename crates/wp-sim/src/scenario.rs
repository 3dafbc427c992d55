//! Scenario description: waypoints, undirected routes, and agents.
//!
//! Loaded from TOML:
//!
//! ```toml
//! routes = [["Earth", "Mars"], ["Earth", "Venus"]]
//!
//! [sim]
//! max_ticks = 1000
//!
//! [[waypoints]]
//! name = "Earth"
//! x = 0.0
//! y = 0.0
//!
//! [[agents]]
//! name  = "Apollo"
//! start = "Earth"
//! end   = "Mars"
//! speed = 5.0
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wp_core::{Point2, SimConfig};
use wp_spatial::{Topology, TopologyBuilder};

use crate::{SimError, SimResult};

/// A named waypoint and its plane coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaypointSpec {
    pub name: String,
    pub x:    f64,
    pub y:    f64,
}

impl WaypointSpec {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self { name: name.into(), x, y }
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// One agent to route and run: travel from `start` to `end` at `speed`
/// distance units per tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name:  String,
    pub start: String,
    pub end:   String,
    pub speed: f64,
}

impl AgentSpec {
    pub fn new(
        name:  impl Into<String>,
        start: impl Into<String>,
        end:   impl Into<String>,
        speed: f64,
    ) -> Self {
        Self { name: name.into(), start: start.into(), end: end.into(), speed }
    }

    /// Speed must be positive and finite for the router's edge weights to
    /// mean anything.
    pub fn check_speed(&self) -> SimResult<()> {
        if self.speed.is_finite() && self.speed > 0.0 {
            Ok(())
        } else {
            Err(SimError::Config(format!(
                "agent {:?} has invalid speed {}", self.name, self.speed
            )))
        }
    }
}

/// Everything needed to build a [`Sim`](crate::Sim).
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub sim:       SimConfig,
    #[serde(default)]
    pub waypoints: Vec<WaypointSpec>,
    /// Undirected connections, by waypoint name.
    #[serde(default)]
    pub routes:    Vec<(String, String)>,
    #[serde(default)]
    pub agents:    Vec<AgentSpec>,
}

impl Scenario {
    /// The three-planet setup: Apollo flies Earth → Mars, Odyssey flies
    /// Venus → Mars.
    pub fn default_solar() -> Self {
        let route = |a: &str, b: &str| (a.to_owned(), b.to_owned());
        Self {
            sim: SimConfig::default(),
            waypoints: vec![
                WaypointSpec::new("Earth",   0.0,  0.0),
                WaypointSpec::new("Mars",  100.0, 50.0),
                WaypointSpec::new("Venus", -50.0, 80.0),
            ],
            routes: vec![
                route("Earth", "Mars"),
                route("Earth", "Venus"),
                route("Venus", "Mars"),
            ],
            agents: vec![
                AgentSpec::new("Apollo",  "Earth", "Mars", 5.0),
                AgentSpec::new("Odyssey", "Venus", "Mars", 3.0),
            ],
        }
    }

    /// Parse and validate a TOML scenario.
    pub fn from_toml_str(text: &str) -> SimResult<Self> {
        let scenario: Scenario = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_path(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject duplicate or non-finite waypoints, routes or agent starts that
    /// name unknown waypoints, and non-positive speeds.
    ///
    /// An agent's `end` is not checked here: an unknown destination only
    /// makes that agent unroutable at build time, and the rest still run.
    pub fn validate(&self) -> SimResult<()> {
        let mut names: HashSet<&str> = HashSet::with_capacity(self.waypoints.len());
        for wp in &self.waypoints {
            if !names.insert(wp.name.as_str()) {
                return Err(SimError::Config(format!("waypoint {:?} defined more than once", wp.name)));
            }
            if !(wp.x.is_finite() && wp.y.is_finite()) {
                return Err(SimError::Config(format!("waypoint {:?} has non-finite coordinates", wp.name)));
            }
        }

        let known = |name: &str, what: &str| {
            if names.contains(name) {
                Ok(())
            } else {
                Err(SimError::Config(format!("{what} names unknown waypoint {name:?}")))
            }
        };
        for (a, b) in &self.routes {
            known(a.as_str(), "route")?;
            known(b.as_str(), "route")?;
        }
        for agent in &self.agents {
            let what = format!("agent {:?}", agent.name);
            known(agent.start.as_str(), what.as_str())?;
            agent.check_speed()?;
        }

        if self.sim.tick_duration_ms == 0 {
            return Err(SimError::Config("tick_duration_ms must be positive".into()));
        }
        Ok(())
    }

    /// Build the routing graph: waypoints in declaration order, then every
    /// route in both directions.
    pub fn build_topology(&self) -> SimResult<Topology> {
        let mut b = TopologyBuilder::new();
        for wp in &self.waypoints {
            b.add_waypoint(wp.name.as_str(), wp.position())?;
        }
        for (a, c) in &self.routes {
            b.add_route_by_name(a, c)?;
        }
        Ok(b.build())
    }
}
