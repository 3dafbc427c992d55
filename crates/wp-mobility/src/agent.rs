//! The `Agent` kinematics state machine.

use tracing::{debug, info};

use wp_core::{AgentId, Point2, Stamp};
use wp_event::{Event, EventResult, EventSink, Metric};

use crate::AgentState;

/// One moving agent.
///
/// Mutated only through [`set_path`](Self::set_path) and
/// [`tick`](Self::tick).  Renderers read [`position`](Self::position) and
/// [`target`](Self::target).
#[derive(Debug, Clone)]
pub struct Agent {
    id:           AgentId,
    name:         String,
    position:     Point2,
    /// Distance units per tick.
    speed:        f64,
    path:         Vec<Point2>,
    /// Index into `path` of the current target.  Equals `path.len()` once the
    /// last waypoint has been exited.
    target_index: usize,
    target:       Option<Point2>,
}

impl Agent {
    /// An idle agent standing at `start`.
    pub fn new(id: AgentId, name: impl Into<String>, start: Point2, speed: f64) -> Self {
        Self {
            id,
            name: name.into(),
            position: start,
            speed,
            path: Vec::new(),
            target_index: 0,
            target: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> AgentId { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn position(&self) -> Point2 { self.position }
    pub fn speed(&self) -> f64 { self.speed }
    pub fn path(&self) -> &[Point2] { &self.path }
    pub fn target_index(&self) -> usize { self.target_index }

    /// The point the agent is heading to; `None` when idle.
    pub fn target(&self) -> Option<Point2> {
        self.target
    }

    pub fn state(&self) -> AgentState {
        match self.target {
            Some(_) => AgentState::EnRoute,
            None    => AgentState::Idle,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.target.is_none()
    }

    /// Straight-line distance to the current target; `None` when idle.
    pub fn distance_to_target(&self) -> Option<f64> {
        self.target.map(|t| self.position.distance(t))
    }

    /// Distance left along the path: to the current target, then every
    /// remaining leg.
    pub fn remaining_distance(&self) -> f64 {
        let Some(to_target) = self.distance_to_target() else {
            return 0.0;
        };
        let rest: f64 = self.path[self.target_index..]
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum();
        to_target + rest
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Start following `path`, whose first point is taken to be the agent's
    /// starting waypoint.
    ///
    /// Paths with fewer than two points are ignored and `Ok(false)` is
    /// returned; the agent's state is unchanged.  Otherwise the agent targets
    /// `path[1]`, emits `route_enter`, and `Ok(true)` is returned.
    pub fn set_path<S: EventSink + ?Sized>(
        &mut self,
        path: Vec<Point2>,
        now:  Stamp,
        sink: &mut S,
    ) -> EventResult<bool> {
        if path.len() < 2 {
            return Ok(false);
        }
        self.target_index = 1;
        self.target = Some(path[1]);
        self.path = path;
        info!(agent = %self.name, waypoints = self.path.len(), speed = self.speed, "path set");
        self.emit(Metric::RouteEnter, 0.0, now, sink)?;
        Ok(true)
    }

    /// Advance one tick.  No-op when idle.
    ///
    /// A zero-length leg (target equal to the current position) is treated as
    /// already arrived: no movement, a `distance_traveled` of 0, then the
    /// usual exit/enter.
    pub fn tick<S: EventSink + ?Sized>(&mut self, now: Stamp, sink: &mut S) -> EventResult<()> {
        let Some(target) = self.target else {
            return Ok(());
        };

        let direction = target - self.position;
        let dist = direction.length();
        let step = self.speed.min(dist);
        if dist > 0.0 {
            self.position += (direction / dist) * step;
        }
        self.emit(Metric::DistanceTraveled, step, now, sink)?;

        // Threshold, not equality: the residual float error of a full step
        // stays in `position` and is absorbed by the next leg.
        if dist <= self.speed {
            self.emit(Metric::RouteExit, dist, now, sink)?;
            debug!(agent = %self.name, waypoint = self.target_index, "reached {target}");

            self.target_index += 1;
            match self.path.get(self.target_index) {
                Some(&next) => {
                    self.target = Some(next);
                    self.emit(Metric::RouteEnter, 0.0, now, sink)?;
                }
                None => {
                    self.target = None;
                    info!(agent = %self.name, tick = now.tick.0, "arrived at final waypoint");
                }
            }
        }
        Ok(())
    }

    fn emit<S: EventSink + ?Sized>(
        &self,
        metric: Metric,
        value:  f64,
        now:    Stamp,
        sink:   &mut S,
    ) -> EventResult<()> {
        sink.record(&Event::new(now, &self.name, metric, value, Some(self.position)))
    }
}
