//! The `Sim` struct and its frame loop.

use tracing::{info, warn};
use wp_core::{SimClock, SimConfig, Tick};
use wp_event::EventSink;
use wp_mobility::Agent;
use wp_spatial::Topology;

use crate::{SimObserver, SimResult, Unroutable};

/// Outcome of [`Sim::run`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames executed by this call.
    pub ticks:      u64,
    pub final_tick: Tick,
    /// `false` when the frame bound stopped the run with agents still en
    /// route.
    pub completed:  bool,
}

/// The main simulation runner.
///
/// Every frame advances the clock once, then ticks each agent exactly once
/// in configuration order, lending each the sink.  There is no other
/// interaction between agents.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: EventSink> {
    pub(crate) config:     SimConfig,
    pub(crate) clock:      SimClock,
    pub(crate) topology:   Topology,
    pub(crate) agents:     Vec<Agent>,
    pub(crate) unroutable: Vec<Unroutable>,
    pub(crate) sink:       S,
}

impl<S: EventSink> Sim<S> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig { &self.config }
    pub fn clock(&self) -> &SimClock { &self.clock }
    pub fn topology(&self) -> &Topology { &self.topology }

    /// Routed agents, in configuration order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name() == name)
    }

    /// Agents left out because their destination was unreachable.
    pub fn unroutable(&self) -> &[Unroutable] {
        &self.unroutable
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Give up the sink, e.g. to call `finish` on it.
    pub fn into_sink(self) -> S {
        self.sink
    }

    #[inline]
    pub fn all_idle(&self) -> bool {
        self.agents.iter().all(Agent::is_idle)
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance exactly one frame and return its tick.  Ignores the frame
    /// bound.
    pub fn step(&mut self) -> SimResult<Tick> {
        let tick = self.clock.advance();
        let stamp = self.clock.stamp();
        for agent in &mut self.agents {
            agent.tick(stamp, &mut self.sink)?;
        }
        Ok(tick)
    }

    /// Step until every agent is idle or `config.max_ticks` frames have
    /// run, calling observer hooks at every frame boundary.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        let first = self.clock.current_tick;
        let bound = self.config.last_tick();
        observer.on_sim_start(first, &self.agents);

        while !self.all_idle() && self.clock.current_tick < bound {
            observer.on_tick_start(self.clock.current_tick + 1);
            let tick = self.step()?;
            observer.on_tick_end(tick, &self.agents);
        }

        let final_tick = self.clock.current_tick;
        observer.on_sim_end(final_tick);

        let summary = RunSummary {
            ticks:     final_tick.0 - first.0,
            final_tick,
            completed: self.all_idle(),
        };
        if summary.completed {
            info!(ticks = summary.ticks, "all agents idle at {final_tick}");
        } else {
            let en_route = self.agents.iter().filter(|a| !a.is_idle()).count();
            warn!(en_route, max_ticks = self.config.max_ticks, "frame bound reached with agents en route");
        }
        Ok(summary)
    }
}
