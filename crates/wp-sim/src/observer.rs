//! Simulation observer trait for rendering and data collection.

use serde::Serialize;
use wp_core::Tick;
use wp_mobility::Agent;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at frame boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, agents: &[Agent]) {
///         if tick.0 % self.interval == 0 {
///             let moving = agents.iter().filter(|a| !a.is_idle()).count();
///             println!("{tick}: {moving} agents en route");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first frame, with the agents as placed at setup.
    fn on_sim_start(&mut self, _tick: Tick, _agents: &[Agent]) {}

    /// Called before the frame for `tick` moves any agent.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every agent has been advanced for `tick`.
    fn on_tick_end(&mut self, _tick: Tick, _agents: &[Agent]) {}

    /// Called once after the final frame.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

// ── TrackRecorder ─────────────────────────────────────────────────────────────

/// One agent's position in a [`Frame`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgentSample {
    pub name:     String,
    pub x:        f64,
    pub y:        f64,
    pub en_route: bool,
}

/// Every active agent's position after one tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub tick:   u64,
    pub agents: Vec<AgentSample>,
}

/// Records agent positions every `stride` ticks for an external renderer.
///
/// The setup frame (tick 0) and the last frame are always kept.  Serialises
/// as `{"frames": [...]}`.
#[derive(Clone, Debug, Serialize)]
pub struct TrackRecorder {
    #[serde(skip)]
    stride: u64,
    #[serde(skip)]
    last_seen: Option<Frame>,
    frames: Vec<Frame>,
}

impl TrackRecorder {
    /// Record every frame.
    pub fn new() -> Self {
        Self::with_stride(1)
    }

    /// Record every `stride`-th frame.  A stride of 0 is treated as 1.
    pub fn with_stride(stride: u64) -> Self {
        Self { stride: stride.max(1), last_seen: None, frames: Vec::new() }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    fn capture(tick: Tick, agents: &[Agent]) -> Frame {
        Frame {
            tick:   tick.0,
            agents: agents
                .iter()
                .map(|a| {
                    let p = a.position();
                    AgentSample { name: a.name().to_owned(), x: p.x, y: p.y, en_route: !a.is_idle() }
                })
                .collect(),
        }
    }
}

impl Default for TrackRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimObserver for TrackRecorder {
    fn on_sim_start(&mut self, tick: Tick, agents: &[Agent]) {
        self.frames.push(Self::capture(tick, agents));
    }

    fn on_tick_end(&mut self, tick: Tick, agents: &[Agent]) {
        let frame = Self::capture(tick, agents);
        if tick.0 % self.stride == 0 {
            self.frames.push(frame);
            self.last_seen = None;
        } else {
            self.last_seen = Some(frame);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        if let Some(frame) = self.last_seen.take() {
            self.frames.push(frame);
        }
    }
}
