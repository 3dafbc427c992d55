//! Agent movement state.

use std::fmt;

/// Where an agent is in its lifecycle.
///
/// An agent is `Idle` before it receives a usable path and again, terminally,
/// after it exits the last leg.  It is `EnRoute` whenever it has a target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AgentState {
    Idle,
    EnRoute,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            AgentState::Idle    => "idle",
            AgentState::EnRoute => "en_route",
        })
    }
}
