//! Run state machine.

use serde::{Deserialize, Serialize};

/// Current state of the supervisor.
///
/// `Finished` is observed transiently: once the caller has seen the
/// `Finished` event the machine returns to `Idle` and a new run may be
/// started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorState {
    #[default]
    Idle,
    Starting,
    Running,
    Finished,
}

impl SupervisorState {
    /// True when a new run may be admitted.
    #[must_use]
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    /// True while a process is in flight (spawning or running).
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Starting | Self::Running)
    }
}

impl std::fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Starting => write!(f, "starting"),
            Self::Running => write!(f, "running"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// State machine tracking one run at a time.
#[derive(Debug, Clone, Default)]
pub struct StateMachine {
    state: SupervisorState,
}

impl StateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn transition(&mut self, new_state: SupervisorState) {
        tracing::debug!(from = ?self.state, to = ?new_state, "State transition");
        self.state = new_state;
    }
}
