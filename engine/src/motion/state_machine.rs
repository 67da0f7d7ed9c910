//! Camera Motion State Machine
//!
//! Selects which motion-state tuning profile is active each fixed tick.
//! The rule is a fixed priority list, first match wins:
//!
//! 1. Forced visualize state (editor/preview override)
//! 2. Run - running flag set and the character is moving
//! 3. Crouch
//! 4. Prone
//! 5. Walk - the character is moving
//! 6. Idle - default and fallback
//!
//! The machine only picks states and reports transitions; applying
//! enter/exit forces and re-tuning the springs is the rig's job, so the
//! machine stays free of configuration knowledge. There is no terminal
//! state: the machine runs for as long as physics is enabled.

use serde::{Deserialize, Serialize};

use crate::input::CharacterSample;

/// Discrete movement modes, one tuning profile each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateId {
    Idle,
    Walk,
    Run,
    Crouch,
    Prone,
}

impl Default for StateId {
    fn default() -> Self {
        StateId::Idle
    }
}

/// A completed state change, reported once on the tick it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
}

/// Evaluates the active motion state once per fixed tick.
#[derive(Debug, Clone, Default)]
pub struct MotionStateMachine {
    current: StateId,
    /// Externally forced state for editor preview; bypasses gameplay.
    forced: Option<StateId>,
}

impl MotionStateMachine {
    /// Create a machine starting in [`StateId::Idle`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active state.
    pub fn current(&self) -> StateId {
        self.current
    }

    /// Force a state for visualization, or `None` to resume gameplay
    /// selection.
    pub fn set_forced(&mut self, state: Option<StateId>) {
        self.forced = state;
    }

    /// The forced visualize state, if any.
    pub fn forced(&self) -> Option<StateId> {
        self.forced
    }

    /// Pick the state for this tick. Returns the transition if the
    /// active state changed.
    pub fn evaluate(&mut self, sample: &CharacterSample) -> Option<Transition> {
        let next = self.select(sample);
        if next == self.current {
            return None;
        }
        let transition = Transition {
            from: self.current,
            to: next,
        };
        self.current = next;
        Some(transition)
    }

    /// Reset to Idle and clear any forced state.
    pub fn reset(&mut self) {
        self.current = StateId::Idle;
        self.forced = None;
    }

    fn select(&self, sample: &CharacterSample) -> StateId {
        if let Some(forced) = self.forced {
            return forced;
        }
        if sample.running && sample.moving {
            return StateId::Run;
        }
        if sample.crouching {
            return StateId::Crouch;
        }
        if sample.prone {
            return StateId::Prone;
        }
        if sample.moving {
            return StateId::Walk;
        }
        StateId::Idle
    }
}
