//=========================================================================
// Action States
//=========================================================================
//
// Query surface over the host's input-to-action mapping.
//
// The host maps raw keys and buttons to named actions (out of scope here)
// and forwards "action went active / inactive" updates each frame. This
// module folds them into per-action states that scenes and components
// query during the frame.
//
// Frame lifecycle: begin_frame() → apply(updates) → query
//
// Each update is also published on the event bus as an ActionEvent, so a
// scene can react to transitions instead of polling. Scenes subscribe in
// init and are disconnected by their clean.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::trace;

//=== ActionState =========================================================

/// Per-frame state of a named action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionState {
    /// Became active this frame.
    Pressed,
    /// Active since an earlier frame.
    Held,
    /// Became inactive this frame.
    Released,
    #[default]
    Inactive,
}

//=== ActionUpdate ========================================================

/// A single edge reported by the host for a named action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionUpdate {
    pub action: String,
    pub active: bool,
    /// True for OS key-repeat events; they keep the action held.
    pub repeat: bool,
}

impl ActionUpdate {
    pub fn pressed(action: impl Into<String>) -> Self {
        Self { action: action.into(), active: true, repeat: false }
    }

    pub fn released(action: impl Into<String>) -> Self {
        Self { action: action.into(), active: false, repeat: false }
    }

    /// The state this update moves its action into.
    pub fn state(&self) -> ActionState {
        match (self.active, self.repeat) {
            (true, true) => ActionState::Held,
            (true, false) => ActionState::Pressed,
            (false, _) => ActionState::Released,
        }
    }
}

//=== ActionEvent =========================================================

/// Published once per host update, in the order the host reported them.
///
/// Only valid for the frame it was published in; the engine clears the
/// queue before publishing the next frame's events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    pub action: String,
    pub state: ActionState,
}

impl From<&ActionUpdate> for ActionEvent {
    fn from(update: &ActionUpdate) -> Self {
        Self { action: update.action.clone(), state: update.state() }
    }
}

//=== ActionStates ========================================================

/// Tracks the state of every action the host has reported.
///
/// Unknown actions read as [`ActionState::Inactive`].
#[derive(Debug, Default)]
pub struct ActionStates {
    states: HashMap<String, ActionState>,
}

impl ActionStates {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self { states: HashMap::new() }
    }

    //--- Frame Processing -------------------------------------------------

    /// Ages last frame's edges: pressed becomes held, released becomes
    /// inactive.
    pub fn begin_frame(&mut self) {
        for state in self.states.values_mut() {
            *state = match *state {
                ActionState::Pressed => ActionState::Held,
                ActionState::Released => ActionState::Inactive,
                other => other,
            };
        }
    }

    /// Applies this frame's updates in order.
    pub fn apply(&mut self, updates: &[ActionUpdate]) {
        for update in updates {
            let next = update.state();
            trace!(target: "input", "Action '{}' -> {:?}", update.action, next);
            self.states.insert(update.action.clone(), next);
        }
    }

    //--- Query API --------------------------------------------------------

    /// Returns the current state of `action`.
    pub fn state(&self, action: &str) -> ActionState {
        self.states.get(action).copied().unwrap_or_default()
    }

    /// Pressed this frame or held from an earlier one.
    pub fn is_action_down(&self, action: &str) -> bool {
        matches!(self.state(action), ActionState::Pressed | ActionState::Held)
    }

    /// Pressed this frame.
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.state(action) == ActionState::Pressed
    }

    /// Released this frame.
    pub fn is_action_released(&self, action: &str) -> bool {
        self.state(action) == ActionState::Released
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
