//! Input handling for platformer controls.
//!
//! Raw key edges are tracked per frame, mapped through rebindable action
//! bindings, and folded into one [`Intent`] per tick. The controller only
//! ever sees the intent, so replays and tests can feed it directly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key codes for the controls a platformer typically binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Z key
    Z,
    /// X key
    X,
    /// J key
    J,
    /// K key
    K,
    /// Space bar
    Space,
    /// Enter/Return
    Enter,
    /// Escape
    Escape,
    /// Left Shift
    LShift,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Actions the controller responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move left
    MoveLeft,
    /// Move right
    MoveRight,
    /// Jump
    Jump,
}

/// State of a button (pressed, just pressed, released).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    /// Whether the button is currently held down
    pub pressed: bool,
    /// Whether the button was just pressed this frame
    pub just_pressed: bool,
    /// Whether the button was just released this frame
    pub just_released: bool,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pressed: false,
            just_pressed: false,
            just_released: false,
        }
    }

    /// Update the button state based on whether it's currently pressed.
    pub fn update(&mut self, is_pressed: bool) {
        self.just_pressed = is_pressed && !self.pressed;
        self.just_released = !is_pressed && self.pressed;
        self.pressed = is_pressed;
    }

    /// Clear the frame-specific state (just_pressed, just_released).
    pub fn clear_frame(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Key binding for an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Primary key for this action
    pub primary: KeyCode,
    /// Optional secondary key
    pub secondary: Option<KeyCode>,
}

impl KeyBinding {
    /// Create a new key binding with only a primary key.
    #[must_use]
    pub const fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Create a new key binding with primary and secondary keys.
    #[must_use]
    pub const fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    /// Check if a key matches this binding.
    #[must_use]
    pub fn matches(&self, key: KeyCode) -> bool {
        self.primary == key || self.secondary == Some(key)
    }
}

/// One tick's worth of player intent.
///
/// `axis` is the horizontal move direction in `[-1, 1]`. The jump fields are
/// edges, not levels: `jump_pressed` is true only on the tick the button went
/// down, `jump_released` only on the tick it came up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    /// Horizontal move direction
    pub axis: f32,
    /// Jump was pressed this tick
    pub jump_pressed: bool,
    /// Jump was released this tick
    pub jump_released: bool,
}

impl Intent {
    /// Intent with no input at all.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            axis: 0.0,
            jump_pressed: false,
            jump_released: false,
        }
    }

    /// Intent that only moves along the horizontal axis.
    #[must_use]
    pub const fn run(axis: f32) -> Self {
        Self {
            axis,
            jump_pressed: false,
            jump_released: false,
        }
    }
}

/// Maps raw key states to per-tick intents.
#[derive(Debug)]
pub struct InputMap {
    /// Current key states
    key_states: HashMap<KeyCode, ButtonState>,
    /// Action to key bindings
    bindings: HashMap<Action, KeyBinding>,
}

impl Default for InputMap {
    fn default() -> Self {
        Self::new()
    }
}

impl InputMap {
    /// Create a new input map with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut map = Self {
            key_states: HashMap::new(),
            bindings: HashMap::new(),
        };
        map.set_default_bindings();
        map
    }

    /// Set default key bindings.
    pub fn set_default_bindings(&mut self) {
        self.bindings.clear();
        self.bindings.insert(
            Action::MoveLeft,
            KeyBinding::with_secondary(KeyCode::A, KeyCode::Left),
        );
        self.bindings.insert(
            Action::MoveRight,
            KeyBinding::with_secondary(KeyCode::D, KeyCode::Right),
        );
        self.bindings.insert(
            Action::Jump,
            KeyBinding::with_secondary(KeyCode::Space, KeyCode::Z),
        );
    }

    /// Rebind an action to a new key.
    pub fn rebind(&mut self, action: Action, binding: KeyBinding) {
        self.bindings.insert(action, binding);
    }

    /// Get the current binding for an action.
    #[must_use]
    pub fn binding(&self, action: Action) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Update a key state.
    pub fn update_key(&mut self, key: KeyCode, is_pressed: bool) {
        self.key_states.entry(key).or_default().update(is_pressed);
    }

    /// Clear frame-specific state. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        for state in self.key_states.values_mut() {
            state.clear_frame();
        }
    }

    /// Check if a key is currently pressed.
    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.key_states.get(&key).is_some_and(|state| state.pressed)
    }

    /// Check if an action is currently active.
    #[must_use]
    pub fn is_action_pressed(&self, action: Action) -> bool {
        self.bindings.get(&action).is_some_and(|binding| {
            self.is_key_pressed(binding.primary)
                || binding
                    .secondary
                    .is_some_and(|key| self.is_key_pressed(key))
        })
    }

    /// Check if an action was just pressed this frame.
    #[must_use]
    pub fn is_action_just_pressed(&self, action: Action) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|binding| self.key_state(binding).just_pressed)
    }

    /// Check if an action was just released this frame.
    #[must_use]
    pub fn is_action_just_released(&self, action: Action) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|binding| self.key_state(binding).just_released)
    }

    /// Fold both bound keys into one state for an action.
    fn key_state(&self, binding: &KeyBinding) -> ButtonState {
        let mut folded = self
            .key_states
            .get(&binding.primary)
            .copied()
            .unwrap_or_default();
        if let Some(secondary) = binding.secondary {
            if let Some(state) = self.key_states.get(&secondary) {
                folded.pressed |= state.pressed;
                folded.just_pressed |= state.just_pressed;
                folded.just_released |= state.just_released;
            }
        }
        folded
    }

    /// Fold the current key states into a per-tick intent.
    #[must_use]
    pub fn sample(&self) -> Intent {
        let mut axis = 0.0;
        if self.is_action_pressed(Action::MoveLeft) {
            axis -= 1.0;
        }
        if self.is_action_pressed(Action::MoveRight) {
            axis += 1.0;
        }

        Intent {
            axis,
            jump_pressed: self.is_action_just_pressed(Action::Jump),
            jump_released: self.is_action_just_released(Action::Jump),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_state_edges() {
        let mut state = ButtonState::new();
        assert!(!state.pressed);

        state.update(true);
        assert!(state.pressed);
        assert!(state.just_pressed);
        assert!(!state.just_released);

        state.clear_frame();
        state.update(true);
        assert!(state.pressed);
        assert!(!state.just_pressed);

        state.clear_frame();
        state.update(false);
        assert!(!state.pressed);
        assert!(state.just_released);
    }

    #[test]
    fn test_default_bindings() {
        let map = InputMap::new();
        assert!(map.binding(Action::Jump).is_some());
        assert_eq!(
            map.binding(Action::MoveLeft).map(|b| b.primary),
            Some(KeyCode::A)
        );
    }

    #[test]
    fn test_key_binding_matches() {
        let binding = KeyBinding::with_secondary(KeyCode::A, KeyCode::Left);
        assert!(binding.matches(KeyCode::A));
        assert!(binding.matches(KeyCode::Left));
        assert!(!binding.matches(KeyCode::D));
    }

    #[test]
    fn test_sample_axis() {
        let mut map = InputMap::new();

        map.update_key(KeyCode::D, true);
        assert_eq!(map.sample().axis, 1.0);

        // Both directions held cancel out
        map.update_key(KeyCode::A, true);
        assert_eq!(map.sample().axis, 0.0);

        map.update_key(KeyCode::D, false);
        assert_eq!(map.sample().axis, -1.0);
    }

    #[test]
    fn test_sample_jump_edges() {
        let mut map = InputMap::new();

        map.update_key(KeyCode::Space, true);
        let intent = map.sample();
        assert!(intent.jump_pressed);
        assert!(!intent.jump_released);

        // Held, not re-pressed
        map.end_frame();
        map.update_key(KeyCode::Space, true);
        let intent = map.sample();
        assert!(!intent.jump_pressed);
        assert!(!intent.jump_released);

        map.end_frame();
        map.update_key(KeyCode::Space, false);
        let intent = map.sample();
        assert!(!intent.jump_pressed);
        assert!(intent.jump_released);
    }

    #[test]
    fn test_secondary_key_samples_jump() {
        let mut map = InputMap::new();
        map.update_key(KeyCode::Z, true);
        assert!(map.sample().jump_pressed);
    }

    #[test]
    fn test_rebind_replaces_old_keys() {
        let mut map = InputMap::new();
        map.rebind(Action::Jump, KeyBinding::new(KeyCode::K));

        map.update_key(KeyCode::Space, true);
        assert!(!map.is_action_pressed(Action::Jump));

        map.update_key(KeyCode::K, true);
        assert!(map.is_action_pressed(Action::Jump));
    }

    #[test]
    fn test_intent_constructors() {
        assert_eq!(Intent::idle(), Intent::default());
        assert_eq!(Intent::run(-1.0).axis, -1.0);
        assert!(!Intent::run(1.0).jump_pressed);
    }
}
