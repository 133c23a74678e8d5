//=========================================================================
// Keyboard State
//=========================================================================
//
// Low-level keyboard tracking with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_events() → held keys + frame deltas → snapshot()
//
// Frame lifecycle: process_events() → snapshot() → end_frame()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeSet, HashSet};

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers};

//=== KeyboardSnapshot ====================================================

/// Immutable view of the keyboard for one frame.
///
/// This is what a game state's input mapper sees. Keys are kept in
/// ordered sets so iteration (and anything derived from it) is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyboardSnapshot {
    down: BTreeSet<KeyCode>,
    pressed: BTreeSet<KeyCode>,
    modifiers: Modifiers,
}

impl KeyboardSnapshot {
    /// Snapshot with the given keys held and no frame transitions.
    ///
    /// Handy for driving mappers directly.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = KeyCode>,
    {
        Self {
            down: keys.into_iter().collect(),
            pressed: BTreeSet::new(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns a copy with the given modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    /// Returns `true` if the key went UP → DOWN during this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Held keys in ascending key order.
    pub fn keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.down.iter().copied()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }
}

//=== KeyboardState =======================================================

/// Tracks persistent state (keys held) and per-frame deltas.
pub struct KeyboardState {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    modifiers: Modifiers,

    //--- Frame Deltas (reset each frame via end_frame()) -----------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Creates a new tracker with no keys held.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            modifiers: Modifiers::NONE,
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Processes input events, updating internal state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Clears frame-specific deltas (pressed/released flags).
    pub fn end_frame(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
    }

    /// Releases every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keys_released_this_frame.extend(self.keys_down.drain());
        self.modifiers = Modifiers::NONE;
    }

    /// Captures the current state for the input mapper.
    pub fn snapshot(&self) -> KeyboardSnapshot {
        KeyboardSnapshot {
            down: self.keys_down.iter().copied().collect(),
            pressed: self.keys_pressed_this_frame.iter().copied().collect(),
            modifiers: self.modifiers,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                // Only mark as pressed if it wasn't already down
                if self.keys_down.insert(*key) {
                    self.keys_pressed_this_frame.insert(*key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                // Only mark as released if it was actually down
                if self.keys_down.remove(key) {
                    self.keys_released_this_frame.insert(*key);
                }
            }

            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN (one frame only).
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Returns the current modifier key state.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut keyboard = KeyboardState::new();

        keyboard.process_events(&[key_down(KeyCode::Space)]);
        assert!(keyboard.is_key_pressed(KeyCode::Space));
        assert!(keyboard.is_key_down(KeyCode::Space));

        keyboard.end_frame();
        assert!(!keyboard.is_key_pressed(KeyCode::Space));
        assert!(keyboard.is_key_down(KeyCode::Space));
    }

    #[test]
    fn duplicate_key_down_ignored() {
        let mut keyboard = KeyboardState::new();

        keyboard.process_events(&[key_down(KeyCode::KeyA)]);
        keyboard.end_frame();
        keyboard.process_events(&[key_down(KeyCode::KeyA)]);

        assert!(!keyboard.is_key_pressed(KeyCode::KeyA));
        assert!(keyboard.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn key_up_without_down_ignored() {
        let mut keyboard = KeyboardState::new();
        keyboard.process_events(&[key_up(KeyCode::KeyA)]);
        assert!(!keyboard.is_key_released(KeyCode::KeyA));
    }

    #[test]
    fn fast_tap_both_transitions_captured() {
        let mut keyboard = KeyboardState::new();
        keyboard.process_events(&[key_down(KeyCode::KeyG), key_up(KeyCode::KeyG)]);

        assert!(keyboard.is_key_pressed(KeyCode::KeyG));
        assert!(keyboard.is_key_released(KeyCode::KeyG));
        assert!(!keyboard.is_key_down(KeyCode::KeyG));
    }

    #[test]
    fn modifiers_updated_on_key_events() {
        let mut keyboard = KeyboardState::new();
        keyboard.process_events(&[InputEvent::KeyDown {
            key: KeyCode::KeyS,
            modifiers: Modifiers::CTRL,
        }]);
        assert_eq!(keyboard.modifiers(), Modifiers::CTRL);
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut keyboard = KeyboardState::new();
        keyboard.process_events(&[key_down(KeyCode::KeyA), key_down(KeyCode::KeyB)]);
        keyboard.end_frame();

        keyboard.release_all();

        assert!(!keyboard.is_key_down(KeyCode::KeyA));
        assert!(keyboard.is_key_released(KeyCode::KeyB));
        assert!(keyboard.snapshot().is_empty());
    }

    #[test]
    fn snapshot_reflects_held_and_pressed() {
        let mut keyboard = KeyboardState::new();
        keyboard.process_events(&[key_down(KeyCode::KeyH)]);
        keyboard.end_frame();
        keyboard.process_events(&[key_down(KeyCode::KeyG)]);

        let snapshot = keyboard.snapshot();
        assert!(snapshot.is_key_down(KeyCode::KeyG));
        assert!(snapshot.is_key_down(KeyCode::KeyH));
        assert!(snapshot.is_key_pressed(KeyCode::KeyG));
        assert!(!snapshot.is_key_pressed(KeyCode::KeyH));
    }

    #[test]
    fn snapshot_keys_are_ordered() {
        let snapshot = KeyboardSnapshot::from_keys([KeyCode::KeyZ, KeyCode::Enter, KeyCode::KeyA]);
        let keys: Vec<_> = snapshot.keys_down().collect();
        assert_eq!(keys, vec![KeyCode::KeyA, KeyCode::KeyZ, KeyCode::Enter]);
    }

    #[test]
    fn unidentified_events_ignored() {
        let mut keyboard = KeyboardState::new();
        keyboard.process_events(&[InputEvent::Unidentified]);
        assert!(keyboard.snapshot().is_empty());
    }
}
