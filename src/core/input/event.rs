//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level keyboard events.
//
// This module abstracts away platform-specific input (e.g. Winit) into a
// unified, engine-friendly format consumed by the keyboard state tracker.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    KeyboardState (processes events)
//         ↓
//    KeyboardSnapshot → InputMapper → Commands
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
///
/// Keys are totally ordered so that snapshots iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Used to distinguish key combinations like Ctrl+S from plain S. The
/// system does not distinguish between left/right variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift key held (either left or right).
    pub shift: bool,

    /// Ctrl key held (either left or right, Command on macOS).
    pub ctrl: bool,

    /// Alt key held (either left or right, Option on macOS).
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Alt only.
    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };

    /// Shift + Ctrl.
    pub const SHIFT_CTRL: Self = Self {
        shift: true,
        ctrl: true,
        alt: false,
    };
}

//=== InputEvent ==========================================================

/// Low-level keyboard event from the platform layer.
///
/// Events carry the key and the modifier state that was active when the
/// platform reported them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Unrecognized or unsupported event, ignored by the tracker.
    Unidentified,
}

impl InputEvent {
    /// Returns a new event with updated modifiers (consumes self).
    ///
    /// Has no effect on `Unidentified`.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. } | Self::KeyUp { modifiers: m, .. } => {
                *m = modifiers;
            }
            Self::Unidentified => {}
        }
        self
    }

    /// The key carried by the event, if any.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown { key, .. } | Self::KeyUp { key, .. } => Some(*key),
            Self::Unidentified => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    //=====================================================================
    // Equality Tests
    //=====================================================================

    #[test]
    fn equality_same_key_same_modifiers() {
        assert_eq!(key_down(KeyCode::KeyA), key_down(KeyCode::KeyA));
    }

    #[test]
    fn equality_same_key_different_modifiers() {
        let plain = key_down(KeyCode::KeyA);
        let ctrl = key_down(KeyCode::KeyA).with_modifiers(Modifiers::CTRL);
        assert_ne!(plain, ctrl);
    }

    #[test]
    fn equality_down_differs_from_up() {
        let up = InputEvent::KeyUp {
            key: KeyCode::KeyA,
            modifiers: Modifiers::NONE,
        };
        assert_ne!(key_down(KeyCode::KeyA), up);
    }

    //=====================================================================
    // Helpers
    //=====================================================================

    #[test]
    fn with_modifiers_ignores_unidentified() {
        let event = InputEvent::Unidentified.with_modifiers(Modifiers::ALT);
        assert_eq!(event, InputEvent::Unidentified);
    }

    #[test]
    fn key_accessor() {
        assert_eq!(key_down(KeyCode::Enter).key(), Some(KeyCode::Enter));
        assert_eq!(InputEvent::Unidentified.key(), None);
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn key_codes_are_ordered() {
        assert!(KeyCode::Digit0 < KeyCode::KeyA);
        assert!(KeyCode::KeyA < KeyCode::KeyZ);
    }
}
