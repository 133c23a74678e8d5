//=========================================================================
// Input Buffer
//
// Collects keyboard events between two frame boundaries.
//
// Responsibilities:
// - Store incoming key events in arrival order
// - Drop consecutive duplicates (e.g., OS key repeat slipping through)
// - Hand the whole frame's batch to the platform on `drain()`
//
// Notes:
// The buffer lives for the whole run and is emptied on every
// RedrawRequested; capacity is kept across frames.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================

pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for a busy frame to avoid reallocating mid-game.
    //
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Handling ---------------------------------------------------
    //
    // Appends a key event. A repeat of the event just before it is
    // ignored.
    //
    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's events, or `None` if nothing was buffered.
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.events.is_empty() {
            return None;
        }
        Some(self.events.drain(..).collect())
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn test_consecutive_duplicates_are_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyB));
        assert_eq!(buffer.len(), 2, "Duplicates should be ignored");
    }

    #[test]
    fn test_non_consecutive_repeats_are_kept() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_up(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyA));
        assert_eq!(buffer.len(), 3, "Press/release/press is a real sequence");
    }

    #[test]
    fn test_modifier_change_is_not_a_duplicate() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyS));
        buffer.push(key_down(KeyCode::KeyS).with_modifiers(Modifiers::CTRL));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_up(KeyCode::KeyA));

        let events = buffer.drain().unwrap();
        assert_eq!(events, vec![key_down(KeyCode::KeyA), key_up(KeyCode::KeyA)]);
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none(), "Empty buffer drains to None");
    }

    //--- Memory Retention -------------------------------------------------
    //
    // Ensures that `clear()` does not deallocate underlying storage,
    // preserving buffer capacity for reuse across frames.
    //
    #[test]
    fn test_clear_does_not_deallocate() {
        let mut buffer = InputBuffer::new();

        for i in 0..256 {
            let key = if i % 2 == 0 { KeyCode::KeyA } else { KeyCode::KeyB };
            buffer.push(key_down(key));
        }

        let cap_before = buffer.events.capacity();
        buffer.clear();

        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.events.capacity(), cap_before);
    }
}
