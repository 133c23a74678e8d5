//=========================================================================
// Game Events
//=========================================================================
//
// Domain notifications broadcast by the active game state.
//
// Fan-out order for a single notification:
//   host listener → game objects (registration order) → sound manager
//
//=========================================================================

//=== GameEvent ===========================================================

/// A broadcast domain signal raised by a game state.
///
/// Events are fire-and-forget and delivered synchronously to every
/// listener of the state that raised them. The host only reacts to
/// [`GameEvent::GameQuit`]; everything else is for the state's own
/// objects and sound bank.
///
/// ```
/// use keyboard_commander::prelude::*;
///
/// const PLAYER_FIRED: GameEvent = GameEvent::custom(1);
/// assert_ne!(PLAYER_FIRED, GameEvent::GameQuit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// Request to end the run loop after the current frame.
    GameQuit,

    /// Game-defined event identified by a numeric tag.
    Custom(u32),
}

impl GameEvent {
    /// Creates a game-defined event.
    #[inline]
    pub const fn custom(id: u32) -> Self {
        Self::Custom(id)
    }

    /// Returns `true` for the quit signal.
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::GameQuit)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
