//=========================================================================
// Game States
//=========================================================================
//
// One screen or mode of the game with its own input vocabulary and
// objects.
//
// A state is split in two:
// - `GameState`: the variant behaviour a concrete screen implements
// - `StateCore`: the shared machinery it composes and exposes through
//   `core()` / `core_mut()`
//
// The host drives every lifecycle step; states never tear themselves
// down, they only ask via `StateCore::switch_state`.
//
// Example:
// ```
// use keyboard_commander::prelude::*;
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum MenuCommand {
//     Quit,
// }
// impl Command for MenuCommand {}
//
// struct Menu {
//     core: StateCore,
//     bindings: KeyBindings<MenuCommand>,
// }
//
// impl GameState for Menu {
//     fn core(&self) -> &StateCore {
//         &self.core
//     }
//
//     fn core_mut(&mut self) -> &mut StateCore {
//         &mut self.core
//     }
//
//     fn set_input_mapper(&mut self) {
//         self.bindings = KeyBindings::new().bind_key(KeyCode::Escape, MenuCommand::Quit);
//     }
//
//     fn load_content(&mut self) -> Result<(), EngineError> {
//         Ok(())
//     }
//
//     fn handle_input(&mut self, keyboard: &KeyboardSnapshot, _time: FrameTime) {
//         for command in self.bindings.map(keyboard) {
//             match command {
//                 MenuCommand::Quit => self.core.notify_event(GameEvent::GameQuit),
//             }
//         }
//     }
//
//     fn update_game_state(&mut self, _time: FrameTime) -> Result<(), EngineError> {
//         Ok(())
//     }
// }
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;

//=== Internal Dependencies ===============================================

use crate::core::input::KeyboardSnapshot;
use crate::core::object::AsAny;
use crate::core::time::FrameTime;
use crate::error::EngineError;

//=== Module Declarations =================================================

mod state_core;
mod signals;

//=== Public API ==========================================================

pub use state_core::{Lifecycle, StateCore, FALLBACK_SOUND, FALLBACK_TEXTURE};
pub use signals::{StateSignal, StateSignals};

//=== GameState ===========================================================

/// Variant behaviour of a game state.
pub trait GameState: AsAny {
    /// Human-readable identity used in logs and errors.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn core(&self) -> &StateCore;

    fn core_mut(&mut self) -> &mut StateCore;

    /// Installs this state's input mapper. Called right after initialize.
    fn set_input_mapper(&mut self);

    /// Loads assets and registers objects. Called exactly once.
    fn load_content(&mut self) -> Result<(), EngineError>;

    /// Turns this frame's keyboard snapshot into commands and acts on them.
    fn handle_input(&mut self, keyboard: &KeyboardSnapshot, time: FrameTime);

    fn update_game_state(&mut self, time: FrameTime) -> Result<(), EngineError>;

    /// Optional hook run before the core releases objects and assets.
    fn unload_content(&mut self) {}
}

//=== Host-side Lifecycle =================================================

/// Concrete type of a boxed state.
pub(crate) fn state_type(state: &dyn GameState) -> TypeId {
    <dyn GameState as AsAny>::as_any(state).type_id()
}

/// Typed view of a boxed state.
pub(crate) fn downcast_state<T: GameState>(state: &dyn GameState) -> Option<&T> {
    <dyn GameState as AsAny>::as_any(state).downcast_ref::<T>()
}

/// State update followed by soundtrack rotation.
pub(crate) fn update(state: &mut dyn GameState, time: FrameTime) -> Result<(), EngineError> {
    state.update_game_state(time)?;
    state.core_mut().sound_mut().play_soundtrack();
    Ok(())
}

/// Runs the unload hook and releases the core, exactly once.
pub(crate) fn teardown(state: &mut dyn GameState) {
    if state.core().lifecycle() == Lifecycle::Unloaded {
        return;
    }
    state.unload_content();
    state.core_mut().unload();
}
