//=========================================================================
// Input System
//=========================================================================
//
// Keyboard input from platform events to per-state commands.
//
// Architecture:
//   InputEvent → KeyboardState → KeyboardSnapshot → InputMapper → Command
//
// The host owns the KeyboardState and hands one snapshot per frame to the
// active game state, which runs it through its own mapper.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod keyboard;
mod mapper;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers};
pub use keyboard::{KeyboardSnapshot, KeyboardState};
pub use mapper::{Command, InputMapper, KeyBindings};
