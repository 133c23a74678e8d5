//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use keyboard_commander::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::config::EngineConfig;
pub use crate::engine::{Engine, EngineBuilder, GameHost};
pub use crate::error::{AssetError, EngineError};

// Game states
pub use crate::core::event::GameEvent;
pub use crate::core::state::{GameState, Lifecycle, StateCore};
pub use crate::core::time::FrameTime;

// Input system
pub use crate::core::input::{Command, InputMapper, KeyBindings, KeyCode, KeyboardSnapshot, Modifiers};

// Objects and assets
pub use crate::core::assets::{Font, Sound, Texture};
pub use crate::core::object::{GameObject, ObjectId, SpriteObject, TextObject};

// Rendering
pub use crate::core::geometry::{Rect, Size};
pub use crate::core::render::{Color, HeadlessPresenter, Renderer};
pub use glam::Vec2;
