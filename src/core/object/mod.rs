//=========================================================================
// Game Objects
//=========================================================================
//
// Renderable, updatable entities owned by a game state.
//
// A state registers objects with its `ObjectRegistry` and gets an
// `ObjectId` back. The registry keeps two orders:
// - registration order: update and notification fan-out
// - z-index order (stable): rendering
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::event::GameEvent;
use crate::core::geometry::Rect;
use crate::core::render::{Color, Renderer};
use crate::core::time::FrameTime;

//=== Module Declarations =================================================

mod registry;
mod sprite;
mod text;

//=== Public API ==========================================================

pub use registry::{ObjectId, ObjectRegistry};
pub use sprite::SpriteObject;
pub use text::TextObject;

//=== Constants ===========================================================

/// Outline color of the debug overlay.
pub const DEBUG_BOX_COLOR: Color = Color::rgb(255, 0, 255);

//=== AsAny ===============================================================

/// Upcast to `Any` for typed access through the registry.
///
/// Implemented for every `'static` type; game objects never implement it
/// by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== GameObject ==========================================================

/// Entity owned by exactly one game state.
///
/// Only [`position`](GameObject::position) and
/// [`render`](GameObject::render) are required. Bounding boxes feed the
/// debug overlay and default to none.
pub trait GameObject: AsAny {
    fn position(&self) -> Vec2;

    /// Draw order; lower values are drawn first.
    fn z_index(&self) -> i32 {
        0
    }

    fn bounding_boxes(&self) -> Vec<Rect> {
        Vec::new()
    }

    fn update(&mut self, _time: FrameTime) {}

    fn render(&self, renderer: &mut dyn Renderer);

    fn render_bounding_boxes(&self, renderer: &mut dyn Renderer) {
        for rect in self.bounding_boxes() {
            renderer.stroke_rect(rect, DEBUG_BOX_COLOR);
        }
    }

    /// Receives every event raised by the owning state.
    fn on_notify(&mut self, _event: &GameEvent) {}
}
