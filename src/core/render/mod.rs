//=========================================================================
// Render Pipeline
//=========================================================================
//
// Fixed-resolution software rendering and scaled presentation.
//
// Architecture:
// ```text
//   GameState::render ──► Renderer (Canvas @ design resolution)
//                              │
//                              ▼
//   Presenter::present ──► backbuffer (window size, black bars)
//                          frame blitted into the scale region
// ```
//
// Game code only sees the `Renderer` trait; the host owns the canvas and
// the presenter and is the only one touching them outside `render`.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::assets::{Font, Texture};
use crate::core::geometry::{Rect, Size};

//=== Module Declarations =================================================

mod canvas;
mod presenter;

//=== Public API ==========================================================

pub use canvas::{blit_scaled, Canvas};
pub use presenter::{HeadlessPresenter, Presenter};

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const CORNFLOWER_BLUE: Self = Self::rgb(100, 149, 237);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

//=== Renderer Trait ======================================================

/// Drawing surface handed to game objects during `render`.
///
/// Coordinates are design-resolution pixels with a top-left origin.
/// Anything outside the surface is clipped.
pub trait Renderer {
    /// Surface dimensions.
    fn size(&self) -> Size;

    /// Fills the whole surface.
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// One-pixel outline, used by the debug overlay.
    fn stroke_rect(&mut self, rect: Rect, color: Color);

    /// Draws a texture stretched into `dest`.
    fn draw_texture(&mut self, texture: &Texture, dest: Rect);

    /// Draws a line of text with a bitmap font; `\n` starts a new line.
    fn draw_text(&mut self, font: &Font, text: &str, position: Vec2, color: Color);
}
