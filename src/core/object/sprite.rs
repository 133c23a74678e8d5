//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::GameObject;
use crate::core::assets::Texture;
use crate::core::geometry::{Rect, Size};
use crate::core::render::Renderer;

//=== SpriteObject ========================================================

/// Texture drawn at a position, stretched to `size`.
#[derive(Debug, Clone)]
pub struct SpriteObject {
    texture: Texture,
    position: Vec2,
    size: Size,
    z_index: i32,
    visible: bool,
}

impl SpriteObject {
    /// Sprite at the texture's natural size.
    pub fn new(texture: Texture, position: Vec2) -> Self {
        let size = texture.size();
        Self {
            texture,
            position,
            size,
            z_index: 0,
            visible: true,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn dest(&self) -> Rect {
        Rect::new(
            self.position.x.round() as i32,
            self.position.y.round() as i32,
            self.size.width,
            self.size.height,
        )
    }
}

impl GameObject for SpriteObject {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn z_index(&self) -> i32 {
        self.z_index
    }

    fn bounding_boxes(&self) -> Vec<Rect> {
        vec![self.dest()]
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        if self.visible {
            renderer.draw_texture(&self.texture, self.dest());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{Canvas, Color};

    #[test]
    fn draws_texture_at_position() {
        let texture = Texture::solid("Red", Size::new(1, 1), Color::RED);
        let sprite = SpriteObject::new(texture, Vec2::new(2.0, 1.0)).with_size(Size::new(2, 2));
        let mut canvas = Canvas::new(Size::new(4, 4));

        sprite.render(&mut canvas);

        assert_eq!(canvas.pixel(2, 1), Some(Color::RED));
        assert_eq!(canvas.pixel(3, 2), Some(Color::RED));
        assert_eq!(canvas.pixel(1, 1), Some(Color::BLACK));
        assert_eq!(sprite.bounding_boxes(), vec![Rect::new(2, 1, 2, 2)]);
    }

    #[test]
    fn hidden_sprite_draws_nothing() {
        let texture = Texture::solid("Red", Size::new(1, 1), Color::RED);
        let mut sprite = SpriteObject::new(texture, Vec2::ZERO);
        sprite.set_visible(false);

        let mut canvas = Canvas::new(Size::new(1, 1));
        sprite.render(&mut canvas);

        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
    }
}
