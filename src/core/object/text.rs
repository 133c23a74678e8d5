//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::GameObject;
use crate::core::assets::Font;
use crate::core::geometry::Rect;
use crate::core::render::{Color, Renderer};

//=== TextObject ==========================================================

/// Bitmap-font label.
#[derive(Debug, Clone)]
pub struct TextObject {
    font: Font,
    text: String,
    position: Vec2,
    color: Color,
    z_index: i32,
}

impl TextObject {
    pub fn new(font: Font, text: impl Into<String>, position: Vec2) -> Self {
        Self {
            font,
            text: text.into(),
            position,
            color: Color::WHITE,
            z_index: 0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

impl GameObject for TextObject {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn z_index(&self) -> i32 {
        self.z_index
    }

    fn bounding_boxes(&self) -> Vec<Rect> {
        let extent = self.font.measure(&self.text);
        vec![Rect::new(
            self.position.x.round() as i32,
            self.position.y.round() as i32,
            extent.width,
            extent.height,
        )]
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw_text(&self.font, &self.text, self.position, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::Texture;
    use crate::core::geometry::Size;
    use crate::core::render::Canvas;

    fn block_font() -> Font {
        let atlas = Texture::solid("Atlas", Size::new(2, 2), Color::WHITE);
        Font::new("Block", atlas, Size::new(2, 2), 'X', 1).unwrap()
    }

    #[test]
    fn bounding_box_covers_text() {
        let label = TextObject::new(block_font(), "XX\nX", Vec2::new(3.0, 4.0));
        assert_eq!(label.bounding_boxes(), vec![Rect::new(3, 4, 4, 4)]);
    }

    #[test]
    fn renders_in_its_color() {
        let label = TextObject::new(block_font(), "X", Vec2::new(1.0, 1.0)).with_color(Color::RED);
        let mut canvas = Canvas::new(Size::new(4, 4));

        label.render(&mut canvas);

        assert_eq!(canvas.pixel(1, 1), Some(Color::RED));
        assert_eq!(canvas.pixel(2, 2), Some(Color::RED));
        assert_eq!(canvas.pixel(3, 3), Some(Color::BLACK));
    }

    #[test]
    fn set_text_changes_extent() {
        let mut label = TextObject::new(block_font(), "X", Vec2::ZERO);
        label.set_text("XXX");
        assert_eq!(label.text(), "XXX");
        assert_eq!(label.bounding_boxes()[0].width, 6);
    }
}
