//=========================================================================
// Canvas
//=========================================================================
//
// Software RGBA8 render target at design resolution.
//
// Blending is straight alpha: fully opaque sources overwrite, fully
// transparent sources are skipped, everything in between is mixed.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::{Color, Renderer};
use crate::core::assets::{Font, Texture};
use crate::core::geometry::{Rect, Size};

//=== Canvas ==============================================================

pub struct Canvas {
    size: Size,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocates a canvas cleared to opaque black.
    pub fn new(size: Size) -> Self {
        let mut canvas = Self {
            size,
            pixels: vec![0; size.width as usize * size.height as usize * 4],
        };
        canvas.clear(Color::BLACK);
        canvas
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }

        let i = self.offset(x, y);
        Some(Color::rgba(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ))
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.size.width as usize + x as usize) * 4
    }

    /// Blends one pixel; callers guarantee `(x, y)` is inside the canvas.
    fn blend(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let alpha = src[3] as u32;
        if alpha == 0 {
            return;
        }

        let i = self.offset(x, y);
        let dst = &mut self.pixels[i..i + 4];

        if alpha == 255 {
            dst.copy_from_slice(&src);
            return;
        }

        let inv = 255 - alpha;
        for c in 0..3 {
            dst[c] = ((src[c] as u32 * alpha + dst[c] as u32 * inv + 127) / 255) as u8;
        }
        dst[3] = (alpha + (dst[3] as u32 * inv + 127) / 255).min(255) as u8;
    }

    /// Draws `src` (a region of `texture`) scaled into `dest`, optionally
    /// replacing texel color with `tint` while keeping coverage.
    fn blit_region(&mut self, texture: &Texture, src: Rect, dest: Rect, tint: Option<Color>) {
        if src.is_empty() {
            return;
        }
        let Some(visible) = dest.clip_to(self.size) else {
            return;
        };

        for y in visible.y..visible.y + visible.height as i32 {
            let ty = ((y - dest.y) as u64 * src.height as u64 / dest.height as u64) as u32;

            for x in visible.x..visible.x + visible.width as i32 {
                let tx = ((x - dest.x) as u64 * src.width as u64 / dest.width as u64) as u32;

                let Some(texel) = texture.pixel(src.x as u32 + tx, src.y as u32 + ty) else {
                    continue;
                };

                let color = match tint {
                    Some(tint) => [
                        tint.r,
                        tint.g,
                        tint.b,
                        ((texel[3] as u32 * tint.a as u32 + 127) / 255) as u8,
                    ],
                    None => texel,
                };

                self.blend(x as u32, y as u32, color);
            }
        }
    }
}

impl Renderer for Canvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        let rgba = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(visible) = rect.clip_to(self.size) else {
            return;
        };

        let rgba = color.to_array();
        for y in visible.y as u32..visible.y as u32 + visible.height {
            for x in visible.x as u32..visible.x as u32 + visible.width {
                self.blend(x, y, rgba);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }

        let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
        self.fill_rect(Rect::new(x, y, w, 1), color);
        self.fill_rect(Rect::new(x, y + h as i32 - 1, w, 1), color);

        if h > 2 {
            self.fill_rect(Rect::new(x, y + 1, 1, h - 2), color);
            self.fill_rect(Rect::new(x + w as i32 - 1, y + 1, 1, h - 2), color);
        }
    }

    fn draw_texture(&mut self, texture: &Texture, dest: Rect) {
        if texture.is_empty() || dest.is_empty() {
            return;
        }
        self.blit_region(texture, Rect::from_size(texture.size()), dest, None);
    }

    fn draw_text(&mut self, font: &Font, text: &str, position: Vec2, color: Color) {
        let glyph = font.glyph_size();
        let origin_x = position.x.round() as i32;
        let mut pen_y = position.y.round() as i32;

        for line in text.split('\n') {
            let mut pen_x = origin_x;

            for ch in line.chars() {
                if let Some(src) = font.glyph_rect(ch) {
                    let dest = Rect::new(pen_x, pen_y, glyph.width, glyph.height);
                    self.blit_region(font.atlas(), src, dest, Some(color));
                }
                pen_x += glyph.width as i32;
            }

            pen_y += glyph.height as i32;
        }
    }
}

//=== Presentation ========================================================

/// Nearest-neighbour scales `frame` into `region` of an RGBA8 buffer of
/// `target` size. Everything outside the region becomes opaque black.
pub fn blit_scaled(frame: &Canvas, target: &mut [u8], target_size: Size, region: Rect) {
    for px in target.chunks_exact_mut(4) {
        px.copy_from_slice(&[0, 0, 0, 255]);
    }

    let src = frame.size;
    if src.is_empty() || region.is_empty() {
        return;
    }
    let Some(visible) = region.clip_to(target_size) else {
        return;
    };

    let row_bytes = target_size.width as usize * 4;

    for y in visible.y..visible.y + visible.height as i32 {
        let sy = ((y - region.y) as u64 * src.height as u64 / region.height as u64) as u32;
        let row = y as usize * row_bytes;

        for x in visible.x..visible.x + visible.width as i32 {
            let sx = ((x - region.x) as u64 * src.width as u64 / region.width as u64) as u32;

            let s = frame.offset(sx, sy);
            let d = row + x as usize * 4;
            if let (Some(dst), Some(px)) = (target.get_mut(d..d + 4), frame.pixels.get(s..s + 4)) {
                dst.copy_from_slice(px);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
