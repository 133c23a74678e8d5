//=========================================================================
// Assets
//=========================================================================
//
// Asset handles and the loader contract game states resolve them through.
//
// Handles are cheap to clone: pixel and sample data sit behind `Arc`, so
// a state may hand the same texture to many objects.
//
// Loaders:
// - `ContentManager`: resolves names against a content directory
// - `MemoryAssets`: in-memory store for tests and headless runs
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Rect, Size};
use crate::core::render::Color;
use crate::error::{AssetError, AssetKind};

//=== Module Declarations =================================================

mod content;
mod memory;

//=== Public API ==========================================================

pub use content::ContentManager;
pub use memory::MemoryAssets;

//=== AssetLoader =========================================================

/// Named asset source owned by a game state.
///
/// Every call either produces the asset or fails with
/// [`AssetError::Missing`] / [`AssetError::Decode`]. Substituting
/// fallbacks is the caller's concern.
pub trait AssetLoader {
    fn load_texture(&mut self, name: &str) -> Result<Texture, AssetError>;

    fn load_sound(&mut self, name: &str) -> Result<Sound, AssetError>;

    fn load_font(&mut self, name: &str) -> Result<Font, AssetError>;

    /// Releases everything this loader handed out or cached.
    fn unload(&mut self);
}

//=== Texture =============================================================

/// Decoded RGBA8 image, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    name: String,
    size: Size,
    pixels: Arc<[u8]>,
}

impl Texture {
    /// Wraps raw RGBA8 pixels; the buffer must hold exactly
    /// `width * height * 4` bytes.
    pub fn new(name: impl Into<String>, size: Size, pixels: Vec<u8>) -> Result<Self, AssetError> {
        let name = name.into();
        let expected = size.width as usize * size.height as usize * 4;

        if pixels.len() != expected {
            return Err(AssetError::decode(
                AssetKind::Texture,
                name,
                format!(
                    "expected {} bytes for {}x{} RGBA, got {}",
                    expected,
                    size.width,
                    size.height,
                    pixels.len()
                ),
            ));
        }

        Ok(Self {
            name,
            size,
            pixels: pixels.into(),
        })
    }

    /// Texture filled with a single color.
    pub fn solid(name: impl Into<String>, size: Size, color: Color) -> Self {
        let count = size.width as usize * size.height as usize;
        let pixels: Vec<u8> = color.to_array().repeat(count);

        Self {
            name: name.into(),
            size,
            pixels: pixels.into(),
        }
    }

    /// Zero-sized placeholder. Drawing it is a no-op.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: Size::default(),
            pixels: Arc::from(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// RGBA value at `(x, y)`, or `None` outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }

        let offset = (y as usize * self.size.width as usize + x as usize) * 4;
        let px = self.pixels.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

//=== Sound ===============================================================

/// Encoded audio clip. Decoding is left to the `AudioOutput`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    name: String,
    data: Arc<[u8]>,
}

impl Sound {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Silent placeholder.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

//=== Font ================================================================

/// Fixed-cell bitmap font backed by a glyph atlas.
///
/// Glyphs are laid out left to right, top to bottom, starting at
/// `first_char`. The alpha channel of the atlas is the glyph coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    name: String,
    atlas: Texture,
    glyph_size: Size,
    first_char: u32,
    columns: u32,
}

impl Font {
    pub fn new(
        name: impl Into<String>,
        atlas: Texture,
        glyph_size: Size,
        first_char: char,
        columns: u32,
    ) -> Result<Self, AssetError> {
        let name = name.into();

        if glyph_size.is_empty() || columns == 0 {
            return Err(AssetError::decode(
                AssetKind::Font,
                name,
                "glyph size and column count must be non-zero",
            ));
        }

        let Some(row_width) = glyph_size.width.checked_mul(columns) else {
            return Err(AssetError::decode(
                AssetKind::Font,
                name,
                format!("{} columns of {} px overflow the atlas row", columns, glyph_size.width),
            ));
        };

        if atlas.size().width < row_width {
            return Err(AssetError::decode(
                AssetKind::Font,
                name,
                format!(
                    "atlas `{}` is {} px wide, {} columns of {} px do not fit",
                    atlas.name(),
                    atlas.size().width,
                    columns,
                    glyph_size.width
                ),
            ));
        }

        Ok(Self {
            name,
            atlas,
            glyph_size,
            first_char: first_char as u32,
            columns,
        })
    }

    /// Font without glyphs. Text drawn with it is invisible but still
    /// advances by the glyph cell.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            atlas: Texture::empty("EmptyFontAtlas"),
            glyph_size: Size::new(8, 8),
            first_char: ' ' as u32,
            columns: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn atlas(&self) -> &Texture {
        &self.atlas
    }

    pub fn glyph_size(&self) -> Size {
        self.glyph_size
    }

    /// Atlas cell of `ch`, or `None` if the atlas has no such glyph.
    pub fn glyph_rect(&self, ch: char) -> Option<Rect> {
        let index = (ch as u32).checked_sub(self.first_char)?;
        let column = index % self.columns;
        let row = index / self.columns;

        let x = column.checked_mul(self.glyph_size.width)?;
        let y = row.checked_mul(self.glyph_size.height)?;
        let rect = Rect::new(
            i32::try_from(x).ok()?,
            i32::try_from(y).ok()?,
            self.glyph_size.width,
            self.glyph_size.height,
        );

        Rect::from_size(self.atlas.size())
            .contains_rect(&rect)
            .then_some(rect)
    }

    /// Pixel extent of `text`, counting `\n` as a line break.
    pub fn measure(&self, text: &str) -> Size {
        let mut lines = 0u32;
        let mut widest = 0u32;

        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count() as u32);
        }

        Size::new(widest * self.glyph_size.width, lines * self.glyph_size.height)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
