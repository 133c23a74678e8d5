//=========================================================================
// Content Manager
//=========================================================================
//
// Directory-backed asset loader.
//
// Layout under the content root:
//   <name>.png        texture, decoded to RGBA8
//   <name>.wav/.ogg   sound, kept encoded
//   <name>.font.toml  bitmap font descriptor
//
// Loaded assets are cached by name until `unload`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use super::{AssetLoader, Font, Sound, Texture};
use crate::core::geometry::Size;
use crate::error::{AssetError, AssetKind};

//=== Constants ===========================================================

const SOUND_EXTENSIONS: [&str; 2] = ["wav", "ogg"];

//=== FontDescriptor ======================================================

/// On-disk description of a bitmap font.
///
/// ```toml
/// atlas = "HudFontAtlas"
/// glyph_width = 8
/// glyph_height = 12
/// first_char = " "
/// columns = 16
/// ```
#[derive(Debug, Deserialize)]
struct FontDescriptor {
    /// Texture name of the glyph atlas, resolved like any other texture.
    atlas: String,
    glyph_width: u32,
    glyph_height: u32,
    #[serde(default = "default_first_char")]
    first_char: char,
    columns: u32,
}

fn default_first_char() -> char {
    ' '
}

//=== ContentManager ======================================================

pub struct ContentManager {
    root: PathBuf,
    textures: HashMap<String, Texture>,
    sounds: HashMap<String, Sound>,
    fonts: HashMap<String, Font>,
}

impl ContentManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: HashMap::new(),
            sounds: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of assets currently cached.
    pub fn cached(&self) -> usize {
        self.textures.len() + self.sounds.len() + self.fonts.len()
    }

    fn existing_file(&self, kind: AssetKind, name: &str, file_name: String) -> Result<PathBuf, AssetError> {
        let path = self.root.join(file_name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(AssetError::missing(kind, name))
        }
    }

    fn read(kind: AssetKind, name: &str, path: &Path) -> Result<Vec<u8>, AssetError> {
        fs::read(path).map_err(|e| AssetError::decode(kind, name, e))
    }
}

impl AssetLoader for ContentManager {
    fn load_texture(&mut self, name: &str) -> Result<Texture, AssetError> {
        if let Some(texture) = self.textures.get(name) {
            return Ok(texture.clone());
        }

        let path = self.existing_file(AssetKind::Texture, name, format!("{name}.png"))?;
        let bytes = Self::read(AssetKind::Texture, name, &path)?;

        let image = image::load_from_memory(&bytes)
            .map_err(|e| AssetError::decode(AssetKind::Texture, name, e))?
            .to_rgba8();

        let size = Size::new(image.width(), image.height());
        let texture = Texture::new(name, size, image.into_raw())?;

        debug!(target: "assets", "Loaded texture `{}` ({}x{})", name, size.width, size.height);
        self.textures.insert(name.to_string(), texture.clone());
        Ok(texture)
    }

    fn load_sound(&mut self, name: &str) -> Result<Sound, AssetError> {
        if let Some(sound) = self.sounds.get(name) {
            return Ok(sound.clone());
        }

        let path = SOUND_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
            .ok_or_else(|| AssetError::missing(AssetKind::Sound, name))?;

        let sound = Sound::new(name, Self::read(AssetKind::Sound, name, &path)?);

        debug!(target: "assets", "Loaded sound `{}` from {}", name, path.display());
        self.sounds.insert(name.to_string(), sound.clone());
        Ok(sound)
    }

    fn load_font(&mut self, name: &str) -> Result<Font, AssetError> {
        if let Some(font) = self.fonts.get(name) {
            return Ok(font.clone());
        }

        let path = self.existing_file(AssetKind::Font, name, format!("{name}.font.toml"))?;
        let text = fs::read_to_string(&path).map_err(|e| AssetError::decode(AssetKind::Font, name, e))?;
        let descriptor: FontDescriptor =
            toml::from_str(&text).map_err(|e| AssetError::decode(AssetKind::Font, name, e))?;

        let atlas = self.load_texture(&descriptor.atlas)?;
        let font = Font::new(
            name,
            atlas,
            Size::new(descriptor.glyph_width, descriptor.glyph_height),
            descriptor.first_char,
            descriptor.columns,
        )?;

        debug!(target: "assets", "Loaded font `{}` (atlas `{}`)", name, descriptor.atlas);
        self.fonts.insert(name.to_string(), font.clone());
        Ok(font)
    }

    fn unload(&mut self) {
        trace!(target: "assets", "Releasing {} cached assets from {}", self.cached(), self.root.display());
        self.textures.clear();
        self.sounds.clear();
        self.fonts.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        fs::write(dir.join(format!("{name}.png")), bytes).unwrap();
    }

    #[test]
    fn loads_and_caches_png_texture() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "Player", 3, 2);

        let mut content = ContentManager::new(dir.path());
        let texture = content.load_texture("Player").unwrap();

        assert_eq!(texture.size(), Size::new(3, 2));
        assert_eq!(texture.pixel(2, 1), Some([1, 2, 3, 255]));
        assert_eq!(content.cached(), 1);
    }

    #[test]
    fn missing_texture_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut content = ContentManager::new(dir.path());

        let err = content.load_texture("Nope").unwrap_err();
        assert!(matches!(err, AssetError::Missing { kind: AssetKind::Texture, .. }));
    }

    #[test]
    fn corrupt_texture_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Broken.png"), b"not a png").unwrap();

        let mut content = ContentManager::new(dir.path());
        let err = content.load_texture("Broken").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn sound_prefers_wav_then_ogg() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Beep.ogg"), b"ogg").unwrap();
        fs::write(dir.path().join("Boop.wav"), b"wav").unwrap();
        fs::write(dir.path().join("Boop.ogg"), b"ogg").unwrap();

        let mut content = ContentManager::new(dir.path());
        assert_eq!(content.load_sound("Beep").unwrap().data(), b"ogg");
        assert_eq!(content.load_sound("Boop").unwrap().data(), b"wav");
        assert!(content.load_sound("Silence").is_err());
    }

    #[test]
    fn font_descriptor_resolves_atlas() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "HudAtlas", 16, 8);
        fs::write(
            dir.path().join("Hud.font.toml"),
            "atlas = \"HudAtlas\"\nglyph_width = 4\nglyph_height = 4\nfirst_char = \"A\"\ncolumns = 4\n",
        )
        .unwrap();

        let mut content = ContentManager::new(dir.path());
        let font = content.load_font("Hud").unwrap();

        assert_eq!(font.glyph_size(), Size::new(4, 4));
        assert!(font.glyph_rect('H').is_some());
        assert!(font.glyph_rect('I').is_none());
    }

    #[test]
    fn oversized_font_descriptor_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "HugeAtlas", 4, 4);
        fs::write(
            dir.path().join("Huge.font.toml"),
            "atlas = \"HugeAtlas\"\nglyph_width = 65536\nglyph_height = 4\nfirst_char = \"A\"\ncolumns = 65536\n",
        )
        .unwrap();

        let mut content = ContentManager::new(dir.path());

        assert!(matches!(
            content.load_font("Huge"),
            Err(AssetError::Decode { kind: AssetKind::Font, .. })
        ));
    }

    #[test]
    fn unload_clears_cache() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "Tile", 1, 1);

        let mut content = ContentManager::new(dir.path());
        content.load_texture("Tile").unwrap();
        content.unload();

        assert_eq!(content.cached(), 0);
    }
}
