//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

//=== Internal Dependencies ===============================================

use super::{AssetLoader, Font, Sound, Texture};
use crate::error::{AssetError, AssetKind};

//=== MemoryAssets ========================================================

/// In-memory asset store.
///
/// Contents are the source of truth rather than a cache, so `unload` keeps
/// them; it only bumps a counter tests can observe through
/// [`MemoryAssets::unload_counter`].
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    textures: HashMap<String, Texture>,
    sounds: HashMap<String, Sound>,
    fonts: HashMap<String, Font>,
    unloads: Arc<AtomicUsize>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a texture under its own name.
    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.textures.insert(texture.name().to_string(), texture);
        self
    }

    pub fn with_sound(mut self, sound: Sound) -> Self {
        self.sounds.insert(sound.name().to_string(), sound);
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.fonts.insert(font.name().to_string(), font);
        self
    }

    /// Shared handle counting `unload` calls on this store and its clones.
    pub fn unload_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.unloads)
    }
}

impl AssetLoader for MemoryAssets {
    fn load_texture(&mut self, name: &str) -> Result<Texture, AssetError> {
        self.textures
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::missing(AssetKind::Texture, name))
    }

    fn load_sound(&mut self, name: &str) -> Result<Sound, AssetError> {
        self.sounds
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::missing(AssetKind::Sound, name))
    }

    fn load_font(&mut self, name: &str) -> Result<Font, AssetError> {
        self.fonts
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::missing(AssetKind::Font, name))
    }

    fn unload(&mut self) {
        self.unloads.fetch_add(1, Ordering::SeqCst);
    }
}
