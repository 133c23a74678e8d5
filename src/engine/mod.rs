//=========================================================================
// Keyboard Commander Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder ──build()──> Engine ──run(initial)──> [window + host]
//         │                                                    │
//         ├─ with_title() / with_debug_overlay()               ├─ Platform (winit)
//         ├─ with_asset_root() / with_asset_loader()           └─ GameHost
//         └─ build_host(presenter) ──> GameHost (headless)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use crossbeam_channel::{bounded, Sender};
use log::info;

//=== Internal Dependencies ===============================================

use crate::config::EngineConfig;
use crate::core::assets::{AssetLoader, ContentManager};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::render::{Color, Presenter};
use crate::core::sound::{AudioOutput, SilentOutput};
use crate::core::state::GameState;
use crate::error::EngineError;
use crate::platform::Platform;

//=== Module Declarations =================================================

mod host;
mod scaling;

//=== Public API ==========================================================

pub use host::GameHost;
pub use scaling::compute_scale_region;

//=== HostServices ========================================================

/// Produces a fresh asset loader for every state the host activates.
pub type AssetLoaderFactory = Box<dyn Fn() -> Box<dyn AssetLoader>>;

/// Produces a fresh audio output for every state the host activates.
pub type AudioOutputFactory = Box<dyn Fn() -> Box<dyn AudioOutput>>;

/// Collaborators the host hands to each state at initialize.
pub struct HostServices {
    pub(crate) asset_loader: AssetLoaderFactory,
    pub(crate) audio_output: AudioOutputFactory,
}

impl HostServices {
    /// Content directory loader and silent audio.
    pub fn from_config(config: &EngineConfig) -> Self {
        let root = config.assets.root.clone();
        Self {
            asset_loader: Box::new(move || -> Box<dyn AssetLoader> {
                Box::new(ContentManager::new(root.clone()))
            }),
            audio_output: Box::new(|| -> Box<dyn AudioOutput> { Box::new(SilentOutput::new()) }),
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Design resolution**: 800x600
/// - **Asset loader**: [`ContentManager`] on `content/`
/// - **Audio**: [`SilentOutput`]
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use keyboard_commander::prelude::*;
/// # fn title_screen() -> Box<dyn GameState> { unimplemented!() }
///
/// EngineBuilder::new(640, 360)
///     .with_title("Keyboard Commander")
///     .with_debug_overlay(true)
///     .build()?
///     .run(title_screen())?;
/// # Ok::<(), EngineError>(())
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    asset_loader: Option<AssetLoaderFactory>,
    audio_output: Option<AudioOutputFactory>,
}

impl EngineBuilder {
    /// Creates a builder with default settings and the given design
    /// resolution.
    pub fn new(design_width: u32, design_height: u32) -> Self {
        let mut config = EngineConfig::default();
        config.window.design_width = design_width;
        config.window.design_height = design_height;
        Self::from_config(config)
    }

    /// Starts from a loaded configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            asset_loader: None,
            audio_output: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.window.title = title.into();
        self
    }

    /// Outline object bounding boxes in every state.
    pub fn with_debug_overlay(mut self, enabled: bool) -> Self {
        self.config.render.debug_overlay = enabled;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.config.render.clear_color = color;
        self
    }

    /// Content directory for the default asset loader.
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.assets.root = root.into();
        self
    }

    /// Sets the channel capacity for platform → host communication.
    ///
    /// Default: 128
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.config.input.channel_capacity = capacity;
        self
    }

    /// Replaces the default content directory loader.
    pub fn with_asset_loader<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn AssetLoader> + 'static,
    {
        self.asset_loader = Some(Box::new(factory));
        self
    }

    /// Replaces the default silent audio output.
    pub fn with_audio_output<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn AudioOutput> + 'static,
    {
        self.audio_output = Some(Box::new(factory));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates the configuration and builds the engine.
    pub fn build(self) -> Result<Engine, EngineError> {
        let (config, services) = self.finish()?;

        info!(
            "Building engine (design: {}x{}, channel: {})",
            config.window.design_width, config.window.design_height, config.input.channel_capacity
        );

        Ok(Engine { config, services })
    }

    /// Builds a host around `presenter` without opening a window.
    ///
    /// The returned sender is the platform side of the host's event
    /// channel; the host treats its disconnection as a window close.
    pub fn build_host<P: Presenter>(
        self,
        presenter: P,
    ) -> Result<(GameHost<P>, Sender<PlatformEvent>), EngineError> {
        let (config, services) = self.finish()?;
        let (tx, rx) = bounded(config.input.channel_capacity);

        Ok((GameHost::new(config, services, presenter, rx), tx))
    }

    fn finish(self) -> Result<(EngineConfig, HostServices), EngineError> {
        self.config.validate()?;

        let defaults = HostServices::from_config(&self.config);
        let services = HostServices {
            asset_loader: self.asset_loader.unwrap_or(defaults.asset_loader),
            audio_output: self.audio_output.unwrap_or(defaults.audio_output),
        };

        Ok((self.config, services))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::from_config(EngineConfig::default())
    }
}

//=== Engine ==============================================================

/// Windowed engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   └─► Platform (winit event loop)
///         ├─► InputProcessor → InputBuffer ─┐
///         │                                 │ PlatformEvent (bounded)
///         └─► RedrawRequested → GameHost ◄──┘
///                                 └─► pixels surface
/// ```
pub struct Engine {
    config: EngineConfig,
    services: HostServices,
}

impl Engine {
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Opens the window, activates `initial` and blocks until the game
    /// quits or the window is closed.
    ///
    /// # Errors
    ///
    /// Window creation failures, a failing `load_content`/update of any
    /// state, and presentation failures end the run with an error after
    /// the active state has been unloaded.
    pub fn run(self, initial: Box<dyn GameState>) -> Result<(), EngineError> {
        info!("Starting engine runtime (`{}`)", self.config.window.title);

        let (tx, rx) = bounded(self.config.input.channel_capacity);
        let platform = Platform::new(self.config, self.services, initial, tx, rx);
        let result = platform.run();

        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::MemoryAssets;
    use crate::core::geometry::Size;
    use crate::core::render::{HeadlessPresenter, Renderer};

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::default();
        assert_eq!(builder.config().design_size(), Size::new(800, 600));
        assert_eq!(builder.config().input.channel_capacity, 128);
        assert!(!builder.config().render.debug_overlay);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let builder = EngineBuilder::new(320, 180)
            .with_title("Test")
            .with_debug_overlay(true)
            .with_asset_root("assets")
            .with_clear_color(Color::BLACK)
            .with_channel_capacity(256);

        let config = builder.config();
        assert_eq!(config.design_size(), Size::new(320, 180));
        assert_eq!(config.window.title, "Test");
        assert!(config.render.debug_overlay);
        assert_eq!(config.assets.root, PathBuf::from("assets"));
        assert_eq!(config.render.clear_color, Color::BLACK);
        assert_eq!(config.input.channel_capacity, 256);
    }

    #[test]
    fn build_rejects_zero_design_size() {
        assert!(matches!(
            EngineBuilder::new(0, 600).build(),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn build_rejects_zero_channel_capacity() {
        let result = EngineBuilder::new(800, 600)
            .with_channel_capacity(0)
            .build_host(HeadlessPresenter::new(Size::new(1, 1)));
        assert!(result.is_err());
    }

    #[test]
    fn build_host_uses_presenter_size() {
        let (host, _tx) = EngineBuilder::new(4, 3)
            .with_asset_loader(|| Box::new(MemoryAssets::new()))
            .build_host(HeadlessPresenter::new(Size::new(8, 6)))
            .unwrap();

        assert_eq!(host.window_size(), Size::new(8, 6));
        assert_eq!(host.frame().size(), Size::new(4, 3));
        assert_eq!(host.active_kind(), None);
    }

    #[test]
    fn default_services_resolve_against_asset_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = EngineConfig::default();
        config.assets.root = dir.path().to_path_buf();

        let services = HostServices::from_config(&config);
        let mut loader = (services.asset_loader)();

        assert!(matches!(
            loader.load_texture("Missing"),
            Err(crate::error::AssetError::Missing { .. })
        ));
    }
}
