//=========================================================================
// State Core
//=========================================================================
//
// Shared machinery every game state composes: viewport, objects, sound,
// asset loader, debug flag, lifecycle and the signal channel to the host.
//
// Lifecycle:
// ```text
//   Created ──initialize──► Initialized ──load_content──► Loaded
//                                 │                          │
//                                 └────────► Unloaded ◄──────┘
// ```
// `Unloaded` is terminal; a state is never reused.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::signals::{StateSignal, StateSignals};
use super::GameState;
use crate::core::assets::{AssetLoader, Font, Sound, Texture};
use crate::core::event::GameEvent;
use crate::core::geometry::Size;
use crate::core::object::{GameObject, ObjectId, ObjectRegistry};
use crate::core::render::Renderer;
use crate::core::sound::{AudioOutput, SoundManager};
use crate::core::time::FrameTime;
use crate::error::EngineError;

//=== Constants ===========================================================

/// Texture substituted for any texture that fails to load.
pub const FALLBACK_TEXTURE: &str = "Empty";

/// Sound substituted for any sound that fails to load.
pub const FALLBACK_SOUND: &str = "EmptySound";

//=== Lifecycle ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Initialized,
    Loaded,
    Unloaded,
}

//=== StateCore ===========================================================

pub struct StateCore {
    viewport: Size,
    objects: ObjectRegistry,
    sound: SoundManager,
    assets: Option<Box<dyn AssetLoader>>,
    debug: bool,
    lifecycle: Lifecycle,
    signals: StateSignals,
}

impl StateCore {
    pub fn new() -> Self {
        Self {
            viewport: Size::default(),
            objects: ObjectRegistry::new(),
            sound: SoundManager::silent(),
            assets: None,
            debug: false,
            lifecycle: Lifecycle::Created,
            signals: StateSignals::default(),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Hands the state its viewport and collaborators.
    ///
    /// Only valid once, on a freshly created state.
    pub fn initialize(
        &mut self,
        viewport: Size,
        assets: Box<dyn AssetLoader>,
        audio: Box<dyn AudioOutput>,
    ) -> Result<(), EngineError> {
        if self.lifecycle != Lifecycle::Created {
            return Err(EngineError::InvalidTransition(format!(
                "cannot initialize a state that is {:?}",
                self.lifecycle
            )));
        }

        self.viewport = viewport;
        self.assets = Some(assets);
        self.sound = SoundManager::new(audio);
        self.lifecycle = Lifecycle::Initialized;
        Ok(())
    }

    pub(crate) fn mark_loaded(&mut self) {
        if self.lifecycle == Lifecycle::Initialized {
            self.lifecycle = Lifecycle::Loaded;
        }
    }

    /// Releases objects, sound and assets. Safe to call more than once.
    pub(crate) fn unload(&mut self) {
        if self.lifecycle == Lifecycle::Unloaded {
            return;
        }

        self.signals.unsubscribe();
        self.objects.clear();
        self.sound.unload();
        if let Some(assets) = self.assets.as_mut() {
            assets.unload();
        }
        self.assets = None;
        self.lifecycle = Lifecycle::Unloaded;
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub(crate) fn signals_mut(&mut self) -> &mut StateSignals {
        &mut self.signals
    }

    //--- Accessors --------------------------------------------------------

    /// Design resolution handed over at initialize.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.objects
    }

    pub fn sound(&self) -> &SoundManager {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut SoundManager {
        &mut self.sound
    }

    //--- Objects ----------------------------------------------------------

    pub fn add_object<T: GameObject>(&mut self, object: T) -> ObjectId {
        self.objects.add(Box::new(object))
    }

    /// Returns `true` if the object was registered.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        self.objects.remove(id).is_some()
    }

    /// Runs `update` on every object in registration order.
    pub fn update_objects(&mut self, time: FrameTime) {
        self.objects.update_all(time);
    }

    /// Draws every object in z order.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.objects.render(renderer, self.debug);
    }

    //--- Signals ----------------------------------------------------------

    /// Broadcasts `event`: host first, then objects in registration order,
    /// then the sound manager.
    pub fn notify_event(&mut self, event: GameEvent) {
        self.signals.send(StateSignal::Event(event));
        self.objects.notify_all(&event);
        self.sound.on_notify(&event);
    }

    /// Asks the host to replace this state with `next` after the frame.
    pub fn switch_state(&mut self, next: Box<dyn GameState>) {
        debug!(target: "state", "Requesting switch to `{}`", next.kind());
        self.signals.send(StateSignal::SwitchState(next));
    }

    //--- Assets -----------------------------------------------------------

    /// Loads a texture, substituting the fallback on failure.
    pub fn load_texture(&mut self, name: &str) -> Texture {
        let Some(assets) = self.assets.as_mut() else {
            warn!(target: "assets", "Texture `{}` requested without a loader", name);
            return Texture::empty(FALLBACK_TEXTURE);
        };

        assets.load_texture(name).unwrap_or_else(|err| {
            warn!(target: "assets", "{}; using `{}`", err, FALLBACK_TEXTURE);
            assets.load_texture(FALLBACK_TEXTURE).unwrap_or_else(|err| {
                warn!(target: "assets", "{}; using empty placeholder", err);
                Texture::empty(FALLBACK_TEXTURE)
            })
        })
    }

    /// Loads a sound, substituting the fallback on failure.
    pub fn load_sound(&mut self, name: &str) -> Sound {
        let Some(assets) = self.assets.as_mut() else {
            warn!(target: "assets", "Sound `{}` requested without a loader", name);
            return Sound::empty(FALLBACK_SOUND);
        };

        assets.load_sound(name).unwrap_or_else(|err| {
            warn!(target: "assets", "{}; using `{}`", err, FALLBACK_SOUND);
            assets.load_sound(FALLBACK_SOUND).unwrap_or_else(|err| {
                warn!(target: "assets", "{}; using empty placeholder", err);
                Sound::empty(FALLBACK_SOUND)
            })
        })
    }

    /// Loads a font, substituting an empty font on failure.
    pub fn load_font(&mut self, name: &str) -> Font {
        let Some(assets) = self.assets.as_mut() else {
            warn!(target: "assets", "Font `{}` requested without a loader", name);
            return Font::empty(name);
        };

        assets.load_font(name).unwrap_or_else(|err| {
            warn!(target: "assets", "{}; using empty font", err);
            Font::empty(name)
        })
    }
}

impl Default for StateCore {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::MemoryAssets;
    use crate::core::geometry::Rect;
    use crate::core::render::{Canvas, Color};
    use crate::core::sound::{AudioOutput, SilentOutput};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::Ordering;

    //--- Test Helpers -----------------------------------------------------

    fn initialized(assets: MemoryAssets) -> StateCore {
        let mut core = StateCore::new();
        core.initialize(Size::new(8, 8), Box::new(assets), Box::new(SilentOutput::new()))
            .unwrap();
        core
    }

    struct Listener(Rc<RefCell<Vec<GameEvent>>>);

    impl GameObject for Listener {
        fn position(&self) -> Vec2 {
            Vec2::ZERO
        }

        fn render(&self, renderer: &mut dyn Renderer) {
            renderer.fill_rect(Rect::new(0, 0, 1, 1), Color::WHITE);
        }

        fn on_notify(&mut self, event: &GameEvent) {
            self.0.borrow_mut().push(*event);
        }
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn initialize_only_once() {
        let mut core = initialized(MemoryAssets::new());
        assert_eq!(core.lifecycle(), Lifecycle::Initialized);
        assert_eq!(core.viewport(), Size::new(8, 8));

        let err = core
            .initialize(Size::new(1, 1), Box::new(MemoryAssets::new()), Box::new(SilentOutput::new()))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition(_)));
    }

    #[test]
    fn unloaded_core_cannot_be_reinitialized() {
        let mut core = initialized(MemoryAssets::new());
        core.unload();

        let result =
            core.initialize(Size::new(8, 8), Box::new(MemoryAssets::new()), Box::new(SilentOutput::new()));
        assert!(result.is_err());
        assert_eq!(core.lifecycle(), Lifecycle::Unloaded);
    }

    #[test]
    fn unload_is_idempotent_and_releases_assets() {
        let assets = MemoryAssets::new();
        let unloads = assets.unload_counter();
        let mut core = initialized(assets);
        core.add_object(Listener(Rc::default()));

        core.unload();
        core.unload();

        assert_eq!(unloads.load(Ordering::SeqCst), 1);
        assert!(core.objects().is_empty());
    }

    //--- Assets -----------------------------------------------------------

    #[test]
    fn missing_texture_uses_named_fallback() {
        let fallback = Texture::solid(FALLBACK_TEXTURE, Size::new(1, 1), Color::RED);
        let mut core = initialized(MemoryAssets::new().with_texture(fallback.clone()));

        assert_eq!(core.load_texture("Player"), fallback);
    }

    #[test]
    fn missing_fallback_uses_placeholder() {
        let mut core = initialized(MemoryAssets::new());

        let texture = core.load_texture("Player");
        assert!(texture.is_empty());

        let sound = core.load_sound("Jump");
        assert_eq!(sound.name(), FALLBACK_SOUND);
        assert!(sound.is_empty());
    }

    #[test]
    fn missing_sound_uses_named_fallback() {
        let mut core = initialized(MemoryAssets::new().with_sound(Sound::new(FALLBACK_SOUND, vec![7])));
        assert_eq!(core.load_sound("Jump").data(), &[7]);
    }

    #[test]
    fn missing_font_is_empty() {
        let mut core = initialized(MemoryAssets::new());
        let font = core.load_font("Hud");
        assert!(font.atlas().is_empty());
    }

    #[test]
    fn existing_assets_load_directly() {
        let texture = Texture::solid("Player", Size::new(2, 2), Color::WHITE);
        let mut core = initialized(MemoryAssets::new().with_texture(texture.clone()));
        assert_eq!(core.load_texture("Player"), texture);
    }

    //--- Signals ----------------------------------------------------------

    #[test]
    fn notify_reaches_host_and_objects() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut core = initialized(MemoryAssets::new());
        core.add_object(Listener(Rc::clone(&seen)));
        let host = core.signals_mut().subscribe();

        core.notify_event(GameEvent::custom(3));

        assert!(matches!(host.try_recv(), Ok(StateSignal::Event(GameEvent::Custom(3)))));
        assert_eq!(*seen.borrow(), vec![GameEvent::custom(3)]);
    }

    #[test]
    fn notify_without_subscriber_still_reaches_objects() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut core = initialized(MemoryAssets::new());
        core.add_object(Listener(Rc::clone(&seen)));

        core.notify_event(GameEvent::GameQuit);

        assert_eq!(*seen.borrow(), vec![GameEvent::GameQuit]);
    }

    struct NamedListener {
        name: &'static str,
        journal: Rc<RefCell<Vec<String>>>,
    }

    impl GameObject for NamedListener {
        fn position(&self) -> Vec2 {
            Vec2::ZERO
        }

        fn render(&self, _renderer: &mut dyn Renderer) {}

        fn on_notify(&mut self, _event: &GameEvent) {
            self.journal.borrow_mut().push(self.name.to_string());
        }
    }

    struct JournalOutput(Rc<RefCell<Vec<String>>>);

    impl AudioOutput for JournalOutput {
        fn play_music(&mut self, _track: &Sound) {}

        fn is_music_playing(&self) -> bool {
            false
        }

        fn play_effect(&mut self, _sound: &Sound) {
            self.0.borrow_mut().push("sound".to_string());
        }

        fn stop_all(&mut self) {}
    }

    #[test]
    fn notify_fans_out_host_then_objects_then_sound() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut core = StateCore::new();
        core.initialize(
            Size::new(8, 8),
            Box::new(MemoryAssets::new()),
            Box::new(JournalOutput(Rc::clone(&journal))),
        )
        .unwrap();

        let event = GameEvent::custom(7);
        core.sound_mut().register_sound(event, Sound::new("Chime", vec![1]));
        core.add_object(NamedListener { name: "o1", journal: Rc::clone(&journal) });
        core.add_object(NamedListener { name: "o2", journal: Rc::clone(&journal) });
        let host = core.signals_mut().subscribe();

        core.notify_event(event);

        assert!(matches!(host.try_recv(), Ok(StateSignal::Event(e)) if e == event));
        assert_eq!(*journal.borrow(), vec!["o1", "o2", "sound"]);
    }

    #[test]
    fn unload_unsubscribes() {
        let mut core = initialized(MemoryAssets::new());
        let host = core.signals_mut().subscribe();

        core.unload();
        core.notify_event(GameEvent::GameQuit);

        assert!(host.try_recv().is_err());
    }

    #[test]
    fn remove_object_by_handle() {
        let mut core = initialized(MemoryAssets::new());
        let id = core.add_object(Listener(Rc::default()));

        assert!(core.remove_object(id));
        assert!(!core.remove_object(id));
    }

    #[test]
    fn render_draws_objects() {
        let mut core = initialized(MemoryAssets::new());
        core.add_object(Listener(Rc::default()));

        let mut canvas = Canvas::new(Size::new(2, 2));
        core.render(&mut canvas);

        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
    }
}
