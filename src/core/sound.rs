//=========================================================================
// Sound Manager
//=========================================================================
//
// Per-state soundtrack playlist and event sound bank.
//
// The manager decides *what* plays; `AudioOutput` decides *how*. The
// default output is silent and only logs, which keeps headless hosts and
// tests free of audio devices.
//
// Playlist rotation:
//   play_soundtrack() each frame
//     ├─ nothing started yet → start current track
//     └─ current track stopped → advance (wrapping) and start next
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::assets::Sound;
use crate::core::event::GameEvent;

//=== AudioOutput =========================================================

/// Playback backend used by [`SoundManager`].
pub trait AudioOutput {
    /// Starts `track` as background music, replacing any current one.
    fn play_music(&mut self, track: &Sound);

    /// Returns `true` while background music is still playing.
    fn is_music_playing(&self) -> bool;

    /// Plays a one-shot effect over the music.
    fn play_effect(&mut self, sound: &Sound);

    /// Stops music and all effects.
    fn stop_all(&mut self);
}

//=== SilentOutput ========================================================

/// Output that plays nothing. Music counts as playing from the moment it
/// is started until `stop_all`.
#[derive(Debug, Default)]
pub struct SilentOutput {
    music: Option<String>,
}

impl SilentOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioOutput for SilentOutput {
    fn play_music(&mut self, track: &Sound) {
        debug!(target: "sound", "Music: `{}`", track.name());
        self.music = Some(track.name().to_string());
    }

    fn is_music_playing(&self) -> bool {
        self.music.is_some()
    }

    fn play_effect(&mut self, sound: &Sound) {
        trace!(target: "sound", "Effect: `{}`", sound.name());
    }

    fn stop_all(&mut self) {
        self.music = None;
    }
}

//=== SoundManager ========================================================

pub struct SoundManager {
    soundtracks: Vec<Sound>,
    current: usize,
    started: bool,
    bank: HashMap<GameEvent, Sound>,
    output: Box<dyn AudioOutput>,
}

impl SoundManager {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            soundtracks: Vec::new(),
            current: 0,
            started: false,
            bank: HashMap::new(),
            output,
        }
    }

    /// Manager with a [`SilentOutput`].
    pub fn silent() -> Self {
        Self::new(Box::new(SilentOutput::new()))
    }

    /// Appends a track to the playlist.
    pub fn add_soundtrack(&mut self, track: Sound) {
        self.soundtracks.push(track);
    }

    /// Binds an effect to an event; the latest binding wins.
    pub fn register_sound(&mut self, event: GameEvent, sound: Sound) {
        self.bank.insert(event, sound);
    }

    /// Track that is playing, or will play next.
    pub fn current_track(&self) -> Option<&Sound> {
        self.soundtracks.get(self.current)
    }

    /// Starts or rotates the playlist. Called once per frame after the
    /// state's own update.
    pub fn play_soundtrack(&mut self) {
        if self.soundtracks.is_empty() {
            return;
        }

        if self.started {
            if self.output.is_music_playing() {
                return;
            }
            self.current = (self.current + 1) % self.soundtracks.len();
        }

        self.started = true;
        let track = &self.soundtracks[self.current];
        debug!(target: "sound", "Starting soundtrack {} `{}`", self.current, track.name());
        self.output.play_music(track);
    }

    /// Plays the effect registered for `event`, if any.
    pub fn on_notify(&mut self, event: &GameEvent) {
        if let Some(sound) = self.bank.get(event) {
            self.output.play_effect(sound);
        }
    }

    /// Stops playback and rewinds the playlist.
    pub fn unload(&mut self) {
        self.output.stop_all();
        self.started = false;
        self.current = 0;
    }
}

impl Default for SoundManager {
    fn default() -> Self {
        Self::silent()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
