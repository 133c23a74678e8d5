//=========================================================================
// Errors
//=========================================================================
//
// Error taxonomy of the engine.
//
// - AssetError: a named asset could not be resolved or decoded. Game
//   states never see it directly; the state core substitutes a fallback.
// - EngineError: everything the host surfaces to its caller.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

//=== AssetKind ===========================================================

/// Category of an asset, used in error messages and fallback lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Sound,
    Font,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Texture => write!(f, "texture"),
            Self::Sound => write!(f, "sound"),
            Self::Font => write!(f, "font"),
        }
    }
}

//=== AssetError ==========================================================

#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset with that name exists in the loader.
    #[error("missing {kind} asset `{name}`")]
    Missing { kind: AssetKind, name: String },

    /// The asset exists but its content could not be used.
    #[error("failed to decode {kind} asset `{name}`: {reason}")]
    Decode {
        kind: AssetKind,
        name: String,
        reason: String,
    },
}

impl AssetError {
    pub fn missing(kind: AssetKind, name: impl Into<String>) -> Self {
        Self::Missing {
            kind,
            name: name.into(),
        }
    }

    pub fn decode(kind: AssetKind, name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Decode {
            kind,
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

//=== LifecyclePhase ======================================================

/// Step of a game state's lifecycle, reported with state failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    LoadContent,
    Update,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadContent => write!(f, "load_content"),
            Self::Update => write!(f, "update"),
        }
    }
}

//=== EngineError =========================================================

#[derive(Debug, Error)]
pub enum EngineError {
    /// A state switch was rejected; the active state is unaffected.
    #[error("invalid state transition: {0}")]
    InvalidTransition(String),

    /// A game state failed inside one of its lifecycle steps.
    #[error("state `{state}` failed during {phase}: {message}")]
    State {
        state: &'static str,
        phase: LifecyclePhase,
        message: String,
    },

    /// A frame was requested before any state was switched in.
    #[error("no active game state")]
    NoActiveState,

    /// The presenter could not put the frame on screen.
    #[error("presentation failed: {0}")]
    Present(String),

    /// Window or event loop failure.
    #[error("platform error: {0}")]
    Platform(String),

    /// Invalid configuration values.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

impl EngineError {
    /// Convenience constructor for state failures.
    pub fn state(state: &'static str, phase: LifecyclePhase, message: impl fmt::Display) -> Self {
        Self::State {
            state,
            phase,
            message: message.to_string(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_error_display() {
        let err = AssetError::missing(AssetKind::Texture, "Player");
        assert_eq!(err.to_string(), "missing texture asset `Player`");
    }

    #[test]
    fn state_error_display() {
        let err = EngineError::state("Gameplay", LifecyclePhase::Update, "boom");
        assert_eq!(err.to_string(), "state `Gameplay` failed during update: boom");
    }

    #[test]
    fn asset_error_converts_into_engine_error() {
        let err: EngineError = AssetError::decode(AssetKind::Font, "Hud", "bad glyph size").into();
        assert!(matches!(err, EngineError::Asset(AssetError::Decode { .. })));
    }

    #[test]
    fn engine_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
        assert_error::<AssetError>();
    }
}
