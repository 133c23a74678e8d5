//=========================================================================
// Engine Configuration
//=========================================================================
//
// TOML-backed settings for the host and platform layer.
//
// Every field has a default, so a config file only needs the values it
// wants to change:
//
// ```toml
// [window]
// title = "Keyboard Commander"
// design_width = 640
// design_height = 360
//
// [render]
// debug_overlay = true
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Size;
use crate::core::render::Color;
use crate::error::EngineError;

//=== Sections ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,

    /// Fixed logical resolution all content is rendered at.
    pub design_width: u32,
    pub design_height: u32,

    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Keyboard Commander".to_string(),
            design_width: 800,
            design_height: 600,
            resizable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Draw object bounding boxes before each object.
    pub debug_overlay: bool,

    /// Background of the design-resolution target.
    pub clear_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            debug_overlay: false,
            clear_color: Color::CORNFLOWER_BLUE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory the content loader resolves asset names against.
    pub root: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("content"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Capacity of the platform → host event channel.
    pub channel_capacity: usize,

    /// Upper bound of platform events folded into a single frame.
    pub max_events_per_frame: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 128,
            max_events_per_frame: 100,
        }
    }
}

//=== EngineConfig ========================================================

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub assets: AssetConfig,
    pub input: InputConfig,
}

impl EngineConfig {
    /// Reads and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(target: "host", "Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants the host relies on.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.design_size().is_empty() {
            return Err(EngineError::Config(format!(
                "design resolution must be non-zero, got {}x{}",
                self.window.design_width, self.window.design_height
            )));
        }

        if self.input.channel_capacity == 0 {
            return Err(EngineError::Config(
                "input channel capacity must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn design_size(&self) -> Size {
        Size::new(self.window.design_width, self.window.design_height)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.design_size(), Size::new(800, 600));
        assert!(!config.render.debug_overlay);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [window]
            design_width = 640
            design_height = 360

            [render]
            debug_overlay = true
            "#,
        )
        .unwrap();

        assert_eq!(config.design_size(), Size::new(640, 360));
        assert!(config.render.debug_overlay);
        assert_eq!(config.window.title, "Keyboard Commander");
        assert_eq!(config.input.channel_capacity, 128);
    }

    #[test]
    fn clear_color_parses() {
        let config = EngineConfig::from_toml_str(
            r#"
            [render]
            clear_color = { r = 10, g = 20, b = 30, a = 255 }
            "#,
        )
        .unwrap();

        assert_eq!(config.render.clear_color, Color::rgb(10, 20, 30));
    }

    #[test]
    fn zero_design_size_is_rejected() {
        let err = EngineConfig::from_toml_str("[window]\ndesign_width = 0\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn zero_channel_capacity_is_rejected() {
        let err = EngineConfig::from_toml_str("[input]\nchannel_capacity = 0\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = EngineConfig::from_toml_str("[window\n").unwrap_err();
        assert!(matches!(err, EngineError::Toml(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[assets]\nroot = \"data\"").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.assets.root, PathBuf::from("data"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = EngineConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
