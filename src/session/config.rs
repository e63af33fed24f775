// Configuration management
//
// Handles engine configuration and settings persistence.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::input::KeyboardMappingConfig;

/// Default configuration file path
const CONFIG_FILE: &str = "pacer_config.toml";

/// Engine configuration
///
/// Stores all user-configurable settings for the pacing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Video settings
    pub video: VideoSettings,

    /// Audio settings
    pub audio: AudioSettings,

    /// Keyboard mapping
    pub input: KeyboardMappingConfig,

    /// ROM loading settings
    pub rom: RomSettings,
}

/// Video settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSettings {
    /// Window scale (1-8)
    pub scale: u32,

    /// Enable VSync
    pub vsync: bool,
}

/// Audio settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Enable audio output
    pub enabled: bool,

    /// Sample rate in Hz (44100 or 48000)
    pub sample_rate: u32,

    /// Sample queue capacity in scalar samples
    pub queue_capacity: usize,
}

/// ROM loading settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RomSettings {
    /// ROM file loaded automatically at startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoload: Option<PathBuf>,

    /// Start the session immediately after a successful autoload
    pub autostart: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            video: VideoSettings {
                scale: 3,
                vsync: true,
            },
            audio: AudioSettings {
                enabled: true,
                sample_rate: 44_100,
                queue_capacity: crate::audio::DEFAULT_QUEUE_CAPACITY,
            },
            input: KeyboardMappingConfig::player1_default(),
            rom: RomSettings {
                autoload: None,
                autostart: true,
            },
        }
    }
}

impl EngineConfig {
    /// Load configuration from file or create default
    ///
    /// If the configuration file doesn't exist, creates a default
    /// configuration and saves it to the file.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| {
            let config = Self::default();
            // Try to save the default config, but don't fail if we can't
            let _ = config.save();
            config
        })
    }

    /// Load configuration from file
    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(CONFIG_FILE)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(CONFIG_FILE, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.video.scale, 3);
        assert!(config.video.vsync);
        assert!(config.audio.enabled);
        assert_eq!(config.audio.sample_rate, 44_100);
        assert!(config.rom.autoload.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized: EngineConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize");

        assert_eq!(config.video.scale, deserialized.video.scale);
        assert_eq!(config.audio.sample_rate, deserialized.audio.sample_rate);
        assert_eq!(config.input.button_a, deserialized.input.button_a);
    }

    #[test]
    fn test_autoload_path_round_trips() {
        let mut config = EngineConfig::default();
        config.rom.autoload = Some(PathBuf::from("games/demo.nes"));

        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: EngineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            deserialized.rom.autoload,
            Some(PathBuf::from("games/demo.nes"))
        );
    }
}
