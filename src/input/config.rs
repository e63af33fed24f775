// Input configuration - Serializable keyboard mapping
//
// Stores the keyboard mapping as key-code strings so it can live in the
// engine's TOML configuration file alongside the video and audio settings.

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use super::KeyboardMapping;

/// Serializable keyboard button mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardMappingConfig {
    /// Key for A button (as string, e.g., "KeyX")
    pub button_a: String,
    /// Key for B button
    pub button_b: String,
    /// Key for Select button
    pub select: String,
    /// Alternate key for Select button, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_alt: Option<String>,
    /// Key for Start button
    pub start: String,
    /// Key for Up on D-pad
    pub up: String,
    /// Key for Down on D-pad
    pub down: String,
    /// Key for Left on D-pad
    pub left: String,
    /// Key for Right on D-pad
    pub right: String,
}

impl KeyboardMappingConfig {
    /// Create the default keyboard mapping
    pub fn player1_default() -> Self {
        Self::from_mapping(&KeyboardMapping::player1_default())
    }

    /// Convert to a runtime KeyboardMapping
    ///
    /// # Returns
    /// Result containing KeyboardMapping or error message
    pub fn to_mapping(&self) -> Result<KeyboardMapping, String> {
        Ok(KeyboardMapping {
            button_a: string_to_keycode(&self.button_a)?,
            button_b: string_to_keycode(&self.button_b)?,
            select: string_to_keycode(&self.select)?,
            select_alt: self
                .select_alt
                .as_deref()
                .map(string_to_keycode)
                .transpose()?,
            start: string_to_keycode(&self.start)?,
            up: string_to_keycode(&self.up)?,
            down: string_to_keycode(&self.down)?,
            left: string_to_keycode(&self.left)?,
            right: string_to_keycode(&self.right)?,
        })
    }

    /// Create from a runtime KeyboardMapping
    pub fn from_mapping(mapping: &KeyboardMapping) -> Self {
        Self {
            button_a: keycode_to_string(mapping.button_a),
            button_b: keycode_to_string(mapping.button_b),
            select: keycode_to_string(mapping.select),
            select_alt: mapping.select_alt.map(keycode_to_string),
            start: keycode_to_string(mapping.start),
            up: keycode_to_string(mapping.up),
            down: keycode_to_string(mapping.down),
            left: keycode_to_string(mapping.left),
            right: keycode_to_string(mapping.right),
        }
    }
}

impl Default for KeyboardMappingConfig {
    fn default() -> Self {
        Self::player1_default()
    }
}

/// Convert KeyCode to string representation
fn keycode_to_string(key: KeyCode) -> String {
    format!("{:?}", key)
}

/// Convert string to KeyCode
///
/// Handles the keys a controller mapping is likely to use; anything else is
/// reported back as a configuration error.
fn string_to_keycode(s: &str) -> Result<KeyCode, String> {
    match s {
        "KeyA" => Ok(KeyCode::KeyA),
        "KeyB" => Ok(KeyCode::KeyB),
        "KeyC" => Ok(KeyCode::KeyC),
        "KeyD" => Ok(KeyCode::KeyD),
        "KeyE" => Ok(KeyCode::KeyE),
        "KeyF" => Ok(KeyCode::KeyF),
        "KeyG" => Ok(KeyCode::KeyG),
        "KeyH" => Ok(KeyCode::KeyH),
        "KeyI" => Ok(KeyCode::KeyI),
        "KeyJ" => Ok(KeyCode::KeyJ),
        "KeyK" => Ok(KeyCode::KeyK),
        "KeyL" => Ok(KeyCode::KeyL),
        "KeyM" => Ok(KeyCode::KeyM),
        "KeyN" => Ok(KeyCode::KeyN),
        "KeyO" => Ok(KeyCode::KeyO),
        "KeyP" => Ok(KeyCode::KeyP),
        "KeyQ" => Ok(KeyCode::KeyQ),
        "KeyR" => Ok(KeyCode::KeyR),
        "KeyS" => Ok(KeyCode::KeyS),
        "KeyT" => Ok(KeyCode::KeyT),
        "KeyU" => Ok(KeyCode::KeyU),
        "KeyV" => Ok(KeyCode::KeyV),
        "KeyW" => Ok(KeyCode::KeyW),
        "KeyX" => Ok(KeyCode::KeyX),
        "KeyY" => Ok(KeyCode::KeyY),
        "KeyZ" => Ok(KeyCode::KeyZ),
        "ArrowUp" => Ok(KeyCode::ArrowUp),
        "ArrowDown" => Ok(KeyCode::ArrowDown),
        "ArrowLeft" => Ok(KeyCode::ArrowLeft),
        "ArrowRight" => Ok(KeyCode::ArrowRight),
        "Enter" => Ok(KeyCode::Enter),
        "Space" => Ok(KeyCode::Space),
        "Escape" => Ok(KeyCode::Escape),
        "Backspace" => Ok(KeyCode::Backspace),
        "ShiftLeft" => Ok(KeyCode::ShiftLeft),
        "ShiftRight" => Ok(KeyCode::ShiftRight),
        "ControlLeft" => Ok(KeyCode::ControlLeft),
        "ControlRight" => Ok(KeyCode::ControlRight),
        "AltLeft" => Ok(KeyCode::AltLeft),
        "AltRight" => Ok(KeyCode::AltRight),
        _ => Err(format!("Unknown key code: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let config = KeyboardMappingConfig::player1_default();
        let mapping = config.to_mapping().expect("default must parse");

        assert_eq!(mapping.button_a, KeyCode::KeyX);
        assert_eq!(mapping.select, KeyCode::ShiftRight);
        assert_eq!(mapping.select_alt, Some(KeyCode::ShiftLeft));
        assert_eq!(mapping.up, KeyCode::ArrowUp);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut config = KeyboardMappingConfig::player1_default();
        config.button_a = "NotAKey".to_string();

        let err = config.to_mapping().unwrap_err();
        assert!(err.contains("NotAKey"));
    }

    #[test]
    fn test_mapping_config_round_trip() {
        let mapping = KeyboardMapping::player1_default();
        let config = KeyboardMappingConfig::from_mapping(&mapping);
        let restored = config.to_mapping().unwrap();

        assert_eq!(restored.button_a, mapping.button_a);
        assert_eq!(restored.select_alt, mapping.select_alt);
        assert_eq!(restored.start, mapping.start);
        assert_eq!(restored.right, mapping.right);
    }

    #[test]
    fn test_absent_alternate_select_deserializes_to_none() {
        let toml_str = r#"
            button_a = "KeyX"
            button_b = "KeyZ"
            select = "ShiftRight"
            start = "Enter"
            up = "ArrowUp"
            down = "ArrowDown"
            left = "ArrowLeft"
            right = "ArrowRight"
        "#;

        let config: KeyboardMappingConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.select_alt, None);
        assert_eq!(config.to_mapping().unwrap().select_alt, None);
    }

    #[test]
    fn test_toml_serialization() {
        let config = KeyboardMappingConfig::player1_default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let restored: KeyboardMappingConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize");

        assert_eq!(restored.button_a, "KeyX");
        assert_eq!(restored.select, "ShiftRight");
        assert_eq!(restored.select_alt.as_deref(), Some("ShiftLeft"));
    }
}
