// Input module - Keyboard-to-controller mapping
//
// Maps physical keys to controller buttons. Key repeat makes the host deliver
// press events for keys that are already down, so the handler tracks held
// keys and only reports actual state changes. Forwarding button changes to a
// running session is the session's job; this module is pure mapping.

mod config;

pub use config::KeyboardMappingConfig;

use std::collections::HashSet;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Represents which player's controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    /// Player 1
    One,
    /// Player 2
    Two,
}

/// Controller button enum for mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// A button
    A,
    /// B button
    B,
    /// Select button
    Select,
    /// Start button
    Start,
    /// Up on D-pad
    Up,
    /// Down on D-pad
    Down,
    /// Left on D-pad
    Left,
    /// Right on D-pad
    Right,
}

/// Keyboard mapping configuration for a single player
#[derive(Debug, Clone)]
pub struct KeyboardMapping {
    /// Key for A button
    pub button_a: KeyCode,
    /// Key for B button
    pub button_b: KeyCode,
    /// Key for Select button
    pub select: KeyCode,
    /// Alternate key for Select button, if any
    pub select_alt: Option<KeyCode>,
    /// Key for Start button
    pub start: KeyCode,
    /// Key for Up on D-pad
    pub up: KeyCode,
    /// Key for Down on D-pad
    pub down: KeyCode,
    /// Key for Left on D-pad
    pub left: KeyCode,
    /// Key for Right on D-pad
    pub right: KeyCode,
}

impl KeyboardMapping {
    /// Create the default keyboard mapping for Player 1
    ///
    /// # Default Mappings
    /// - Arrow keys: D-pad
    /// - X: A button
    /// - Z: B button
    /// - Enter: Start
    /// - Either Shift: Select
    pub fn player1_default() -> Self {
        Self {
            button_a: KeyCode::KeyX,
            button_b: KeyCode::KeyZ,
            select: KeyCode::ShiftRight,
            select_alt: Some(KeyCode::ShiftLeft),
            start: KeyCode::Enter,
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
        }
    }

    /// Get the button for a given key code
    ///
    /// # Returns
    /// Some(Button) if the key is mapped to a button, None otherwise
    pub fn get_button(&self, key: KeyCode) -> Option<Button> {
        if key == self.button_a {
            Some(Button::A)
        } else if key == self.button_b {
            Some(Button::B)
        } else if key == self.select || Some(key) == self.select_alt {
            Some(Button::Select)
        } else if key == self.start {
            Some(Button::Start)
        } else if key == self.up {
            Some(Button::Up)
        } else if key == self.down {
            Some(Button::Down)
        } else if key == self.left {
            Some(Button::Left)
        } else if key == self.right {
            Some(Button::Right)
        } else {
            None
        }
    }
}

impl Default for KeyboardMapping {
    fn default() -> Self {
        Self::player1_default()
    }
}

/// Keyboard input state tracker
///
/// Tracks which keys are held so repeated press events (key repeat) produce
/// no duplicate button changes.
pub struct InputState {
    /// Active key mapping
    mapping: KeyboardMapping,

    /// Currently held keys
    held: HashSet<KeyCode>,
}

impl InputState {
    /// Create an input state with the default Player 1 mapping
    pub fn new() -> Self {
        Self::with_mapping(KeyboardMapping::player1_default())
    }

    /// Create an input state with a custom mapping
    pub fn with_mapping(mapping: KeyboardMapping) -> Self {
        Self {
            mapping,
            held: HashSet::new(),
        }
    }

    /// Handle a key press event
    ///
    /// # Returns
    /// Some(Button) if this press changed a mapped button's state,
    /// None for unmapped keys or keys that were already held
    pub fn handle_key_press(&mut self, key: PhysicalKey) -> Option<Button> {
        let PhysicalKey::Code(code) = key else {
            return None;
        };

        if !self.held.insert(code) {
            return None; // Already held, key repeat
        }

        self.mapping.get_button(code)
    }

    /// Handle a key release event
    ///
    /// # Returns
    /// Some(Button) if this release changed a mapped button's state,
    /// None for unmapped keys or keys that were not held
    pub fn handle_key_release(&mut self, key: PhysicalKey) -> Option<Button> {
        let PhysicalKey::Code(code) = key else {
            return None;
        };

        if !self.held.remove(&code) {
            return None;
        }

        self.mapping.get_button(code)
    }

    /// Check whether a key is currently held
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// Release all held keys (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
