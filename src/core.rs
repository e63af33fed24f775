// Core interfaces - Trait boundary to the emulation core and playback sinks
//
// The pacing engine does not emulate anything itself. It drives an emulation
// core through the EmulationCore trait and receives the core's output through
// the StepSink observer, which the core calls synchronously during a step.
// Video and audio delivery go through the VideoSink and AudioSink traits so
// sessions can be wired to a real window and sound device or to test doubles.

use crate::audio::AudioChunk;
use crate::display::{SCREEN_HEIGHT, SCREEN_PIXELS, SCREEN_WIDTH};
use crate::input::{Button, Player};

/// Errors reported by an emulation core while loading a ROM
#[derive(Debug)]
pub enum RomError {
    /// ROM bytes do not form a valid image
    Malformed(String),

    /// ROM is valid but uses a feature the core does not implement
    Unsupported(String),
}

impl std::fmt::Display for RomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RomError::Malformed(msg) => write!(f, "Malformed ROM: {}", msg),
            RomError::Unsupported(msg) => write!(f, "Unsupported ROM: {}", msg),
        }
    }
}

impl std::error::Error for RomError {}

/// Observer the emulation core drives synchronously during one step
///
/// Per logical step the core calls `video_frame` exactly once with the full
/// 256×240 frame in row-major order, and `audio_pair` zero or more times in
/// temporal order.
pub trait StepSink {
    /// Receive the completed video frame for this step
    ///
    /// `pixels` holds one packed pixel per screen position
    /// (low byte = R, next = G, next = B).
    fn video_frame(&mut self, pixels: &[u32]);

    /// Receive one stereo sample pair
    ///
    /// Samples are normalized floating-point amplitudes.
    fn audio_pair(&mut self, left: f32, right: f32);
}

/// The emulation core collaborator
///
/// Implementations advance exactly one video frame per `step` call and
/// deliver their output through the provided StepSink.
pub trait EmulationCore {
    /// Load a ROM from raw bytes
    ///
    /// # Returns
    /// Err with a descriptive message on malformed input; the core's previous
    /// state is retained on failure.
    fn load_rom(&mut self, bytes: &[u8]) -> Result<(), RomError>;

    /// Advance exactly one logical frame
    fn step(&mut self, sink: &mut dyn StepSink);

    /// Reset the core to its initial internal state
    fn reset(&mut self);

    /// Update one controller button
    fn set_button(&mut self, player: Player, button: Button, pressed: bool);
}

/// Rendering surface collaborator
///
/// Accepts a full 256×240×4-byte RGBA buffer once per logical frame. The
/// semantics are whole-surface overwrite; no partial updates.
pub trait VideoSink {
    /// Present one complete RGBA frame
    fn present(&mut self, rgba: &[u8]);
}

/// Audio output collaborator
///
/// Accepts fixed-size channel-separated chunks. Submission is asynchronous
/// and fire-and-forget; no completion signal is expected.
pub trait AudioSink {
    /// Submit one chunk for playback
    fn submit(&mut self, chunk: AudioChunk) -> Result<(), String>;
}

/// Built-in demo core producing a scrolling gradient and a 440 Hz tone
///
/// Stands in for a real emulation core so the whole pipeline (pacing,
/// conversion, queueing, flushing) can be exercised without one. Accepts any
/// non-empty byte sequence as a "ROM".
pub struct TestPatternCore {
    /// Frames stepped since the last reset
    frame_count: u64,

    /// Stereo sample pairs produced per step
    pairs_per_step: usize,

    /// Output sample rate used for tone phase
    sample_rate: f64,

    /// Current tone phase in radians
    phase: f64,

    /// Scratch frame reused across steps
    pixels: Vec<u32>,
}

impl TestPatternCore {
    /// Create a demo core producing `pairs_per_step` sample pairs per frame
    pub fn new(sample_rate: u32) -> Self {
        let sample_rate = sample_rate as f64;
        // One frame's worth of stereo pairs at the output rate
        let pairs_per_step = (sample_rate / 60.0) as usize;

        Self {
            frame_count: 0,
            pairs_per_step,
            sample_rate,
            phase: 0.0,
            pixels: vec![0; SCREEN_PIXELS],
        }
    }
}

impl EmulationCore for TestPatternCore {
    fn load_rom(&mut self, bytes: &[u8]) -> Result<(), RomError> {
        if bytes.is_empty() {
            return Err(RomError::Malformed("ROM is empty".to_string()));
        }

        Ok(())
    }

    fn step(&mut self, sink: &mut dyn StepSink) {
        let offset = self.frame_count as usize;
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                let r = ((x + offset) & 0xFF) as u32;
                let g = ((y + offset) & 0xFF) as u32;
                let b = ((x + y) & 0xFF) as u32;
                self.pixels[y * SCREEN_WIDTH + x] = r | (g << 8) | (b << 16);
            }
        }
        sink.video_frame(&self.pixels);

        let step = 440.0 * 2.0 * std::f64::consts::PI / self.sample_rate;
        for _ in 0..self.pairs_per_step {
            let sample = (self.phase.sin() * 0.2) as f32;
            sink.audio_pair(sample, sample);
            self.phase = (self.phase + step) % (2.0 * std::f64::consts::PI);
        }

        self.frame_count += 1;
    }

    fn reset(&mut self) {
        self.frame_count = 0;
        self.phase = 0.0;
    }

    fn set_button(&mut self, _player: Player, _button: Button, _pressed: bool) {
        // The pattern generator has no controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSink {
        frames: usize,
        pairs: usize,
        pixels_per_frame: usize,
    }

    impl StepSink for CountingSink {
        fn video_frame(&mut self, pixels: &[u32]) {
            self.frames += 1;
            self.pixels_per_frame = pixels.len();
        }

        fn audio_pair(&mut self, _left: f32, _right: f32) {
            self.pairs += 1;
        }
    }

    #[test]
    fn test_rom_error_messages() {
        let err = RomError::Malformed("bad header".to_string());
        assert_eq!(err.to_string(), "Malformed ROM: bad header");

        let err = RomError::Unsupported("mapper 42".to_string());
        assert_eq!(err.to_string(), "Unsupported ROM: mapper 42");
    }

    #[test]
    fn test_pattern_core_rejects_empty_rom() {
        let mut core = TestPatternCore::new(44_100);
        assert!(core.load_rom(&[]).is_err());
        assert!(core.load_rom(&[0x4E, 0x45, 0x53]).is_ok());
    }

    #[test]
    fn test_pattern_core_emits_one_frame_per_step() {
        let mut core = TestPatternCore::new(44_100);
        let mut sink = CountingSink {
            frames: 0,
            pairs: 0,
            pixels_per_frame: 0,
        };

        core.step(&mut sink);
        core.step(&mut sink);

        assert_eq!(sink.frames, 2);
        assert_eq!(sink.pixels_per_frame, SCREEN_PIXELS);
        // 44100 / 60 = 735 pairs per step
        assert_eq!(sink.pairs, 735 * 2);
    }

    #[test]
    fn test_pattern_core_reset_restarts_sequence() {
        let mut core = TestPatternCore::new(44_100);
        let mut sink = CountingSink {
            frames: 0,
            pairs: 0,
            pixels_per_frame: 0,
        };

        core.step(&mut sink);
        core.reset();
        assert_eq!(core.frame_count, 0);
    }
}
