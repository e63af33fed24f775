// Session module - Coordinates pacing, conversion, queueing and playback
//
// A Session owns the frame buffer, the sample queue and the scheduler, and
// is constructed with its collaborators injected: the emulation core and the
// video/audio sinks. All work runs on the single control flow of the host
// callback; a step only mutates state synchronously within one tick, so
// pausing between ticks never observes a half-applied step.

mod config;
mod scheduler;

pub use config::{AudioSettings, EngineConfig, RomSettings, VideoSettings};
pub use scheduler::{FrameScheduler, SchedulerState, FRAME_INTERVAL_MS};

use crate::audio::{ChunkFlusher, SampleQueue};
use crate::core::{AudioSink, EmulationCore, RomError, StepSink, VideoSink};
use crate::display::FrameBuffer;
use crate::input::{Button, Player};

/// Errors that can occur during session operations
#[derive(Debug)]
pub enum SessionError {
    /// The emulation core rejected the ROM bytes
    RomLoad(RomError),

    /// The operation requires a loaded ROM
    NoRomLoaded,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::RomLoad(e) => write!(f, "ROM load failed: {}", e),
            SessionError::NoRomLoaded => write!(f, "No ROM loaded"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<RomError> for SessionError {
    fn from(e: RomError) -> Self {
        SessionError::RomLoad(e)
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No ROM loaded yet
    Idle,

    /// ROM handed to the core, not running
    Loaded,

    /// Frames are being paced
    Running,

    /// Suspended; ROM and core state retained
    Paused,
}

/// Result of one host callback tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One logical frame was advanced
    Stepped,

    /// Frame budget not yet reached; no emulation work done
    Skipped,

    /// Session is not running; the host should stop re-arming
    Idle,
}

impl TickOutcome {
    /// Whether the host should arm the next callback
    pub fn should_rearm(self) -> bool {
        !matches!(self, TickOutcome::Idle)
    }
}

/// Receives core output during one step
struct SessionStepSink<'a> {
    frame: &'a mut FrameBuffer,
    samples: &'a mut SampleQueue,
    audio_enabled: bool,
}

impl StepSink for SessionStepSink<'_> {
    fn video_frame(&mut self, pixels: &[u32]) {
        self.frame.copy_packed(pixels);
    }

    fn audio_pair(&mut self, left: f32, right: f32) {
        // Without an audio sink the pushes are no-ops (video-only session)
        if self.audio_enabled {
            self.samples.push(left, right);
        }
    }
}

/// An emulation session with injected collaborators
pub struct Session {
    /// Emulation core being paced
    core: Box<dyn EmulationCore>,

    /// Rendering surface
    video: Box<dyn VideoSink>,

    /// Audio output; None degrades the session to video-only
    audio: Option<Box<dyn AudioSink>>,

    /// Frame buffer shared between core output and the video sink
    frame: FrameBuffer,

    /// Interleaved stereo sample queue
    samples: SampleQueue,

    /// Chunk extraction into the audio sink
    flusher: ChunkFlusher,

    /// Frame pacing state machine
    scheduler: FrameScheduler,

    /// Lifecycle state
    state: SessionState,

    /// Logical frames advanced since construction
    frames_advanced: u64,
}

impl Session {
    /// Create a session with the given collaborators
    ///
    /// # Arguments
    /// * `core` - The emulation core to drive
    /// * `video` - Rendering surface receiving whole frames
    /// * `audio` - Audio output, or None for video-only operation
    pub fn new(
        core: Box<dyn EmulationCore>,
        video: Box<dyn VideoSink>,
        audio: Option<Box<dyn AudioSink>>,
    ) -> Self {
        Self {
            core,
            video,
            audio,
            frame: FrameBuffer::new(),
            samples: SampleQueue::new(),
            flusher: ChunkFlusher::new(),
            scheduler: FrameScheduler::new(),
            state: SessionState::Idle,
            frames_advanced: 0,
        }
    }

    /// Create a session with a custom sample queue capacity
    pub fn with_queue_capacity(
        core: Box<dyn EmulationCore>,
        video: Box<dyn VideoSink>,
        audio: Option<Box<dyn AudioSink>>,
        queue_capacity: usize,
    ) -> Self {
        let mut session = Self::new(core, video, audio);
        session.samples = SampleQueue::with_capacity(queue_capacity);
        session
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Logical frames advanced since construction
    pub fn frames_advanced(&self) -> u64 {
        self.frames_advanced
    }

    /// Scalar samples currently queued
    pub fn queued_samples(&self) -> usize {
        self.samples.len()
    }

    /// Whether an audio sink is attached
    pub fn audio_enabled(&self) -> bool {
        self.audio.is_some()
    }

    /// Raw RGBA bytes of the most recent frame
    pub fn frame_bytes(&self) -> &[u8] {
        self.frame.as_bytes()
    }

    /// Hand raw ROM bytes to the emulation core
    ///
    /// On failure the error carries the core's message and the session stays
    /// in its prior state. On success the session becomes Loaded and any
    /// pending frame and audio data is discarded.
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        self.core.load_rom(bytes)?;

        self.samples.clear();
        self.frame.clear();
        self.scheduler.stop();
        self.state = SessionState::Loaded;
        Ok(())
    }

    /// Begin pacing frames
    ///
    /// Requires a loaded ROM; fails with NoRomLoaded otherwise, with no state
    /// transition. Restarting from Paused re-arms the scheduler.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Idle {
            return Err(SessionError::NoRomLoaded);
        }

        self.scheduler.start();
        self.state = SessionState::Running;
        Ok(())
    }

    /// Host callback entry point
    ///
    /// While Running: advances one logical frame if the frame budget has
    /// elapsed since the last advanced frame, presenting the frame buffer and
    /// flushing audio; otherwise performs no emulation work. The outcome
    /// tells the host whether to arm the next callback.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if self.state != SessionState::Running {
            return TickOutcome::Idle;
        }

        if !self.scheduler.frame_due(now_ms) {
            return TickOutcome::Skipped;
        }

        {
            let mut sink = SessionStepSink {
                frame: &mut self.frame,
                samples: &mut self.samples,
                audio_enabled: self.audio.is_some(),
            };
            self.core.step(&mut sink);
        }

        self.video.present(self.frame.as_bytes());

        if let Some(audio) = self.audio.as_deref_mut() {
            self.flusher.maybe_flush(&mut self.samples, audio);
        }

        self.scheduler.mark_frame(now_ms);
        self.frames_advanced += 1;
        TickOutcome::Stepped
    }

    /// Suspend pacing
    ///
    /// Idempotent: pausing an already paused or idle session has no effect
    /// and raises no failure. Subsequent ticks report Idle, which stops the
    /// host from re-arming.
    pub fn pause(&mut self) {
        self.scheduler.pause();
        if self.state == SessionState::Running {
            self.state = SessionState::Paused;
        }
    }

    /// Reset the emulation core to its initial state
    ///
    /// Requires a loaded ROM. Pending audio is discarded; the session's
    /// Running/Paused status is preserved.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Idle {
            return Err(SessionError::NoRomLoaded);
        }

        self.core.reset();
        self.samples.clear();
        Ok(())
    }

    /// Forward a controller button change to the core
    ///
    /// Dropped unless the session is Running.
    pub fn set_button(&mut self, player: Player, button: Button, pressed: bool) {
        if self.state == SessionState::Running {
            self.core.set_button(player, button, pressed);
        }
    }
}
