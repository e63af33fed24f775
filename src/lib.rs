// nes-pacer Library
// Frame pacing and audio/video synchronization core for emulation frontends

// Public modules
pub mod audio;
pub mod core;
pub mod display;
pub mod input;
pub mod rom;
pub mod session;

// Re-export main types for convenience
pub use audio::{AudioChunk, ChunkFlusher, SampleQueue, CHUNK_SAMPLES};
#[cfg(feature = "audio")]
pub use audio::{CpalSink, OutputConfig};
pub use core::{AudioSink, EmulationCore, RomError, StepSink, TestPatternCore, VideoSink};
pub use display::{convert, FrameBuffer, SharedFrameSink, WindowConfig};
pub use input::{Button, InputState, KeyboardMapping, Player};
pub use rom::{read_rom_file, RomFileError};
pub use session::{
    EngineConfig, FrameScheduler, SchedulerState, Session, SessionError, SessionState,
    TickOutcome, FRAME_INTERVAL_MS,
};
