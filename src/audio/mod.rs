// Audio module - Sample queueing, chunk extraction and playback output
//
// This module provides:
// - A bounded interleaved stereo sample queue fed by the emulation core
// - Fixed-size chunk extraction with channel deinterleaving
// - Cross-platform audio output using cpal (behind the `audio` feature)
//
// The queue and flusher are plain data structures on the session's control
// flow; only the cpal output introduces a second thread, and it synchronizes
// through a mutex-guarded stream buffer.

pub mod flusher;
#[cfg(feature = "audio")]
pub mod output;
pub mod queue;

pub use flusher::{AudioChunk, ChunkFlusher, CHUNK_FRAMES, CHUNK_SAMPLES};
#[cfg(feature = "audio")]
pub use output::{CpalSink, OutputConfig};
pub use queue::{SampleQueue, DEFAULT_QUEUE_CAPACITY};
