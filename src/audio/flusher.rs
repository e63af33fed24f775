// Chunk flusher - Drains fixed-size chunks from the sample queue
//
// Playback hardware wants discrete, channel-separated buffers at a fixed
// size. The flusher extracts the oldest 4096 scalar samples (2048 stereo
// frames), deinterleaves them, and hands one chunk to the audio sink.
// Submission is fire-and-forget; a failed submit is logged, never retried.
//
// When fewer samples are queued than one chunk the flush is a silent no-op.
// Sustained underrun shows up as audible gaps, not as errors. Note that a
// chunk always takes a fixed-size prefix of the queue, so under timing jitter
// one chunk may span samples from two logical frames.

use super::queue::SampleQueue;
use crate::core::AudioSink;

/// Chunk size in scalar samples
pub const CHUNK_SAMPLES: usize = 4096;

/// Chunk size in stereo frames
pub const CHUNK_FRAMES: usize = CHUNK_SAMPLES / 2;

/// One fixed-size batch of audio, deinterleaved into channel buffers
pub struct AudioChunk {
    /// Left channel samples
    pub left: Vec<f32>,

    /// Right channel samples
    pub right: Vec<f32>,
}

impl AudioChunk {
    /// Number of stereo frames in this chunk
    pub fn frames(&self) -> usize {
        self.left.len()
    }
}

/// Drains fixed-size chunks from a sample queue into an audio sink
pub struct ChunkFlusher {
    /// Scalar samples consumed per flush
    chunk_samples: usize,
}

impl ChunkFlusher {
    /// Create a flusher with the standard chunk size
    pub fn new() -> Self {
        Self {
            chunk_samples: CHUNK_SAMPLES,
        }
    }

    /// Create a flusher with a custom chunk size in scalar samples
    ///
    /// # Panics
    /// Panics if the size is odd or zero
    pub fn with_chunk_size(chunk_samples: usize) -> Self {
        assert!(
            chunk_samples >= 2 && chunk_samples % 2 == 0,
            "Chunk size must be a positive even number of scalars"
        );

        Self { chunk_samples }
    }

    /// Scalar samples consumed per flush
    pub fn chunk_samples(&self) -> usize {
        self.chunk_samples
    }

    /// Flush one chunk if enough samples are queued
    ///
    /// Safe to call every tick. Consumes exactly `chunk_samples` scalars from
    /// the queue head on success; the remainder keeps its order. Returns true
    /// if a chunk was extracted, false on underrun.
    pub fn maybe_flush(&self, queue: &mut SampleQueue, sink: &mut dyn AudioSink) -> bool {
        if queue.len() < self.chunk_samples {
            return false;
        }

        let scalars = queue.take_front(self.chunk_samples);

        let frames = self.chunk_samples / 2;
        let mut left = Vec::with_capacity(frames);
        let mut right = Vec::with_capacity(frames);
        for pair in scalars.chunks_exact(2) {
            left.push(pair[0]);
            right.push(pair[1]);
        }

        // Best-effort playback: the consumed samples are gone either way
        if let Err(err) = sink.submit(AudioChunk { left, right }) {
            eprintln!("Audio chunk submission failed: {}", err);
        }

        true
    }
}

impl Default for ChunkFlusher {
    fn default() -> Self {
        Self::new()
    }
}
