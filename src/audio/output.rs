// Audio output - Playback through the system audio device using cpal
//
// Implements the AudioSink trait on top of a cpal output stream. cpal
// delivers its consumption callback on a dedicated audio thread, so chunks
// are handed over through a mutex-guarded stream buffer: `submit` interleaves
// a chunk into the buffer, the stream callback drains it. If the device
// falls behind and the buffer fills, excess samples are dropped; playback is
// best-effort by design.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use std::sync::{Arc, Mutex};

use super::flusher::AudioChunk;
use crate::core::AudioSink;

/// Audio output configuration
#[derive(Clone)]
pub struct OutputConfig {
    /// Sample rate in Hz (44100 or 48000)
    pub sample_rate: u32,

    /// Stream buffer size in milliseconds (affects latency)
    pub buffer_duration_ms: u32,
}

impl OutputConfig {
    /// Create default output configuration
    ///
    /// - Sample rate: 44.1 kHz
    /// - Buffer duration: 200 ms
    pub fn new() -> Self {
        Self {
            sample_rate: 44_100,
            buffer_duration_ms: 200,
        }
    }

    /// Set the sample rate
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the buffer duration in milliseconds
    pub fn with_buffer_duration(mut self, duration_ms: u32) -> Self {
        self.buffer_duration_ms = duration_ms;
        self
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Ring buffer shared between submit calls and the stream callback
struct StreamBuffer {
    buffer: Vec<f32>,
    read_pos: usize,
    write_pos: usize,
    count: usize,
}

impl StreamBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity],
            read_pos: 0,
            write_pos: 0,
            count: 0,
        }
    }

    /// Push a sample; returns false if the buffer is full
    fn push(&mut self, sample: f32) -> bool {
        if self.count >= self.buffer.len() {
            return false;
        }

        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        self.count += 1;
        true
    }

    /// Push a stereo pair, or nothing at all
    ///
    /// Returns false without writing either scalar unless there is room for
    /// both, so a partial pair can never skew channel parity.
    fn push_pair(&mut self, left: f32, right: f32) -> bool {
        if self.count + 2 > self.buffer.len() {
            return false;
        }

        self.push(left);
        self.push(right);
        true
    }

    /// Pop a sample; returns None if the buffer is empty
    fn pop(&mut self) -> Option<f32> {
        if self.count == 0 {
            return None;
        }

        let sample = self.buffer[self.read_pos];
        self.read_pos = (self.read_pos + 1) % self.buffer.len();
        self.count -= 1;
        Some(sample)
    }

    fn len(&self) -> usize {
        self.count
    }
}

/// cpal-backed audio sink
///
/// Owns the audio device and stream; the stream plays for the lifetime of
/// the sink, emitting silence when no samples are queued.
pub struct CpalSink {
    /// Output configuration
    config: OutputConfig,

    /// Audio device
    _device: Device,

    /// Audio stream
    _stream: Stream,

    /// Interleaved stereo samples awaiting the stream callback
    buffer: Arc<Mutex<StreamBuffer>>,
}

impl CpalSink {
    /// Create a new audio sink
    ///
    /// # Returns
    /// Result containing the CpalSink or an error message. Failure is
    /// expected on machines without an audio device; callers should degrade
    /// to video-only operation.
    pub fn new(config: OutputConfig) -> Result<Self, String> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or("No output device available")?;

        println!("Audio device: {}", device.name().unwrap_or_default());

        let stream_config = StreamConfig {
            channels: 2,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        // Capacity in scalars: duration × rate × 2 channels
        let capacity = ((config.buffer_duration_ms as f64 / 1000.0)
            * config.sample_rate as f64) as usize
            * 2;
        let buffer = Arc::new(Mutex::new(StreamBuffer::new(capacity)));

        let buffer_clone = Arc::clone(&buffer);
        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut buf = buffer_clone.lock().unwrap();

                    for sample in data.iter_mut() {
                        *sample = buf.pop().unwrap_or(0.0);
                    }
                },
                move |err| {
                    eprintln!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| format!("Failed to build audio stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("Failed to start audio stream: {}", e))?;

        println!("Audio output initialized: {} Hz, stereo", config.sample_rate);

        Ok(Self {
            config,
            _device: device,
            _stream: stream,
            buffer,
        })
    }

    /// Create a sink with the default configuration
    pub fn new_default() -> Result<Self, String> {
        Self::new(OutputConfig::new())
    }

    /// Get the output configuration
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Scalar samples currently awaiting playback
    pub fn pending_samples(&self) -> usize {
        self.buffer.lock().unwrap().len()
    }
}

impl AudioSink for CpalSink {
    /// Queue one chunk for playback
    ///
    /// The chunk's channels are re-interleaved into the stream buffer. If
    /// the buffer cannot hold the whole chunk the overflowing pairs are
    /// dropped whole; that is reported as an error but requires no action.
    fn submit(&mut self, chunk: AudioChunk) -> Result<(), String> {
        let mut buf = self.buffer.lock().unwrap();

        let mut dropped = 0usize;
        for (&left, &right) in chunk.left.iter().zip(chunk.right.iter()) {
            if !buf.push_pair(left, right) {
                dropped += 2;
            }
        }

        if dropped > 0 {
            return Err(format!("Stream buffer full, dropped {} samples", dropped));
        }
        Ok(())
    }
}
