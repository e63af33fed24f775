// Pacing Benchmarks
// Performance benchmarks for the per-frame hot paths: pixel conversion
// and audio queue/flush throughput

use criterion::{criterion_group, criterion_main, Criterion};
use nes_pacer::core::AudioSink;
use nes_pacer::{AudioChunk, ChunkFlusher, FrameBuffer, SampleQueue, CHUNK_SAMPLES};
use std::hint::black_box;

struct NullSink;

impl AudioSink for NullSink {
    fn submit(&mut self, chunk: AudioChunk) -> Result<(), String> {
        black_box(chunk.frames());
        Ok(())
    }
}

/// Benchmark whole-frame packed-pixel conversion
fn bench_frame_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_conversion");

    let pixels: Vec<u32> = (0..nes_pacer::display::SCREEN_PIXELS)
        .map(|i| (i as u32).wrapping_mul(0x9E3779B9) & 0xFF_FFFF)
        .collect();

    group.bench_function("copy_packed_full_frame", |b| {
        let mut frame = FrameBuffer::new();
        b.iter(|| {
            frame.copy_packed(black_box(&pixels));
        });
    });

    group.bench_function("convert_single_pixel", |b| {
        b.iter(|| nes_pacer::convert(black_box(0x336699)));
    });

    group.finish();
}

/// Benchmark audio queue push and chunk flush
fn bench_audio_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("audio_path");

    group.bench_function("push_one_frame_of_pairs", |b| {
        let mut queue = SampleQueue::new();
        b.iter(|| {
            // 735 pairs is one 60 Hz frame at 44.1 kHz
            for i in 0..735 {
                queue.push(black_box(i as f32), black_box(-(i as f32)));
            }
            queue.clear();
        });
    });

    group.bench_function("flush_one_chunk", |b| {
        let flusher = ChunkFlusher::new();
        let mut sink = NullSink;
        b.iter(|| {
            let mut queue = SampleQueue::new();
            for i in 0..CHUNK_SAMPLES / 2 {
                queue.push(i as f32, -(i as f32));
            }
            flusher.maybe_flush(black_box(&mut queue), &mut sink);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_frame_conversion, bench_audio_path);
criterion_main!(benches);
