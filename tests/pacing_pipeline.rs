// End-to-end pipeline tests
//
// Drives a full session (core step -> pixel conversion -> present ->
// sample queue -> chunk flush) through the public API with simulated
// host-callback timestamps, no window or audio device required.

use std::cell::RefCell;
use std::rc::Rc;

use nes_pacer::core::{AudioSink, TestPatternCore, VideoSink};
use nes_pacer::display::FRAME_BYTES;
use nes_pacer::{AudioChunk, Session, SessionState, TickOutcome, CHUNK_SAMPLES};

/// Video sink counting whole-buffer presents
struct CountingVideo {
    presents: Rc<RefCell<u64>>,
}

impl VideoSink for CountingVideo {
    fn present(&mut self, rgba: &[u8]) {
        assert_eq!(rgba.len(), FRAME_BYTES);
        // Spot-check opacity: every pixel's alpha byte is 255
        assert_eq!(rgba[3], 0xFF);
        assert_eq!(rgba[FRAME_BYTES - 1], 0xFF);
        *self.presents.borrow_mut() += 1;
    }
}

/// Audio sink counting submitted chunks
struct CountingAudio {
    chunks: Rc<RefCell<u64>>,
}

impl AudioSink for CountingAudio {
    fn submit(&mut self, chunk: AudioChunk) -> Result<(), String> {
        assert_eq!(chunk.frames(), CHUNK_SAMPLES / 2);
        *self.chunks.borrow_mut() += 1;
        Ok(())
    }
}

struct Pipeline {
    session: Session,
    presents: Rc<RefCell<u64>>,
    chunks: Rc<RefCell<u64>>,
}

fn pipeline(with_audio: bool) -> Pipeline {
    let presents = Rc::new(RefCell::new(0));
    let chunks = Rc::new(RefCell::new(0));

    let video = CountingVideo {
        presents: Rc::clone(&presents),
    };
    let audio: Option<Box<dyn AudioSink>> = if with_audio {
        Some(Box::new(CountingAudio {
            chunks: Rc::clone(&chunks),
        }))
    } else {
        None
    };

    // 44.1 kHz: 735 stereo pairs (1470 scalars) per logical frame
    let core = TestPatternCore::new(44_100);

    Pipeline {
        session: Session::new(Box::new(core), Box::new(video), audio),
        presents,
        chunks,
    }
}

#[test]
fn five_ticks_advance_five_frames() {
    let mut p = pipeline(true);
    p.session.load_rom(&[0x4E, 0x45, 0x53, 0x1A]).unwrap();
    p.session.start().unwrap();

    let mut now = 0.0;
    for _ in 0..5 {
        now += 17.0;
        assert_eq!(p.session.tick(now), TickOutcome::Stepped);
    }

    assert_eq!(p.session.frames_advanced(), 5);
    assert_eq!(*p.presents.borrow(), 5);

    // 5 frames push 7350 scalars; one 4096-scalar chunk was flushed
    assert_eq!(*p.chunks.borrow(), 1);
    assert_eq!(p.session.queued_samples(), 7_350 - CHUNK_SAMPLES);
}

#[test]
fn fast_host_callbacks_do_not_outpace_frame_rate() {
    let mut p = pipeline(true);
    p.session.load_rom(&[1]).unwrap();
    p.session.start().unwrap();

    // Callbacks every 5 ms for one simulated second (a 200 Hz host)
    let mut now = 0.0;
    while now < 1_000.0 {
        now += 5.0;
        let outcome = p.session.tick(now);
        assert!(outcome.should_rearm());
    }

    // Frames land on 20 ms boundaries: 50 frames in one second
    assert_eq!(p.session.frames_advanced(), 50);
    assert_eq!(*p.presents.borrow(), 50);

    // 50 frames push 73,500 scalars; 17 whole chunks fit
    assert_eq!(*p.chunks.borrow(), 17);
    assert_eq!(p.session.queued_samples(), 73_500 - 17 * CHUNK_SAMPLES);
}

#[test]
fn pause_and_resume_mid_run() {
    let mut p = pipeline(true);
    p.session.load_rom(&[1]).unwrap();
    p.session.start().unwrap();

    p.session.tick(17.0);
    p.session.pause();
    assert_eq!(p.session.state(), SessionState::Paused);

    // Time passing while paused advances nothing
    assert_eq!(p.session.tick(500.0), TickOutcome::Idle);
    assert_eq!(p.session.frames_advanced(), 1);

    p.session.start().unwrap();
    assert_eq!(p.session.tick(517.0), TickOutcome::Stepped);
    assert_eq!(p.session.frames_advanced(), 2);
}

#[test]
fn video_only_session_presents_without_audio() {
    let mut p = pipeline(false);
    p.session.load_rom(&[1]).unwrap();
    p.session.start().unwrap();

    let mut now = 0.0;
    for _ in 0..10 {
        now += 17.0;
        p.session.tick(now);
    }

    assert_eq!(p.session.frames_advanced(), 10);
    assert_eq!(*p.presents.borrow(), 10);
    assert_eq!(p.session.queued_samples(), 0);
    assert_eq!(*p.chunks.borrow(), 0);
}

#[test]
fn reset_mid_run_keeps_session_running() {
    let mut p = pipeline(true);
    p.session.load_rom(&[1]).unwrap();
    p.session.start().unwrap();

    p.session.tick(17.0);
    p.session.reset().unwrap();

    assert_eq!(p.session.state(), SessionState::Running);
    assert_eq!(p.session.queued_samples(), 0);
    assert_eq!(p.session.tick(34.0), TickOutcome::Stepped);
}
