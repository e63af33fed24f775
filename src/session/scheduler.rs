// Frame scheduler - Decides when the next logical frame is due
//
// Host callbacks fire at a rate that only approximates the target frame
// rate, and on most platforms exceeds or jitters around it. Instead of
// stepping the core once per callback, the scheduler compares the callback
// timestamp against the last frame timestamp and only declares a frame due
// once the target interval has elapsed. Timestamps come from the caller, so
// the scheduler never touches a wall clock and is testable with plain
// numbers.

/// Target interval between logical frames in milliseconds (60 Hz)
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not driving any frames
    Stopped,

    /// Frames are being paced
    Running,

    /// Pacing suspended, timing state retained
    Paused,
}

/// Paces logical frames against host callback timestamps
pub struct FrameScheduler {
    /// Current state
    state: SchedulerState,

    /// Timestamp of the last frame actually advanced, in milliseconds
    ///
    /// Updated only when a frame runs, not on every callback.
    last_tick_ms: f64,
}

impl FrameScheduler {
    /// Create a stopped scheduler
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Stopped,
            last_tick_ms: 0.0,
        }
    }

    /// Begin (or resume) pacing frames
    ///
    /// The last-tick timestamp resets to zero, so the first callback with a
    /// real timestamp normally runs a frame immediately.
    pub fn start(&mut self) {
        self.state = SchedulerState::Running;
        self.last_tick_ms = 0.0;
    }

    /// Suspend pacing
    ///
    /// Idempotent: pausing while already Paused or Stopped has no effect.
    pub fn pause(&mut self) {
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Paused;
        }
    }

    /// Resume pacing without resetting the frame timestamp
    pub fn resume(&mut self) {
        if self.state == SchedulerState::Paused {
            self.state = SchedulerState::Running;
        }
    }

    /// Stop pacing and clear timing state
    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
        self.last_tick_ms = 0.0;
    }

    /// Current state
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Check whether frames are currently being paced
    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Check whether a frame is due at the given callback timestamp
    ///
    /// Only meaningful while Running; in any other state this is false.
    pub fn frame_due(&self, now_ms: f64) -> bool {
        self.is_running() && (now_ms - self.last_tick_ms) >= FRAME_INTERVAL_MS
    }

    /// Record that a frame was advanced at the given timestamp
    pub fn mark_frame(&mut self, now_ms: f64) {
        self.last_tick_ms = now_ms;
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
