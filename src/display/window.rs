// Window module - Hosts the callback loop that drives a session
//
// Window redraws are the host callback: every RedrawRequested event calls
// `session.tick(now)` with a millisecond timestamp and then requests the
// next redraw, which re-arms the loop. The session decides whether the
// frame budget has elapsed; the window just presents whatever frame the
// session produced last.

use super::framebuffer::{FRAME_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::core::{AudioSink, EmulationCore, VideoSink};
use crate::input::{InputState, Player};
use crate::session::{EngineConfig, Session};
use pixels::{Pixels, SurfaceTexture};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Window configuration
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Scale factor (1x-8x)
    pub scale: u32,
    /// Whether to enable VSync
    pub vsync: bool,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    ///
    /// Default: 3x scale, VSync enabled
    pub fn new() -> Self {
        Self {
            scale: 3,
            vsync: true,
        }
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8);
        self
    }

    /// Set VSync enabled or disabled
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Get the window width in pixels
    pub fn window_width(&self) -> u32 {
        SCREEN_WIDTH as u32 * self.scale
    }

    /// Get the window height in pixels
    pub fn window_height(&self) -> u32 {
        SCREEN_HEIGHT as u32 * self.scale
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Video sink backed by a shared RGBA buffer
///
/// The session presents into the buffer on its control flow; the window
/// copies it out when it blits. Cloning shares the same buffer.
#[derive(Clone)]
pub struct SharedFrameSink {
    frame: Arc<Mutex<Vec<u8>>>,
}

impl SharedFrameSink {
    /// Create a sink initialized to opaque black
    pub fn new() -> Self {
        let mut frame = vec![0u8; FRAME_BYTES];
        for alpha in frame.iter_mut().skip(3).step_by(4) {
            *alpha = 0xFF;
        }
        Self {
            frame: Arc::new(Mutex::new(frame)),
        }
    }

    /// Copy the latest frame into `dest`
    ///
    /// # Panics
    /// Panics if `dest` is not exactly one frame long
    pub fn copy_to(&self, dest: &mut [u8]) {
        let frame = self.frame.lock().unwrap();
        dest.copy_from_slice(&frame);
    }
}

impl Default for SharedFrameSink {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoSink for SharedFrameSink {
    fn present(&mut self, rgba: &[u8]) {
        let mut frame = self.frame.lock().unwrap();
        frame.copy_from_slice(rgba);
    }
}

/// Window hosting a running session
struct SessionWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    session: Session,
    shared_frame: SharedFrameSink,
    input: InputState,
    started_at: Instant,
}

impl SessionWindow {
    fn new(config: WindowConfig, session: Session, shared_frame: SharedFrameSink, input: InputState) -> Self {
        Self {
            window: None,
            pixels: None,
            config,
            session,
            shared_frame,
            input,
            started_at: Instant::now(),
        }
    }

    /// Milliseconds since the window was created
    fn now_ms(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64() * 1000.0
    }

    /// Blit the session's latest frame to the surface
    fn render(&mut self) -> Result<(), pixels::Error> {
        if let Some(pixels) = &mut self.pixels {
            self.shared_frame.copy_to(pixels.frame_mut());
            pixels.render()?;
        }
        Ok(())
    }
}

impl ApplicationHandler for SessionWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(format!(
                "nes-pacer - {}x{}",
                self.config.window_width(),
                self.config.window_height()
            ))
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = event_loop
            .create_window(window_attributes)
            .expect("Failed to create window");

        let window = Arc::new(window);
        let window_size = window.inner_size();

        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        let pixels = Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface_texture)
            .expect("Failed to create pixel buffer");

        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                println!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if let Some(button) = self.input.handle_key_press(physical_key) {
                        self.session.set_button(Player::One, button, true);
                    }
                }
                ElementState::Released => {
                    if let Some(button) = self.input.handle_key_release(physical_key) {
                        self.session.set_button(Player::One, button, false);
                    }
                }
            },
            WindowEvent::Focused(false) => {
                // Keys released while unfocused never deliver release events
                self.input.release_all();
            }
            WindowEvent::RedrawRequested => {
                let now = self.now_ms();
                let outcome = self.session.tick(now);

                if outcome == crate::session::TickOutcome::Stepped {
                    if let Err(err) = self.render() {
                        eprintln!("Render error: {}", err);
                        event_loop.exit();
                    }
                }

                // Re-arm the host callback
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Build a session from the engine configuration and run it in a window
///
/// Audio initialization failure is non-fatal: a warning is printed and the
/// session runs video-only. ROM bytes, when given, are loaded before the
/// window opens; with `autostart` set the session starts immediately.
///
/// # Arguments
/// * `config` - Engine configuration
/// * `core` - The emulation core to drive
/// * `rom` - ROM bytes to load before starting, if any
pub fn run_session(
    config: &EngineConfig,
    core: Box<dyn EmulationCore>,
    rom: Option<Vec<u8>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let window_config = WindowConfig::new()
        .with_scale(config.video.scale)
        .with_vsync(config.video.vsync);

    let shared_frame = SharedFrameSink::new();

    let audio_sink: Option<Box<dyn AudioSink>> = build_audio_sink(config);
    if audio_sink.is_none() {
        println!("Running video-only");
    }

    let mut session = Session::with_queue_capacity(
        core,
        Box::new(shared_frame.clone()),
        audio_sink,
        config.audio.queue_capacity,
    );

    if let Some(bytes) = rom {
        session.load_rom(&bytes)?;
        println!("ROM loaded ({} bytes)", bytes.len());

        if config.rom.autostart {
            session.start()?;
        }
    }

    let mapping = config
        .input
        .to_mapping()
        .map_err(|e| format!("Invalid input configuration: {}", e))?;
    let input = InputState::with_mapping(mapping);

    let event_loop = EventLoop::new()?;
    if window_config.vsync {
        event_loop.set_control_flow(ControlFlow::Wait);
    } else {
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    println!("Starting session window...");
    println!("  Resolution: {}x{}", SCREEN_WIDTH, SCREEN_HEIGHT);
    println!(
        "  Window size: {}x{}",
        window_config.window_width(),
        window_config.window_height()
    );
    println!("  Scale: {}x", window_config.scale);
    println!("  VSync: {}", window_config.vsync);

    let mut app = SessionWindow::new(window_config, session, shared_frame, input);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(feature = "audio")]
fn build_audio_sink(config: &EngineConfig) -> Option<Box<dyn AudioSink>> {
    use crate::audio::{CpalSink, OutputConfig};

    if !config.audio.enabled {
        return None;
    }

    let output_config = OutputConfig::new().with_sample_rate(config.audio.sample_rate);
    match CpalSink::new(output_config) {
        Ok(sink) => Some(Box::new(sink)),
        Err(err) => {
            eprintln!("Audio initialization failed: {}", err);
            None
        }
    }
}

#[cfg(not(feature = "audio"))]
fn build_audio_sink(_config: &EngineConfig) -> Option<Box<dyn AudioSink>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_config_defaults() {
        let config = WindowConfig::new();
        assert_eq!(config.scale, 3);
        assert!(config.vsync);
    }

    #[test]
    fn test_window_dimensions() {
        let config = WindowConfig::new().with_scale(2);
        assert_eq!(config.window_width(), 512);
        assert_eq!(config.window_height(), 480);
    }

    #[test]
    fn test_scale_clamping() {
        let config = WindowConfig::new().with_scale(100);
        assert_eq!(config.scale, 8);

        let config = WindowConfig::new().with_scale(0);
        assert_eq!(config.scale, 1);
    }

    #[test]
    fn test_shared_frame_sink_round_trip() {
        let mut sink = SharedFrameSink::new();
        let handle = sink.clone();

        let mut frame = vec![0u8; FRAME_BYTES];
        frame[0] = 0x99;
        frame[1] = 0x66;
        sink.present(&frame);

        let mut out = vec![0u8; FRAME_BYTES];
        handle.copy_to(&mut out);
        assert_eq!(out[0], 0x99);
        assert_eq!(out[1], 0x66);
    }
}
