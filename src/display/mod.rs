// Display module - Frame buffer and window output
//
// Provides the RGBA frame buffer with packed-pixel conversion, and the
// winit + pixels window that hosts the callback loop driving a session.

pub mod framebuffer;
pub mod window;

pub use framebuffer::{
    convert, FrameBuffer, FRAME_BYTES, SCREEN_HEIGHT, SCREEN_PIXELS, SCREEN_WIDTH,
};
pub use window::{run_session, SharedFrameSink, WindowConfig};
