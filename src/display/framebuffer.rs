// Frame Buffer - Stores RGBA pixel data for display output
//
// The emulation core has a resolution of 256×240 pixels. Each pixel arrives
// as a packed integer (low byte = R, next = G, next = B) and is stored here
// as 4 bytes of RGBA, ready to hand to the rendering surface wholesale.

/// Screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// Screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// Total number of pixels in one frame
pub const SCREEN_PIXELS: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Size of one frame in bytes (RGBA)
pub const FRAME_BYTES: usize = SCREEN_PIXELS * 4;

/// Convert a packed pixel value to RGBA bytes
///
/// The packed layout is: low byte = red, next byte = green, next byte = blue.
/// Any bits above the low 24 are ignored. Alpha is always 255 (opaque).
///
/// This is a pure function, total over the full representable domain.
///
/// # Example
///
/// ```
/// use nes_pacer::display::convert;
///
/// assert_eq!(convert(0x336699), [0x99, 0x66, 0x33, 0xFF]);
/// ```
#[inline]
pub fn convert(pixel: u32) -> [u8; 4] {
    [
        (pixel & 0xFF) as u8,         // R
        ((pixel >> 8) & 0xFF) as u8,  // G
        ((pixel >> 16) & 0xFF) as u8, // B
        0xFF,                         // A
    ]
}

/// Frame buffer for storing one frame of RGBA pixel data
///
/// Always holds exactly 256×240×4 bytes. The buffer is overwritten wholesale
/// every logical frame, never partially, and alpha is opaque for every pixel.
pub struct FrameBuffer {
    /// RGBA pixel data, row-major
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Create a new frame buffer initialized to opaque black
    pub fn new() -> Self {
        let mut data = vec![0u8; FRAME_BYTES];
        for alpha in data.iter_mut().skip(3).step_by(4) {
            *alpha = 0xFF;
        }
        Self { data }
    }

    /// Write one packed pixel at the given linear index
    ///
    /// # Arguments
    /// * `index` - Linear pixel index in row-major order (0..SCREEN_PIXELS)
    /// * `pixel` - Packed pixel value
    ///
    /// # Panics
    /// Panics if the index is out of bounds
    #[inline]
    pub fn set_packed(&mut self, index: usize, pixel: u32) {
        assert!(index < SCREEN_PIXELS, "Pixel index {} out of bounds", index);

        let offset = index * 4;
        self.data[offset..offset + 4].copy_from_slice(&convert(pixel));
    }

    /// Overwrite the whole buffer from a row-major slice of packed pixels
    ///
    /// This is the per-frame path: the emulation core delivers exactly
    /// 256×240 packed pixels per logical frame.
    ///
    /// # Panics
    /// Panics if the slice does not hold exactly SCREEN_PIXELS values
    pub fn copy_packed(&mut self, pixels: &[u32]) {
        assert_eq!(
            pixels.len(),
            SCREEN_PIXELS,
            "Frame must hold exactly {} pixels",
            SCREEN_PIXELS
        );

        for (i, &pixel) in pixels.iter().enumerate() {
            let offset = i * 4;
            self.data[offset..offset + 4].copy_from_slice(&convert(pixel));
        }
    }

    /// Read back the RGBA bytes of one pixel
    ///
    /// # Panics
    /// Panics if the index is out of bounds
    #[inline]
    pub fn get_rgba(&self, index: usize) -> [u8; 4] {
        assert!(index < SCREEN_PIXELS, "Pixel index {} out of bounds", index);

        let offset = index * 4;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]
    }

    /// Get the raw RGBA data for handing to the rendering surface
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Reset the buffer to opaque black
    pub fn clear(&mut self) {
        for (i, byte) in self.data.iter_mut().enumerate() {
            *byte = if i % 4 == 3 { 0xFF } else { 0x00 };
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
