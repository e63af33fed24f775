// ROM loading - Reads ROM images from disk as raw bytes
//
// The bytes are handed unmodified to the emulation core; parsing and
// validation are the core's job. Binary data stays binary end to end.

use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while reading a ROM file
#[derive(Debug)]
pub enum RomFileError {
    /// I/O error reading the file
    Io(io::Error),

    /// File exists but holds no data
    Empty,
}

impl std::fmt::Display for RomFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RomFileError::Io(e) => write!(f, "Failed to read ROM file: {}", e),
            RomFileError::Empty => write!(f, "ROM file is empty"),
        }
    }
}

impl std::error::Error for RomFileError {}

impl From<io::Error> for RomFileError {
    fn from(e: io::Error) -> Self {
        RomFileError::Io(e)
    }
}

/// Read a ROM file into raw bytes
///
/// # Arguments
/// * `path` - Path to the ROM file
///
/// # Returns
/// The file contents, or a descriptive error
pub fn read_rom_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, RomFileError> {
    let bytes = fs::read(path)?;

    if bytes.is_empty() {
        return Err(RomFileError::Empty);
    }

    Ok(bytes)
}
