// nes-pacer - Main Entry Point
//
// Runs the pacing engine in a window, driving the built-in test pattern
// core. A ROM path can be given on the command line or configured for
// autoload; the bytes are handed to the core unmodified.

use nes_pacer::core::TestPatternCore;
use nes_pacer::display::run_session;
use nes_pacer::rom::read_rom_file;
use nes_pacer::session::EngineConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("nes-pacer v0.1.0");
    println!("================");
    println!();

    let config = EngineConfig::load_or_default();

    // ROM path: command line argument wins over the configured autoload
    let rom_path = std::env::args()
        .nth(1)
        .map(std::path::PathBuf::from)
        .or_else(|| config.rom.autoload.clone());

    let rom = match rom_path {
        Some(path) => {
            println!("Loading ROM: {}", path.display());
            match read_rom_file(&path) {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    eprintln!("{}", err);
                    eprintln!("Continuing without a ROM; the session stays idle.");
                    None
                }
            }
        }
        None => {
            println!("No ROM given; running the built-in test pattern.");
            // The pattern core treats any non-empty bytes as a valid ROM
            Some(vec![0x00])
        }
    };

    let core = Box::new(TestPatternCore::new(config.audio.sample_rate));

    println!("Press the close button or Ctrl+C to exit.");
    println!();

    run_session(&config, core, rom)?;

    println!("Session window closed.");
    Ok(())
}
