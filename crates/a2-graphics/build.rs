use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Hi-res page 1 base address for a scanline (0..192).
///
/// Each group of 8 consecutive scanlines is 0x400 apart, each group of 8
/// such groups is 0x80 apart and each third of the screen is 0x28 apart.
fn hires_base(y: u32) -> u32 {
    0x2000 + (y % 8) * 0x400 + ((y / 8) % 8) * 0x80 + (y / 64) * 0x28
}

/// Text/lo-res page 1 base address for a text row (0..24).
fn text_base(row: u32) -> u32 {
    0x400 + (row % 8) * 0x80 + (row / 8) * 0x28
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("scanline_tables.rs");
    let mut file = File::create(&dest_path).unwrap();

    // Generate HIRES_BASE (192 entries)
    writeln!(file, "/// Hi-res page 1 base address per scanline").unwrap();
    writeln!(file, "pub static HIRES_BASE: [u16; 192] = [").unwrap();
    for y in 0..192 {
        if y > 0 && y % 8 == 0 {
            writeln!(file).unwrap();
        }
        write!(file, "    0x{:04X},", hires_base(y)).unwrap();
    }
    writeln!(file, "\n];").unwrap();

    writeln!(file).unwrap();

    // Generate TEXT_BASE (24 entries)
    writeln!(file, "/// Text page 1 base address per text row").unwrap();
    writeln!(file, "pub static TEXT_BASE: [u16; 24] = [").unwrap();
    for row in 0..24 {
        if row > 0 && row % 8 == 0 {
            writeln!(file).unwrap();
        }
        write!(file, "    0x{:04X},", text_base(row)).unwrap();
    }
    writeln!(file, "\n];").unwrap();

    // Rerun if build.rs changes
    println!("cargo::rerun-if-changed=build.rs");
}
