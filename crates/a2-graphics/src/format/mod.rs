//! Native file layouts
//!
//! Double hi-res:
//! - `A2FC`/`2FC`: 16384 bytes, aux bank then main bank
//! - `AUX`/`BIN`: the two banks as separate 8192-byte files
//! - `DHR`: 5-byte header then per-scanline aux and main bytes
//! - `DHX`: 5-byte header then the `DHR` raster, PCX-run encoded
//!
//! Super hi-res:
//! - `PIC` (`$C1/$0000`): pixels, 200 SCBs, padding, 16 palettes
//! - Brooks (`$C1/$0002`): pixels, then 200 palettes stored color 15 first
//! - APF (`$C0/$0002`): PackBytes-compressed `MAIN` block, plus a
//!   `MULTIPAL` block for Brooks images

mod apf;
mod dhgr_files;
mod shr_files;

pub use apf::{read_apf, write_apf, ByteOrder};
pub use dhgr_files::{
    interlace, read_a2fc, read_dhr, read_dhx, write_a2fc, write_aux_bin, write_dhr, write_dhx,
    DHR_HEADER_LEN, RASTER_LEN,
};
pub use shr_files::{read_brooks, read_pic, write_brooks, write_pic, BROOKS_LEN, PIC_LEN};
