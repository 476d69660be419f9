//! Run-length codecs
//!
//! - [`PackBytes`]: Apple's PackBytes scheme as used by Apple Preferred
//!   Format pictures. The encoder emits only the literal, byte-repeat and
//!   quad-repeat tokens. The decoder accepts all four.
//! - [`encode_pcx`]/[`decode_pcx`]: the PCX-style run encoding used by
//!   `.DHX` files.

mod packbytes;
mod pcx;

pub use packbytes::{pack_bytes, singleton_bound, unpack_bytes, PackBytes, MAX_LITERALS};
pub use pcx::{decode_pcx, encode_pcx, MAX_PCX_RUN};
