//! PCX-style run encoding.
//!
//! A byte with both top bits set is a run marker: its low 6 bits give the
//! repeat count for the byte that follows. Any other byte is a literal.

use crate::api::FormatError;

/// Longest run a single marker can carry.
pub const MAX_PCX_RUN: u8 = 63;

fn put_run(out: &mut Vec<u8>, value: u8, count: u8) {
    if count == 0 {
        return;
    }
    if count == 1 && value & 0xC0 != 0xC0 {
        out.push(value);
    } else {
        out.extend_from_slice(&[0xC0 | count, value]);
    }
}

/// Encode a buffer as one PCX run stream.
pub fn encode_pcx(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let Some((&first, rest)) = data.split_first() else {
        return out;
    };
    let mut last = first;
    let mut count = 1u8;
    for &byte in rest {
        if byte == last {
            count += 1;
            if count == MAX_PCX_RUN {
                put_run(&mut out, last, count);
                count = 0;
            }
        } else {
            put_run(&mut out, last, count);
            last = byte;
            count = 1;
        }
    }
    put_run(&mut out, last, count);
    out
}

/// Decode a PCX run stream into exactly `expected_len` bytes.
pub fn decode_pcx(data: &[u8], expected_len: usize) -> Result<Vec<u8>, FormatError> {
    let mut out = Vec::with_capacity(expected_len);
    let mut bytes = data.iter();
    while out.len() < expected_len {
        let &byte = bytes.next().ok_or(FormatError::Truncated { format: "PCX" })?;
        if byte & 0xC0 == 0xC0 {
            let &value = bytes.next().ok_or(FormatError::Truncated { format: "PCX" })?;
            out.extend(std::iter::repeat(value).take((byte & 0x3F) as usize));
        } else {
            out.push(byte);
        }
    }
    if out.len() != expected_len {
        return Err(FormatError::WrongLength {
            format: "PCX",
            expected: expected_len,
            actual: out.len(),
        });
    }
    Ok(out)
}
