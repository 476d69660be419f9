//! PackBytes encoder and decoder.

use std::collections::VecDeque;

use crate::api::FormatError;

/// Largest literal chunk a single token can carry.
pub const MAX_LITERALS: usize = 64;

const LITERAL: u8 = 0x00;
const REPEAT: u8 = 0x40;
const REPEAT_FOUR: u8 = 0x80;
const QUAD_REPEAT: u8 = 0xC0;

/// Encoded length of a line sent entirely as literal chunks.
pub fn singleton_bound(width: usize) -> usize {
    width + width.div_ceil(MAX_LITERALS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    count: usize,
    value: u8,
}

/// Reusable PackBytes encoder.
///
/// The run list and pending literal queue are cleared at the start of every
/// [`PackBytes::encode`] call.
#[derive(Debug, Default)]
pub struct PackBytes {
    runs: Vec<Run>,
    pending: VecDeque<u8>,
    packed: Vec<u8>,
}

impl PackBytes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode one line. Never longer than [`singleton_bound`] of its length.
    pub fn encode(&mut self, line: &[u8]) -> Vec<u8> {
        self.runs.clear();
        self.pending.clear();
        self.packed.clear();

        self.collect_runs(line);

        let runs = std::mem::take(&mut self.runs);
        for run in &runs {
            if run.count == 1 {
                self.pending.push_back(run.value);
            } else {
                self.flush_literals();
                self.emit_run(*run);
            }
        }
        self.runs = runs;
        self.flush_literals();

        if self.packed.len() > singleton_bound(line.len()) {
            self.packed.clear();
            self.pending.extend(line.iter().copied());
            self.flush_literals();
        }
        self.packed.clone()
    }

    fn collect_runs(&mut self, line: &[u8]) {
        for &value in line {
            match self.runs.last_mut() {
                Some(run) if run.value == value => run.count += 1,
                _ => self.runs.push(Run { count: 1, value }),
            }
        }
    }

    fn flush_literals(&mut self) {
        while !self.pending.is_empty() {
            let chunk = self.pending.len().min(MAX_LITERALS);
            self.packed.push(LITERAL | (chunk - 1) as u8);
            self.packed.extend(self.pending.drain(..chunk));
        }
    }

    fn emit_run(&mut self, run: Run) {
        let mut count = run.count;
        // 64 groups of 4
        while count > 256 {
            self.packed.extend_from_slice(&[QUAD_REPEAT | 0x3F, run.value]);
            count -= 256;
        }
        if count <= MAX_LITERALS {
            self.packed
                .extend_from_slice(&[REPEAT | (count - 1) as u8, run.value]);
        } else {
            let quads = count / 4;
            self.packed
                .extend_from_slice(&[QUAD_REPEAT | (quads - 1) as u8, run.value]);
            let rest = count % 4;
            if rest > 0 {
                self.packed
                    .extend_from_slice(&[REPEAT | (rest - 1) as u8, run.value]);
            }
        }
    }
}

/// Encode one line with a fresh encoder.
pub fn pack_bytes(line: &[u8]) -> Vec<u8> {
    PackBytes::new().encode(line)
}

/// Decode PackBytes data, stopping once `expected_len` bytes are produced.
///
/// # Errors
///
/// [`FormatError::Truncated`] when the input ends early, and
/// [`FormatError::WrongLength`] when it decodes to more than `expected_len`.
pub fn unpack_bytes(packed: &[u8], expected_len: usize) -> Result<Vec<u8>, FormatError> {
    let truncated = || FormatError::Truncated { format: "PackBytes" };
    let mut out = Vec::with_capacity(expected_len);
    let mut pos = 0;

    while out.len() < expected_len {
        let token = *packed.get(pos).ok_or_else(truncated)?;
        pos += 1;
        let count = (token & 0x3F) as usize + 1;
        match token & 0xC0 {
            LITERAL => {
                let bytes = packed.get(pos..pos + count).ok_or_else(truncated)?;
                out.extend_from_slice(bytes);
                pos += count;
            }
            REPEAT => {
                let value = *packed.get(pos).ok_or_else(truncated)?;
                out.extend(std::iter::repeat(value).take(count));
                pos += 1;
            }
            REPEAT_FOUR => {
                let pattern = packed.get(pos..pos + 4).ok_or_else(truncated)?;
                for _ in 0..count {
                    out.extend_from_slice(pattern);
                }
                pos += 4;
            }
            _ => {
                let value = *packed.get(pos).ok_or_else(truncated)?;
                out.extend(std::iter::repeat(value).take(count * 4));
                pos += 1;
            }
        }
    }

    if out.len() != expected_len {
        return Err(FormatError::WrongLength {
            format: "PackBytes",
            expected: expected_len,
            actual: out.len(),
        });
    }
    Ok(out)
}
