//! Code-length RLE codec (alphabet 0..=18), used to compactly transmit the
//! concatenated literal/length and distance code-length vectors in a
//! dynamic block header.
//!
//! Symbols:
//! - `0..=15`: literal code length.
//! - `16`: repeat the previous code length 3-6 times (2 extra bits).
//! - `17`: repeat a zero length 3-10 times (3 extra bits).
//! - `18`: repeat a zero length 11-138 times (7 extra bits).
//!
//! Invariant R1: symbol 16 never appears before at least one literal length
//! has been transmitted (there is no "previous" length to repeat).

use crate::error::{DeflateError, Result};

pub const SYMBOL_REPEAT_PREVIOUS: u8 = 16;
pub const SYMBOL_REPEAT_ZERO_SHORT: u8 = 17;
pub const SYMBOL_REPEAT_ZERO_LONG: u8 = 18;

pub const EXTRA_BITS: [u8; 19] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 3, 7,
];

/// One emitted RLE unit: the code-length-alphabet symbol plus its extra
/// bits (`extra_bits` is 0 for symbols 0..=15).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleUnit {
    pub symbol: u8,
    pub extra_value: u16,
}

/// Encodes a flat sequence of code lengths (LL lengths followed by
/// distance lengths) into RLE units ready for code-length-alphabet
/// Huffman coding.
pub fn encode_lengths(lengths: &[u8]) -> Vec<RleUnit> {
    let mut out = Vec::new();
    let n = lengths.len();
    let mut i = 0;

    while i < n {
        let value = lengths[i];
        let mut run_len = 1;
        while i + run_len < n && lengths[i + run_len] == value {
            run_len += 1;
        }

        if value == 0 {
            let mut remaining = run_len;
            while remaining > 0 {
                if remaining < 3 {
                    for _ in 0..remaining {
                        out.push(RleUnit { symbol: 0, extra_value: 0 });
                    }
                    remaining = 0;
                } else if remaining <= 10 {
                    out.push(RleUnit {
                        symbol: SYMBOL_REPEAT_ZERO_SHORT,
                        extra_value: (remaining - 3) as u16,
                    });
                    remaining = 0;
                } else {
                    let take = remaining.min(138);
                    out.push(RleUnit {
                        symbol: SYMBOL_REPEAT_ZERO_LONG,
                        extra_value: (take - 11) as u16,
                    });
                    remaining -= take;
                }
            }
            i += run_len;
        } else {
            out.push(RleUnit { symbol: value, extra_value: 0 });
            i += 1;
            let mut rem = run_len - 1;
            while rem >= 3 {
                let take = rem.min(6);
                out.push(RleUnit {
                    symbol: SYMBOL_REPEAT_PREVIOUS,
                    extra_value: (take - 3) as u16,
                });
                i += take;
                rem -= take;
            }
            for _ in 0..rem {
                out.push(RleUnit { symbol: value, extra_value: 0 });
                i += 1;
            }
        }
    }

    out
}

/// Expands RLE units back into `total_count` raw code lengths. `next`
/// yields one already Huffman-decoded `(symbol, extra_value)` pair at a
/// time (extra-bit reading is the caller's job, since it depends on the
/// bit reader and the code-length Huffman table).
pub fn decode_lengths<F>(total_count: usize, mut next: F) -> Result<Vec<u8>>
where
    F: FnMut() -> Result<(u8, u16)>,
{
    let mut lengths = Vec::with_capacity(total_count);

    while lengths.len() < total_count {
        let (symbol, extra) = next()?;
        match symbol {
            0..=15 => lengths.push(symbol),
            SYMBOL_REPEAT_PREVIOUS => {
                let prev = *lengths.last().ok_or(DeflateError::InvalidHuffmanCode)?;
                let repeat = 3 + extra as usize;
                for _ in 0..repeat {
                    lengths.push(prev);
                }
            }
            SYMBOL_REPEAT_ZERO_SHORT => {
                let repeat = 3 + extra as usize;
                for _ in 0..repeat {
                    lengths.push(0);
                }
            }
            SYMBOL_REPEAT_ZERO_LONG => {
                let repeat = 11 + extra as usize;
                for _ in 0..repeat {
                    lengths.push(0);
                }
            }
            _ => return Err(DeflateError::InvalidHuffmanCode),
        }
        if lengths.len() > total_count {
            return Err(DeflateError::InvalidHuffmanCode);
        }
    }

    Ok(lengths)
}
