//! LZ77 front-end: turns a byte slice into a [`TokenBuffer`] of literals and
//! length/distance matches. Grounded on `original_source/compress.c`'s
//! `compress_data`, `generateHashKey`, `findMatchLength`, and
//! `subtractWindowSizeFromHashTable` — a single 3-byte rolling hash table,
//! first-match-greedy (no hash chains, no lazy matching), 32 KiB window.
//!
//! Unlike the C reference's 64 KiB double-buffer with periodic rebasing,
//! this version holds the whole input as one in-memory slice and hashes
//! absolute positions directly; the 32 KiB window bound is enforced by
//! checking `i - candidate` against [`WINDOW_SIZE`] at match time instead
//! of periodically subtracting it out of the table.

use crate::deflate_constants::{MAX_MATCH_LENGTH, MIN_MATCH_LENGTH, WINDOW_SIZE};
use crate::tokens::TokenBuffer;

const HASH_BITS: u32 = 15;
const HASH_SIZE: usize = 1 << HASH_BITS;
const HASH_MASK: u32 = (1 << HASH_BITS) - 1;
const HASH_SHIFT: u32 = 5;

/// Sentinel meaning "no prior position has this hash".
const EMPTY_SLOT: u32 = u32::MAX;

fn hash_key(a: u8, b: u8, c: u8) -> u32 {
    (((a as u32) << HASH_SHIFT) ^ (b as u32) ^ (c as u32)) & HASH_MASK
}

fn find_match_length(data: &[u8], candidate: usize, current: usize, max_len: usize) -> usize {
    let mut len = 0;
    while len < max_len && data[candidate + len] == data[current + len] {
        len += 1;
    }
    len
}

/// Tokenizes the whole of `data` into literals and matches in one pass;
/// the block encoder later cuts the resulting token stream into
/// window-sized chunks for framing, but the hash table and match search
/// here span the entire input so a match can still reach across those
/// chunk boundaries, the same way a persistent hash table would allow
/// across a real sliding-window rebase.
pub fn tokenize(data: &[u8]) -> TokenBuffer {
    let mut tokens = TokenBuffer::new();
    let mut hash_table = vec![EMPTY_SLOT; HASH_SIZE];

    let mut i = 0usize;
    let hashable_end = data.len().saturating_sub(MIN_MATCH_LENGTH - 1);

    while i < hashable_end {
        let key = hash_key(data[i], data[i + 1], data[i + 2]);
        let candidate = hash_table[key as usize];
        hash_table[key as usize] = i as u32;

        let mut emitted_match = false;
        if candidate != EMPTY_SLOT {
            let candidate = candidate as usize;
            let distance = i - candidate;
            if distance >= 1 && distance <= WINDOW_SIZE {
                let max_len = (MAX_MATCH_LENGTH).min(data.len() - i);
                let len = find_match_length(data, candidate, i, max_len);
                if len >= MIN_MATCH_LENGTH {
                    tokens.push_match(distance as u16, len as u16);
                    i += len;
                    emitted_match = true;
                }
            }
        }

        if !emitted_match {
            tokens.push_literal(data[i]);
            i += 1;
        }
    }

    while i < data.len() {
        tokens.push_literal(data[i]);
        i += 1;
    }

    tokens
}
