//! Fixed constants of the DEFLATE (RFC 1951) block format.

/// BTYPE values from the 3-bit block header (BFINAL is the low bit, read separately).
pub const BTYPE_STORED: u32 = 0b00;
pub const BTYPE_FIXED_HUFFMAN: u32 = 0b01;
pub const BTYPE_DYNAMIC_HUFFMAN: u32 = 0b10;
pub const BTYPE_RESERVED: u32 = 0b11;

/// End-of-block symbol in the literal/length alphabet.
pub const END_OF_BLOCK_SYMBOL: u16 = 256;

/// Size of the literal/length alphabet (0..=255 literals, 256 EOB, 257..=285 lengths).
pub const NUM_LITLEN_SYMBOLS: usize = 286;

/// Size of the distance alphabet.
pub const NUM_DISTANCE_SYMBOLS: usize = 30;

/// Size of the code-length alphabet used to transmit the two trees above.
pub const NUM_CODE_LENGTH_SYMBOLS: usize = 19;

/// Maximum canonical codeword length for literal/length and distance codes.
pub const MAX_LITLEN_CODE_LENGTH: u8 = 15;

/// Maximum canonical codeword length for code-length codes.
pub const MAX_CODE_LENGTH_CODE_LENGTH: u8 = 7;

/// Sliding window size: the farthest a back-reference may point.
pub const WINDOW_SIZE: usize = 32 * 1024;

/// Longest match length a length code can express.
pub const MAX_MATCH_LENGTH: usize = 258;

/// Shortest match worth emitting instead of two+ literals.
pub const MIN_MATCH_LENGTH: usize = 3;

/// Order in which code-length-alphabet code lengths are transmitted in a
/// dynamic block header; indices into this table are what HCLEN counts.
pub const CODE_LENGTH_ORDER: [u8; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];
