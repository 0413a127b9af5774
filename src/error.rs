use std::fmt;

/// Everything that can go wrong in a compress/decompress call.
///
/// Each variant is raised at exactly one point in the pipeline and maps to
/// a single user-visible message; see the `Display` impl below.
#[derive(Debug)]
pub enum DeflateError {
    /// The source file could not be opened, or the destination could not be created.
    FileOpenFailed(std::io::Error),
    /// A core allocation (tree, table, buffer) could not be satisfied.
    AllocationFailed,
    /// The gzip magic, compression method, or flag byte was invalid.
    MalformedHeader,
    /// A DEFLATE block header requested a BTYPE this decoder does not support.
    UnsupportedBlockType(u8),
    /// The bit reader hit end-of-input in the middle of a symbol or field.
    TruncatedStream,
    /// The Huffman slow path walked past the maximum codeword length without a match.
    InvalidHuffmanCode,
    /// A decoded back-reference pointed further back than the history available.
    InvalidReference { distance: usize, available: usize },
    /// The trailing CRC-32 or ISIZE did not match the decompressed data.
    ChecksumMismatch,
    /// An internal invariant was violated; this indicates a bug in the encoder itself.
    EncodeBug(&'static str),
}

impl fmt::Display for DeflateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeflateError::FileOpenFailed(e) => write!(f, "could not open file: {e}"),
            DeflateError::AllocationFailed => write!(f, "allocation failed"),
            DeflateError::MalformedHeader => write!(f, "not a valid gzip stream (bad header)"),
            DeflateError::UnsupportedBlockType(t) => {
                write!(f, "unsupported DEFLATE block type {t} (only dynamic Huffman blocks are supported)")
            }
            DeflateError::TruncatedStream => write!(f, "truncated DEFLATE stream"),
            DeflateError::InvalidHuffmanCode => write!(f, "invalid Huffman code in stream"),
            DeflateError::InvalidReference { distance, available } => write!(
                f,
                "back-reference distance {distance} exceeds {available} available history bytes"
            ),
            DeflateError::ChecksumMismatch => write!(f, "CRC-32 or size trailer does not match decompressed data"),
            DeflateError::EncodeBug(msg) => write!(f, "internal encoder invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for DeflateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeflateError::FileOpenFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DeflateError {
    fn from(e: std::io::Error) -> Self {
        DeflateError::FileOpenFailed(e)
    }
}

pub type Result<T> = std::result::Result<T, DeflateError>;
