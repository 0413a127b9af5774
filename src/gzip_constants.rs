//! Fixed byte values of the gzip (RFC 1952) member header and trailer.

pub const GZIP_ID1: u8 = 0x1F;
pub const GZIP_ID2: u8 = 0x8B;
pub const GZIP_CM_DEFLATE: u8 = 0x08;

/// The only FLG byte this crate ever writes, and the only one it accepts
/// on read: no FTEXT, FHCRC, FEXTRA, FNAME, or FCOMMENT.
pub const GZIP_FLG_NONE: u8 = 0x00;

/// XFL is unspecified by this encoder; 0 means "no extra flags".
pub const GZIP_XFL_UNSET: u8 = 0x00;

/// OS = Unix, matching `original_source/bitwriter.c`'s `OS` macro.
pub const GZIP_OS_UNIX: u8 = 0x03;

/// Size in bytes of the fixed 10-byte gzip member header.
pub const GZIP_HEADER_LEN: usize = 10;

/// Size in bytes of the trailing CRC-32 + ISIZE fields.
pub const GZIP_TRAILER_LEN: usize = 8;
