use std::io::Read;

use crate::error::{DeflateError, Result};
use crate::gzip_constants::{GZIP_CM_DEFLATE, GZIP_ID1, GZIP_ID2};

/// LSB-first bit reader over any byte source.
///
/// Bits are pulled into a 64-bit accumulator a whole byte at a time; every
/// public operation leaves fewer than 8 bits buffered, which is what makes
/// [`align_to_byte`](Self::align_to_byte) a matter of discarding the
/// low `bit_count % 8` bits rather than bookkeeping a separate byte offset.
pub struct BitReader<R> {
    inner: R,
    bit_buf: u64,
    bit_count: u32,
    at_eof: bool,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bit_buf: 0,
            bit_count: 0,
            at_eof: false,
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.at_eof {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.inner.read(&mut byte) {
            Ok(0) => {
                self.at_eof = true;
                Ok(None)
            }
            Ok(_) => Ok(Some(byte[0])),
            Err(e) => Err(DeflateError::FileOpenFailed(e)),
        }
    }

    /// Fills the accumulator with at least `n` bits, or as many as the
    /// source has left. Running out of input is not itself an error here;
    /// callers that require `n` bits decide whether the shortfall matters.
    fn ensure(&mut self, n: u32) -> Result<()> {
        while self.bit_count < n {
            match self.next_byte()? {
                Some(byte) => {
                    self.bit_buf |= (byte as u64) << self.bit_count;
                    self.bit_count += 8;
                }
                None => break,
            }
        }
        Ok(())
    }

    /// Returns the next `n` bits (`n` in `1..=32`) without consuming them.
    /// Bits past the end of the stream read back as zero.
    pub fn peek_bits(&mut self, n: u32) -> Result<u32> {
        debug_assert!(n >= 1 && n <= 16);
        self.ensure(n)?;
        Ok((self.bit_buf & ((1u64 << n) - 1)) as u32)
    }

    /// Consumes and returns the next `n` bits (`n` in `1..=32`), LSB-first.
    pub fn read_bits(&mut self, n: u32) -> Result<u32> {
        debug_assert!(n >= 1 && n <= 32);
        self.ensure(n)?;
        if self.bit_count < n {
            return Err(DeflateError::TruncatedStream);
        }
        let mask = if n == 32 { u64::MAX } else { (1u64 << n) - 1 };
        let value = (self.bit_buf & mask) as u32;
        self.bit_buf >>= n;
        self.bit_count -= n;
        Ok(value)
    }

    pub fn read_bit(&mut self) -> Result<u8> {
        Ok(self.read_bits(1)? as u8)
    }

    /// Consumes `n` bits without using the value, discarding them.
    pub fn skip_bits(&mut self, n: u32) -> Result<()> {
        self.read_bits(n).map(|_| ())
    }

    /// Discards bits up to the next byte boundary of the underlying stream.
    pub fn align_to_byte(&mut self) {
        let remainder = self.bit_count % 8;
        self.bit_buf >>= remainder;
        self.bit_count -= remainder;
    }

    /// Validates the 10-byte gzip prelude (ID1, ID2, CM, FLG, MTIME, XFL, OS).
    /// Only FLG == 0x00 is accepted; any optional field present is rejected.
    pub fn read_gzip_header(&mut self) -> Result<()> {
        let id1 = self.read_bits(8)?;
        let id2 = self.read_bits(8)?;
        let cm = self.read_bits(8)?;
        if id1 != GZIP_ID1 as u32 || id2 != GZIP_ID2 as u32 || cm != GZIP_CM_DEFLATE as u32 {
            return Err(DeflateError::MalformedHeader);
        }

        let flg = self.read_bits(8)?;
        if flg != 0x00 {
            return Err(DeflateError::MalformedHeader);
        }

        self.skip_bits(32)?; // MTIME
        self.skip_bits(8)?; // XFL
        self.skip_bits(8)?; // OS (reference writes 0x03; any value accepted on decode)
        Ok(())
    }

    /// Reads a little-endian 32-bit trailer field. Must be called only when
    /// byte-aligned (i.e. after `align_to_byte`).
    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.read_bits(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitio::writer::BitWriter;

    #[test]
    fn round_trips_arbitrary_widths() {
        let mut out = Vec::new();
        {
            let mut w = BitWriter::new(&mut out);
            w.write_bits(0b1, 1).unwrap();
            w.write_bits(0b101, 3).unwrap();
            w.write_bits(0x1234_5678, 32).unwrap();
            w.write_bits(0b11111, 5).unwrap();
            w.finish().unwrap();
        }

        let mut r = BitReader::new(&out[..]);
        assert_eq!(r.read_bits(1).unwrap(), 0b1);
        assert_eq!(r.read_bits(3).unwrap(), 0b101);
        assert_eq!(r.read_bits(32).unwrap(), 0x1234_5678);
        assert_eq!(r.read_bits(5).unwrap(), 0b11111);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut out = Vec::new();
        {
            let mut w = BitWriter::new(&mut out);
            w.write_bits(0b1010_1100, 8).unwrap();
            w.finish().unwrap();
        }

        let mut r = BitReader::new(&out[..]);
        let peeked = r.peek_bits(4).unwrap();
        assert_eq!(peeked, r.peek_bits(4).unwrap());
        assert_eq!(r.read_bits(4).unwrap(), peeked);
    }

    #[test]
    fn align_to_byte_discards_partial_byte() {
        let mut out = Vec::new();
        {
            let mut w = BitWriter::new(&mut out);
            w.write_bits(0b101, 3).unwrap();
            w.align_to_byte().unwrap();
            w.write_bits(0xAB, 8).unwrap();
            w.finish().unwrap();
        }
        assert_eq!(out.len(), 2);

        let mut r = BitReader::new(&out[..]);
        r.skip_bits(3).unwrap();
        r.align_to_byte();
        assert_eq!(r.read_bits(8).unwrap(), 0xAB);
    }

    #[test]
    fn truncated_read_is_an_error() {
        let data = [0xFFu8];
        let mut r = BitReader::new(&data[..]);
        assert!(r.read_bits(16).is_err());
    }

    #[test]
    fn rejects_bad_magic() {
        let data = [0x00, 0x00, 0x08, 0x00, 0, 0, 0, 0, 0, 0];
        let mut r = BitReader::new(&data[..]);
        assert!(r.read_gzip_header().is_err());
    }

    #[test]
    fn accepts_plain_header() {
        let data = [0x1F, 0x8B, 0x08, 0x00, 0, 0, 0, 0, 0, 0x03];
        let mut r = BitReader::new(&data[..]);
        assert!(r.read_gzip_header().is_ok());
    }

    #[test]
    fn rejects_optional_fields() {
        let data = [0x1F, 0x8B, 0x08, 0x08, 0, 0, 0, 0, 0, 0x03];
        let mut r = BitReader::new(&data[..]);
        assert!(r.read_gzip_header().is_err());
    }
}
