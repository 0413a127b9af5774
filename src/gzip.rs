//! gzip (RFC 1952) member framing: header, DEFLATE payload, trailer.
//!
//! Grounded on `original_source/bitwriter.c`'s `createFile` (the 10-byte
//! header layout) and `decompress.c`'s header handling, generalized the
//! way the teacher's own `decompress_gzip.rs` validates a header before
//! handing off to the DEFLATE layer. Unlike `decompress.c`, which never
//! checks the trailer at all, this always verifies CRC-32 and ISIZE
//! before returning success (spec.md §4.10 step 3).

use std::io::{Read, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::bitio::reader::BitReader;
use crate::bitio::writer::BitWriter;
use crate::block_decoder::decode_blocks;
use crate::block_encoder::encode_block;
use crate::error::{DeflateError, Result};
use crate::gzip_constants::{
    GZIP_CM_DEFLATE, GZIP_FLG_NONE, GZIP_ID1, GZIP_ID2, GZIP_OS_UNIX, GZIP_XFL_UNSET,
};
use crate::window::OutputWindow;

/// Reads all of `input`, compresses it as a single gzip member, and writes
/// the result to `output`.
pub fn compress<R: Read, W: Write>(mut input: R, output: W) -> Result<()> {
    let mut data = Vec::new();
    input.read_to_end(&mut data).map_err(DeflateError::FileOpenFailed)?;

    let mut writer = BitWriter::new(output);
    write_header(&mut writer)?;
    encode_block(&mut writer, &data)?;
    writer.align_to_byte()?;

    let mut crc = crate::checksum::Crc32::new();
    crc.update(&data);
    writer.write_bytes(crc.finalize(), 4)?;
    writer.write_bytes((data.len() as u64 % (1u64 << 32)) as u32, 4)?;

    writer.finish()?;
    Ok(())
}

/// Reads one gzip member from `input`, decompresses it, writes the result
/// to `output`, and verifies the CRC-32/ISIZE trailer.
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> Result<()> {
    let mut reader = BitReader::new(input);
    reader.read_gzip_header()?;

    let mut window = OutputWindow::new(output);
    decode_blocks(&mut reader, &mut window)?;
    let (_output, actual_crc, actual_len) = window.finish()?;

    reader.align_to_byte();
    let expected_crc = reader.read_u32_le()?;
    let expected_isize = reader.read_u32_le()?;

    if expected_crc != actual_crc {
        return Err(DeflateError::ChecksumMismatch);
    }
    if expected_isize as u64 != (actual_len as u64) % (1u64 << 32) {
        return Err(DeflateError::ChecksumMismatch);
    }

    Ok(())
}

fn write_header<W: Write>(writer: &mut BitWriter<W>) -> Result<()> {
    writer.write_bits(GZIP_ID1 as u32, 8)?;
    writer.write_bits(GZIP_ID2 as u32, 8)?;
    writer.write_bits(GZIP_CM_DEFLATE as u32, 8)?;
    writer.write_bits(GZIP_FLG_NONE as u32, 8)?;

    let mtime = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0);
    writer.write_bits(mtime, 32)?;

    writer.write_bits(GZIP_XFL_UNSET as u32, 8)?;
    writer.write_bits(GZIP_OS_UNIX as u32, 8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(data: &[u8]) -> Vec<u8> {
        let mut compressed = Vec::new();
        compress(data, &mut compressed).unwrap();

        let mut out = Vec::new();
        decompress(&compressed[..], &mut out).unwrap();
        out
    }

    #[test]
    fn empty_input_round_trips() {
        assert_eq!(round_trip(&[]), Vec::<u8>::new());
    }

    #[test]
    fn gzip_magic_and_method_are_correct() {
        let mut compressed = Vec::new();
        compress(b"abc".as_slice(), &mut compressed).unwrap();
        assert_eq!(compressed[0], GZIP_ID1);
        assert_eq!(compressed[1], GZIP_ID2);
        assert_eq!(compressed[2], GZIP_CM_DEFLATE);
        assert_eq!(compressed[3], GZIP_FLG_NONE);
    }

    #[test]
    fn typical_text_round_trips() {
        let data = b"the quick brown fox jumps over the lazy dog".repeat(20);
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn corrupted_body_fails_checksum() {
        let mut compressed = Vec::new();
        compress(b"hello, world".as_slice(), &mut compressed).unwrap();
        let last = compressed.len() - 1;
        compressed[last] ^= 0xFF; // flips a byte inside the ISIZE trailer

        let mut out = Vec::new();
        assert!(decompress(&compressed[..], &mut out).is_err());
    }

    #[test]
    fn rejects_non_gzip_input() {
        let mut out = Vec::new();
        assert!(decompress(&b"not a gzip file"[..], &mut out).is_err());
    }

    #[test]
    fn random_like_200kib_round_trips() {
        let mut state: u32 = 0xC0FF_EE11;
        let mut data = Vec::with_capacity(200 * 1024);
        for _ in 0..200 * 1024 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            data.push((state & 0xFF) as u8);
        }
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn every_single_byte_value_round_trips() {
        for b in 0u8..=255 {
            assert_eq!(round_trip(&[b]), vec![b]);
        }
    }

    #[test]
    fn required_input_lengths_round_trip() {
        // spec.md §8's exact length list, including the WINDOW_SIZE boundary.
        let mut state: u32 = 0x1357_9BDF;
        for &len in &[1usize, 32, 1024, 32768, 65536, 100_000] {
            let mut data = Vec::with_capacity(len);
            for _ in 0..len {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                data.push((state & 0xFF) as u8);
            }
            assert_eq!(round_trip(&data), data, "length {len} failed to round-trip");
        }
    }
}
