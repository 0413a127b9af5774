//! The decoder's sliding-window output sink: a `Vec<u8>`-backed buffer
//! that supports literal byte writes and back-reference copies, flushing
//! bytes older than one window size to the underlying `Write`r as it goes.
//!
//! Grounded on `original_source/bitwriter.c`'s `addFastByte` +
//! `copyFromBufferHistory` + `handleBufferSlide` (the same `BIT_WRITER`
//! struct doubles as the decompressor's output sink there); this is a
//! safe Rust equivalent split out of the bit-packing writer, matching the
//! teacher's own separation of the bit layer from output streams (see
//! `streams/deflate_chunked_buffer_output.rs`).

use std::io::Write;

use crate::checksum::Crc32;
use crate::deflate_constants::WINDOW_SIZE;
use crate::error::{DeflateError, Result};

const FLUSH_CHUNK: usize = 64 * 1024;

pub struct OutputWindow<W> {
    inner: W,
    buffer: Vec<u8>,
    total_written: usize,
    crc: Crc32,
}

impl<W: Write> OutputWindow<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(WINDOW_SIZE + FLUSH_CHUNK),
            total_written: 0,
            crc: Crc32::new(),
        }
    }

    fn maybe_flush(&mut self) -> Result<()> {
        if self.buffer.len() > WINDOW_SIZE + FLUSH_CHUNK {
            let flush_amount = self.buffer.len() - WINDOW_SIZE;
            self.crc.update(&self.buffer[..flush_amount]);
            self.inner
                .write_all(&self.buffer[..flush_amount])
                .map_err(DeflateError::FileOpenFailed)?;
            self.total_written += flush_amount;
            self.buffer.drain(..flush_amount);
        }
        Ok(())
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.buffer.push(byte);
        self.maybe_flush()
    }

    /// Copies `length` bytes starting `distance` bytes behind the current
    /// end of output. `distance` may be less than `length`, letting a
    /// single short history match expand into a long repeating run, one
    /// byte at a time, exactly as a real decoder must.
    pub fn copy_from_history(&mut self, distance: usize, length: usize) -> Result<()> {
        if distance == 0 || distance > self.buffer.len() {
            return Err(DeflateError::InvalidReference {
                distance,
                available: self.buffer.len(),
            });
        }
        let start = self.buffer.len() - distance;
        for i in 0..length {
            let byte = self.buffer[start + i];
            self.buffer.push(byte);
        }
        self.maybe_flush()
    }

    /// Flushes all remaining buffered bytes and returns the sink, the
    /// CRC-32 of the full decompressed stream, and its total length.
    pub fn finish(mut self) -> Result<(W, u32, usize)> {
        self.crc.update(&self.buffer);
        self.inner
            .write_all(&self.buffer)
            .map_err(DeflateError::FileOpenFailed)?;
        self.total_written += self.buffer.len();
        self.inner.flush().map_err(DeflateError::FileOpenFailed)?;
        Ok((self.inner, self.crc.finalize(), self.total_written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_bytes_pass_through() {
        let mut out = Vec::new();
        {
            let mut w = OutputWindow::new(&mut out);
            for b in b"hello" {
                w.write_byte(*b).unwrap();
            }
            let (_, _, len) = w.finish().unwrap();
            assert_eq!(len, 5);
        }
        assert_eq!(out, b"hello");
    }

    #[test]
    fn overlapping_copy_expands_a_run() {
        let mut out = Vec::new();
        {
            let mut w = OutputWindow::new(&mut out);
            w.write_byte(b'a').unwrap();
            w.copy_from_history(1, 10).unwrap();
            w.finish().unwrap();
        }
        assert_eq!(out, vec![b'a'; 11]);
    }

    #[test]
    fn copy_beyond_available_history_is_rejected() {
        let mut out = Vec::new();
        let mut w = OutputWindow::new(&mut out);
        w.write_byte(b'x').unwrap();
        assert!(w.copy_from_history(5, 3).is_err());
    }

    #[test]
    fn flushing_across_window_boundary_preserves_order() {
        let mut out = Vec::new();
        {
            let mut w = OutputWindow::new(&mut out);
            for i in 0..(3 * WINDOW_SIZE) {
                w.write_byte((i % 251) as u8).unwrap();
            }
            w.finish().unwrap();
        }
        let expected: Vec<u8> = (0..(3 * WINDOW_SIZE)).map(|i| (i % 251) as u8).collect();
        assert_eq!(out, expected);
    }
}
