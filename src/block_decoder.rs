//! DEFLATE block decoder driver.
//!
//! Grounded on `original_source/decompress.c`'s main loop (BFINAL/BTYPE
//! dispatch, HLIT/HDIST/HCLEN header, code-length-code-length decoding via
//! the fixed permutation order, RLE expansion, then the literal/length/
//! distance decode loop). Only dynamic Huffman blocks (BTYPE=10) are
//! supported, matching spec.md's Non-goals for stored and fixed-Huffman
//! blocks; any other BTYPE is a hard error rather than silently
//! misinterpreted, which is where `decompress.c` itself never checks BTYPE
//! at all.

use std::io::{Read, Write};

use crate::bitio::reader::BitReader;
use crate::deflate_constants::{
    BTYPE_DYNAMIC_HUFFMAN, CODE_LENGTH_ORDER, END_OF_BLOCK_SYMBOL, MAX_CODE_LENGTH_CODE_LENGTH,
    MAX_LITLEN_CODE_LENGTH, NUM_CODE_LENGTH_SYMBOLS, NUM_DISTANCE_SYMBOLS, NUM_LITLEN_SYMBOLS,
};
use crate::distance_codes::{distance_extra_bits, symbol_to_distance};
use crate::error::{DeflateError, Result};
use crate::huffman::canonical::assign_codes;
use crate::huffman::decode_table::DecodeTable;
use crate::huffman::rle;
use crate::length_codes::{length_extra_bits, symbol_to_length};
use crate::window::OutputWindow;

/// Decodes every block in the stream (until BFINAL) into `output`.
pub fn decode_blocks<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    output: &mut OutputWindow<W>,
) -> Result<()> {
    loop {
        let bfinal = reader.read_bits(1)?;
        let btype = reader.read_bits(2)?;
        match btype {
            BTYPE_DYNAMIC_HUFFMAN => decode_dynamic_block(reader, output)?,
            other => return Err(DeflateError::UnsupportedBlockType(other as u8)),
        }
        if bfinal == 1 {
            break;
        }
    }
    Ok(())
}

fn decode_dynamic_block<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    output: &mut OutputWindow<W>,
) -> Result<()> {
    let hlit = reader.read_bits(5)? as usize;
    let hdist = reader.read_bits(5)? as usize;
    let hclen = reader.read_bits(4)? as usize;

    let ll_count = hlit + 257;
    let dist_count = hdist + 1;
    let cl_count = hclen + 4;

    if ll_count > NUM_LITLEN_SYMBOLS || dist_count > NUM_DISTANCE_SYMBOLS {
        return Err(DeflateError::MalformedHeader);
    }

    let mut cl_lengths_in_order = [0u8; 19];
    for slot in cl_lengths_in_order.iter_mut().take(cl_count) {
        *slot = reader.read_bits(3)? as u8;
    }

    let mut cl_lengths_by_symbol = vec![0u8; NUM_CODE_LENGTH_SYMBOLS];
    for (i, &sym) in CODE_LENGTH_ORDER.iter().enumerate() {
        cl_lengths_by_symbol[sym as usize] = cl_lengths_in_order[i];
    }
    let cl_codes = assign_codes(&cl_lengths_by_symbol, MAX_CODE_LENGTH_CODE_LENGTH);
    let cl_table = DecodeTable::build(&cl_lengths_by_symbol, &cl_codes, MAX_CODE_LENGTH_CODE_LENGTH);

    let combined_lengths = rle::decode_lengths(ll_count + dist_count, || {
        let symbol = cl_table.decode(reader)? as u8;
        let extra_bits = rle::EXTRA_BITS[symbol as usize] as u32;
        let extra_value = if extra_bits > 0 {
            reader.read_bits(extra_bits)? as u16
        } else {
            0
        };
        Ok((symbol, extra_value))
    })?;

    let mut ll_lengths = vec![0u8; NUM_LITLEN_SYMBOLS];
    ll_lengths[..ll_count].copy_from_slice(&combined_lengths[..ll_count]);
    let mut dist_lengths = vec![0u8; NUM_DISTANCE_SYMBOLS];
    dist_lengths[..dist_count].copy_from_slice(&combined_lengths[ll_count..ll_count + dist_count]);

    let ll_codes = assign_codes(&ll_lengths, MAX_LITLEN_CODE_LENGTH);
    let dist_codes = assign_codes(&dist_lengths, MAX_LITLEN_CODE_LENGTH);
    let ll_table = DecodeTable::build(&ll_lengths, &ll_codes, MAX_LITLEN_CODE_LENGTH);
    let dist_table = DecodeTable::build(&dist_lengths, &dist_codes, MAX_LITLEN_CODE_LENGTH);

    loop {
        let symbol = ll_table.decode(reader)?;
        if symbol < END_OF_BLOCK_SYMBOL {
            output.write_byte(symbol as u8)?;
            continue;
        }
        if symbol == END_OF_BLOCK_SYMBOL {
            break;
        }

        let length_extra = length_extra_bits(symbol);
        let length_extra_value = if length_extra > 0 { reader.read_bits(length_extra)? } else { 0 };
        let length = symbol_to_length(symbol, length_extra_value);

        let dist_symbol = dist_table.decode(reader)?;
        let dist_extra = distance_extra_bits(dist_symbol);
        let dist_extra_value = if dist_extra > 0 { reader.read_bits(dist_extra)? } else { 0 };
        let distance = symbol_to_distance(dist_symbol, dist_extra_value);

        output.copy_from_history(distance as usize, length as usize)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitio::writer::BitWriter;
    use crate::block_encoder::encode_block;

    #[test]
    fn rejects_stored_block_type() {
        let mut compressed = Vec::new();
        {
            let mut w = BitWriter::new(&mut compressed);
            w.write_bits(1, 1).unwrap(); // BFINAL
            w.write_bits(0b00, 2).unwrap(); // BTYPE = stored, unsupported
            w.finish().unwrap();
        }
        let mut out = Vec::new();
        let mut r = BitReader::new(&compressed[..]);
        let mut window = OutputWindow::new(&mut out);
        assert!(decode_blocks(&mut r, &mut window).is_err());
    }

    #[test]
    fn decodes_a_real_encoded_block() {
        let data = b"the quick brown fox jumps over the lazy dog, the quick brown fox";
        let mut compressed = Vec::new();
        {
            let mut w = BitWriter::new(&mut compressed);
            encode_block(&mut w, data).unwrap();
            w.finish().unwrap();
        }
        let mut out = Vec::new();
        {
            let mut r = BitReader::new(&compressed[..]);
            let mut window = OutputWindow::new(&mut out);
            decode_blocks(&mut r, &mut window).unwrap();
            window.finish().unwrap();
        }
        assert_eq!(out, data);
    }

    #[test]
    fn rejects_out_of_range_hlit_and_hdist_instead_of_panicking() {
        let mut compressed = Vec::new();
        {
            let mut w = BitWriter::new(&mut compressed);
            w.write_bits(1, 1).unwrap(); // BFINAL
            w.write_bits(BTYPE_DYNAMIC_HUFFMAN, 2).unwrap();
            w.write_bits(31, 5).unwrap(); // HLIT = 31 -> ll_count = 288 > 286
            w.write_bits(31, 5).unwrap(); // HDIST = 31 -> dist_count = 32 > 30
            w.write_bits(0, 4).unwrap(); // HCLEN
            w.finish().unwrap();
        }
        let mut out = Vec::new();
        let mut r = BitReader::new(&compressed[..]);
        let mut window = OutputWindow::new(&mut out);
        assert!(matches!(
            decode_blocks(&mut r, &mut window),
            Err(DeflateError::MalformedHeader)
        ));
    }
}
