use std::io::{Read, Write};

use log::{debug, warn};

use super::check_width;
use crate::bitstream::bitreader::BitReader;
use crate::error::Result;

/// Print `len` bytes of source as `width` bit chunks in binary, one chunk per line. A short
/// final chunk is printed with only the bits that exist. Returns the number of full chunks.
pub fn dump<R: Read, W: Write>(
    source: R,
    len: u64,
    width: u32,
    capacity: usize,
    out: &mut W,
) -> Result<u64> {
    check_width(width)?;
    let total = len * 8;
    let mut br = BitReader::with_capacity(capacity, source);

    let mut chunks = 0;
    while br.bit_position() + width as u64 <= total {
        let value = br.read(width)?;
        writeln!(out, "{:0w$b}", value, w = width as usize)?;
        chunks += 1;
    }

    // Whatever is left is less than one chunk.
    let trailing = (total - br.bit_position()) as u32;
    if trailing > 0 {
        warn!("Input ends {} bits into a {} bit chunk", trailing, width);
        let value = br.read(trailing)?;
        writeln!(out, "{:0w$b}", value, w = trailing as usize)?;
    }

    debug!("Dumped {} chunks of {} bits", chunks, width);
    Ok(chunks)
}
