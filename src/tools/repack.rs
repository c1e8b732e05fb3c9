use std::io::{Read, Write};

use log::{info, trace};

use super::check_width;
use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{Error, Result};

/// Copy `len` bytes from source to sink by reading bits in the cycling list of `widths` and
/// writing each chunk straight back out. The sink ends up byte for byte equal to the source.
/// Returns the sink once everything has been flushed.
pub fn repack<R: Read, W: Write>(
    source: R,
    sink: W,
    len: u64,
    widths: &[u32],
    capacity: usize,
) -> Result<W> {
    if widths.is_empty() {
        return Err(Error::InvalidCount(0));
    }
    widths.iter().try_for_each(|&w| check_width(w))?;

    let total = len * 8;
    let mut br = BitReader::with_capacity(capacity, source);
    let mut bw = BitWriter::with_capacity(capacity, sink);

    for &width in widths.iter().cycle() {
        let remaining = total - br.bit_position();
        if remaining == 0 {
            break;
        }
        let count = remaining.min(width as u64) as u32;
        let value = br.read(count)?;
        bw.write(value, count)?;
        trace!("{} {:#x}/{}", br.loc(), value, count);
    }

    info!("Repacked {} bits using widths {:?}", total, widths);
    bw.into_inner()
}
