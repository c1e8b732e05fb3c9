//! The tools module holds the pieces of the buffbits command line program.
//!
//! The tools are:
//! - cli: Command line interface for buffbits.
//! - dump: Print a file as a column of fixed width bit chunks.
//! - repack: Copy a file bit by bit through a BitReader and a BitWriter.
//!
pub mod cli;
pub mod dump;
pub mod repack;

use crate::bitstream::accumulator::MAX_BITS;
use crate::error::{Error, Result};

/// Chunk widths used by the tools must be 1..=64. (A zero width would never make progress.)
pub(crate) fn check_width(width: u32) -> Result<()> {
    if width == 0 || width > MAX_BITS {
        return Err(Error::InvalidCount(width));
    }
    Ok(())
}
