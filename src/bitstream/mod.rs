//! The bitstream module forms the bit level I/O layer of buffbits.
//!
//! A BitReader wraps any std::io::Read and hands out 0-64 bits per call. A BitWriter wraps any
//! std::io::Write and takes 0-64 bits per call. Both keep fewer than 64 pending bits in a
//! private accumulator and only touch the wrapped stream when it runs short (reader) or fills
//! up (writer).
//!
//! The bit order is the same on both sides: the first bit written (or read) is the most
//! significant bit of the first byte. Chunk sizes on the read side do not need to match the
//! chunk sizes used when writing.
//!
pub mod accumulator;
pub mod bitreader;
pub mod bitwriter;

#[cfg(test)]
pub(crate) mod test_streams;

/// Buffer size used by BitReader::new and BitWriter::new.
pub const DEFAULT_BUF_SIZE: usize = 8 * 1024;
