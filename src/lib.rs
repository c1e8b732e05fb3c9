//! Buffered bit level reading and writing on top of byte oriented streams.
//!
//! Callers read or write any number of bits from 0 to 64 per call. Bits are packed most
//! significant bit first, and a flush pads the final byte with 0s. This is the substrate for
//! formats that do not line up with byte boundaries: flags, variable width integers,
//! entropy coded fields.
//!
//! Basic usage:
//!
//! ```
//! use buffbits::{BitReader, BitWriter};
//!
//! let mut bw = BitWriter::new(Vec::new());
//! bw.write(0b101, 3)?;
//! bw.write(0x1ff, 9)?;
//! let bytes = bw.into_inner()?;
//! assert_eq!(bytes, vec![0b1011_1111, 0b1111_0000]);
//!
//! let mut br = BitReader::new(bytes.as_slice());
//! assert_eq!(br.read(12)?, 0b1011_1111_1111);
//! # Ok::<(), buffbits::Error>(())
//! ```
//!
//! Any failure of the wrapped stream, and running out of input, is latched: the reader or
//! writer returns the same error from then on until it is reset onto a new stream.
//!
pub mod bitstream;
pub mod error;
pub mod tools;

pub use bitstream::accumulator::MAX_BITS;
pub use bitstream::bitreader::BitReader;
pub use bitstream::bitwriter::BitWriter;
pub use bitstream::DEFAULT_BUF_SIZE;
pub use error::{Error, Result};
