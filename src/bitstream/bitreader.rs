//! BitReader: bit level reads from any byte oriented I/O source.
//!
//! Reads are buffered through std's BufReader. Bits come out in the order they sit in the
//! stream: most significant bit of each byte first, and the earliest bit becomes the most
//! significant bit of the returned chunk.
//!
//! NOTE: Once a read fails (other than for a bad bit count), the reader stops touching the
//! source and hands back the same error until it is reset onto a new source.
//!
use std::io::{self, BufRead, BufReader, Read};

use log::{debug, trace};

use super::accumulator::{check_count, join, shl, Accumulator};
use super::DEFAULT_BUF_SIZE;
use crate::error::{Error, Result};

/// Reads bits from a byte oriented source.
#[derive(Debug)]
pub struct BitReader<R> {
    source: BufReader<R>,
    acc: Accumulator,
    err: Option<Error>,
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader with the default buffer size.
    pub fn new(source: R) -> Self {
        Self::with_capacity(DEFAULT_BUF_SIZE, source)
    }

    /// Creates a new BitReader reading from source through a buffer of `capacity` bytes.
    pub fn with_capacity(capacity: usize, source: R) -> Self {
        // An empty BufReader buffer reads as end of input.
        let capacity = capacity.max(1);
        Self {
            source: BufReader::with_capacity(capacity, source),
            acc: Accumulator::default(),
            err: None,
            bits_read: 0,
        }
    }

    /// Returns the first error that stopped this reader, if any.
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// Discards all state and switches reading to a new source. Returns the old source. Bytes
    /// already buffered from the old source are dropped.
    pub fn reset(&mut self, source: R) -> R {
        let capacity = self.source.capacity();
        let old = std::mem::replace(
            &mut self.source,
            BufReader::with_capacity(capacity, source),
        );
        self.acc.clear();
        self.err = None;
        self.bits_read = 0;
        old.into_inner()
    }

    /// Gets a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        self.source.get_ref()
    }

    /// Unwraps the reader, returning the underlying source. Buffered bits and bytes are lost.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }

    /// Reads `count` bits (0-64) and returns them in the low positions of a u64, with all
    /// higher bits clear. Fails with UnexpectedEndOfInput if the source runs out first.
    pub fn read(&mut self, count: u32) -> Result<u64> {
        check_count(count)?;
        if let Some(e) = &self.err {
            return Err(e.clone());
        }

        // The request can be covered by the accumulator alone.
        if count <= self.acc.count {
            self.bits_read += count as u64;
            return Ok(self.acc.take(count));
        }

        // Start off with whatever is held, then fill in the rest from fresh bytes.
        let held = self.acc;
        let need = count - held.count;
        self.acc = match self.refill(need) {
            Ok(fresh) => fresh,
            Err(e) => return Err(self.latch(e)),
        };
        let value = shl(held.buf, need) | self.acc.take(need);

        self.bits_read += count as u64;
        Ok(value)
    }

    /// Loads up to 8 fresh bytes from the source. Stops early once `need` bits are covered and
    /// the buffer is empty, so a slow source is not waited on for bits nobody asked for yet.
    fn refill(&mut self, need: u32) -> Result<Accumulator> {
        let mut bytes = [0_u8; 8];
        let mut filled = 0;

        while filled < bytes.len() {
            let available = match self.source.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if available.is_empty() {
                break;
            }
            let n = available.len().min(bytes.len() - filled);
            bytes[filled..filled + n].copy_from_slice(&available[..n]);
            self.source.consume(n);
            filled += n;

            if filled as u32 * 8 >= need && self.source.buffer().is_empty() {
                break;
            }
        }

        let fresh = Accumulator {
            buf: join(&bytes[..filled]),
            count: filled as u32 * 8,
        };
        trace!("refill: {} bits loaded, {} needed", fresh.count, need);
        if fresh.count < need {
            return Err(Error::UnexpectedEndOfInput);
        }
        Ok(fresh)
    }

    /// Records the error so every later call returns it.
    fn latch(&mut self, e: Error) -> Error {
        debug!("BitReader stopped at {}: {}", self.loc(), e);
        self.acc.clear();
        self.err = Some(e.clone());
        e
    }

    /// Returns the next bit, true for 1.
    pub fn read_bit(&mut self) -> Result<bool> {
        self.read(1).map(|bit| bit == 1)
    }

    /// Returns the next 8 bits as a byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.read(8).map(|byte| byte as u8)
    }

    /// Returns the next n bytes. The reader does not need to be byte aligned.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut result = Vec::with_capacity(n);
        for _ in 0..n {
            result.push(self.read_byte()?);
        }
        Ok(result)
    }

    /// Total number of bits handed out since creation or the last reset.
    pub fn bit_position(&self) -> u64 {
        self.bits_read
    }

    /// Debugging function. Report the current position as [bytes.bits].
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bits_read / 8, self.bits_read % 8)
    }
}
