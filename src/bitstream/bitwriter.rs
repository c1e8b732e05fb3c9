//! BitWriter: bit level writes to any byte oriented I/O sink.
//!
//! Bits are packed most significant bit first into bytes, staged a full 64 bit word at a time
//! in a byte buffer, and written to the sink whenever that buffer reaches its capacity. Call
//! flush() when done: it pads the last byte with 0s and pushes everything through to the sink.
//! Bits and bytes still held when the writer is dropped are lost.
//!
//! NOTE: Once a write to the sink fails, the staged bytes are thrown away and the sink is not
//! touched again until the writer is reset.
//!
use std::io::Write;

use log::{debug, trace, warn};

use super::accumulator::{check_count, mask, shl, shr, split, Accumulator, MAX_BITS};
use super::DEFAULT_BUF_SIZE;
use crate::error::{Error, Result};

/// Writes bits to a byte oriented sink.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Handle to the sink
    writer: W,
    /// Whole bytes waiting to be written to the sink
    staged: Vec<u8>,
    /// Number of staged bytes that triggers a write to the sink
    capacity: usize,
    /// Bits waiting for a full word (or a flush)
    acc: Accumulator,
    /// First error seen, returned by every later call
    err: Option<Error>,
    /// Bits accepted so far, padding included
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Creates a new BitWriter with the default buffer size.
    pub fn new(writer: W) -> Self {
        Self::with_capacity(DEFAULT_BUF_SIZE, writer)
    }

    /// Creates a new BitWriter writing to writer through a buffer of `capacity` bytes. A
    /// capacity of 0 hands every word to the sink as soon as it is complete.
    pub fn with_capacity(capacity: usize, writer: W) -> Self {
        Self {
            writer,
            staged: Vec::with_capacity(capacity),
            capacity,
            acc: Accumulator::default(),
            err: None,
            bits_written: 0,
        }
    }

    /// Returns the first error that stopped this writer, if any.
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// Discards all state and switches writing to a new sink. Returns the old sink.
    ///
    /// The old sink is NOT flushed: bits in the accumulator and bytes still in the buffer are
    /// dropped. Call flush() first to keep them.
    pub fn reset(&mut self, writer: W) -> W {
        let pending = self.acc.count as usize + self.staged.len() * 8;
        if pending > 0 && self.err.is_none() {
            warn!("BitWriter reset discards {} unflushed bits", pending);
        }
        self.staged.clear();
        self.acc.clear();
        self.err = None;
        self.bits_written = 0;
        std::mem::replace(&mut self.writer, writer)
    }

    /// Gets a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Flushes (padding the last byte) and returns the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Writes the lowest `count` bits (0-64) of value. Higher bits of value are ignored.
    pub fn write(&mut self, value: u64, count: u32) -> Result<()> {
        check_count(count)?;
        if let Some(e) = &self.err {
            return Err(e.clone());
        }

        let value = value & mask(count);
        let total = self.acc.count + count;

        if total < MAX_BITS {
            self.acc.buf = shl(self.acc.buf, count) | value;
            self.acc.count = total;
            self.bits_written += count as u64;
            return Ok(());
        }

        // Top up the accumulator with the higher bits of value to get a full word, and keep
        // the lower bits of value that are left over.
        let over = total - MAX_BITS;
        let word = shl(self.acc.buf, MAX_BITS - self.acc.count) | shr(value, over);
        self.acc = Accumulator {
            buf: value & mask(over),
            count: over,
        };
        trace!("emit word {:#018x}, {} bits carried", word, over);
        self.emit(word, MAX_BITS)?;
        self.bits_written += count as u64;
        Ok(())
    }

    /// Pads to the next byte boundary with 0s, writes out everything held and flushes the
    /// underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(e) = &self.err {
            return Err(e.clone());
        }

        let pad = (8 - self.acc.count % 8) % 8;
        if pad > 0 {
            self.write(0, pad)?;
        }

        if self.acc.count > 0 {
            let Accumulator { buf, count } = self.acc;
            self.acc.clear();
            self.emit(buf, count)?;
        }
        self.drain()?;

        if let Err(e) = self.writer.flush() {
            return Err(self.latch(e.into()));
        }
        Ok(())
    }

    /// Stages the low `count` bits of value (a whole number of bytes), writing to the sink once
    /// the buffer is full.
    fn emit(&mut self, value: u64, count: u32) -> Result<()> {
        self.staged.extend_from_slice(&split(value, count));
        if self.staged.len() >= self.capacity {
            self.drain()?;
        }
        Ok(())
    }

    /// Writes all staged bytes to the sink. The staged bytes are gone afterwards, written or not.
    fn drain(&mut self) -> Result<()> {
        if self.staged.is_empty() {
            return Ok(());
        }
        let result = self.writer.write_all(&self.staged);
        self.staged.clear();
        if let Err(e) = result {
            return Err(self.latch(e.into()));
        }
        Ok(())
    }

    /// Records the error so every later call returns it.
    fn latch(&mut self, e: Error) -> Error {
        debug!("BitWriter stopped at {}: {}", self.loc(), e);
        self.err = Some(e.clone());
        e
    }

    /// Writes a single bit, 1 for true.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write(bit as u64, 1)
    }

    /// Writes 8 bits.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write(byte as u64, 8)
    }

    /// Writes each byte in turn. The writer does not need to be byte aligned.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        bytes.iter().try_for_each(|&b| self.write_byte(b))
    }

    /// Total number of bits accepted since creation or the last reset, flush padding included.
    pub fn bit_position(&self) -> u64 {
        self.bits_written
    }

    /// Debugging function. Report the current position as [bytes.bits].
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bits_written / 8, self.bits_written % 8)
    }
}
