//! Stream doubles used by the bitstream unit tests.
use std::cell::Cell;
use std::io::{self, Read, Write};
use std::rc::Rc;

/// Fails every read, write and flush with the given kind, counting the attempts.
#[derive(Debug)]
pub(crate) struct FailingStream {
    pub(crate) kind: io::ErrorKind,
    pub(crate) calls: usize,
}

impl FailingStream {
    pub(crate) fn new(kind: io::ErrorKind) -> Self {
        Self { kind, calls: 0 }
    }

    fn fail(&mut self) -> io::Error {
        self.calls += 1;
        io::Error::new(self.kind, "stream failure")
    }
}

impl Read for FailingStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(self.fail())
    }
}

impl Write for FailingStream {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(self.fail())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(self.fail())
    }
}

/// Hands out at most `step` bytes per read call and counts the calls. An optional number of
/// `Interrupted` errors is returned before any data.
#[derive(Debug)]
pub(crate) struct TrickleReader {
    data: Vec<u8>,
    pos: usize,
    step: usize,
    interrupts: usize,
    pub(crate) calls: usize,
}

impl TrickleReader {
    pub(crate) fn new(data: &[u8], step: usize) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            step,
            interrupts: 0,
            calls: 0,
        }
    }

    pub(crate) fn interrupted(mut self, times: usize) -> Self {
        self.interrupts = times;
        self
    }
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.interrupts > 0 {
            self.interrupts -= 1;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
        }
        let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Collects written bytes and counts write and flush calls.
#[derive(Debug, Default)]
pub(crate) struct CountingWriter {
    pub(crate) data: Vec<u8>,
    pub(crate) writes: usize,
    pub(crate) flushes: usize,
}

impl Write for CountingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Fails every write and flush, counting attempts in a counter that outlives the sink.
#[derive(Debug)]
pub(crate) struct SharedFailingSink {
    calls: Rc<Cell<usize>>,
}

impl SharedFailingSink {
    pub(crate) fn new(calls: &Rc<Cell<usize>>) -> Self {
        Self {
            calls: Rc::clone(calls),
        }
    }

    fn fail(&self) -> io::Error {
        self.calls.set(self.calls.get() + 1);
        io::Error::new(io::ErrorKind::BrokenPipe, "sink closed")
    }
}

impl Write for SharedFailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(self.fail())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(self.fail())
    }
}
