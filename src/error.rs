use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Error definition for the bit reader and bit writer.
///
/// Errors coming from the wrapped stream are held in an `Arc` so that a latched error can be
/// handed back on every later call.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Returned when a read or write asks for more than 64 bits
    #[error("buffbits: read/write with invalid bit count {0}")]
    InvalidCount(u32),
    /// Returned when the input ran dry before the requested bits were available
    #[error("buffbits: unexpected end of input")]
    UnexpectedEndOfInput,
    /// Any other failure of the underlying stream, passed through unchanged
    #[error(transparent)]
    Io(#[from] Arc<io::Error>),
}

impl Error {
    /// The closest `io::ErrorKind` for this error.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Error::InvalidCount(_) => io::ErrorKind::InvalidInput,
            Error::UnexpectedEndOfInput => io::ErrorKind::UnexpectedEof,
            Error::Io(e) => e.kind(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(Arc::new(e))
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner,
                Err(shared) => io::Error::new(shared.kind(), Error::Io(shared)),
            },
            other => io::Error::new(other.kind(), other),
        }
    }
}

/// Alias for Result<T, buffbits::Error>
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::Error;
    use std::io;

    #[test]
    fn kind_test() {
        assert_eq!(Error::InvalidCount(65).kind(), io::ErrorKind::InvalidInput);
        assert_eq!(Error::UnexpectedEndOfInput.kind(), io::ErrorKind::UnexpectedEof);
        let e: Error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn io_error_passes_through_test() {
        let e: Error = io::Error::new(io::ErrorKind::Other, "no progress").into();
        assert_eq!(e.to_string(), "no progress");
        let back: io::Error = e.into();
        assert_eq!(back.kind(), io::ErrorKind::Other);
        assert_eq!(back.to_string(), "no progress");
    }

    #[test]
    fn latched_copy_converts_test() {
        let e: Error = io::Error::new(io::ErrorKind::TimedOut, "slow").into();
        let latched = e.clone();
        let back: io::Error = e.into();
        assert_eq!(back.kind(), io::ErrorKind::TimedOut);
        assert_eq!(back.to_string(), "slow");
        let kept = back.get_ref().and_then(|e| e.downcast_ref::<Error>());
        match kept {
            Some(Error::Io(inner)) => assert_eq!(inner.kind(), io::ErrorKind::TimedOut),
            other => panic!("expected the latched io error, got {:?}", other),
        }
        drop(latched);
    }

    #[test]
    fn display_test() {
        assert_eq!(
            Error::InvalidCount(65).to_string(),
            "buffbits: read/write with invalid bit count 65"
        );
        let back: io::Error = Error::UnexpectedEndOfInput.into();
        assert_eq!(back.kind(), io::ErrorKind::UnexpectedEof);
    }
}
