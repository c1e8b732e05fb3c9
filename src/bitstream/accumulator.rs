//! The bit accumulator shared by BitReader and BitWriter, plus the few bit twiddling helpers
//! both sides need.
//!
//! The accumulator holds fewer than 64 pending bits, right-justified in a u64. Every bit above
//! `count` is zero. The reader drains it from the top; the writer fills it from the bottom.
//!
use crate::error::{Error, Result};

/// Width of the accumulator register. Also the largest count accepted by read and write.
pub const MAX_BITS: u32 = 64;

/// Pending bits waiting to be handed out (reader) or pushed to the stream (writer).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Accumulator {
    /// Pending bits, right-justified.
    pub(crate) buf: u64,
    /// Number of valid bits in buf, 0..=63 at rest.
    pub(crate) count: u32,
}

impl Accumulator {
    /// Remove and return the top `n` pending bits. Caller guarantees `n <= self.count`.
    pub(crate) fn take(&mut self, n: u32) -> u64 {
        debug_assert!(n <= self.count);
        let value = shr(self.buf, self.count - n);
        self.count -= n;
        self.buf &= mask(self.count);
        value
    }

    /// Drop everything held.
    pub(crate) fn clear(&mut self) {
        self.buf = 0;
        self.count = 0;
    }
}

/// Reject bit counts larger than the register.
pub(crate) fn check_count(count: u32) -> Result<()> {
    if count > MAX_BITS {
        return Err(Error::InvalidCount(count));
    }
    Ok(())
}

/// Mask keeping the low `n` bits. `mask(64)` keeps everything.
#[inline]
pub(crate) fn mask(n: u32) -> u64 {
    if n >= MAX_BITS {
        u64::MAX
    } else {
        (1 << n) - 1
    }
}

/// Left shift where shifting by the full width (or more) clears the value.
#[inline]
pub(crate) fn shl(value: u64, n: u32) -> u64 {
    value.checked_shl(n).unwrap_or(0)
}

/// Right shift where shifting by the full width (or more) clears the value.
#[inline]
pub(crate) fn shr(value: u64, n: u32) -> u64 {
    value.checked_shr(n).unwrap_or(0)
}

/// Join up to 8 bytes into the low positions of a u64, first byte most significant.
pub(crate) fn join(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    bytes.iter().fold(0, |acc, &b| (acc << 8) | b as u64)
}

/// Split the low `count` bits of value into bytes, most significant first. `count` must be a
/// multiple of 8, at most 64.
pub(crate) fn split(value: u64, count: u32) -> Vec<u8> {
    debug_assert!(count % 8 == 0 && count <= MAX_BITS);
    let bytes = value.to_be_bytes();
    bytes[(8 - count as usize / 8)..].to_vec()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mask_test() {
        assert_eq!(mask(0), 0);
        assert_eq!(mask(1), 1);
        assert_eq!(mask(12), 0xfff);
        assert_eq!(mask(63), u64::MAX >> 1);
        assert_eq!(mask(64), u64::MAX);
    }

    #[test]
    fn shift_test() {
        assert_eq!(shl(1, 63), 1 << 63);
        assert_eq!(shl(u64::MAX, 64), 0);
        assert_eq!(shr(u64::MAX, 63), 1);
        assert_eq!(shr(u64::MAX, 64), 0);
    }

    #[test]
    fn take_test() {
        let mut acc = Accumulator {
            buf: 0b10100,
            count: 5,
        };
        assert_eq!(acc.take(3), 0b101);
        assert_eq!(
            acc,
            Accumulator {
                buf: 0b00,
                count: 2
            }
        );
        assert_eq!(acc.take(0), 0);
        assert_eq!(acc.take(2), 0);
        assert_eq!(acc.count, 0);
    }

    #[test]
    fn take_all_63_test() {
        let mut acc = Accumulator {
            buf: mask(63),
            count: 63,
        };
        assert_eq!(acc.take(63), mask(63));
        assert_eq!(acc, Accumulator::default());
    }

    #[test]
    fn check_count_test() {
        assert!(check_count(0).is_ok());
        assert!(check_count(64).is_ok());
        assert!(matches!(check_count(65), Err(Error::InvalidCount(65))));
        assert!(matches!(
            check_count(u32::MAX),
            Err(Error::InvalidCount(u32::MAX))
        ));
    }

    #[test]
    fn join_split_test() {
        assert_eq!(join(&[]), 0);
        assert_eq!(join(&[0x12, 0x34]), 0x1234);
        assert_eq!(join(&[0xff; 8]), u64::MAX);
        assert_eq!(split(0x1234, 16), vec![0x12, 0x34]);
        assert_eq!(split(0xdead_beef, 0), Vec::<u8>::new());
        assert_eq!(
            split(0x0102_0304_0506_0708, 64),
            vec![1, 2, 3, 4, 5, 6, 7, 8]
        );
    }
}
