//! Strongly typed, zero-cost identifier wrappers.
//!
//! Philosophers are numbered from 1 (that is what the event log prints);
//! forks are ring positions numbered from 0.  Keeping the two in separate
//! types makes the off-by-one between them a compile error rather than a
//! silent wrong lock.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a philosopher, `1..=N`.
    pub struct PhilosopherId(u32);
}

typed_id! {
    /// Ring position of a fork, `0..N`.
    pub struct ForkId(u32);
}

impl PhilosopherId {
    /// `true` for even identities; these take their left fork first.
    #[inline]
    pub fn is_even(self) -> bool {
        self.0 % 2 == 0
    }

    /// Zero-based position at the table, for indexing seat arrays.
    #[inline(always)]
    pub fn seat_index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Philosopher sitting at zero-based position `index`.
    #[inline]
    pub fn from_seat_index(index: usize) -> Self {
        PhilosopherId(index as u32 + 1)
    }
}

impl ForkId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
