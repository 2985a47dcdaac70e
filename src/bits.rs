//! Fixed-width membership bit-vectors.
//!
//! Component types, system types and manager types are all addressed by small ordinals.
//! Each ordinal maps to one bit position in a [`Bits`],
//! so the number of distinct ordinals of each kind is capped at [`CAPACITY`].

use std::fmt;

use itertools::Itertools;

/// The maximum number of component types, system types or manager types in a world.
///
/// Ordinals must be strictly smaller than this value.
pub const CAPACITY: usize = u64::BITS as usize;

/// A set of ordinals below [`CAPACITY`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bits(u64);

impl Bits {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Creates a set containing the given ordinals.
    pub fn from_ordinals(ordinals: impl IntoIterator<Item = usize>) -> Self {
        let mut bits = Self::EMPTY;
        for ordinal in ordinals {
            bits.insert(ordinal);
        }
        bits
    }

    /// Adds an ordinal to the set.
    pub fn insert(&mut self, ordinal: usize) {
        debug_assert!(ordinal < CAPACITY, "Ordinal {ordinal} exceeds the capacity {CAPACITY}");
        self.0 |= 1 << ordinal;
    }

    /// Removes an ordinal from the set.
    pub fn remove(&mut self, ordinal: usize) {
        debug_assert!(ordinal < CAPACITY, "Ordinal {ordinal} exceeds the capacity {CAPACITY}");
        self.0 &= !(1 << ordinal);
    }

    /// Checks whether an ordinal is in the set.
    pub fn contains(self, ordinal: usize) -> bool {
        debug_assert!(ordinal < CAPACITY, "Ordinal {ordinal} exceeds the capacity {CAPACITY}");
        self.0 & (1 << ordinal) != 0
    }

    /// Removes all ordinals.
    pub fn clear(&mut self) { self.0 = 0; }

    pub fn is_empty(self) -> bool { self.0 == 0 }

    /// Returns the number of ordinals in the set.
    pub fn len(self) -> usize { self.0.count_ones() as usize }

    /// Checks whether every ordinal in `other` is also in `self`.
    pub fn is_superset(self, other: Self) -> bool { self.0 & other.0 == other.0 }

    /// Checks whether the two sets share at least one ordinal.
    pub fn intersects(self, other: Self) -> bool { self.0 & other.0 != 0 }

    /// Returns the ordinals in either set.
    pub fn union(self, other: Self) -> Self { Self(self.0 | other.0) }

    /// Iterates over the ordinals in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        let mut rest = self.0;
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let ordinal = rest.trailing_zeros() as usize;
            rest &= rest - 1;
            Some(ordinal)
        })
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

/// Defines a small-integer ordinal type whose values are bit positions in [`Bits`].
macro_rules! ordinal_type {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            /// The kind name used in error messages.
            pub const KIND: &'static str = $kind;

            /// Wraps an ordinal.
            ///
            /// # Panics
            /// Panics if `ordinal` is not smaller than [`CAPACITY`](crate::bits::CAPACITY).
            pub const fn new(ordinal: usize) -> Self {
                assert!(ordinal < $crate::bits::CAPACITY, concat!($kind, " ordinal exceeds the capacity"));
                Self(ordinal)
            }

            /// Wraps an ordinal, returning an error if it is out of range.
            pub fn try_new(ordinal: usize) -> $crate::Result<Self> {
                if ordinal < $crate::bits::CAPACITY {
                    Ok(Self(ordinal))
                } else {
                    Err($crate::Error::CapacityExceeded {
                        kind:     $kind,
                        capacity: $crate::bits::CAPACITY,
                    })
                }
            }

            /// Returns the bit position of this ordinal.
            pub const fn ordinal(self) -> usize { self.0 }
        }
    };
}

pub(crate) use ordinal_type;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_operations() {
        let mut bits = Bits::from_ordinals([0, 3, 63]);
        assert_eq!(bits.len(), 3);
        assert!(bits.contains(63));
        assert!(!bits.contains(1));

        bits.remove(3);
        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![0, 63]);

        assert!(bits.is_superset(Bits::from_ordinals([63])));
        assert!(!bits.is_superset(Bits::from_ordinals([1, 63])));
        assert!(bits.intersects(Bits::from_ordinals([1, 63])));
        assert!(!bits.intersects(Bits::from_ordinals([1, 2])));
        assert!(bits.is_superset(Bits::EMPTY));

        bits.clear();
        assert!(bits.is_empty());
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", Bits::from_ordinals([5, 1])), "{1, 5}");
        assert_eq!(format!("{:?}", Bits::EMPTY), "{}");
    }

    #[test]
    #[should_panic = "Ordinal 64 exceeds the capacity 64"]
    #[cfg(debug_assertions)]
    fn test_capacity_assertion() {
        let mut bits = Bits::EMPTY;
        bits.insert(64);
    }
}
