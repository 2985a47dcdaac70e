//! Aspects describe which entities a system is interested in.
//!
//! An aspect is built from three sets of component types:
//!
//! - `all`: the entity must own every type in the set.
//! - `exclude`: the entity must own none of the types in the set.
//! - `one`: the entity must own at least one type in the set.
//!
//! Empty sets impose no constraint.
//! An aspect with neither `all` nor `one` types matches no entities at all;
//! such aspects are used by systems that only need a per-tick callback.
//!
//! ```
//! use aspecs::{Aspect, ComponentType};
//!
//! const POSITION: ComponentType = ComponentType::new(0);
//! const VELOCITY: ComponentType = ComponentType::new(1);
//! const FROZEN: ComponentType = ComponentType::new(2);
//!
//! let aspect = Aspect::for_all([POSITION, VELOCITY]).exclude([FROZEN]);
//! # let _ = aspect;
//! ```

use crate::bits::Bits;
use crate::component::ComponentType;

/// A membership predicate under construction.
///
/// An aspect is consumed by the system it is registered with,
/// after which it can no longer be modified.
#[derive(Debug, Default)]
#[must_use = "an aspect does nothing until it is registered with a system"]
pub struct Aspect {
    all:     Bits,
    exclude: Bits,
    one:     Bits,
}

fn to_bits(types: impl IntoIterator<Item = ComponentType>) -> Bits {
    Bits::from_ordinals(types.into_iter().map(ComponentType::ordinal))
}

impl Aspect {
    /// Creates an aspect that matches no entities.
    pub fn empty() -> Self { Self::default() }

    /// Creates an aspect requiring all of `types`.
    pub fn for_all(types: impl IntoIterator<Item = ComponentType>) -> Self { Self::empty().all(types) }

    /// Creates an aspect requiring at least one of `types`.
    pub fn for_one(types: impl IntoIterator<Item = ComponentType>) -> Self { Self::empty().one(types) }

    /// Additionally requires all of `types`.
    pub fn all(mut self, types: impl IntoIterator<Item = ComponentType>) -> Self {
        self.all = self.all.union(to_bits(types));
        self
    }

    /// Rejects entities owning any of `types`.
    pub fn exclude(mut self, types: impl IntoIterator<Item = ComponentType>) -> Self {
        self.exclude = self.exclude.union(to_bits(types));
        self
    }

    /// Additionally requires at least one of `types`.
    pub fn one(mut self, types: impl IntoIterator<Item = ComponentType>) -> Self {
        self.one = self.one.union(to_bits(types));
        self
    }
}

/// The immutable predicate compiled from an [`Aspect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    all:     Bits,
    exclude: Bits,
    one:     Bits,
    dummy:   bool,
}

impl From<Aspect> for Matcher {
    fn from(aspect: Aspect) -> Self {
        let Aspect { all, exclude, one } = aspect;
        Self { all, exclude, one, dummy: all.is_empty() && one.is_empty() }
    }
}

impl Matcher {
    /// Whether the predicate can never match any entity.
    pub fn is_dummy(&self) -> bool { self.dummy }

    pub fn all(&self) -> Bits { self.all }

    pub fn exclude(&self) -> Bits { self.exclude }

    pub fn one(&self) -> Bits { self.one }

    /// Checks whether an entity owning the component types `bits` qualifies.
    pub fn qualifies(&self, bits: Bits) -> bool {
        if self.dummy {
            return false;
        }

        (self.all.is_empty() || bits.is_superset(self.all))
            && (self.exclude.is_empty() || !bits.intersects(self.exclude))
            && (self.one.is_empty() || bits.intersects(self.one))
    }
}

#[cfg(test)]
mod tests {
    use super::{Aspect, Matcher};
    use crate::bits::Bits;
    use crate::component::ComponentType;

    const A: ComponentType = ComponentType::new(0);
    const B: ComponentType = ComponentType::new(1);
    const C: ComponentType = ComponentType::new(2);
    const D: ComponentType = ComponentType::new(3);

    fn bits(types: &[ComponentType]) -> Bits { Bits::from_ordinals(types.iter().map(|ty| ty.ordinal())) }

    /// Checks the matcher against every subset of `{A, B, C, D}`.
    fn assert_truth_table(aspect: Aspect, expect: impl Fn(Bits) -> bool) {
        let matcher = Matcher::from(aspect);
        for mask in 0..16_usize {
            let entity = Bits::from_ordinals((0..4).filter(|bit| mask & (1 << bit) != 0));
            assert_eq!(
                matcher.qualifies(entity),
                expect(entity),
                "{matcher:?} evaluated incorrectly for {entity:?}"
            );
        }
    }

    #[test]
    fn test_empty_is_dummy() {
        let matcher = Matcher::from(Aspect::empty());
        assert!(matcher.is_dummy());
        assert_truth_table(Aspect::empty(), |_| false);
    }

    #[test]
    fn test_exclude_only_is_dummy() {
        let matcher = Matcher::from(Aspect::empty().exclude([A]));
        assert!(matcher.is_dummy());
        assert_truth_table(Aspect::empty().exclude([A]), |_| false);
    }

    #[test]
    fn test_all() {
        assert_truth_table(Aspect::for_all([A, B]), |e| e.contains(0) && e.contains(1));
    }

    #[test]
    fn test_one() {
        assert_truth_table(Aspect::for_one([B, C]), |e| e.contains(1) || e.contains(2));
    }

    #[test]
    fn test_all_exclude() {
        assert_truth_table(Aspect::for_all([A]).exclude([C, D]), |e| {
            e.contains(0) && !e.contains(2) && !e.contains(3)
        });
    }

    #[test]
    fn test_one_exclude() {
        assert_truth_table(Aspect::for_one([A, B]).exclude([D]), |e| {
            (e.contains(0) || e.contains(1)) && !e.contains(3)
        });
    }

    #[test]
    fn test_all_one() {
        assert_truth_table(Aspect::for_all([A]).one([C, D]), |e| {
            e.contains(0) && (e.contains(2) || e.contains(3))
        });
    }

    #[test]
    fn test_all_exclude_one() {
        let aspect = Aspect::for_all([A]).exclude([B]).one([C, D]);
        assert_truth_table(aspect, |e| {
            e.contains(0) && !e.contains(1) && (e.contains(2) || e.contains(3))
        });
    }

    #[test]
    fn test_builder_accumulates() {
        let matcher = Matcher::from(Aspect::for_all([A]).all([B]).one([C]).one([D]));
        assert_eq!(matcher.all(), bits(&[A, B]));
        assert_eq!(matcher.one(), bits(&[C, D]));
        assert_eq!(matcher.exclude(), Bits::EMPTY);
    }
}
