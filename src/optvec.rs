//! The sparse indexed store backing entities and component storages.

use std::mem::{self, MaybeUninit};

use bitvec::prelude::BitVec;

/// A `Vec<Option<T>>`-like data structure with optimized discriminant storage using [`BitVec`].
///
/// Slots are addressed by dense integer ids and grow on demand.
/// Each slot exclusively owns its value; vacating a slot drops the value immediately.
pub struct OptVec<T> {
    is_set:      BitVec,
    data:        Vec<MaybeUninit<T>>,
    cardinality: usize,
}

impl<T> Default for OptVec<T> {
    fn default() -> Self { Self { is_set: BitVec::new(), data: Vec::new(), cardinality: 0 } }
}

impl<T> OptVec<T> {
    /// Creates a new `OptVec` with `capacity` empty slots.
    pub fn repeat_none(capacity: usize) -> Self {
        let mut vec = Self::default();
        vec.resize_at_least(capacity);
        vec
    }

    /// Returns the number of slots in the `OptVec`, including empty ones.
    pub fn len(&self) -> usize {
        debug_assert!(self.is_set.len() == self.data.len());
        self.is_set.len()
    }

    /// Returns `true` if the `OptVec` has no slots.
    pub fn is_empty(&self) -> bool { self.is_set.is_empty() }

    /// Returns the number of occupied slots.
    pub fn cardinality(&self) -> usize { self.cardinality }

    /// Grows the `OptVec` with empty slots such that `index < self.len()` for all `index < new_len`.
    pub fn resize_at_least(&mut self, new_len: usize) {
        if self.len() >= new_len {
            return;
        }

        self.is_set.resize(new_len, false);
        self.data.resize_with(new_len, MaybeUninit::uninit);
    }

    /// Checks whether the slot at `index` is occupied.
    pub fn contains(&self, index: usize) -> bool {
        match self.is_set.get(index) {
            Some(bit) => *bit,
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if *self.is_set.get(index)? {
            let data = self.data.get(index).expect("is_set is longer than data");
            // SAFETY: The `is_set` bit is set, so the `data` slot is initialized.
            unsafe { Some(data.assume_init_ref()) }
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if *self.is_set.get(index)? {
            let data = self.data.get_mut(index).expect("is_set is longer than data");
            // SAFETY: The `is_set` bit is set, so the `data` slot is initialized.
            unsafe { Some(data.assume_init_mut()) }
        } else {
            None
        }
    }

    /// Sets or clears the slot at `index`, growing the `OptVec` if necessary.
    ///
    /// Returns the previous value of the slot.
    pub fn replace(&mut self, index: usize, value: Option<T>) -> Option<T> {
        if value.is_some() {
            self.resize_at_least(index + 1);
        } else if index >= self.len() {
            return None;
        }

        let was_set = self.contains(index);
        self.is_set.set(index, value.is_some());

        let slot = self.data.get_mut(index).expect("is_set is longer than data");
        let old = match value {
            Some(value) => mem::replace(slot, MaybeUninit::new(value)),
            None => mem::replace(slot, MaybeUninit::uninit()),
        };

        // split into two separate statements to avoid integer underflow
        self.cardinality += usize::from(self.contains(index));
        self.cardinality -= usize::from(was_set);

        if was_set {
            // SAFETY: The `is_set` bit was set, so the old slot was initialized.
            // The slot has been overwritten, so the value is moved out exactly once.
            Some(unsafe { old.assume_init() })
        } else {
            None
        }
    }

    /// Stores `value` at `index`, returning the previous value.
    pub fn insert(&mut self, index: usize, value: T) -> Option<T> { self.replace(index, Some(value)) }

    /// Vacates the slot at `index`, returning the previous value.
    pub fn remove(&mut self, index: usize) -> Option<T> { self.replace(index, None) }

    /// Vacates all slots while retaining the allocated length.
    pub fn clear(&mut self) {
        for index in self.is_set.iter_ones().collect::<Vec<_>>() {
            self.remove(index);
        }
    }

    /// Iterates over occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.is_set.iter_ones().map(|index| {
            let data = self.data.get(index).expect("is_set is longer than data");
            // SAFETY: `iter_ones` only yields indices whose `is_set` bit is set.
            (index, unsafe { data.assume_init_ref() })
        })
    }

    /// Iterates over occupied slots in index order with mutable access.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        let is_set = &self.is_set;
        self.data.iter_mut().enumerate().filter(|(index, _)| is_set[*index]).map(|(index, data)| {
            // SAFETY: filtered to indices whose `is_set` bit is set.
            (index, unsafe { data.assume_init_mut() })
        })
    }
}

impl<T> Drop for OptVec<T> {
    fn drop(&mut self) {
        if mem::needs_drop::<T>() {
            self.clear();
        }
    }
}
