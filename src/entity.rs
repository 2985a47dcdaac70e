//! Entities are identities that components are attached to.
//!
//! An [`Entity`] carries no data of its own.
//! It is a key into the component table,
//! plus two membership bit-vectors that record which component types it owns
//! and which systems currently process it.
//!
//! Entity IDs are recycled through an [`IdentifierPool`]
//! once the entity has been fully reclaimed.

use std::fmt;

use crate::bits::Bits;

mod pool;
pub use pool::IdentifierPool;

mod manager;
pub use manager::EntityManager;

#[cfg(test)]
mod tests;

/// The integer identity of an entity.
///
/// IDs are unique among live entities,
/// but may be reused by a new entity after the previous owner has been reclaimed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

impl EntityId {
    /// Wraps a raw ID.
    pub const fn new(id: u32) -> Self { Self(id) }

    /// Returns the raw ID.
    pub const fn get(self) -> u32 { self.0 }

    /// Returns the ID as an index into vec-based storages.
    pub fn index(self) -> usize { self.0.try_into().expect("usize >= u32") }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A live entity owned by the [`EntityManager`].
#[derive(Debug)]
pub struct Entity {
    id:             EntityId,
    component_bits: Bits,
    system_bits:    Bits,
}

impl Entity {
    pub(crate) fn new(id: EntityId) -> Self {
        Self { id, component_bits: Bits::EMPTY, system_bits: Bits::EMPTY }
    }

    pub fn id(&self) -> EntityId { self.id }

    /// The component types this entity owns.
    pub fn component_bits(&self) -> Bits { self.component_bits }

    /// The systems whose live list currently contains this entity.
    pub fn system_bits(&self) -> Bits { self.system_bits }

    pub(crate) fn component_bits_mut(&mut self) -> &mut Bits { &mut self.component_bits }

    pub(crate) fn system_bits_mut(&mut self) -> &mut Bits { &mut self.system_bits }
}
