use bitvec::prelude::BitVec;
use itertools::Itertools;

use super::{Entity, EntityId, IdentifierPool};
use crate::event::Event;
use crate::optvec::OptVec;

/// Owns the canonical [`Entity`] instances of a world
/// and tracks which of them are active, disabled or pending deletion.
#[derive(Default)]
pub struct EntityManager {
    entities: OptVec<Entity>,
    pool:     IdentifierPool,

    /// Entities that have been added and not yet reclaimed.
    active:   BitVec,
    disabled: BitVec,
    /// Entities deleted since the last [`clean`](Self::clean).
    deleted:  BitVec,
    /// Entities with a deletion request waiting in the queue.
    queued:   BitVec,

    active_count:  usize,
    total_created: u64,
    total_added:   u64,
    total_deleted: u64,
}

fn bit(bits: &BitVec, index: usize) -> bool {
    match bits.get(index) {
        Some(bit) => *bit,
        None => false,
    }
}

fn set_bit(bits: &mut BitVec, index: usize, value: bool) {
    if bits.len() <= index {
        if !value {
            return;
        }
        bits.resize(index + 1, false);
    }
    bits.set(index, value);
}

impl EntityManager {
    /// Allocates a new entity with empty membership bits.
    ///
    /// The entity is not visible to managers and systems until it is added to the world.
    pub(crate) fn create_entity_instance(&mut self) -> EntityId {
        let id = self.pool.check_out();
        let old = self.entities.insert(id.index(), Entity::new(id));
        assert!(old.is_none(), "{id:?} was checked out before its previous owner was reclaimed");
        self.total_created += 1;
        id
    }

    /// Gets an entity that has been created and not yet reclaimed.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> { self.entities.get(id.index()) }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    /// Iterates over all entities that have been created and not yet reclaimed.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().map(|(_, entity)| entity)
    }

    /// Checks whether the entity has been added to the world and not yet reclaimed.
    ///
    /// Disabled entities are still active.
    pub fn is_active(&self, id: EntityId) -> bool { bit(&self.active, id.index()) }

    /// Checks whether the entity is enabled.
    ///
    /// Entities are enabled unless explicitly disabled.
    pub fn is_enabled(&self, id: EntityId) -> bool { !bit(&self.disabled, id.index()) }

    /// Checks whether the entity has been deleted and is waiting for reclamation.
    pub fn is_deleted(&self, id: EntityId) -> bool { bit(&self.deleted, id.index()) }

    /// Marks a deletion request for the entity.
    /// Returns `false` if a request is already queued.
    pub(crate) fn queue_deletion(&mut self, id: EntityId) -> bool {
        if bit(&self.queued, id.index()) {
            return false;
        }
        set_bit(&mut self.queued, id.index(), true);
        true
    }

    /// The number of entities that are added and not deleted.
    pub fn active_entity_count(&self) -> usize { self.active_count }

    /// The number of entities created since the world started.
    ///
    /// A created entity may not have been added to the world yet,
    /// so this is always at least [`total_added`](Self::total_added).
    pub fn total_created(&self) -> u64 { self.total_created }

    /// The number of entities added since the world started.
    pub fn total_added(&self) -> u64 { self.total_added }

    /// The number of entities reclaimed since the world started.
    pub fn total_deleted(&self) -> u64 { self.total_deleted }

    pub(crate) fn notify(&mut self, event: Event, id: EntityId) {
        let index = id.index();
        match event {
            Event::Added => {
                if !self.is_active(id) {
                    set_bit(&mut self.active, index, true);
                    self.active_count += 1;
                    self.total_added += 1;
                }
            }
            Event::Changed => {}
            Event::Disabled => set_bit(&mut self.disabled, index, true),
            Event::Enabled => set_bit(&mut self.disabled, index, false),
            Event::Deleted => {
                if self.is_deleted(id) {
                    return;
                }
                set_bit(&mut self.disabled, index, false);
                set_bit(&mut self.queued, index, false);
                set_bit(&mut self.deleted, index, true);
                if self.is_active(id) {
                    self.active_count -= 1;
                }
            }
        }
    }

    /// Destroys all deleted entities and returns their IDs to the pool.
    ///
    /// Components of the deleted entities must have been removed beforehand.
    /// Returns the number of reclaimed entities.
    pub(crate) fn clean(&mut self) -> usize {
        let ids: Vec<usize> = self.deleted.iter_ones().collect();
        if ids.is_empty() {
            return 0;
        }

        for &index in &ids {
            let entity = self.entities.remove(index).expect("deleted entity does not exist");
            debug_assert!(
                entity.component_bits().is_empty(),
                "{:?} is reclaimed with components {:?}",
                entity.id(),
                entity.component_bits()
            );
            set_bit(&mut self.active, index, false);
            self.pool.check_in(entity.id());
            self.total_deleted += 1;
        }
        self.deleted.fill(false);

        log::trace!("Reclaimed entities {}", ids.iter().join(", "));
        ids.len()
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &IdentifierPool { &self.pool }
}
