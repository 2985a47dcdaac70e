use super::SystemType;
use crate::aspect::Matcher;
use crate::entity::{Entity, EntityId};
use crate::event::Event;

/// A change of the live list caused by a lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Inserted,
    Removed,
}

/// The framework-owned state of a registered system.
///
/// The live list is only mutated during event settlement.
#[derive(Debug)]
pub(crate) struct Membership {
    ty:      SystemType,
    matcher: Matcher,
    actives: Vec<EntityId>,
    passive: bool,
}

impl Membership {
    pub(crate) fn new(ty: SystemType, matcher: Matcher, passive: bool) -> Self {
        Self { ty, matcher, actives: Vec::new(), passive }
    }

    pub(crate) fn ty(&self) -> SystemType { self.ty }

    pub(crate) fn actives(&self) -> &[EntityId] { &self.actives }

    pub(crate) fn is_passive(&self) -> bool { self.passive }

    /// Routes a lifecycle event to the matching membership transition.
    pub(crate) fn observe(&mut self, event: Event, entity: &mut Entity) -> Option<Transition> {
        match event {
            Event::Added | Event::Changed | Event::Enabled => self.check(entity),
            Event::Disabled | Event::Deleted => self.evict(entity),
        }
    }

    /// Re-evaluates the aspect against the current components of `entity`.
    pub(crate) fn check(&mut self, entity: &mut Entity) -> Option<Transition> {
        if self.matcher.is_dummy() {
            return None;
        }

        let contains = entity.system_bits().contains(self.ty.ordinal());
        let interested = self.matcher.qualifies(entity.component_bits());

        if interested && !contains {
            self.insert(entity);
            Some(Transition::Inserted)
        } else if !interested && contains {
            self.remove(entity);
            Some(Transition::Removed)
        } else {
            None
        }
    }

    /// Removes `entity` from the live list regardless of its components.
    pub(crate) fn evict(&mut self, entity: &mut Entity) -> Option<Transition> {
        if !entity.system_bits().contains(self.ty.ordinal()) {
            return None;
        }

        self.remove(entity);
        Some(Transition::Removed)
    }

    fn insert(&mut self, entity: &mut Entity) {
        self.actives.push(entity.id());
        entity.system_bits_mut().insert(self.ty.ordinal());
        log::trace!("{:?} joins system {}", entity.id(), self.ty.ordinal());
    }

    fn remove(&mut self, entity: &mut Entity) {
        let id = entity.id();
        match self.actives.iter().position(|&active| active == id) {
            Some(position) => {
                self.actives.swap_remove(position);
            }
            None => log::error!("{id:?} has the bit of system {} but is not in its live list", self.ty.ordinal()),
        }
        entity.system_bits_mut().remove(self.ty.ordinal());
        log::trace!("{id:?} leaves system {}", self.ty.ordinal());
    }

    /// Consumes the membership, returning the entities whose bit of this system must be cleared.
    pub(crate) fn into_actives(self) -> Vec<EntityId> { self.actives }
}
