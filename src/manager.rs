//! Managers are auxiliary subscribers to entity lifecycle events.
//!
//! Unlike systems, managers are not bound to an aspect:
//! they receive every lifecycle event of every entity.
//! Typical managers maintain lookup tables such as tags or groups,
//! see the [`managers`](crate::managers) module.

use crate::entity::EntityId;
use crate::event::Event;
use crate::util::AsAny;
use crate::world::State;

crate::bits::ordinal_type! {
    /// The ordinal of a manager in a world.
    ///
    /// Managers are notified in ascending ordinal order,
    /// after the built-in entity manager and component table.
    ManagerType, "manager"
}

impl ManagerType {
    /// Reserved for the built-in [`EntityManager`](crate::entity::EntityManager).
    pub const ENTITY: Self = Self::new(0);
    /// Reserved for the built-in [`ComponentTable`](crate::component::ComponentTable).
    pub const COMPONENT: Self = Self::new(1);
    /// Conventional ordinal of [`GroupManager`](crate::managers::GroupManager).
    pub const GROUP: Self = Self::new(2);
    /// Conventional ordinal of a player registry.
    pub const PLAYER: Self = Self::new(3);
    /// Conventional ordinal of [`TagManager`](crate::managers::TagManager).
    pub const TAG: Self = Self::new(4);
    /// Conventional ordinal of a team registry.
    pub const TEAM: Self = Self::new(5);

    /// Whether the ordinal is occupied by a built-in manager.
    pub fn is_reserved(self) -> bool { self == Self::ENTITY || self == Self::COMPONENT }
}

/// A subscriber to entity lifecycle events.
pub trait Manager: AsAny {
    /// Called once when the world is initialized, in ordinal order.
    fn initialize(&mut self, _state: &mut State) {}

    /// Receives a settled lifecycle event.
    ///
    /// `state` reflects the world at the time of the event;
    /// deleted entities are still accessible until reclamation.
    fn notify(&mut self, _event: Event, _entity: EntityId, _state: &State) {}
}
