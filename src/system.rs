//! Systems are units of per-tick logic operating on the entities matching an [`Aspect`](crate::Aspect).
//!
//! A system is registered with a [`World`](crate::World) together with an aspect.
//! During event settlement, the world re-evaluates the aspect
//! whenever an entity is added, changed or enabled,
//! and maintains a live list of the entities the system is interested in.
//! Disabling or deleting an entity removes it from every live list unconditionally.
//!
//! The live list never changes while systems are being processed,
//! so [`System::process_entities`] always observes a stable slice.
//!
//! Most systems are built from one of the provided variants:
//!
//! - [`Processing`] visits every live entity on every tick.
//! - [`Interval`] throttles another system to run once per fixed interval.
//! - [`Delayed`] tracks per-entity timers and only wakes up when the earliest one expires.
//! - [`Void`] processes no entities and only needs a per-tick callback.

use std::any;

use crate::entity::EntityId;
use crate::util::AsAny;
use crate::world::State;

pub(crate) mod membership;
pub(crate) use membership::{Membership, Transition};

mod processing;
pub use processing::{EntityProcessor, Processing};

mod interval;
pub use interval::Interval;

mod delayed;
pub use delayed::{Delayed, DelayedProcessor};

mod void;
pub use void::Void;


crate::bits::ordinal_type! {
    /// The ordinal of a system in a world.
    ///
    /// This is the bit position of the system in [`Entity::system_bits`](crate::Entity::system_bits).
    /// Systems are notified and processed in ascending ordinal order.
    SystemType, "system"
}

/// A unit of per-tick logic.
///
/// All methods except [`process_entities`](Self::process_entities) have empty default implementations.
pub trait System: AsAny {
    /// Describes this system in logs and tracers.
    fn debug_name(&self) -> &str { any::type_name::<Self>() }

    /// Called once when the world is initialized,
    /// or immediately upon registration with an initialized world.
    fn initialize(&mut self, _state: &mut State) {}

    /// Decides whether the system should be processed in the current tick.
    fn check_processing(&mut self, _state: &State) -> bool { true }

    /// Called before [`process_entities`](Self::process_entities).
    fn begin(&mut self, _state: &mut State) {}

    /// Processes the live list of this system.
    fn process_entities(&mut self, state: &mut State, entities: &[EntityId]);

    /// Called after [`process_entities`](Self::process_entities).
    fn end(&mut self, _state: &mut State) {}

    /// Called when an entity joins the live list.
    fn inserted(&mut self, _state: &mut State, _entity: EntityId) {}

    /// Called when an entity leaves the live list.
    ///
    /// For deleted entities, components are still accessible at this point.
    fn removed(&mut self, _state: &mut State, _entity: EntityId) {}
}
