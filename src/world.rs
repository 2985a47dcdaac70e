//! The world owns all entities, components, managers and systems,
//! and drives one tick per [`World::process`] call.
//!
//! A tick runs three phases strictly in order:
//!
//! 1. **Event settlement**: the pending queues are drained in [`Event::SETTLE_ORDER`].
//!    Every queued entity is broadcast to the built-in managers,
//!    then to the registered managers, then to the registered systems,
//!    each in ascending ordinal order.
//! 2. **Reclamation**: components of deleted entities are dropped,
//!    and their IDs are returned to the identifier pool.
//! 3. **Processing**: every non-passive system whose
//!    [`check_processing`](System::check_processing) holds
//!    runs [`begin`](System::begin), [`process_entities`](System::process_entities)
//!    and [`end`](System::end) in ascending ordinal order.
//!
//! Live lists are only mutated in the first phase,
//! so they are stable while systems are processed.

use std::mem;

use crate::aspect::{Aspect, Matcher};
use crate::bits::CAPACITY;
use crate::component::{Component, ComponentKey, ComponentTable, ComponentType};
use crate::entity::{Entity, EntityId, EntityManager};
use crate::event::Event;
use crate::manager::{Manager, ManagerType};
use crate::optvec::OptVec;
use crate::system::{Membership, System, SystemType, Transition};
use crate::{Error, Result};

mod builder;
pub use builder::{Builder, Bundle};

mod state;
pub use state::State;

pub mod tracer;
pub use tracer::Tracer;


/// Creates a world from bundles.
///
/// All bundles are registered before any bundle populates the world.
pub fn new<'t>(bundles: impl IntoIterator<Item = &'t dyn Bundle> + Copy) -> Result<World> {
    let mut builder = Builder::default();

    for bundle in bundles {
        bundle.register(&mut builder)?;
    }

    let mut world = builder.build();

    for bundle in bundles {
        bundle.populate(&mut world);
    }

    Ok(world)
}

/// A registered system and its live list.
struct Slot {
    membership: Membership,
    system:     Box<dyn System>,
}

impl Slot {
    fn notify(&mut self, event: Event, id: EntityId, state: &mut State, tracer: &impl Tracer) {
        let entity = match state.entities.entity_mut(id) {
            Some(entity) => entity,
            None => return,
        };

        match self.membership.observe(event, entity) {
            Some(Transition::Inserted) => {
                tracer.insert(self.membership.ty(), id);
                self.system.inserted(state, id);
            }
            Some(Transition::Removed) => {
                tracer.remove(self.membership.ty(), id);
                self.system.removed(state, id);
            }
            None => {}
        }
    }

    fn process(&mut self, state: &mut State, tracer: &impl Tracer) -> bool {
        let ty = self.membership.ty();
        if !self.system.check_processing(state) {
            tracer.skip_system(ty);
            return false;
        }

        tracer.run_system(ty, self.system.debug_name());
        self.system.begin(state);
        self.system.process_entities(state, self.membership.actives());
        self.system.end(state);
        true
    }
}

/// The data structure that stores all states in the game.
pub struct World {
    /// Entities, components, pending queues and the tick delta.
    state:       State,
    /// User managers, indexed by [`ManagerType`].
    managers:    OptVec<Box<dyn Manager>>,
    /// Systems, indexed by [`SystemType`].
    systems:     OptVec<Slot>,
    initialized: bool,
}

impl Default for World {
    fn default() -> Self { Self::new() }
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self {
            state:       State::default(),
            managers:    OptVec::default(),
            systems:     OptVec::default(),
            initialized: false,
        }
    }

    /// Initializes all managers and then all systems, in ordinal order.
    ///
    /// Managers and systems registered afterwards are initialized upon registration.
    pub fn initialize(&mut self) {
        if self.initialized {
            log::warn!("World is already initialized");
            return;
        }

        for (_, manager) in self.managers.iter_mut() {
            manager.initialize(&mut self.state);
        }
        for (_, slot) in self.systems.iter_mut() {
            slot.system.initialize(&mut self.state);
        }
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool { self.initialized }

    /// Gives access to entities and components.
    pub fn state(&self) -> &State { &self.state }

    /// Gives mutable access to entities and components.
    pub fn state_mut(&mut self) -> &mut State { &mut self.state }

    // Manager registry.

    /// Registers a manager at the given ordinal.
    pub fn set_manager<M: Manager>(&mut self, ty: ManagerType, mut manager: M) -> Result<()> {
        if ty.is_reserved() {
            return Err(Error::ReservedManager(ty.ordinal()));
        }
        if self.managers.contains(ty.ordinal()) {
            return Err(Error::OrdinalInUse { kind: ManagerType::KIND, ordinal: ty.ordinal() });
        }

        log::debug!("Registering manager {} as {}", ty.ordinal(), std::any::type_name::<M>());
        if self.initialized {
            manager.initialize(&mut self.state);
        }
        self.managers.insert(ty.ordinal(), Box::new(manager));
        Ok(())
    }

    /// Gets a registered manager.
    ///
    /// Returns `None` if no manager of type `M` is registered at the ordinal.
    pub fn manager<M: Manager>(&self, ty: ManagerType) -> Option<&M> {
        let manager = self.managers.get(ty.ordinal())?;
        (**manager).as_any().downcast_ref()
    }

    /// Gets a registered manager mutably.
    pub fn manager_mut<M: Manager>(&mut self, ty: ManagerType) -> Option<&mut M> {
        let manager = self.managers.get_mut(ty.ordinal())?;
        (**manager).as_any_mut().downcast_mut()
    }

    /// Unregisters a manager.
    pub fn delete_manager(&mut self, ty: ManagerType) -> Option<Box<dyn Manager>> {
        self.managers.remove(ty.ordinal())
    }

    // System registry.

    /// Registers a system at the given ordinal.
    ///
    /// The aspect is consumed and compiled into the system's membership predicate.
    /// Entities that are already in the world are only checked
    /// when they are next added, changed or enabled.
    pub fn set_system(&mut self, ty: SystemType, aspect: Aspect, system: impl System) -> Result<()> {
        self.insert_system(ty, aspect, Box::new(system), false)
    }

    /// Registers a passive system,
    /// which maintains a live list but is only processed through [`process_system`](Self::process_system).
    pub fn set_passive_system(
        &mut self,
        ty: SystemType,
        aspect: Aspect,
        system: impl System,
    ) -> Result<()> {
        self.insert_system(ty, aspect, Box::new(system), true)
    }

    /// Registers a system at the lowest free ordinal.
    pub fn add_system(&mut self, aspect: Aspect, system: impl System) -> Result<SystemType> {
        let ordinal = (0..CAPACITY)
            .find(|&ordinal| !self.systems.contains(ordinal))
            .ok_or(Error::CapacityExceeded { kind: SystemType::KIND, capacity: CAPACITY })?;
        let ty = SystemType::new(ordinal);
        self.insert_system(ty, aspect, Box::new(system), false)?;
        Ok(ty)
    }

    fn insert_system(
        &mut self,
        ty: SystemType,
        aspect: Aspect,
        mut system: Box<dyn System>,
        passive: bool,
    ) -> Result<()> {
        if self.systems.contains(ty.ordinal()) {
            return Err(Error::OrdinalInUse { kind: SystemType::KIND, ordinal: ty.ordinal() });
        }

        let matcher = Matcher::from(aspect);
        log::debug!(
            "Registering system {} as {} with {matcher:?}{}",
            ty.ordinal(),
            system.debug_name(),
            if passive { " (passive)" } else { "" },
        );
        if self.initialized {
            system.initialize(&mut self.state);
        }
        self.systems.insert(ty.ordinal(), Slot { membership: Membership::new(ty, matcher, passive), system });
        Ok(())
    }

    /// Gets a registered system.
    ///
    /// Returns `None` if no system of type `S` is registered at the ordinal.
    pub fn system<S: System>(&self, ty: SystemType) -> Option<&S> {
        let slot = self.systems.get(ty.ordinal())?;
        (*slot.system).as_any().downcast_ref()
    }

    /// Gets a registered system mutably.
    pub fn system_mut<S: System>(&mut self, ty: SystemType) -> Option<&mut S> {
        let slot = self.systems.get_mut(ty.ordinal())?;
        (*slot.system).as_any_mut().downcast_mut()
    }

    /// Returns the live list of a system,
    /// or an empty slice if no system is registered at the ordinal.
    pub fn actives(&self, ty: SystemType) -> &[EntityId] {
        match self.systems.get(ty.ordinal()) {
            Some(slot) => slot.membership.actives(),
            None => &[],
        }
    }

    /// Checks whether the system at the ordinal is registered as passive.
    pub fn is_passive(&self, ty: SystemType) -> bool {
        self.systems.get(ty.ordinal()).map_or(false, |slot| slot.membership.is_passive())
    }

    /// Unregisters a system and clears its bit on every entity in its live list.
    ///
    /// The [`removed`](System::removed) hook is not called.
    pub fn delete_system(&mut self, ty: SystemType) -> Option<Box<dyn System>> {
        let Slot { membership, system } = self.systems.remove(ty.ordinal())?;
        for id in membership.into_actives() {
            if let Some(entity) = self.state.entities.entity_mut(id) {
                entity.system_bits_mut().remove(ty.ordinal());
            }
        }
        log::debug!("Unregistered system {} ({})", ty.ordinal(), system.debug_name());
        Some(system)
    }

    /// Processes a single system immediately, regardless of whether it is passive.
    ///
    /// Returns whether the system passed its processing check.
    ///
    /// # Panics
    /// Panics if no system is registered at the ordinal.
    pub fn process_system(&mut self, ty: SystemType) -> bool {
        let slot = match self.systems.get_mut(ty.ordinal()) {
            Some(slot) => slot,
            None => panic!("No system is registered at ordinal {}", ty.ordinal()),
        };
        slot.process(&mut self.state, &tracer::Noop)
    }

    // Tick.

    /// Runs one tick.
    pub fn process(&mut self) { self.execute(&tracer::Noop) }

    /// Runs one tick, reporting the pipeline events to `tracer`.
    pub fn execute(&mut self, tracer: &impl Tracer) {
        tracer.start_cycle();

        self.settle(tracer);

        let components = self.state.components.clean(&mut self.state.entities);
        let entities = self.state.entities.clean();
        if entities > 0 {
            self.state.queues.retain_existing(&self.state.entities);
            tracer.reclaim(entities, components);
        }

        for (_, slot) in self.systems.iter_mut() {
            if !slot.membership.is_passive() {
                slot.process(&mut self.state, tracer);
            }
        }

        tracer.end_cycle();
    }

    fn settle(&mut self, tracer: &impl Tracer) {
        for event in Event::SETTLE_ORDER {
            loop {
                let queue = mem::take(self.state.queues.get_mut(event));
                if queue.is_empty() {
                    break;
                }

                tracer.settle(event, queue.len());
                for id in queue {
                    self.broadcast(event, id, tracer);
                }
            }
        }
    }

    fn broadcast(&mut self, event: Event, id: EntityId, tracer: &impl Tracer) {
        if self.state.entities.entity(id).is_none() {
            log::warn!("Skipping {event} notification for reclaimed entity {id}");
            return;
        }

        tracer.notify(event, id);
        self.state.entities.notify(event, id);
        self.state.components.notify(event, id);

        for (_, manager) in self.managers.iter_mut() {
            manager.notify(event, id, &self.state);
        }
        for (_, slot) in self.systems.iter_mut() {
            slot.notify(event, id, &mut self.state, tracer);
        }
    }

    // Embedder surface, delegating to the state.

    /// The time elapsed since the previous tick.
    pub fn delta(&self) -> f32 { self.state.delta() }

    /// Sets the time elapsed since the previous tick.
    pub fn set_delta(&mut self, delta: f32) { self.state.set_delta(delta) }

    pub fn entities(&self) -> &EntityManager { self.state.entities() }

    pub fn components(&self) -> &ComponentTable { self.state.components() }

    /// See [`State::register_component`].
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentKey<T>> {
        self.state.register_component()
    }

    /// See [`State::create_entity`].
    pub fn create_entity(&mut self) -> EntityId { self.state.create_entity() }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> { self.state.entity(id) }

    /// See [`State::add_component`].
    pub fn add_component<T: Component>(&mut self, id: EntityId, key: ComponentKey<T>, value: T) {
        self.state.add_component(id, key, value)
    }

    /// See [`State::remove_component`].
    pub fn remove_component(&mut self, id: EntityId, ty: impl Into<ComponentType>) -> bool {
        self.state.remove_component(id, ty)
    }

    /// See [`State::component`].
    pub fn component<T: Component>(&self, id: EntityId, key: ComponentKey<T>) -> &T {
        self.state.component(id, key)
    }

    /// See [`State::component_mut`].
    pub fn component_mut<T: Component>(&mut self, id: EntityId, key: ComponentKey<T>) -> &mut T {
        self.state.component_mut(id, key)
    }

    /// See [`State::try_component`].
    pub fn try_component<T: Component>(&self, id: EntityId, key: ComponentKey<T>) -> Option<&T> {
        self.state.try_component(id, key)
    }

    /// See [`State::add_entity`].
    pub fn add_entity(&mut self, id: EntityId) { self.state.add_entity(id) }

    /// See [`State::changed_entity`].
    pub fn changed_entity(&mut self, id: EntityId) { self.state.changed_entity(id) }

    /// See [`State::delete_entity`].
    pub fn delete_entity(&mut self, id: EntityId) { self.state.delete_entity(id) }

    /// See [`State::enable`].
    pub fn enable(&mut self, id: EntityId) { self.state.enable(id) }

    /// See [`State::disable`].
    pub fn disable(&mut self, id: EntityId) { self.state.disable(id) }
}
