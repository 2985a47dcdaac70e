use std::any;

use crate::component::{Component, ComponentKey, ComponentTable, ComponentType};
use crate::entity::{Entity, EntityId, EntityManager};
use crate::event::Event;
use crate::Result;

/// Entities waiting for a lifecycle transition, one queue per [`Event`].
#[derive(Default)]
pub(crate) struct Queues {
    added:    Vec<EntityId>,
    changed:  Vec<EntityId>,
    disabled: Vec<EntityId>,
    enabled:  Vec<EntityId>,
    deleted:  Vec<EntityId>,
}

impl Queues {
    pub(crate) fn get(&self, event: Event) -> &Vec<EntityId> {
        match event {
            Event::Added => &self.added,
            Event::Changed => &self.changed,
            Event::Disabled => &self.disabled,
            Event::Enabled => &self.enabled,
            Event::Deleted => &self.deleted,
        }
    }

    pub(crate) fn get_mut(&mut self, event: Event) -> &mut Vec<EntityId> {
        match event {
            Event::Added => &mut self.added,
            Event::Changed => &mut self.changed,
            Event::Disabled => &mut self.disabled,
            Event::Enabled => &mut self.enabled,
            Event::Deleted => &mut self.deleted,
        }
    }

    /// Drops every queued id that no longer refers to an existing entity.
    pub(crate) fn retain_existing(&mut self, entities: &EntityManager) {
        for queue in [&mut self.added, &mut self.changed, &mut self.disabled, &mut self.enabled, &mut self.deleted] {
            queue.retain(|&id| entities.entity(id).is_some());
        }
    }
}

/// The entity and component state of a world.
///
/// Systems and managers receive the state instead of the whole [`World`](super::World),
/// so that they can read and write components while the world iterates over them.
/// Entity lifecycle changes requested through the state are queued
/// and only take effect during the next event settlement.
pub struct State {
    pub(crate) delta:      f32,
    pub(crate) entities:   EntityManager,
    pub(crate) components: ComponentTable,
    pub(crate) queues:     Queues,
}

impl Default for State {
    fn default() -> Self {
        Self {
            delta:      0.0,
            entities:   EntityManager::default(),
            components: ComponentTable::default(),
            queues:     Queues::default(),
        }
    }
}

impl State {
    /// The time elapsed since the previous tick.
    pub fn delta(&self) -> f32 { self.delta }

    /// Sets the time elapsed since the previous tick.
    pub fn set_delta(&mut self, delta: f32) { self.delta = delta; }

    /// The built-in entity manager.
    pub fn entities(&self) -> &EntityManager { &self.entities }

    /// The built-in component table.
    pub fn components(&self) -> &ComponentTable { &self.components }

    /// Allocates the lowest free component ordinal for `T`.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentKey<T>> {
        self.components.register()
    }

    /// Creates an entity with no components.
    ///
    /// The entity is not visible to managers and systems until [`add_entity`](Self::add_entity)
    /// is called and the next tick settles it.
    pub fn create_entity(&mut self) -> EntityId { self.entities.create_entity_instance() }

    /// Gets an entity that has been created and not yet reclaimed.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> { self.entities.entity(id) }

    /// Attaches a component to an entity, replacing any existing component of the same type.
    ///
    /// Systems are not notified until the entity is added or marked as changed.
    ///
    /// # Panics
    /// Panics if the entity does not exist.
    pub fn add_component<T: Component>(&mut self, id: EntityId, key: ComponentKey<T>, value: T) {
        let entity = match self.entities.entity_mut(id) {
            Some(entity) => entity,
            None => panic!("Cannot add {} to nonexistent entity {id}", any::type_name::<T>()),
        };
        self.components.add(entity, key, value);
    }

    /// Drops a component from an entity.
    /// Returns whether the entity owned a component of that type.
    ///
    /// # Panics
    /// Panics if the entity does not exist.
    pub fn remove_component(&mut self, id: EntityId, ty: impl Into<ComponentType>) -> bool {
        let ty = ty.into();
        let entity = match self.entities.entity_mut(id) {
            Some(entity) => entity,
            None => panic!("Cannot remove component {} from nonexistent entity {id}", ty.ordinal()),
        };
        self.components.remove(entity, ty)
    }

    /// Detaches a component from an entity and returns it.
    ///
    /// # Panics
    /// Panics if the entity does not exist.
    pub fn take_component<T: Component>(&mut self, id: EntityId, key: ComponentKey<T>) -> Option<T> {
        let entity = match self.entities.entity_mut(id) {
            Some(entity) => entity,
            None => panic!("Cannot take {} from nonexistent entity {id}", any::type_name::<T>()),
        };
        self.components.take(entity, key)
    }

    /// Checks whether an entity owns a component of type `ty`.
    pub fn has_component(&self, id: EntityId, ty: impl Into<ComponentType>) -> bool {
        let ty = ty.into();
        self.entities.entity(id).map_or(false, |entity| entity.component_bits().contains(ty.ordinal()))
    }

    /// Gets a component of an entity known to own it,
    /// e.g. because the entity matches the aspect of the calling system.
    ///
    /// # Panics
    /// Panics if the entity does not own the component.
    /// Use [`try_component`](Self::try_component) if ownership is uncertain.
    pub fn component<T: Component>(&self, id: EntityId, key: ComponentKey<T>) -> &T {
        match self.components.get(id, key) {
            Some(component) => component,
            None => panic!("Entity {id} does not have a component of type {}", any::type_name::<T>()),
        }
    }

    /// Gets a component of an entity known to own it mutably.
    ///
    /// # Panics
    /// Panics if the entity does not own the component.
    pub fn component_mut<T: Component>(&mut self, id: EntityId, key: ComponentKey<T>) -> &mut T {
        match self.components.get_mut(id, key) {
            Some(component) => component,
            None => panic!("Entity {id} does not have a component of type {}", any::type_name::<T>()),
        }
    }

    /// Gets a component of an entity, or `None` if it is absent.
    pub fn try_component<T: Component>(&self, id: EntityId, key: ComponentKey<T>) -> Option<&T> {
        self.components.get(id, key)
    }

    /// Gets a component of an entity mutably, or `None` if it is absent.
    pub fn try_component_mut<T: Component>(
        &mut self,
        id: EntityId,
        key: ComponentKey<T>,
    ) -> Option<&mut T> {
        self.components.get_mut(id, key)
    }

    fn enqueue(&mut self, event: Event, id: EntityId) {
        if self.entities.entity(id).is_none() {
            log::warn!("Ignoring {event} request for nonexistent entity {id}");
            return;
        }
        self.queues.get_mut(event).push(id);
    }

    /// Adds a created entity to the world.
    pub fn add_entity(&mut self, id: EntityId) { self.enqueue(Event::Added, id); }

    /// Notifies systems that the components of an entity have changed.
    ///
    /// This must be called after adding or removing components of an entity
    /// that has already been added to the world.
    pub fn changed_entity(&mut self, id: EntityId) { self.enqueue(Event::Changed, id); }

    /// Deletes an entity from the world.
    ///
    /// The entity and its components are reclaimed at the end of the next event settlement.
    /// Deleting an entity multiple times before reclamation is a no-op.
    pub fn delete_entity(&mut self, id: EntityId) {
        if self.entities.entity(id).is_none() {
            log::warn!("Ignoring {} request for nonexistent entity {id}", Event::Deleted);
            return;
        }
        if self.entities.is_deleted(id) || !self.entities.queue_deletion(id) {
            return;
        }
        self.queues.deleted.push(id);
    }

    /// Re-enables a disabled entity.
    pub fn enable(&mut self, id: EntityId) { self.enqueue(Event::Enabled, id); }

    /// Disables an entity.
    /// It still exists but is removed from all systems until enabled again.
    pub fn disable(&mut self, id: EntityId) { self.enqueue(Event::Disabled, id); }

    /// Returns the entities waiting for the given lifecycle transition.
    pub fn pending(&self, event: Event) -> &[EntityId] { self.queues.get(event) }
}
