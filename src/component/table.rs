use std::any::{self, Any, TypeId};

use indexmap::IndexMap;

use super::{Component, ComponentKey, ComponentType};
use crate::bits::CAPACITY;
use crate::entity::{Entity, EntityId, EntityManager};
use crate::event::Event;
use crate::optvec::OptVec;
use crate::{Error, Result};

/// Type-erased interface of a per-type component storage.
trait AnyStore {
    fn type_name(&self) -> &'static str;

    /// Drops the component at `index`, returning whether it was present.
    fn remove(&mut self, index: usize) -> bool;

    fn cardinality(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyStore for OptVec<T> {
    fn type_name(&self) -> &'static str { any::type_name::<T>() }

    fn remove(&mut self, index: usize) -> bool { OptVec::remove(self, index).is_some() }

    fn cardinality(&self) -> usize { OptVec::cardinality(self) }

    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

fn downcast<T: Component>(store: &dyn AnyStore, ty: ComponentType) -> &OptVec<T> {
    let type_name = store.type_name();
    match store.as_any().downcast_ref() {
        Some(store) => store,
        None => panic!(
            "Component ordinal {} is bound to `{type_name}`, not `{}`",
            ty.ordinal(),
            any::type_name::<T>()
        ),
    }
}

fn downcast_mut<T: Component>(store: &mut dyn AnyStore, ty: ComponentType) -> &mut OptVec<T> {
    let type_name = store.type_name();
    match store.as_any_mut().downcast_mut() {
        Some(store) => store,
        None => panic!(
            "Component ordinal {} is bound to `{type_name}`, not `{}`",
            ty.ordinal(),
            any::type_name::<T>()
        ),
    }
}

/// Owns every component instance in a world, keyed by component type and entity ID.
///
/// A slot is occupied if and only if the owning entity has the bit of that component type set.
#[derive(Default)]
pub struct ComponentTable {
    /// One storage per component ordinal.
    stores:   OptVec<Box<dyn AnyStore>>,
    /// Rust types allocated through [`register`](Self::register).
    registry: IndexMap<TypeId, ComponentType>,
    /// Entities deleted since the last [`clean`](Self::clean).
    deleted:  Vec<EntityId>,
}

impl ComponentTable {
    /// Allocates the lowest free ordinal for `T`.
    ///
    /// Registering the same type again returns the same key.
    pub fn register<T: Component>(&mut self) -> Result<ComponentKey<T>> {
        if let Some(&ty) = self.registry.get(&TypeId::of::<T>()) {
            return Ok(ComponentKey::from_type(ty));
        }

        let ordinal = (0..CAPACITY).find(|&ordinal| !self.stores.contains(ordinal)).ok_or(
            Error::CapacityExceeded { kind: ComponentType::KIND, capacity: CAPACITY },
        )?;
        self.register_as::<T>(ordinal)
    }

    /// Binds `T` to a caller-assigned ordinal and creates its storage.
    pub fn register_as<T: Component>(&mut self, ordinal: usize) -> Result<ComponentKey<T>> {
        let ty = ComponentType::try_new(ordinal)?;
        if let Some(store) = self.stores.get(ordinal) {
            if store.as_any().downcast_ref::<OptVec<T>>().is_none() {
                return Err(Error::TypeMismatch {
                    ordinal,
                    existing: store.type_name(),
                    requested: any::type_name::<T>(),
                });
            }
        } else {
            log::debug!("Component ordinal {ordinal} is bound to {}", any::type_name::<T>());
            self.stores.insert(ordinal, Box::new(OptVec::<T>::default()));
        }

        self.registry.insert(TypeId::of::<T>(), ty);
        Ok(ComponentKey::from_type(ty))
    }

    fn store_or_insert<T: Component>(&mut self, ty: ComponentType) -> &mut OptVec<T> {
        if !self.stores.contains(ty.ordinal()) {
            log::debug!("Component ordinal {} is bound to {}", ty.ordinal(), any::type_name::<T>());
            self.stores.insert(ty.ordinal(), Box::new(OptVec::<T>::default()));
        }
        let store = self.stores.get_mut(ty.ordinal()).expect("just inserted");
        downcast_mut(&mut **store, ty)
    }

    /// Attaches a component to an entity.
    ///
    /// A component of the same type already attached to the entity is dropped and replaced.
    pub fn add<T: Component>(&mut self, entity: &mut Entity, key: ComponentKey<T>, value: T) {
        let ty = key.ty();
        let store = self.store_or_insert::<T>(ty);
        if store.insert(entity.id().index(), value).is_some() {
            log::warn!("{:?} already has a component of type {}, replacing", entity.id(), ty.ordinal());
        }
        entity.component_bits_mut().insert(ty.ordinal());
    }

    /// Drops the component of type `ty` from an entity.
    ///
    /// This is a no-op if the entity does not own such a component.
    /// Returns whether a component was removed.
    pub fn remove(&mut self, entity: &mut Entity, ty: ComponentType) -> bool {
        if !entity.component_bits().contains(ty.ordinal()) {
            return false;
        }

        let store = self.stores.get_mut(ty.ordinal()).expect("component bit set without storage");
        let removed = store.remove(entity.id().index());
        debug_assert!(removed, "component bit set without component");
        entity.component_bits_mut().remove(ty.ordinal());
        true
    }

    /// Detaches a component from an entity and returns it.
    pub fn take<T: Component>(&mut self, entity: &mut Entity, key: ComponentKey<T>) -> Option<T> {
        let ty = key.ty();
        if !entity.component_bits().contains(ty.ordinal()) {
            return None;
        }

        let store = self.stores.get_mut(ty.ordinal()).expect("component bit set without storage");
        let value = downcast_mut::<T>(&mut **store, ty).remove(entity.id().index());
        entity.component_bits_mut().remove(ty.ordinal());
        value
    }

    /// Gets the component of an entity, or `None` if it is absent.
    pub fn get<T: Component>(&self, id: EntityId, key: ComponentKey<T>) -> Option<&T> {
        self.store(key)?.get(id.index())
    }

    /// Gets the component of an entity mutably, or `None` if it is absent.
    pub fn get_mut<T: Component>(&mut self, id: EntityId, key: ComponentKey<T>) -> Option<&mut T> {
        let ty = key.ty();
        let store = self.stores.get_mut(ty.ordinal())?;
        downcast_mut::<T>(&mut **store, ty).get_mut(id.index())
    }

    /// Returns the storage of all components of type `T`, indexed by entity ID.
    pub fn store<T: Component>(&self, key: ComponentKey<T>) -> Option<&OptVec<T>> {
        let ty = key.ty();
        let store = self.stores.get(ty.ordinal())?;
        Some(downcast::<T>(&**store, ty))
    }

    /// Iterates over the component types an entity owns, in ascending ordinal order.
    pub fn component_types(&self, entity: &Entity) -> impl Iterator<Item = ComponentType> {
        entity.component_bits().iter().map(ComponentType::new)
    }

    /// Checks whether an entity owns a component of type `ty`.
    pub fn has(&self, entity: &Entity, ty: ComponentType) -> bool {
        entity.component_bits().contains(ty.ordinal())
    }

    /// Returns the number of components of type `ty` in the table.
    pub fn cardinality(&self, ty: ComponentType) -> usize {
        self.stores.get(ty.ordinal()).map_or(0, |store| store.cardinality())
    }

    pub(crate) fn notify(&mut self, event: Event, id: EntityId) {
        if event == Event::Deleted {
            self.deleted.push(id);
        }
    }

    /// Drops all components of entities deleted since the last call.
    ///
    /// Returns the number of components dropped.
    pub(crate) fn clean(&mut self, entities: &mut EntityManager) -> usize {
        let mut dropped = 0;

        for id in std::mem::take(&mut self.deleted) {
            let entity = match entities.entity_mut(id) {
                Some(entity) => entity,
                None => continue,
            };

            for ordinal in entity.component_bits().iter() {
                if self.remove(entity, ComponentType::new(ordinal)) {
                    dropped += 1;
                }
            }
        }

        dropped
    }
}
