//! Components are the data fragments attached to entities.
//!
//! Every component type is addressed by a [`ComponentType`] ordinal,
//! which is the bit position of the type in [`Entity::component_bits`](crate::entity::Entity::component_bits).
//! Ordinals are either assigned by the caller through [`ComponentKey::new`]
//! or allocated through [`ComponentTable::register`].
//!
//! All component instances are exclusively owned by the [`ComponentTable`].

use std::any;
use std::fmt;
use std::marker::PhantomData;

mod table;
pub use table::ComponentTable;


crate::bits::ordinal_type! {
    /// The ordinal of a component type.
    ComponentType, "component"
}

/// A data record that can be attached to an entity.
pub trait Component: 'static {}

/// A typed handle binding a Rust type to a [`ComponentType`] ordinal.
///
/// The same ordinal must not be used with different Rust types.
pub struct ComponentKey<T> {
    ty:  ComponentType,
    _ph: PhantomData<fn() -> T>,
}

impl<T: Component> ComponentKey<T> {
    /// Binds `T` to a caller-assigned ordinal.
    ///
    /// # Panics
    /// Panics if `ordinal` is not smaller than [`CAPACITY`](crate::bits::CAPACITY).
    pub const fn new(ordinal: usize) -> Self { Self { ty: ComponentType::new(ordinal), _ph: PhantomData } }

    pub(crate) fn from_type(ty: ComponentType) -> Self { Self { ty, _ph: PhantomData } }

    /// Returns the untyped ordinal.
    pub fn ty(self) -> ComponentType { self.ty }
}

impl<T> Clone for ComponentKey<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for ComponentKey<T> {}

impl<T> PartialEq for ComponentKey<T> {
    fn eq(&self, other: &Self) -> bool { self.ty == other.ty }
}

impl<T> Eq for ComponentKey<T> {}

impl<T> fmt::Debug for ComponentKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ComponentKey<{}>({})", any::type_name::<T>(), self.ty.ordinal())
    }
}

impl<T> From<ComponentKey<T>> for ComponentType {
    fn from(key: ComponentKey<T>) -> Self { key.ty }
}
