//! Miscellaneous traits used for exposing type bounds in the API.

use std::any::Any;

/// Upcasts a registered trait object so that it can be downcast to its concrete type.
///
/// This trait is implemented for all `'static` types
/// and does not need to be implemented manually.
pub trait AsAny: Any {
    /// Converts the reference to a shared [`Any`] reference.
    fn as_any(&self) -> &dyn Any;

    /// Converts the reference to a mutable [`Any`] reference.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}
