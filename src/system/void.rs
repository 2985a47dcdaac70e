use super::System;
use crate::entity::EntityId;
use crate::world::State;

/// A system that processes no entities and runs a callback on every tick.
///
/// Register it with [`Aspect::empty`](crate::Aspect::empty).
pub struct Void<F> {
    callback: F,
}

impl<F: FnMut(&mut State) + 'static> Void<F> {
    pub fn new(callback: F) -> Self { Self { callback } }
}

impl<F: FnMut(&mut State) + 'static> System for Void<F> {
    fn process_entities(&mut self, state: &mut State, _entities: &[EntityId]) { (self.callback)(state) }
}
