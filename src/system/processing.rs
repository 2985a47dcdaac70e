use super::System;
use crate::entity::EntityId;
use crate::world::State;

/// Per-entity logic run by a [`Processing`] system.
///
/// This trait is implemented for all `FnMut(&mut State, EntityId)` closures.
pub trait EntityProcessor: 'static {
    /// Called before the first entity of a tick.
    fn begin(&mut self, _state: &mut State) {}

    /// Processes one live entity.
    fn process(&mut self, state: &mut State, entity: EntityId);

    /// Called after the last entity of a tick.
    fn end(&mut self, _state: &mut State) {}

    /// Called when an entity joins the live list.
    fn inserted(&mut self, _state: &mut State, _entity: EntityId) {}

    /// Called when an entity leaves the live list.
    fn removed(&mut self, _state: &mut State, _entity: EntityId) {}
}

impl<F: FnMut(&mut State, EntityId) + 'static> EntityProcessor for F {
    fn process(&mut self, state: &mut State, entity: EntityId) { self(state, entity) }
}

/// A system that processes every live entity on every tick, in live list order.
///
/// The order of the live list is not stable across insertions and removals.
pub struct Processing<P> {
    processor: P,
}

impl<P: EntityProcessor> Processing<P> {
    pub fn new(processor: P) -> Self { Self { processor } }

    pub fn processor(&self) -> &P { &self.processor }

    pub fn processor_mut(&mut self) -> &mut P { &mut self.processor }
}

impl<P: EntityProcessor> System for Processing<P> {
    fn debug_name(&self) -> &str { std::any::type_name::<P>() }

    fn begin(&mut self, state: &mut State) { self.processor.begin(state) }

    fn process_entities(&mut self, state: &mut State, entities: &[EntityId]) {
        for &entity in entities {
            self.processor.process(state, entity);
        }
    }

    fn end(&mut self, state: &mut State) { self.processor.end(state) }

    fn inserted(&mut self, state: &mut State, entity: EntityId) { self.processor.inserted(state, entity) }

    fn removed(&mut self, state: &mut State, entity: EntityId) { self.processor.removed(state, entity) }
}
