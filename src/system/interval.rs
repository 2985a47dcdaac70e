use super::System;
use crate::entity::EntityId;
use crate::world::State;

/// Runs the wrapped system once every `interval` units of accumulated tick delta.
///
/// At most one interval is consumed per tick.
/// If a tick delta spans several intervals,
/// the remainder carries over and the system runs again on the following ticks.
pub struct Interval<S> {
    inner:    S,
    interval: f32,
    acc:      f32,
}

impl<S: System> Interval<S> {
    /// Wraps a system.
    ///
    /// # Panics
    /// Panics if `interval` is not positive.
    pub fn new(interval: f32, inner: S) -> Self {
        assert!(interval > 0.0, "Interval must be positive, got {interval}");
        Self { inner, interval, acc: 0.0 }
    }

    pub fn interval(&self) -> f32 { self.interval }

    /// The delta accumulated since the system last ran.
    pub fn accumulated(&self) -> f32 { self.acc }

    pub fn inner(&self) -> &S { &self.inner }

    pub fn inner_mut(&mut self) -> &mut S { &mut self.inner }
}

impl<S: System> System for Interval<S> {
    fn debug_name(&self) -> &str { self.inner.debug_name() }

    fn initialize(&mut self, state: &mut State) { self.inner.initialize(state) }

    fn check_processing(&mut self, state: &State) -> bool {
        self.acc += state.delta();
        if self.acc >= self.interval {
            self.acc -= self.interval;
            self.inner.check_processing(state)
        } else {
            false
        }
    }

    fn begin(&mut self, state: &mut State) { self.inner.begin(state) }

    fn process_entities(&mut self, state: &mut State, entities: &[EntityId]) {
        self.inner.process_entities(state, entities)
    }

    fn end(&mut self, state: &mut State) { self.inner.end(state) }

    fn inserted(&mut self, state: &mut State, entity: EntityId) { self.inner.inserted(state, entity) }

    fn removed(&mut self, state: &mut State, entity: EntityId) { self.inner.removed(state, entity) }
}
