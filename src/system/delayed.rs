use super::System;
use crate::entity::EntityId;
use crate::world::State;

/// Per-entity timer logic run by a [`Delayed`] system.
pub trait DelayedProcessor: 'static {
    /// Returns the time left before `entity` expires.
    fn remaining_delay(&self, state: &State, entity: EntityId) -> f32;

    /// Advances the timer of `entity` by `elapsed`.
    fn process_delta(&mut self, state: &mut State, entity: EntityId, elapsed: f32);

    /// Called when the timer of `entity` reaches zero.
    ///
    /// Entities whose timer has expired are typically changed or deleted here
    /// so that they leave the live list.
    fn process_expired(&mut self, state: &mut State, entity: EntityId);
}

/// A system that sleeps until the earliest per-entity timer expires.
///
/// The system maintains a single countdown for the soonest expiry among its live entities.
/// When the countdown elapses, every live entity is advanced by the elapsed time once:
/// expired entities are passed to [`DelayedProcessor::process_expired`],
/// and the remaining entities offer their new delays to compute the next countdown.
/// If no entity offers a delay, the system idles until a new entity is inserted.
pub struct Delayed<P> {
    processor: P,
    delay:     f32,
    acc:       f32,
    running:   bool,
}

impl<P: DelayedProcessor> Delayed<P> {
    pub fn new(processor: P) -> Self { Self { processor, delay: 0.0, acc: 0.0, running: false } }

    pub fn processor(&self) -> &P { &self.processor }

    pub fn processor_mut(&mut self) -> &mut P { &mut self.processor }

    /// Starts a new countdown of `delay`, discarding the current one.
    pub fn restart(&mut self, delay: f32) {
        log::trace!("Delayed countdown restarts at {delay}");
        self.delay = delay;
        self.acc = 0.0;
        self.running = true;
    }

    /// Restarts the countdown with `delay`
    /// if the system is idle or `delay` is shorter than the time left.
    pub fn offer_delay(&mut self, delay: f32) {
        if !self.running || delay < self.remaining_time_until_processing() {
            self.restart(delay);
        }
    }

    /// Stops the countdown.
    pub fn stop(&mut self) {
        self.delay = 0.0;
        self.acc = 0.0;
        self.running = false;
    }

    pub fn is_running(&self) -> bool { self.running }

    /// The length of the current countdown when it was started.
    pub fn initial_time_delay(&self) -> f32 { self.delay }

    /// The time left on the current countdown, or 0 if the system is idle.
    pub fn remaining_time_until_processing(&self) -> f32 {
        if self.running {
            self.delay - self.acc
        } else {
            0.0
        }
    }
}

impl<P: DelayedProcessor> System for Delayed<P> {
    fn debug_name(&self) -> &str { std::any::type_name::<P>() }

    fn check_processing(&mut self, state: &State) -> bool {
        if !self.running {
            return false;
        }

        self.acc += state.delta();
        self.acc >= self.delay
    }

    fn process_entities(&mut self, state: &mut State, entities: &[EntityId]) {
        let elapsed = self.acc;
        self.stop();

        for &entity in entities {
            self.processor.process_delta(state, entity, elapsed);
            let remaining = self.processor.remaining_delay(state, entity);
            if remaining <= 0.0 {
                self.processor.process_expired(state, entity);
            } else {
                self.offer_delay(remaining);
            }
        }
    }

    fn inserted(&mut self, state: &mut State, entity: EntityId) {
        let delay = self.processor.remaining_delay(state, entity);
        self.offer_delay(delay.max(0.0));
    }
}
