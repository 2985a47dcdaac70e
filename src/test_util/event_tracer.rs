use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;
use parking_lot::Mutex;

use crate::entity::EntityId;
use crate::event::Event;
use crate::system::SystemType;
use crate::world::Tracer;

/// Records event and ensures that they are in the correct order.
pub struct EventTracer<T: fmt::Debug + Eq + Hash> {
    dependencies: HashMap<T, Vec<T>>,
    seen:         Mutex<IndexSet<T>>,
}

impl<T: fmt::Debug + Eq + Hash> EventTracer<T> {
    /// Creates a new event tracer that ensures `b` happens after `a` for each `(a, b)` input.
    pub fn new(orders: impl IntoIterator<Item = (T, T)>) -> Self {
        let mut dependencies: HashMap<T, Vec<T>> = HashMap::new();
        for (before, after) in orders {
            dependencies.entry(after).or_default().push(before);
        }
        let seen = Mutex::new(IndexSet::new());

        Self { dependencies, seen }
    }

    /// Records that `event` has happened.
    ///
    /// # Panics
    /// Panics if the same `event` was sent twice or a dependency is not satisfied.
    pub fn trace(&self, event: T) {
        let mut seen = self.seen.lock();

        if let Some(deps) = self.dependencies.get(&event) {
            for dep in deps {
                assert!(seen.contains(dep), "{:?} should happen after {:?}", event, dep);
            }
        }

        let (index, new) = seen.insert_full(event);
        assert!(
            new,
            "{:?} is inserted twice",
            seen.get_index(index).expect("insert_full should return valid index")
        );
    }

    /// Returns a snapshot of the events observed so far.
    pub fn events(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.seen.lock().iter().cloned().collect()
    }

    /// Returns the events observed in this tracer.
    pub fn get_events(self) -> Vec<T> {
        let seen = self.seen.into_inner();
        seen.into_iter().collect()
    }
}

/// A pipeline event observed through [`Tracer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traced {
    Settle(Event),
    Notify(Event, EntityId),
    Insert(SystemType, EntityId),
    Remove(SystemType, EntityId),
    Run(SystemType),
    Skip(SystemType),
}

impl Tracer for EventTracer<Traced> {
    fn settle(&self, event: Event, _len: usize) { self.trace(Traced::Settle(event)) }

    fn notify(&self, event: Event, entity: EntityId) { self.trace(Traced::Notify(event, entity)) }

    fn insert(&self, system: SystemType, entity: EntityId) {
        self.trace(Traced::Insert(system, entity))
    }

    fn remove(&self, system: SystemType, entity: EntityId) {
        self.trace(Traced::Remove(system, entity))
    }

    fn run_system(&self, system: SystemType, _debug_name: &str) { self.trace(Traced::Run(system)) }

    fn skip_system(&self, system: SystemType) { self.trace(Traced::Skip(system)) }
}
