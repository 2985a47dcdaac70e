#![allow(missing_docs)]

use std::sync::Arc;

use parking_lot::{Mutex, Once};

use crate::component::{Component, ComponentKey};
use crate::entity::EntityId;
use crate::event::Event;
use crate::manager::Manager;
use crate::system::{DelayedProcessor, EntityProcessor, System, SystemType};
use crate::world::State;

mod event_tracer;
pub use event_tracer::{EventTracer, Traced};

pub fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(env_logger::init);
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Component for Position {}

/// Moves the entity along the x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub speed: f32,
}

impl Component for Move {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Render {
    pub glyph: char,
}

impl Component for Render {}

/// Counts down and expires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fuse {
    pub remaining: f32,
}

impl Component for Fuse {}

pub const POSITION: ComponentKey<Position> = ComponentKey::new(0);
pub const RENDER: ComponentKey<Render> = ComponentKey::new(1);
pub const MOVE: ComponentKey<Move> = ComponentKey::new(2);
pub const FUSE: ComponentKey<Fuse> = ComponentKey::new(3);

pub const MOVEMENT_SYSTEM: SystemType = SystemType::new(0);
pub const RENDER_SYSTEM: SystemType = SystemType::new(1);
pub const FUSE_SYSTEM: SystemType = SystemType::new(2);
pub const SPY_SYSTEM: SystemType = SystemType::new(3);

/// Advances [`Position`] by [`Move`] times the tick delta.
pub struct MoveProcessor;

impl EntityProcessor for MoveProcessor {
    fn process(&mut self, state: &mut State, entity: EntityId) {
        let delta = state.delta();
        let speed = state.component(entity, MOVE).speed;
        state.component_mut(entity, POSITION).x += speed * delta;
    }
}

/// Burns down [`Fuse`] and deletes the entity when it expires.
#[derive(Default)]
pub struct FuseProcessor {
    pub expired: Vec<EntityId>,
}

impl DelayedProcessor for FuseProcessor {
    fn remaining_delay(&self, state: &State, entity: EntityId) -> f32 {
        state.component(entity, FUSE).remaining
    }

    fn process_delta(&mut self, state: &mut State, entity: EntityId, elapsed: f32) {
        state.component_mut(entity, FUSE).remaining -= elapsed;
    }

    fn process_expired(&mut self, state: &mut State, entity: EntityId) {
        self.expired.push(entity);
        state.delete_entity(entity);
    }
}

/// Creates and adds an entity with the given components.
pub fn spawn(state: &mut State, position: Option<Position>, speed: Option<f32>) -> EntityId {
    let entity = state.create_entity();
    if let Some(position) = position {
        state.add_component(entity, POSITION, position);
    }
    if let Some(speed) = speed {
        state.add_component(entity, MOVE, Move { speed });
    }
    state.add_entity(entity);
    entity
}

/// An observation made by a recording manager or system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Record {
    Initialize,
    Notify(Event, EntityId),
    Inserted(EntityId),
    Removed(EntityId),
    Begin,
    Process(EntityId),
    End,
}

pub type RecordLog = Arc<Mutex<Vec<Record>>>;

/// A manager that records every notification.
#[derive(Default)]
pub struct RecordingManager {
    pub log: RecordLog,
}

impl Manager for RecordingManager {
    fn initialize(&mut self, _state: &mut State) { self.log.lock().push(Record::Initialize); }

    fn notify(&mut self, event: Event, entity: EntityId, _state: &State) {
        self.log.lock().push(Record::Notify(event, entity));
    }
}

/// A system that records every hook invocation.
#[derive(Default)]
pub struct RecordingSystem {
    pub log: RecordLog,
}

impl System for RecordingSystem {
    fn initialize(&mut self, _state: &mut State) { self.log.lock().push(Record::Initialize); }

    fn begin(&mut self, _state: &mut State) { self.log.lock().push(Record::Begin); }

    fn process_entities(&mut self, _state: &mut State, entities: &[EntityId]) {
        let mut log = self.log.lock();
        log.extend(entities.iter().map(|&entity| Record::Process(entity)));
    }

    fn end(&mut self, _state: &mut State) { self.log.lock().push(Record::End); }

    fn inserted(&mut self, _state: &mut State, entity: EntityId) {
        self.log.lock().push(Record::Inserted(entity));
    }

    fn removed(&mut self, _state: &mut State, entity: EntityId) {
        self.log.lock().push(Record::Removed(entity));
    }
}
