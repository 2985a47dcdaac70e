//! An aspect-driven entity-component-system runtime.
//!
//! # Entities, components and systems
//! Objects ("entities") are plain integer identities.
//! Their data are stored in "components",
//! which are owned by the world and keyed by component type and entity ID.
//! Logic lives in "systems", each of which declares an [`Aspect`]
//! describing the combination of component types it is interested in.
//!
//! Each entity carries two bit-vectors:
//! one bit per component type it owns, and one bit per system whose live list contains it.
//! Whether an entity matches an aspect is a handful of bitwise operations,
//! so membership can be re-evaluated cheaply whenever an entity changes.
//!
//! # Deferred lifecycle events
//! Adding, changing, disabling, enabling and deleting entities never takes effect immediately.
//! The requests are queued and settled at the start of the next [`World::process`] call,
//! in a fixed order (see [`Event::SETTLE_ORDER`]).
//! Systems therefore observe a live list that does not change while they iterate over it,
//! even if they delete entities or change components in the process.
//!
//! Components themselves are added and removed immediately,
//! but systems only notice the change when the entity is marked as changed.
//!
//! ```
//! use aspecs::system::Processing;
//! use aspecs::world::State;
//! use aspecs::{Aspect, Component, ComponentKey, EntityId, SystemType, World};
//!
//! struct Position(f32);
//! impl Component for Position {}
//!
//! struct Velocity(f32);
//! impl Component for Velocity {}
//!
//! const POSITION: ComponentKey<Position> = ComponentKey::new(0);
//! const VELOCITY: ComponentKey<Velocity> = ComponentKey::new(1);
//!
//! let mut world = World::new();
//! world
//!     .set_system(
//!         SystemType::new(0),
//!         Aspect::for_all([POSITION.ty(), VELOCITY.ty()]),
//!         Processing::new(|state: &mut State, entity: EntityId| {
//!             let delta = state.delta();
//!             let velocity = state.component(entity, VELOCITY).0;
//!             state.component_mut(entity, POSITION).0 += velocity * delta;
//!         }),
//!     )
//!     .unwrap();
//! world.initialize();
//!
//! let entity = world.create_entity();
//! world.add_component(entity, POSITION, Position(0.0));
//! world.add_component(entity, VELOCITY, Velocity(4.0));
//! world.add_entity(entity);
//!
//! world.set_delta(0.5);
//! world.process();
//! assert_eq!(world.component(entity, POSITION).0, 2.0);
//! ```

#![cfg_attr(doc, warn(missing_docs))]

pub mod aspect;
pub use aspect::Aspect;

pub mod bits;

pub mod component;
pub use component::{Component, ComponentKey, ComponentType};

pub mod entity;
pub use entity::{Entity, EntityId};

mod error;
pub use error::{Error, Result};

pub mod event;
pub use event::Event;

pub mod manager;
pub use manager::{Manager, ManagerType};

pub mod managers;

pub mod optvec;

pub mod system;
pub use system::{System, SystemType};

#[cfg(any(test, feature = "internal-bench"))]
pub mod test_util;

pub mod util;

pub mod world;
pub use world::{new, Bundle, World};
