//! Tests manager and system registration.

use std::sync::Arc;

use crate::managers::{GroupManager, TagManager};
use crate::system::{Processing, Void};
use crate::test_util::*;
use crate::world::{self, Builder, Bundle, State};
use crate::{Aspect, EntityId, Error, ManagerType, Result, SystemType, World};

#[test]
fn test_reserved_manager_ordinals() {
    let mut world = World::new();
    assert_eq!(
        world.set_manager(ManagerType::ENTITY, RecordingManager::default()),
        Err(Error::ReservedManager(0))
    );
    assert_eq!(
        world.set_manager(ManagerType::COMPONENT, RecordingManager::default()),
        Err(Error::ReservedManager(1))
    );
}

#[test]
fn test_ordinal_in_use() {
    let mut world = World::new();
    world.set_manager(ManagerType::TAG, TagManager::<&'static str>::default()).expect("ordinal is free");
    assert_eq!(
        world.set_manager(ManagerType::TAG, RecordingManager::default()),
        Err(Error::OrdinalInUse { kind: "manager", ordinal: 4 })
    );

    world.set_system(SPY_SYSTEM, Aspect::empty(), RecordingSystem::default()).expect("ordinal is free");
    assert_eq!(
        world.set_system(SPY_SYSTEM, Aspect::empty(), RecordingSystem::default()),
        Err(Error::OrdinalInUse { kind: "system", ordinal: SPY_SYSTEM.ordinal() })
    );
}

#[test]
fn test_typed_access() {
    let mut world = World::new();
    world.set_manager(ManagerType::TAG, TagManager::<&'static str>::default()).expect("ordinal is free");
    world.set_system(SPY_SYSTEM, Aspect::empty(), RecordingSystem::default()).expect("ordinal is free");

    assert!(world.manager::<TagManager<&'static str>>(ManagerType::TAG).is_some());
    assert!(world.manager::<GroupManager<&'static str>>(ManagerType::TAG).is_none());
    assert!(world.manager::<TagManager<&'static str>>(ManagerType::GROUP).is_none());
    assert!(world.system::<RecordingSystem>(SPY_SYSTEM).is_some());
    assert!(world.system_mut::<RecordingSystem>(MOVEMENT_SYSTEM).is_none());

    assert!(world.delete_manager(ManagerType::TAG).is_some());
    assert!(world.manager::<TagManager<&'static str>>(ManagerType::TAG).is_none());
}

#[test]
fn test_add_system_allocates_lowest_free() {
    let mut world = World::new();
    world.set_system(SystemType::new(0), Aspect::empty(), RecordingSystem::default()).expect("ordinal is free");
    world.set_system(SystemType::new(2), Aspect::empty(), RecordingSystem::default()).expect("ordinal is free");

    let ty = world.add_system(Aspect::empty(), RecordingSystem::default()).expect("ordinals are available");
    assert_eq!(ty, SystemType::new(1));
}

#[test]
fn test_delete_system_clears_bits() {
    let mut world = World::new();
    world
        .set_system(MOVEMENT_SYSTEM, Aspect::for_all([POSITION.ty(), MOVE.ty()]), Processing::new(MoveProcessor))
        .expect("ordinal is free");
    let entity = spawn(world.state_mut(), Some(Position::default()), Some(1.0));
    world.process();
    assert!(world.entity(entity).expect("entity is alive").system_bits().contains(MOVEMENT_SYSTEM.ordinal()));

    assert!(world.delete_system(MOVEMENT_SYSTEM).is_some());
    assert!(world.entity(entity).expect("entity is alive").system_bits().is_empty());
    assert!(world.actives(MOVEMENT_SYSTEM).is_empty());
    assert!(world.delete_system(MOVEMENT_SYSTEM).is_none());
}

#[test]
fn test_initialize_order() {
    let manager_log = RecordLog::default();
    let system_log = RecordLog::default();

    let mut world = World::new();
    world
        .set_manager(ManagerType::new(8), RecordingManager { log: Arc::clone(&manager_log) })
        .expect("ordinal is free");
    world
        .set_system(SPY_SYSTEM, Aspect::empty(), RecordingSystem { log: Arc::clone(&system_log) })
        .expect("ordinal is free");
    assert!(manager_log.lock().is_empty());
    assert!(!world.is_initialized());

    world.initialize();
    world.initialize();
    assert_eq!(*manager_log.lock(), [Record::Initialize]);
    assert_eq!(*system_log.lock(), [Record::Initialize]);

    let late_log = RecordLog::default();
    world
        .set_system(RENDER_SYSTEM, Aspect::empty(), RecordingSystem { log: Arc::clone(&late_log) })
        .expect("ordinal is free");
    assert_eq!(*late_log.lock(), [Record::Initialize]);
}

#[test]
fn test_void_system_runs_every_tick() {
    let mut world = World::new();
    let ticks = RecordLog::default();
    let log = Arc::clone(&ticks);
    world
        .set_system(SPY_SYSTEM, Aspect::empty(), Void::new(move |_: &mut State| log.lock().push(Record::Begin)))
        .expect("ordinal is free");

    spawn(world.state_mut(), Some(Position::default()), Some(1.0));
    world.process();
    world.process();
    assert_eq!(ticks.lock().len(), 2);
    assert!(world.actives(SPY_SYSTEM).is_empty());
}

#[test]
fn test_tag_manager_drops_deleted() {
    let mut world = World::new();
    world.set_manager(ManagerType::TAG, TagManager::<&'static str>::default()).expect("ordinal is free");

    let player = spawn(world.state_mut(), None, None);
    let boss = spawn(world.state_mut(), None, None);
    world.process();

    let tags = world.manager_mut::<TagManager<&'static str>>(ManagerType::TAG).expect("manager is registered");
    tags.register("PLAYER", player);
    tags.register("BOSS", boss);
    tags.register("HERO", player);
    assert_eq!(tags.entity(&"HERO"), Some(player));
    assert!(!tags.is_registered(&"PLAYER"));

    world.delete_entity(boss);
    world.process();

    let tags = world.manager::<TagManager<&'static str>>(ManagerType::TAG).expect("manager is registered");
    assert_eq!(tags.entity(&"BOSS"), None);
    assert_eq!(tags.tag(player), Some(&"HERO"));
    assert_eq!(tags.registered_tags().count(), 1);
}

#[test]
fn test_group_manager_drops_deleted() {
    let mut world = World::new();
    world.set_manager(ManagerType::GROUP, GroupManager::<&'static str>::default()).expect("ordinal is free");

    let tank = spawn(world.state_mut(), None, None);
    let jeep = spawn(world.state_mut(), None, None);
    world.process();

    let groups = world.manager_mut::<GroupManager<&'static str>>(ManagerType::GROUP).expect("manager is registered");
    groups.add(tank, "units");
    groups.add(tank, "armored");
    groups.add(jeep, "units");
    groups.remove(jeep, &"armored");
    assert!(groups.is_in_group(tank, &"armored"));
    assert_eq!(groups.entities(&"units").collect::<Vec<_>>(), [tank, jeep]);

    world.delete_entity(tank);
    world.process();

    let groups = world.manager::<GroupManager<&'static str>>(ManagerType::GROUP).expect("manager is registered");
    assert!(!groups.is_in_any_group(tank));
    assert_eq!(groups.entities(&"units").collect::<Vec<_>>(), [jeep]);
    assert_eq!(groups.entities(&"armored").count(), 0);
    assert_eq!(groups.groups(jeep).collect::<Vec<_>>(), [&"units"]);
}

struct MovementBundle {
    speeds: Vec<f32>,
}

impl Bundle for MovementBundle {
    fn register(&self, builder: &mut Builder) -> Result<()> {
        builder.delta(0.5).system(
            MOVEMENT_SYSTEM,
            Aspect::for_all([POSITION.ty(), MOVE.ty()]),
            Processing::new(MoveProcessor),
        )?;
        Ok(())
    }

    fn populate(&self, world: &mut World) {
        for &speed in &self.speeds {
            spawn(world.state_mut(), Some(Position::default()), Some(speed));
        }
    }
}

#[test]
fn test_bundle() {
    let bundle = MovementBundle { speeds: vec![2.0, 4.0] };
    let mut world = world::new([&bundle as &dyn Bundle]).expect("bundle registers");
    assert!(world.is_initialized());
    assert_eq!(world.delta(), 0.5);

    world.process();
    let mut xs: Vec<_> = world.actives(MOVEMENT_SYSTEM).iter().map(|&entity| world.component(entity, POSITION).x).collect();
    xs.sort_by(f32::total_cmp);
    assert_eq!(xs, [1.0, 2.0]);
}

#[test]
fn test_bundle_registration_error() {
    struct Conflicting;

    impl Bundle for Conflicting {
        fn register(&self, builder: &mut Builder) -> Result<()> {
            builder.manager(ManagerType::ENTITY, RecordingManager::default())?;
            Ok(())
        }
    }

    assert!(matches!(world::new([&Conflicting as &dyn Bundle]), Err(Error::ReservedManager(0))));
}

#[test]
fn test_register_component_in_world() {
    let mut world = World::new();
    let key = world.register_component::<Render>().expect("ordinals are available");
    let entity: EntityId = world.create_entity();
    world.add_component(entity, key, Render { glyph: '@' });
    assert_eq!(world.try_component(entity, key), Some(&Render { glyph: '@' }));
}
