//! Cross-checks live lists against a simple model under random mutations.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::aspect::{Aspect, Matcher};
use crate::bits::Bits;
use crate::system::Processing;
use crate::test_util::init;
use crate::world::State;
use crate::{Component, ComponentKey, ComponentType, EntityId, SystemType, World};

struct Marker;
impl Component for Marker {}

const COMPONENT_TYPES: usize = 5;

fn key(ordinal: usize) -> ComponentKey<Marker> { ComponentKey::new(ordinal) }

fn ty(ordinal: usize) -> ComponentType { ComponentType::new(ordinal) }

fn aspects() -> Vec<Aspect> {
    vec![
        Aspect::for_all([ty(0)]),
        Aspect::for_all([ty(0), ty(1)]).exclude([ty(2)]),
        Aspect::for_one([ty(3), ty(4)]),
        Aspect::for_all([ty(1)]).one([ty(2), ty(3)]).exclude([ty(4)]),
        Aspect::empty().exclude([ty(0)]),
    ]
}

#[derive(Debug)]
struct Model {
    components: Bits,
    enabled:    bool,
}

#[test]
fn test_random_mutations_keep_live_lists_consistent() {
    init();

    for seed in 0..8 {
        run(seed);
    }
}

fn run(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut world = World::new();
    let matchers: Vec<Matcher> = aspects().into_iter().map(Matcher::from).collect();
    for (ordinal, aspect) in aspects().into_iter().enumerate() {
        world
            .set_system(SystemType::new(ordinal), aspect, Processing::new(|_: &mut State, _: EntityId| {}))
            .expect("ordinal is free");
    }
    world.initialize();

    let mut model: BTreeMap<EntityId, Model> = BTreeMap::new();

    for _ in 0..50 {
        for _ in 0..rng.gen_range(0..4) {
            let entity = world.create_entity();
            let mut components = Bits::EMPTY;
            for ordinal in 0..COMPONENT_TYPES {
                if rng.gen_bool(0.5) {
                    world.add_component(entity, key(ordinal), Marker);
                    components.insert(ordinal);
                }
            }
            world.add_entity(entity);
            model.insert(entity, Model { components, enabled: true });
        }

        let existing: Vec<EntityId> = model.keys().copied().collect();
        for entity in existing {
            match rng.gen_range(0..10) {
                0 => {
                    world.delete_entity(entity);
                    if rng.gen_bool(0.3) {
                        world.delete_entity(entity);
                    }
                    model.remove(&entity);
                }
                1 => {
                    let state = model.get_mut(&entity).expect("entity is modelled");
                    if state.enabled {
                        world.disable(entity);
                    } else {
                        world.enable(entity);
                    }
                    state.enabled = !state.enabled;
                }
                2..=4 => {
                    let state = model.get_mut(&entity).expect("entity is modelled");
                    let ordinal = rng.gen_range(0..COMPONENT_TYPES);
                    if state.components.contains(ordinal) {
                        assert!(world.remove_component(entity, ty(ordinal)));
                        state.components.remove(ordinal);
                    } else {
                        world.add_component(entity, key(ordinal), Marker);
                        state.components.insert(ordinal);
                    }

                    // Disabled entities are re-checked when enabled again.
                    if state.enabled {
                        world.changed_entity(entity);
                    }
                }
                _ => {}
            }
        }

        world.process();
        verify(&world, &matchers, &model);
    }
}

fn verify(world: &World, matchers: &[Matcher], model: &BTreeMap<EntityId, Model>) {
    assert_eq!(world.entities().active_entity_count(), model.len());

    for (ordinal, matcher) in matchers.iter().enumerate() {
        let system = SystemType::new(ordinal);
        let mut actives = world.actives(system).to_vec();
        actives.sort();

        let expected: Vec<EntityId> = model
            .iter()
            .filter(|(_, state)| state.enabled && matcher.qualifies(state.components))
            .map(|(&entity, _)| entity)
            .collect();
        assert_eq!(actives, expected, "live list of system {ordinal}");

        for (&entity, state) in model {
            let entity = world.entity(entity).expect("modelled entity is alive");
            assert_eq!(entity.component_bits(), state.components);
            assert_eq!(
                entity.system_bits().contains(ordinal),
                expected.contains(&entity.id()),
                "system bit of {:?} in system {ordinal}",
                entity.id(),
            );
        }
    }
}
