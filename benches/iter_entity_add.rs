use std::time::Duration;

use aspecs::system::Processing;
use aspecs::test_util::{self, Position, MOVE, MOVEMENT_SYSTEM, POSITION};
use aspecs::{Aspect, World};
use criterion::*;
use rand::Rng;

fn iter_entity_add(c: &mut Criterion) {
    test_util::init();

    let mut group = c.benchmark_group("iter entity (a += b)");
    group.measurement_time(Duration::from_secs(10));

    for log_entities in (4..=16).step_by(4) {
        let num_entities = 1 << log_entities;
        group.throughput(Throughput::Elements(num_entities));
        group.bench_with_input(
            BenchmarkId::new("processing system", format!("{num_entities} entities")),
            &num_entities,
            |b, &num_entities| {
                let mut world = World::new();
                world
                    .set_system(
                        MOVEMENT_SYSTEM,
                        Aspect::for_all([POSITION.ty(), MOVE.ty()]),
                        Processing::new(test_util::MoveProcessor),
                    )
                    .expect("ordinal is free");
                world.initialize();
                world.set_delta(0.016);

                let mut rng = rand::thread_rng();
                for _ in 0..num_entities {
                    let position = Position { x: rng.gen(), y: rng.gen() };
                    test_util::spawn(world.state_mut(), Some(position), Some(rng.gen_range(-1.0..1.0)));
                }
                world.process();

                b.iter(|| world.process());
            },
        );
    }
}

criterion_group!(benches, iter_entity_add);
criterion_main!(benches);
