use std::hint::black_box;

use criterion::*;

mod common;
use common::*;

fn spawn_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn");

    group.bench_function("spawn_100k_particles", |b| {
        b.iter(|| {
            let mut world = make_world(PARTICLES_MED).expect("world setup failed");
            populate(&mut world, PARTICLES_MED).expect("populate failed");
            black_box(world);
        });
    });

    group.bench_function("respawn_after_burst", |b| {
        b.iter_batched(
            || {
                let mut world = make_world(PARTICLES_SMALL).expect("world setup failed");
                populate(&mut world, PARTICLES_SMALL).expect("populate failed");
                let burst: Vec<_> = (0..PARTICLES_SMALL).collect();
                world.destroy_entities(&burst).expect("burst destroy failed");
                world
            },
            |mut world| {
                // Every id comes off the free stack and every slot is recycled.
                populate(&mut world, PARTICLES_SMALL).expect("repopulate failed");
                black_box(world);
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, spawn_benchmark);
criterion_main!(benches);
