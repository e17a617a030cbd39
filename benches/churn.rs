use std::hint::black_box;

use criterion::*;
use glam::Vec3;
use scene_ecs::prelude::*;

const ENTITIES: usize = 10_000;

fn transform(x: f32) -> Component {
    Transform {
        location: Vec3::new(x, 0.0, 0.0),
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    }
    .into()
}

fn light(attenuation: f32) -> Component {
    PointLight { color: Vec3::ONE, attenuation }.into()
}

fn populated() -> (World, Vec<Entity>) {
    let mut world = World::new();
    let mut entities = Vec::with_capacity(ENTITIES);
    for i in 0..ENTITIES {
        let mut tuple = vec![transform(i as f32)];
        if i % 2 == 0 {
            tuple.push(light(i as f32));
        }
        entities.push(world.create_entity_with(tuple).expect("spawn failed in benchmark"));
    }
    (world, entities)
}

fn spawn_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn");

    group.bench_function("spawn_10k", |b| {
        b.iter(|| {
            let (world, _) = populated();
            black_box(world);
        });
    });

    group.finish();
}

fn query_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let (world, _) = populated();

    group.bench_function("iterate_transform_10k", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for (_, components) in world.query(&[ComponentKind::Transform]) {
                sum += components[0]
                    .as_transform()
                    .expect("transform row in benchmark")
                    .location
                    .x;
            }
            black_box(sum);
        });
    });

    group.finish();
}

fn migration_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("migration");

    group.bench_function("add_remove_light_1k", |b| {
        b.iter_batched(
            populated,
            |(mut world, entities)| {
                for entity in entities.into_iter().step_by(ENTITIES / 1_000).take(1_000) {
                    let entity = if world
                        .signature_of(entity)
                        .expect("live handle in benchmark")
                        .has(ComponentKind::PointLight)
                    {
                        world
                            .remove_components(entity, &[ComponentKind::PointLight])
                            .expect("remove failed in benchmark")
                    } else {
                        world
                            .add_components(entity, vec![light(1.0)])
                            .expect("add failed in benchmark")
                    };
                    black_box(entity);
                }
                black_box(world);
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, spawn_benchmark, query_benchmark, migration_benchmark);
criterion_main!(benches);
