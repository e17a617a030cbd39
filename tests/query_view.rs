use glam::Vec3;

use scene_ecs::prelude::*;

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

fn physics(max_speed: f32) -> Component {
    Physics { velocity: Vec3::ZERO, acceleration: Vec3::ZERO, max_speed }.into()
}

/// Three archetypes with known populations, plus empties that never match.
fn populated() -> (World, Vec<Entity>) {
    let mut world = World::new();
    let mut entities = Vec::new();
    for i in 0..3 {
        entities.push(world.create_entity_with(vec![transform(i as f32)]).unwrap());
    }
    for i in 0..2 {
        entities.push(
            world
                .create_entity_with(vec![transform(10.0 + i as f32), light(1.0)])
                .unwrap(),
        );
    }
    entities.push(
        world
            .create_entity_with(vec![transform(20.0), light(2.0), physics(5.0)])
            .unwrap(),
    );
    world.create_entity();
    world.create_entity();
    (world, entities)
}

#[test]
fn superset_matching_counts_every_qualifying_archetype() {
    let (world, _) = populated();

    assert_eq!(world.query(&[ComponentKind::Transform]).count(), 6);
    assert_eq!(
        world
            .query(&[ComponentKind::Transform, ComponentKind::PointLight])
            .count(),
        3
    );
    assert_eq!(world.query(&[ComponentKind::Physics]).count(), 1);
    assert_eq!(world.query(&[ComponentKind::Collidable]).count(), 0);
}

#[test]
fn empty_request_matches_every_stored_entity_but_no_empty_ones() {
    let (world, entities) = populated();
    let rows: Vec<_> = world.query(&[]).collect();
    assert_eq!(rows.len(), entities.len());
    for (_, components) in &rows {
        assert!(components.is_empty());
    }
}

#[test]
fn rows_come_out_in_archetype_then_row_order() {
    let (world, entities) = populated();
    let yielded: Vec<Entity> = world
        .query(&[ComponentKind::Transform])
        .map(|(entity, _)| entity)
        .collect();
    // Creation touched the archetypes in arena order, so the yield order is
    // exactly the creation order here.
    assert_eq!(yielded, entities);
}

#[test]
fn components_come_back_in_the_requested_order() {
    let (world, _) = populated();
    for (_, components) in world.query(&[ComponentKind::PointLight, ComponentKind::Transform]) {
        assert_eq!(components[0].kind(), ComponentKind::PointLight);
        assert_eq!(components[1].kind(), ComponentKind::Transform);
    }
}

#[test]
fn count_rows_agrees_with_draining() {
    let (world, _) = populated();
    let query = world.query(&[ComponentKind::Transform, ComponentKind::PointLight]);
    assert_eq!(query.count_rows(), 3);
    assert_eq!(query.count(), 3);
}

#[test]
fn the_view_is_recomputed_not_cached() {
    let (mut world, entities) = populated();
    assert_eq!(world.query(&[ComponentKind::PointLight]).count(), 3);

    world.destroy_entity(entities[3]).unwrap();
    assert_eq!(world.query(&[ComponentKind::PointLight]).count(), 2);

    world
        .create_entity_with(vec![transform(30.0), light(9.0)])
        .unwrap();
    assert_eq!(world.query(&[ComponentKind::PointLight]).count(), 3);
}

#[test]
fn yielded_handles_are_current() {
    let (world, _) = populated();
    for (entity, _) in world.query(&[ComponentKind::Transform]) {
        assert!(world.is_alive(entity));
    }
}
