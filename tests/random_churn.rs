//! Randomized operation sequences against a model of the world.
//!
//! Drives the world through seeded create/destroy/add/remove/set churn and
//! checks after every step that every tracked handle still resolves, that
//! component sets match the model, and that query populations agree with the
//! model's counts. A column desynchronization anywhere would surface as a
//! storage error or a count mismatch.

use glam::Vec3;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use scene_ecs::prelude::*;

const STEPS: usize = 600;

fn component_of(kind: ComponentKind, seed: f32) -> Component {
    match kind {
        ComponentKind::Transform => Transform {
            location: Vec3::splat(seed),
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
        .into(),
        ComponentKind::Renderable => Renderable {
            shader: ShaderHandle(seed as u32),
            model: ModelHandle(seed as u32),
            textures: vec![TextureHandle(seed as u32)],
        }
        .into(),
        ComponentKind::PointLight => PointLight { color: Vec3::splat(seed), attenuation: seed }.into(),
        ComponentKind::Physics => Physics {
            velocity: Vec3::splat(seed),
            acceleration: Vec3::ZERO,
            max_speed: seed,
        }
        .into(),
        ComponentKind::Collidable => Collidable {
            hitbox: Aabb { min: Vec3::splat(-seed), max: Vec3::splat(seed) },
        }
        .into(),
    }
}

fn random_subset(rng: &mut ChaCha8Rng) -> Vec<ComponentKind> {
    ComponentKind::ALL
        .into_iter()
        .filter(|_| rng.gen_bool(0.5))
        .collect()
}

fn tuple_of(kinds: &[ComponentKind], rng: &mut ChaCha8Rng) -> Vec<Component> {
    kinds
        .iter()
        .map(|kind| component_of(*kind, rng.gen_range(1.0..100.0)))
        .collect()
}

fn check_against_model(world: &World, model: &[(Entity, Signature)]) {
    assert_eq!(world.entity_count(), model.len());
    for (entity, signature) in model {
        assert!(world.is_alive(*entity));
        assert_eq!(world.signature_of(*entity).unwrap(), *signature);
        let values = world.get_components(*entity).unwrap();
        assert_eq!(values.len(), signature.len());
    }
    for kind in ComponentKind::ALL {
        let expected = model.iter().filter(|(_, s)| s.has(kind)).count();
        assert_eq!(world.query(&[kind]).count(), expected, "population for {kind:?}");
    }
    let stored = model.iter().filter(|(_, s)| !s.is_empty()).count();
    assert_eq!(world.query(&[]).count(), stored);
}

#[test]
fn random_churn_never_desynchronizes() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
    let mut world = World::new();
    let mut model: Vec<(Entity, Signature)> = Vec::new();

    for _ in 0..STEPS {
        match rng.gen_range(0..5) {
            // Create with a random component set (possibly empty).
            0 => {
                let kinds = random_subset(&mut rng);
                let signature: Signature = kinds.iter().copied().collect();
                let entity = if kinds.is_empty() {
                    world.create_entity()
                } else {
                    world.create_entity_with(tuple_of(&kinds, &mut rng)).unwrap()
                };
                model.push((entity, signature));
            }
            // Destroy a random live entity.
            1 if !model.is_empty() => {
                let pick = rng.gen_range(0..model.len());
                let (entity, _) = model.swap_remove(pick);
                world.destroy_entity(entity).unwrap();
            }
            // Add a random absent kind.
            2 if !model.is_empty() => {
                let pick = rng.gen_range(0..model.len());
                let (entity, mut signature) = model[pick];
                let absent: Vec<ComponentKind> = ComponentKind::ALL
                    .into_iter()
                    .filter(|kind| !signature.has(*kind))
                    .collect();
                if let Some(kind) = absent.choose(&mut rng) {
                    let entity = world
                        .add_components(entity, tuple_of(&[*kind], &mut rng))
                        .unwrap();
                    signature.set(*kind);
                    model[pick] = (entity, signature);
                }
            }
            // Remove a random present kind.
            3 if !model.is_empty() => {
                let pick = rng.gen_range(0..model.len());
                let (entity, mut signature) = model[pick];
                let present: Vec<ComponentKind> = signature.kinds().collect();
                if let Some(kind) = present.choose(&mut rng) {
                    let entity = world.remove_components(entity, &[*kind]).unwrap();
                    signature.clear(*kind);
                    model[pick] = (entity, signature);
                }
            }
            // Overwrite one stored component in place.
            4 if !model.is_empty() => {
                let pick = rng.gen_range(0..model.len());
                let (entity, signature) = model[pick];
                let present: Vec<ComponentKind> = signature.kinds().collect();
                if let Some(kind) = present.choose(&mut rng) {
                    world
                        .set_components(entity, tuple_of(&[*kind], &mut rng))
                        .unwrap();
                }
            }
            _ => {}
        }

        check_against_model(&world, &model);
    }

    // Wind everything down; destruction must stay clean to the last entity.
    while let Some((entity, _)) = model.pop() {
        world.destroy_entity(entity).unwrap();
        check_against_model(&world, &model);
    }
    assert_eq!(world.entity_count(), 0);
}
