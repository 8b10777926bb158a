//! End-to-end scenario tests modeled on the particle demos: a motion
//! system integrating velocity into position and a gravity system
//! accelerating massive particles.

use spark_ecs::{
    ComponentManager, ECSResult, RenderContext, Signature, System, UpdateContext, WorldLimits,
    ECS,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Mass {
    value: f64,
}

/// Frames presented so far; bumped by the render hook only.
#[derive(Debug, Clone, Copy, Default)]
struct FramesPresented {
    count: u32,
}

struct Motion;

impl System for Motion {
    fn signature(&self, components: &ComponentManager) -> ECSResult<Signature> {
        Ok(Signature::from_ids(&[
            components.component_id::<Position>()?,
            components.component_id::<Velocity>()?,
        ]))
    }

    fn update(&mut self, ctx: UpdateContext<'_>) -> ECSResult<()> {
        for &entity in ctx.entities {
            let velocity = *ctx.components.get::<Velocity>(entity)?;
            let position = ctx.components.get_mut::<Position>(entity)?;
            position.x += velocity.x * ctx.delta_time as f64;
            position.y += velocity.y * ctx.delta_time as f64;
        }
        Ok(())
    }
}

const GRAVITY: f64 = -10.0;

struct Gravity;

impl System for Gravity {
    fn signature(&self, components: &ComponentManager) -> ECSResult<Signature> {
        Ok(Signature::from_ids(&[
            components.component_id::<Velocity>()?,
            components.component_id::<Mass>()?,
        ]))
    }

    fn update(&mut self, ctx: UpdateContext<'_>) -> ECSResult<()> {
        for &entity in ctx.entities {
            let mass = ctx.components.get::<Mass>(entity)?.value;
            let velocity = ctx.components.get_mut::<Velocity>(entity)?;
            velocity.y += GRAVITY * mass * ctx.delta_time as f64;
        }
        Ok(())
    }
}

struct Presenter;

impl System for Presenter {
    fn signature(&self, components: &ComponentManager) -> ECSResult<Signature> {
        Ok(Signature::from_ids(&[
            components.component_id::<FramesPresented>()?
        ]))
    }

    fn render(&mut self, ctx: RenderContext<'_>) -> ECSResult<()> {
        for &entity in ctx.entities {
            ctx.components.get_mut::<FramesPresented>(entity)?.count += 1;
        }
        Ok(())
    }
}

fn demo_world() -> ECS {
    let mut world = ECS::with_limits(WorldLimits::new(256, 8));
    world.register_pool::<Position>().unwrap();
    world.register_pool::<Velocity>().unwrap();
    world.register_pool::<Mass>().unwrap();
    world.register_pool::<FramesPresented>().unwrap();
    world
}

#[test]
fn motion_integrates_velocity() {
    let mut world = demo_world();
    world.register_system(Motion).unwrap();

    let particle = world.create_entity().unwrap();
    world
        .add_component(particle, Position { x: 0.0, y: 0.0 })
        .unwrap();
    world
        .add_component(particle, Velocity { x: 1.0, y: 2.0 })
        .unwrap();

    world.update_systems(1.0).unwrap();
    assert_eq!(
        *world.get_component::<Position>(particle).unwrap(),
        Position { x: 1.0, y: 2.0 }
    );

    world.update_systems(0.5).unwrap();
    assert_eq!(
        *world.get_component::<Position>(particle).unwrap(),
        Position { x: 1.5, y: 3.0 }
    );
}

#[test]
fn zero_dt_frame_changes_nothing() {
    let mut world = demo_world();
    world.register_system(Gravity).unwrap();
    world.register_system(Motion).unwrap();

    let particle = world.create_entity().unwrap();
    world
        .add_component(particle, Position { x: 3.0, y: 4.0 })
        .unwrap();
    world
        .add_component(particle, Velocity { x: 1.0, y: 1.0 })
        .unwrap();
    world.add_component(particle, Mass { value: 1.0 }).unwrap();

    world.update_systems(0.0).unwrap();
    assert_eq!(
        *world.get_component::<Position>(particle).unwrap(),
        Position { x: 3.0, y: 4.0 }
    );
    assert_eq!(
        *world.get_component::<Velocity>(particle).unwrap(),
        Velocity { x: 1.0, y: 1.0 }
    );
}

#[test]
fn systems_run_in_registration_order() {
    let mut world = demo_world();
    // Gravity first: Motion must see the already-accelerated velocity
    // within the same frame.
    world.register_system(Gravity).unwrap();
    world.register_system(Motion).unwrap();

    let particle = world.create_entity().unwrap();
    world
        .add_component(particle, Position { x: 0.0, y: 0.0 })
        .unwrap();
    world
        .add_component(particle, Velocity { x: 0.0, y: 0.0 })
        .unwrap();
    world.add_component(particle, Mass { value: 2.0 }).unwrap();

    world.update_systems(1.0).unwrap();
    let velocity = *world.get_component::<Velocity>(particle).unwrap();
    let position = *world.get_component::<Position>(particle).unwrap();
    assert_eq!(velocity, Velocity { x: 0.0, y: -20.0 });
    assert_eq!(position, Position { x: 0.0, y: -20.0 });
}

#[test]
fn massless_particles_ignore_gravity() {
    let mut world = demo_world();
    world.register_system(Gravity).unwrap();
    world.register_system(Motion).unwrap();

    let drifter = world.create_entity().unwrap();
    world
        .add_component(drifter, Position { x: 0.0, y: 0.0 })
        .unwrap();
    world
        .add_component(drifter, Velocity { x: 2.0, y: 0.0 })
        .unwrap();

    world.update_systems(1.0).unwrap();
    assert_eq!(
        *world.get_component::<Velocity>(drifter).unwrap(),
        Velocity { x: 2.0, y: 0.0 }
    );
    assert_eq!(
        *world.get_component::<Position>(drifter).unwrap(),
        Position { x: 2.0, y: 0.0 }
    );
}

#[test]
fn render_pass_is_independent_of_update() {
    let mut world = demo_world();
    world.register_system(Motion).unwrap();
    world.register_system(Presenter).unwrap();

    let particle = world.create_entity().unwrap();
    world
        .add_component(particle, Position { x: 0.0, y: 0.0 })
        .unwrap();
    world
        .add_component(particle, Velocity { x: 1.0, y: 0.0 })
        .unwrap();
    world
        .add_component(particle, FramesPresented::default())
        .unwrap();

    // Two renders without an update, then an update without a render.
    world.render_systems().unwrap();
    world.render_systems().unwrap();
    assert_eq!(
        world
            .get_component::<FramesPresented>(particle)
            .unwrap()
            .count,
        2
    );

    world.update_systems(1.0).unwrap();
    assert_eq!(
        world
            .get_component::<FramesPresented>(particle)
            .unwrap()
            .count,
        2
    );
    assert_eq!(
        *world.get_component::<Position>(particle).unwrap(),
        Position { x: 1.0, y: 0.0 }
    );
}

#[test]
fn particle_burst_lifecycle() {
    // Spawn a burst, integrate a few frames, then despawn it all — the
    // shape of one emitter cycle in the demos.
    let mut world = demo_world();
    world.register_system(Gravity).unwrap();
    world.register_system(Motion).unwrap();

    let burst: Vec<_> = (0..32).map(|_| world.create_entity().unwrap()).collect();
    world
        .add_components(&burst, Position { x: 0.0, y: 0.0 })
        .unwrap();
    world
        .add_components(&burst, Velocity { x: 1.0, y: 5.0 })
        .unwrap();
    world.add_components(&burst, Mass { value: 0.5 }).unwrap();

    for _ in 0..4 {
        world.update_systems(0.25).unwrap();
    }
    for &particle in &burst {
        let position = world.get_component::<Position>(particle).unwrap();
        assert!(position.x > 0.0);
    }

    world.destroy_entities(&burst).unwrap();
    assert_eq!(world.entity_count(), 0);

    // The freed ids are immediately reusable for the next burst.
    let next = world.create_entity().unwrap();
    assert!(world.signature(next).unwrap().is_empty());
}
