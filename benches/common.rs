#![allow(dead_code)]

use spark_ecs::{ECSResult, WorldLimits, ECS};

pub const PARTICLES_SMALL: u32 = 10_000;
pub const PARTICLES_MED: u32 = 100_000;

#[derive(Clone, Copy)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy)]
pub struct Mass {
    pub value: f64,
}

pub fn make_world(max_entities: u32) -> ECSResult<ECS> {
    let mut world = ECS::with_limits(WorldLimits::new(max_entities, 8));
    world.register_pool::<Position>()?;
    world.register_pool::<Velocity>()?;
    world.register_pool::<Mass>()?;
    Ok(world)
}

pub fn populate(world: &mut ECS, particle_count: u32) -> ECSResult<()> {
    for _ in 0..particle_count {
        let particle = world.create_entity()?;
        world.add_component(particle, Position { x: 0.0, y: 0.0 })?;
        world.add_component(particle, Velocity { x: 1.0, y: 1.0 })?;
        world.add_component(particle, Mass { value: 1.0 })?;
    }
    Ok(())
}
