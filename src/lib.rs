//! # spark_ecs
//!
//! Single-threaded, signature-matching Entity-Component-System core for
//! small graphical demos.
//!
//! ## Design Goals
//! - Dense per-type component pools with fixed capacity and no pointer
//!   invalidation from growth
//! - Bitset signatures as the single source of truth for entity/component
//!   membership
//! - Incrementally maintained per-system interest sets
//! - Loud, typed failures for every misuse; no silent recovery
//!
//! The windowing, rendering, asset, and input layers are external
//! collaborators: they drive the world through the [`ECS`] facade and
//! supply a frame `delta_time`, and any drawing happens inside a system a
//! collaborator registers.
//!
//! ```no_run
//! use spark_ecs::{ECS, ECSResult, FnSystem, Signature, WorldLimits};
//!
//! #[derive(Clone, Copy)]
//! struct Position { x: f64, y: f64 }
//! #[derive(Clone, Copy)]
//! struct Velocity { x: f64, y: f64 }
//!
//! fn main() -> ECSResult<()> {
//!     let mut world = ECS::with_limits(WorldLimits::new(1024, 8));
//!     world.register_pool::<Position>()?;
//!     world.register_pool::<Velocity>()?;
//!
//!     world.register_system(FnSystem::new(
//!         "motion",
//!         |components| {
//!             Ok(Signature::from_ids(&[
//!                 components.component_id::<Position>()?,
//!                 components.component_id::<Velocity>()?,
//!             ]))
//!         },
//!         |ctx| {
//!             for &entity in ctx.entities {
//!                 let velocity = *ctx.components.get::<Velocity>(entity)?;
//!                 let position = ctx.components.get_mut::<Position>(entity)?;
//!                 position.x += velocity.x * ctx.delta_time as f64;
//!                 position.y += velocity.y * ctx.delta_time as f64;
//!             }
//!             Ok(())
//!         },
//!     ))?;
//!
//!     let particle = world.create_entity()?;
//!     world.add_component(particle, Position { x: 0.0, y: 0.0 })?;
//!     world.add_component(particle, Velocity { x: 1.0, y: 2.0 })?;
//!
//!     world.update_systems(1.0)?;
//!     world.render_systems()?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(dead_code)]

pub mod engine;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

// Core ECS types

pub use engine::ecs::ECS;

pub use engine::types::{
    ComponentTypeId, EntityId, Signature, SlotId, SystemId, WorldLimits, COMPONENT_CAP,
    DEFAULT_ENTITY_CAP, DEFAULT_SYSTEM_CAP, SIGNATURE_WORDS,
};

// Component storage

pub use engine::component::{ComponentDesc, ComponentManager};
pub use engine::pool::{ComponentPool, TypeErasedPool};

// Systems

pub use engine::systems::{FnSystem, RegisteredSystem, RenderContext, System, UpdateContext};

// Errors

pub use engine::error::{
    ECSError, ECSResult, EntityError, PoolError, RegistryError, SystemError,
};
