//! # Engine Module
//!
//! Internal ECS engine implementation.
//!
//! This module contains all core ECS building blocks:
//! - Identifiers, capacities, and signatures
//! - Error types
//! - Component pools and the component registry
//! - System abstraction and interest-set maintenance
//! - The world facade (entity lifecycle and frame dispatch)
//!
//! Public API exposure is controlled by `lib.rs`.

pub mod component;
pub mod ecs;
pub mod error;
pub mod pool;
pub mod systems;
pub mod types;
