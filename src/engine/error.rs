//! Error types for the ECS core.
//!
//! Each error type models a single failure mode and carries enough context
//! to make the failure actionable (the offending entity, the configured
//! capacity, the component or system name). Focused types compose into the
//! aggregate [`ECSError`] through `From` conversions so that call sites can
//! bubble failures with `?`.
//!
//! ## Taxonomy
//!
//! * **Precondition violations** — adding a component twice, operating on a
//!   dead entity, registering a duplicate type, an empty system signature.
//!   These are programming errors; the engine reports them loudly and never
//!   continues with corrupted state.
//! * **Capacity exhaustion** — a pool, the entity id space, or the system
//!   list is full. Treated like a precondition violation under the
//!   fixed-capacity policy: an error, never a silent resize or drop.
//! * **Expected absence** — "may or may not have this component" checks go
//!   through the `try_*` operations, which return `Option`/`bool` and never
//!   construct an error.
//!
//! There is no recovery layer inside the core: every failure propagates to
//! the immediate caller, which is expected to treat ECS misuse as fatal
//! during development.

use thiserror::Error;

use crate::engine::types::{ComponentTypeId, EntityId};

/// Failures raised by a single component pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The entity already owns a component in this pool.
    #[error("entity {entity} already has a component in this pool")]
    AlreadyAttached {
        /// The offending entity.
        entity: EntityId,
    },

    /// The entity owns no component in this pool.
    #[error("entity {entity} has no component in this pool")]
    Missing {
        /// The offending entity.
        entity: EntityId,
    },

    /// Every slot in the pool is occupied.
    #[error("component pool is full ({capacity} slots in use)")]
    Capacity {
        /// The fixed slot count the pool was constructed with.
        capacity: u32,
    },
}

/// Failures raised by the component registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The component type has already been registered.
    #[error("component type `{name}` is already registered as id {id}")]
    DuplicateComponent {
        /// Rust type name of the component.
        name: &'static str,
        /// The id assigned at the earlier registration.
        id: ComponentTypeId,
    },

    /// The component type was never registered.
    #[error("component type `{name}` is not registered")]
    UnknownComponent {
        /// Rust type name of the component.
        name: &'static str,
    },

    /// No component type id remains below the compile-time ceiling.
    #[error("component type capacity reached ({cap} types)")]
    ComponentCapacity {
        /// The compile-time ceiling on distinct component types.
        cap: usize,
    },
}

/// Failures raised by entity lifecycle management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Every id in the configured entity space is live.
    #[error("entity id space exhausted ({capacity} ids)")]
    IdSpaceExhausted {
        /// The configured ceiling on live + free ids.
        capacity: u32,
    },

    /// The id is out of range or currently in the free pool.
    #[error("entity {entity} is not alive")]
    NotAlive {
        /// The offending entity.
        entity: EntityId,
    },
}

/// Failures raised during system registration and notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SystemError {
    /// The system type has already been registered.
    #[error("system `{name}` is already registered")]
    DuplicateSystem {
        /// Rust type name of the system.
        name: &'static str,
    },

    /// The system declared a signature that matches nothing.
    #[error("system `{name}` declares an empty signature")]
    EmptySignature {
        /// Rust type name of the system.
        name: &'static str,
    },

    /// No system slot remains below the configured ceiling.
    #[error("system capacity reached ({cap} systems)")]
    SystemCapacity {
        /// The configured ceiling on registered systems.
        cap: u16,
    },

    /// A destruction notice arrived for an entity the system never
    /// subscribed. Signals an interest-set/signature-table desync.
    #[error("system `{name}` was notified of entity {entity} it never subscribed")]
    MissingSubscriber {
        /// Rust type name of the system.
        name: &'static str,
        /// The entity the notice referred to.
        entity: EntityId,
    },
}

/// Aggregate error for every fallible ECS operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ECSError {
    /// A component pool rejected the operation.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// The component registry rejected the operation.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Entity lifecycle management rejected the operation.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// System registration or notification failed.
    #[error(transparent)]
    System(#[from] SystemError),
}

/// Result alias used across the ECS core.
pub type ECSResult<T> = Result<T, ECSError>;
