//! Component registry and typed storage dispatch.
//!
//! The [`ComponentManager`] owns one [`ComponentPool`] per registered
//! component type behind a type-erased handle, and is the single place that
//! knows the mapping component type → pool → [`ComponentTypeId`].
//!
//! ## Design
//! * Pools are registered once during world setup; there is no
//!   de-registration.
//! * Ids are assigned sequentially in registration order and never reused,
//!   so a [`ComponentTypeId`] doubles as the component's bit position in a
//!   [`Signature`](crate::engine::types::Signature).
//! * Typed access recovers the concrete pool by downcasting the erased
//!   handle. A downcast mismatch would mean the registry's own id table is
//!   corrupt, which is unreachable while registration is the only writer;
//!   it is treated as a fatal programming error, not a runtime condition.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::mem::{align_of, size_of};

use log::debug;

use crate::engine::error::{ECSResult, RegistryError};
use crate::engine::pool::{ComponentPool, TypeErasedPool};
use crate::engine::types::{ComponentTypeId, EntityId, COMPONENT_CAP};

/// Metadata recorded for a registered component type.
///
/// Used for diagnostics and log output; the engine itself only needs the
/// id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentDesc {
    /// Identifier assigned at registration.
    pub id: ComponentTypeId,
    /// Rust type name.
    pub name: &'static str,
    /// Size of the component type in bytes.
    pub size: usize,
    /// Alignment of the component type in bytes.
    pub align: usize,
}

impl ComponentDesc {
    /// Builds a descriptor for type `T` with the given id.
    fn of<T: 'static>(id: ComponentTypeId) -> Self {
        Self {
            id,
            name: type_name::<T>(),
            size: size_of::<T>(),
            align: align_of::<T>(),
        }
    }
}

impl fmt::Display for ComponentDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ComponentDesc {{ id: {}, name: {}, size: {}, align: {} }}",
            self.id, self.name, self.size, self.align
        )
    }
}

/// Registry and owner of every component pool.
#[derive(Default)]
pub struct ComponentManager {
    by_type: HashMap<TypeId, ComponentTypeId>,
    descriptors: Vec<ComponentDesc>,
    pools: Vec<Box<dyn TypeErasedPool>>,
}

impl ComponentManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pool for component type `T` with a fixed `capacity`.
    ///
    /// Assigns the next sequential [`ComponentTypeId`].
    ///
    /// ## Errors
    /// * [`RegistryError::DuplicateComponent`] if `T` is already registered.
    /// * [`RegistryError::ComponentCapacity`] past [`COMPONENT_CAP`].
    pub fn register_pool<T: 'static>(
        &mut self,
        capacity: u32,
    ) -> Result<ComponentTypeId, RegistryError> {
        let type_id = TypeId::of::<T>();
        if let Some(&existing) = self.by_type.get(&type_id) {
            return Err(RegistryError::DuplicateComponent {
                name: type_name::<T>(),
                id: existing,
            });
        }
        if self.pools.len() >= COMPONENT_CAP {
            return Err(RegistryError::ComponentCapacity { cap: COMPONENT_CAP });
        }

        let id = self.pools.len() as ComponentTypeId;
        let desc = ComponentDesc::of::<T>(id);
        debug!("registered component pool {desc} with capacity {capacity}");

        self.by_type.insert(type_id, id);
        self.descriptors.push(desc);
        self.pools.push(Box::new(ComponentPool::<T>::new(capacity)));
        Ok(id)
    }

    /// Returns the id assigned to component type `T`.
    ///
    /// ## Errors
    /// [`RegistryError::UnknownComponent`] if `T` was never registered.
    pub fn component_id<T: 'static>(&self) -> Result<ComponentTypeId, RegistryError> {
        self.by_type
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or(RegistryError::UnknownComponent {
                name: type_name::<T>(),
            })
    }

    /// Returns the descriptor recorded for `component_id`, if any.
    pub fn descriptor(&self, component_id: ComponentTypeId) -> Option<&ComponentDesc> {
        self.descriptors.get(component_id as usize)
    }

    /// Number of registered pools.
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Resolves the concrete pool for component type `T`.
    ///
    /// ## Errors
    /// [`RegistryError::UnknownComponent`] if `T` was never registered.
    ///
    /// ## Panics
    /// If the erased handle does not hold a `ComponentPool<T>`; this means
    /// the registry's id table is corrupt and is a programming error.
    pub fn pool<T: 'static>(&self) -> Result<&ComponentPool<T>, RegistryError> {
        let id = self.component_id::<T>()?;
        let pool = self.pools[id as usize]
            .as_any()
            .downcast_ref()
            .expect("registry corrupted: pool type does not match its registered id");
        Ok(pool)
    }

    /// Resolves the concrete pool for component type `T` mutably.
    ///
    /// Same failure semantics as [`pool`](Self::pool).
    pub fn pool_mut<T: 'static>(&mut self) -> Result<&mut ComponentPool<T>, RegistryError> {
        let id = self.component_id::<T>()?;
        let pool = self.pools[id as usize]
            .as_any_mut()
            .downcast_mut()
            .expect("registry corrupted: pool type does not match its registered id");
        Ok(pool)
    }

    /// Attaches `value` to `entity` in the pool for `T`.
    pub fn add<T: 'static>(&mut self, entity: EntityId, value: T) -> ECSResult<&mut T> {
        let component = self.pool_mut::<T>()?.add(entity, value)?;
        Ok(component)
    }

    /// Returns the entity's `T` component.
    pub fn get<T: 'static>(&self, entity: EntityId) -> ECSResult<&T> {
        let component = self.pool::<T>()?.get(entity)?;
        Ok(component)
    }

    /// Returns the entity's `T` component mutably.
    pub fn get_mut<T: 'static>(&mut self, entity: EntityId) -> ECSResult<&mut T> {
        let component = self.pool_mut::<T>()?.get_mut(entity)?;
        Ok(component)
    }

    /// Non-failing lookup; `None` when the component (or the pool itself)
    /// is absent.
    pub fn try_get<T: 'static>(&self, entity: EntityId) -> Option<&T> {
        self.pool::<T>().ok()?.try_get(entity)
    }

    /// Non-failing mutable lookup; `None` when absent.
    pub fn try_get_mut<T: 'static>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.pool_mut::<T>().ok()?.try_get_mut(entity)
    }

    /// Returns `true` if the entity owns a `T` component.
    pub fn contains<T: 'static>(&self, entity: EntityId) -> bool {
        self.pool::<T>()
            .map(|pool| pool.contains(entity))
            .unwrap_or(false)
    }

    /// Detaches the entity's `T` component.
    ///
    /// ## Errors
    /// [`PoolError::Missing`](crate::engine::error::PoolError::Missing) if
    /// the entity owns no `T` component.
    pub fn delete<T: 'static>(&mut self, entity: EntityId) -> ECSResult<()> {
        self.pool_mut::<T>()?.delete(entity)?;
        Ok(())
    }

    /// Detaches the entity's `T` component if present; `Ok(false)` when
    /// absent.
    pub fn try_delete<T: 'static>(&mut self, entity: EntityId) -> ECSResult<bool> {
        let id = self.component_id::<T>()?;
        Ok(self.pools[id as usize].try_delete(entity))
    }

    /// Removes whatever components the entity holds, across every pool.
    ///
    /// Non-failing by design: used when destroying an entity that may hold
    /// an arbitrary subset of component types.
    pub fn destroy_all(&mut self, entity: EntityId) {
        for pool in &mut self.pools {
            pool.try_delete(entity);
        }
    }

    /// Attaches a clone of `value` to each entity, in order.
    ///
    /// Not atomic: a failure partway through leaves earlier entities
    /// mutated and the rest untouched.
    pub fn add_batch<T: 'static + Clone>(
        &mut self,
        entities: &[EntityId],
        value: T,
    ) -> ECSResult<()> {
        let pool = self.pool_mut::<T>()?;
        for &entity in entities {
            pool.add(entity, value.clone())?;
        }
        Ok(())
    }

    /// Detaches the `T` component from each entity, in order.
    ///
    /// Same non-atomic semantics as [`add_batch`](Self::add_batch).
    pub fn delete_batch<T: 'static>(&mut self, entities: &[EntityId]) -> ECSResult<()> {
        let pool = self.pool_mut::<T>()?;
        for &entity in entities {
            pool.delete(entity)?;
        }
        Ok(())
    }
}
