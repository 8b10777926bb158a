//! Dense fixed-capacity component storage.
//!
//! A [`ComponentPool`] owns every instance of one component type, keyed by
//! entity. Storage is a dense high-water-mark array plus an entity-to-slot
//! map and a free-slot stack, which gives O(1) add, get, and delete without
//! ever moving a live component.
//!
//! ## Invariants
//! * A slot is either free or owned by exactly one live entity.
//! * `entity_to_slot`, `free_slots`, and the unextended tail of the dense
//!   array partition the slot space.
//! * Capacity is fixed at construction; the dense array is allocated once
//!   and never reallocated, so component references stay valid until the
//!   component is deleted or the pool is dropped.
//!
//! Deleting a component only recycles its slot. The stale value stays in
//! the dense array until the next `add` overwrites it; the pool never hands
//! out a reference to a recycled slot in the meantime.

use std::any::Any;
use std::collections::HashMap;

use crate::engine::error::PoolError;
use crate::engine::types::{EntityId, SlotId};

/// Object-safe view of a component pool held by the registry.
///
/// Exposes only the capabilities that do not depend on the component type:
/// "don't care" cleanup and occupancy. The concrete, strongly-typed
/// operations are reached by downcasting through [`as_any`](Self::as_any)
/// in the registry's typed accessors.
pub trait TypeErasedPool {
    /// Deletes the entity's component if present; `false` when absent.
    fn try_delete(&mut self, entity: EntityId) -> bool;

    /// Returns `true` if the entity owns a component in this pool.
    fn contains(&self, entity: EntityId) -> bool;

    /// Number of live components in the pool.
    fn len(&self) -> usize;

    /// Returns `true` if the pool holds no live components.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upcast for typed downcasting by the registry.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed downcasting by the registry.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Dense storage for all components of type `T`, keyed by entity.
pub struct ComponentPool<T> {
    /// Dense high-water-mark array; live slots are addressed through
    /// `entity_to_slot`, recycled slots wait on `free_slots`.
    components: Vec<T>,
    entity_to_slot: HashMap<EntityId, SlotId>,
    /// Recycled slot indices, most-recently-freed on top.
    free_slots: Vec<SlotId>,
    capacity: u32,
}

impl<T: 'static> ComponentPool<T> {
    /// Creates a pool with a fixed slot `capacity`.
    pub fn new(capacity: u32) -> Self {
        Self {
            components: Vec::with_capacity(capacity as usize),
            entity_to_slot: HashMap::new(),
            free_slots: Vec::new(),
            capacity,
        }
    }

    /// Attaches `value` to `entity` and returns a reference to it.
    ///
    /// ## Errors
    /// * [`PoolError::AlreadyAttached`] if the entity already owns a
    ///   component here.
    /// * [`PoolError::Capacity`] if no free slot remains.
    pub fn add(&mut self, entity: EntityId, value: T) -> Result<&mut T, PoolError> {
        if self.entity_to_slot.contains_key(&entity) {
            return Err(PoolError::AlreadyAttached { entity });
        }

        let slot = match self.free_slots.pop() {
            Some(slot) => {
                // Recycled slot: overwrite the stale occupant in place.
                self.components[slot as usize] = value;
                slot
            }
            None => {
                if self.components.len() as u32 >= self.capacity {
                    return Err(PoolError::Capacity {
                        capacity: self.capacity,
                    });
                }
                self.components.push(value);
                (self.components.len() - 1) as SlotId
            }
        };

        self.entity_to_slot.insert(entity, slot);
        Ok(&mut self.components[slot as usize])
    }

    /// Returns the entity's component.
    ///
    /// ## Errors
    /// [`PoolError::Missing`] if the entity owns no component here.
    pub fn get(&self, entity: EntityId) -> Result<&T, PoolError> {
        let slot = self
            .entity_to_slot
            .get(&entity)
            .ok_or(PoolError::Missing { entity })?;
        Ok(&self.components[*slot as usize])
    }

    /// Returns the entity's component mutably.
    ///
    /// ## Errors
    /// [`PoolError::Missing`] if the entity owns no component here.
    pub fn get_mut(&mut self, entity: EntityId) -> Result<&mut T, PoolError> {
        let slot = self
            .entity_to_slot
            .get(&entity)
            .ok_or(PoolError::Missing { entity })?;
        Ok(&mut self.components[*slot as usize])
    }

    /// Non-failing lookup; `None` when the entity owns no component here.
    pub fn try_get(&self, entity: EntityId) -> Option<&T> {
        let slot = self.entity_to_slot.get(&entity)?;
        Some(&self.components[*slot as usize])
    }

    /// Non-failing mutable lookup; `None` when absent.
    pub fn try_get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        let slot = self.entity_to_slot.get(&entity)?;
        Some(&mut self.components[*slot as usize])
    }

    /// Detaches the entity's component, recycling its slot.
    ///
    /// The stored value is not dropped or cleared; the next `add` that
    /// lands on the slot overwrites it.
    ///
    /// ## Errors
    /// [`PoolError::Missing`] if the entity owns no component here.
    pub fn delete(&mut self, entity: EntityId) -> Result<(), PoolError> {
        let slot = self
            .entity_to_slot
            .remove(&entity)
            .ok_or(PoolError::Missing { entity })?;
        self.free_slots.push(slot);
        Ok(())
    }

    /// Fixed slot capacity the pool was constructed with.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl<T: 'static> TypeErasedPool for ComponentPool<T> {
    fn try_delete(&mut self, entity: EntityId) -> bool {
        match self.entity_to_slot.remove(&entity) {
            Some(slot) => {
                self.free_slots.push(slot);
                true
            }
            None => false,
        }
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.entity_to_slot.contains_key(&entity)
    }

    fn len(&self) -> usize {
        self.entity_to_slot.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
