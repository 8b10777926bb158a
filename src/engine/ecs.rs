//! ECS facade: entity lifecycle, mutation notification, frame dispatch.
//!
//! [`ECS`] is the single entry point the application layer talks to. It
//! owns:
//! * the entity id allocator (a free-id stack, most-recently-freed reused
//!   first),
//! * the global signature table, one [`Signature`] per entity id,
//! * the [`ComponentManager`] and every registered system.
//!
//! It is also the supported mutation point: component adds and deletes are
//! expected to flow through here so that the signature table and each
//! system's interest set stay consistent. Facade operations never leave a
//! half-applied mutation visible; membership changes made directly on the
//! component manager bypass that bookkeeping and are unsupported.
//!
//! ## Notification ordering
//!
//! * **Add**: store mutation, then signature bit set, then system
//!   notification — a hook reading the new component sees it.
//! * **Delete**: signature bit cleared, then system notification, then
//!   store removal — a hook may still read the outgoing component.
//! * **Destroy**: systems the entity matched are notified first (the
//!   pre-clear signature is still visible), then all components are
//!   removed, then the signature is zeroed and the id recycled.
//!
//! ## Threading
//!
//! Strictly single-threaded and synchronous. Every operation runs to
//! completion on the caller's thread; systems run in registration order and
//! there is no internal locking.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::mem;

use log::{debug, trace};

use crate::engine::component::ComponentManager;
use crate::engine::error::{ECSResult, EntityError, PoolError, SystemError};
use crate::engine::systems::{RegisteredSystem, System};
use crate::engine::types::{ComponentTypeId, EntityId, Signature, SystemId, WorldLimits};

/// The ECS world facade.
pub struct ECS {
    limits: WorldLimits,
    /// Signature per entity id; all-zero for free or component-less ids.
    signatures: Vec<Signature>,
    /// Liveness per entity id. An id is free xor live.
    alive: Vec<bool>,
    /// Free-id stack, seeded with the full id space so that id 0 is
    /// allocated first; destroyed ids are pushed back on top.
    free_ids: Vec<EntityId>,
    components: ComponentManager,
    /// Registered systems in registration order, which is dispatch order.
    systems: Vec<RegisteredSystem>,
    system_ids: HashMap<TypeId, SystemId>,
}

impl Default for ECS {
    fn default() -> Self {
        Self::new()
    }
}

impl ECS {
    /// Creates a world with [`WorldLimits::default`].
    pub fn new() -> Self {
        Self::with_limits(WorldLimits::default())
    }

    /// Creates a world with explicit capacity limits.
    pub fn with_limits(limits: WorldLimits) -> Self {
        let entity_cap = limits.max_entities as usize;
        Self {
            limits,
            signatures: vec![Signature::default(); entity_cap],
            alive: vec![false; entity_cap],
            free_ids: (0..limits.max_entities).rev().collect(),
            components: ComponentManager::new(),
            systems: Vec::new(),
            system_ids: HashMap::new(),
        }
    }

    /// The capacity limits this world was constructed with.
    pub fn limits(&self) -> &WorldLimits {
        &self.limits
    }

    // ── Entity lifecycle ────────────────────────────────────────────────

    /// Allocates a fresh entity with an all-zero signature.
    ///
    /// ## Errors
    /// [`EntityError::IdSpaceExhausted`] when every id is live.
    pub fn create_entity(&mut self) -> ECSResult<EntityId> {
        let entity = self
            .free_ids
            .pop()
            .ok_or(EntityError::IdSpaceExhausted {
                capacity: self.limits.max_entities,
            })?;
        debug_assert!(self.signatures[entity as usize].is_empty());
        self.alive[entity as usize] = true;
        trace!("created entity {entity}");
        Ok(entity)
    }

    /// Destroys a live entity: notifies matching systems, removes whatever
    /// components it holds, zeroes its signature, and recycles its id.
    ///
    /// ## Errors
    /// [`EntityError::NotAlive`] for an id that is out of range or free.
    pub fn destroy_entity(&mut self, entity: EntityId) -> ECSResult<()> {
        self.check_alive(entity)?;

        // Systems see the entity's final signature before anything is torn
        // down; only systems the entity matched are notified.
        let signature = self.signatures[entity as usize];
        for system in &mut self.systems {
            if system.matches(&signature) {
                system.entity_destroyed(entity)?;
            }
        }

        self.components.destroy_all(entity);
        self.signatures[entity as usize] = Signature::default();
        self.alive[entity as usize] = false;
        self.free_ids.push(entity);
        trace!("destroyed entity {entity}");
        Ok(())
    }

    /// Destroys each entity in order; not atomic across the batch.
    pub fn destroy_entities(&mut self, entities: &[EntityId]) -> ECSResult<()> {
        for &entity in entities {
            self.destroy_entity(entity)?;
        }
        Ok(())
    }

    /// Returns `true` if the id is currently live.
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.alive.get(entity as usize).copied().unwrap_or(false)
    }

    /// Number of currently-live entities.
    pub fn entity_count(&self) -> u32 {
        self.limits.max_entities - self.free_ids.len() as u32
    }

    /// The entity's current signature, or `None` for a dead id.
    pub fn signature(&self, entity: EntityId) -> Option<&Signature> {
        if self.is_alive(entity) {
            self.signatures.get(entity as usize)
        } else {
            None
        }
    }

    fn check_alive(&self, entity: EntityId) -> Result<(), EntityError> {
        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(EntityError::NotAlive { entity })
        }
    }

    // ── Setup-phase registration ────────────────────────────────────────

    /// Registers a pool for component type `T` with the world's default
    /// pool capacity.
    pub fn register_pool<T: 'static>(&mut self) -> ECSResult<ComponentTypeId> {
        self.register_pool_with_capacity::<T>(self.limits.pool_capacity)
    }

    /// Registers a pool for component type `T` with an explicit capacity.
    ///
    /// Must precede any `add_component::<T>` call.
    pub fn register_pool_with_capacity<T: 'static>(
        &mut self,
        capacity: u32,
    ) -> ECSResult<ComponentTypeId> {
        let id = self.components.register_pool::<T>(capacity)?;
        Ok(id)
    }

    /// Registers a system, freezing its signature and seeding its interest
    /// set from the current signature table.
    ///
    /// Dispatch order is registration order. The component pools the
    /// system depends on must already be registered.
    ///
    /// ## Errors
    /// * [`SystemError::DuplicateSystem`] if `S` is already registered.
    /// * [`SystemError::SystemCapacity`] past the configured ceiling.
    /// * [`SystemError::EmptySignature`] if the system matches nothing.
    /// * Any error from the system's own signature lookup (typically an
    ///   unregistered component type).
    pub fn register_system<S: System + 'static>(&mut self, system: S) -> ECSResult<SystemId> {
        let name = type_name::<S>();
        if self.system_ids.contains_key(&TypeId::of::<S>()) {
            return Err(SystemError::DuplicateSystem { name }.into());
        }
        if self.systems.len() >= self.limits.max_systems as usize {
            return Err(SystemError::SystemCapacity {
                cap: self.limits.max_systems,
            }
            .into());
        }

        let signature = system.signature(&self.components)?;
        if signature.is_empty() {
            return Err(SystemError::EmptySignature { name }.into());
        }

        let mut registered = RegisteredSystem::new(name, signature, Box::new(system));
        for (index, &alive) in self.alive.iter().enumerate() {
            if alive {
                registered.entity_signature_changed(index as EntityId, &self.signatures[index]);
            }
        }

        let id = self.systems.len() as SystemId;
        debug!(
            "registered system `{name}` as id {id} with {} initial subscribers",
            registered.subscriber_count()
        );
        self.system_ids.insert(TypeId::of::<S>(), id);
        self.systems.push(registered);
        Ok(id)
    }

    /// Looks up the registered entry for system type `S`.
    ///
    /// Exposes the frozen signature and the membership probes.
    pub fn system<S: System + 'static>(&self) -> Option<&RegisteredSystem> {
        let id = *self.system_ids.get(&TypeId::of::<S>())?;
        self.systems.get(id as usize)
    }

    // ── Component mutation ──────────────────────────────────────────────

    /// Attaches `value` to the entity and notifies every system of the new
    /// signature, then returns a reference to the stored component.
    ///
    /// ## Errors
    /// Dead entity, unregistered `T`, already-attached component, or pool
    /// capacity exhaustion.
    pub fn add_component<T: 'static>(&mut self, entity: EntityId, value: T) -> ECSResult<&mut T> {
        self.check_alive(entity)?;
        let component_id = self.components.component_id::<T>()?;

        self.components.add(entity, value)?;
        self.signatures[entity as usize].set(component_id);
        let signature = self.signatures[entity as usize];
        self.notify_signature_changed(entity, &signature);

        self.components.get_mut::<T>(entity)
    }

    /// Returns the entity's `T` component.
    pub fn get_component<T: 'static>(&self, entity: EntityId) -> ECSResult<&T> {
        self.check_alive(entity)?;
        self.components.get::<T>(entity)
    }

    /// Returns the entity's `T` component mutably.
    pub fn get_component_mut<T: 'static>(&mut self, entity: EntityId) -> ECSResult<&mut T> {
        self.check_alive(entity)?;
        self.components.get_mut::<T>(entity)
    }

    /// Non-failing lookup; `None` for a dead entity or absent component.
    pub fn try_get_component<T: 'static>(&self, entity: EntityId) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.components.try_get::<T>(entity)
    }

    /// Non-failing mutable lookup; `None` for a dead entity or absent
    /// component.
    pub fn try_get_component_mut<T: 'static>(&mut self, entity: EntityId) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.components.try_get_mut::<T>(entity)
    }

    /// Detaches the entity's `T` component, notifying systems before the
    /// store removal.
    ///
    /// ## Errors
    /// Dead entity, unregistered `T`, or absent component. Fails before
    /// mutating anything.
    pub fn delete_component<T: 'static>(&mut self, entity: EntityId) -> ECSResult<()> {
        self.check_alive(entity)?;
        let component_id = self.components.component_id::<T>()?;
        if !self.components.contains::<T>(entity) {
            return Err(PoolError::Missing { entity }.into());
        }

        self.signatures[entity as usize].clear(component_id);
        let signature = self.signatures[entity as usize];
        self.notify_signature_changed(entity, &signature);

        self.components.delete::<T>(entity)
    }

    /// Detaches the entity's `T` component if present.
    ///
    /// Returns `Ok(false)` — with no notification — when the component is
    /// absent.
    pub fn try_delete_component<T: 'static>(&mut self, entity: EntityId) -> ECSResult<bool> {
        self.check_alive(entity)?;
        let component_id = self.components.component_id::<T>()?;
        if !self.components.contains::<T>(entity) {
            return Ok(false);
        }

        self.signatures[entity as usize].clear(component_id);
        let signature = self.signatures[entity as usize];
        self.notify_signature_changed(entity, &signature);

        self.components.delete::<T>(entity)?;
        Ok(true)
    }

    /// Attaches a clone of `value` to each entity, in order.
    ///
    /// Applies the single-entity operation per entity; not atomic across
    /// the batch.
    pub fn add_components<T: 'static + Clone>(
        &mut self,
        entities: &[EntityId],
        value: T,
    ) -> ECSResult<()> {
        for &entity in entities {
            self.add_component(entity, value.clone())?;
        }
        Ok(())
    }

    /// Detaches the `T` component from each entity, in order.
    ///
    /// Same non-atomic semantics as [`add_components`](Self::add_components).
    pub fn delete_components<T: 'static>(&mut self, entities: &[EntityId]) -> ECSResult<()> {
        for &entity in entities {
            self.delete_component::<T>(entity)?;
        }
        Ok(())
    }

    fn notify_signature_changed(&mut self, entity: EntityId, signature: &Signature) {
        for system in &mut self.systems {
            system.entity_signature_changed(entity, signature);
        }
    }

    // ── Frame dispatch ──────────────────────────────────────────────────

    /// Runs every system's update hook once, in registration order.
    ///
    /// A hook error aborts the pass and propagates; systems later in the
    /// order do not run that frame.
    pub fn update_systems(&mut self, delta_time: f32) -> ECSResult<()> {
        // The system list is parked outside `self` for the duration of the
        // pass so hooks can borrow the component manager mutably.
        let mut systems = mem::take(&mut self.systems);
        let mut result = Ok(());
        for system in &mut systems {
            if let Err(error) = system.run_update(&mut self.components, delta_time) {
                result = Err(error);
                break;
            }
        }
        self.systems = systems;
        result
    }

    /// Runs every system's render hook once, in registration order.
    ///
    /// Independent of [`update_systems`](Self::update_systems); a frame may
    /// call one, both, or neither.
    pub fn render_systems(&mut self) -> ECSResult<()> {
        let mut systems = mem::take(&mut self.systems);
        let mut result = Ok(());
        for system in &mut systems {
            if let Err(error) = system.run_render(&mut self.components) {
                result = Err(error);
                break;
            }
        }
        self.systems = systems;
        result
    }

    // ── Introspection ───────────────────────────────────────────────────

    /// Shared access to the component manager (e.g. for id lookups during
    /// setup).
    pub fn components(&self) -> &ComponentManager {
        &self.components
    }
}
