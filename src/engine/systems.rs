//! System abstraction and interest-set maintenance.
//!
//! A **system** is a unit of per-frame logic plus the up-to-date set of
//! entities it applies to. Systems:
//! - declare a required [`Signature`] by looking up the component types
//!   they depend on,
//! - receive an incrementally maintained *interest set* of matching
//!   entities,
//! - expose `update` and `render` hooks dispatched once per frame in
//!   registration order.
//!
//! ## Membership rule
//!
//! An entity belongs to a system's interest set exactly when its signature
//! is a superset of the system's required signature. The facade re-derives
//! membership after every component mutation; a transition between two
//! non-matching signatures causes no change.
//!
//! ## Re-entrancy
//!
//! Hooks receive the component manager and the interest set, but not the
//! facade: entity creation and destruction, and the signature bookkeeping
//! behind component add/delete, are unreachable from inside a hook. The
//! manager's own mutators are still in reach; changing component
//! membership through them is unsupported, as the signature table and
//! interest sets are not maintained for changes made behind the facade.

use std::collections::HashSet;

use log::trace;

use crate::engine::component::ComponentManager;
use crate::engine::error::{ECSResult, SystemError};
use crate::engine::types::{EntityId, Signature};

/// Per-frame view handed to [`System::update`].
pub struct UpdateContext<'a> {
    /// Typed access to every component pool.
    pub components: &'a mut ComponentManager,
    /// The system's current interest set. Iteration order is
    /// implementation-defined but stable within one call.
    pub entities: &'a HashSet<EntityId>,
    /// Seconds elapsed since the previous update pass, supplied by the
    /// frame-timing collaborator.
    pub delta_time: f32,
}

/// Per-frame view handed to [`System::render`].
///
/// Identical to [`UpdateContext`] minus the frame time; any rendering
/// surface the hook draws to is state the system carries itself.
pub struct RenderContext<'a> {
    /// Typed access to every component pool.
    pub components: &'a mut ComponentManager,
    /// The system's current interest set.
    pub entities: &'a HashSet<EntityId>,
}

/// A unit of per-frame logic over entities matching a component signature.
///
/// A system implements `signature` and whichever of the two frame hooks it
/// needs; the unused hook defaults to a no-op. Interest-set bookkeeping is
/// owned by the engine, not the implementor.
pub trait System {
    /// Declares the required signature by resolving component type ids.
    ///
    /// Invoked once at registration; the result is frozen for the lifetime
    /// of the system. Declaring an empty signature is a configuration
    /// error rejected by registration.
    fn signature(&self, components: &ComponentManager) -> ECSResult<Signature>;

    /// Per-frame simulation hook. Default no-op.
    fn update(&mut self, ctx: UpdateContext<'_>) -> ECSResult<()> {
        let _ = ctx;
        Ok(())
    }

    /// Per-frame presentation hook. Default no-op.
    fn render(&mut self, ctx: RenderContext<'_>) -> ECSResult<()> {
        let _ = ctx;
        Ok(())
    }
}

/// A [`System`] backed by a function or closure.
///
/// Avoids a named type for small one-off systems; the signature is
/// declared through a plain function resolving component ids.
pub struct FnSystem<F>
where
    F: FnMut(UpdateContext<'_>) -> ECSResult<()>,
{
    name: &'static str,
    signature: fn(&ComponentManager) -> ECSResult<Signature>,
    update: F,
}

impl<F> FnSystem<F>
where
    F: FnMut(UpdateContext<'_>) -> ECSResult<()>,
{
    /// Creates a function-backed system.
    ///
    /// ## Parameters
    /// * `name` — human-readable name for logs and errors.
    /// * `signature` — resolves the required component type ids.
    /// * `update` — the per-frame logic.
    pub fn new(
        name: &'static str,
        signature: fn(&ComponentManager) -> ECSResult<Signature>,
        update: F,
    ) -> Self {
        Self {
            name,
            signature,
            update,
        }
    }

    /// Human-readable name of this system.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<F> System for FnSystem<F>
where
    F: FnMut(UpdateContext<'_>) -> ECSResult<()>,
{
    fn signature(&self, components: &ComponentManager) -> ECSResult<Signature> {
        (self.signature)(components)
    }

    fn update(&mut self, ctx: UpdateContext<'_>) -> ECSResult<()> {
        (self.update)(ctx)
    }
}

/// A registered system: the boxed implementation plus its frozen required
/// signature and incrementally maintained interest set.
pub struct RegisteredSystem {
    name: &'static str,
    signature: Signature,
    entities: HashSet<EntityId>,
    system: Box<dyn System>,
}

impl RegisteredSystem {
    pub(crate) fn new(name: &'static str, signature: Signature, system: Box<dyn System>) -> Self {
        Self {
            name,
            signature,
            entities: HashSet::new(),
            system,
        }
    }

    /// Rust type name of the registered system.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The frozen required signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Returns `true` if the entity is currently in the interest set.
    pub fn is_subscribed(&self, entity: EntityId) -> bool {
        self.entities.contains(&entity)
    }

    /// Number of entities currently subscribed.
    pub fn subscriber_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if `signature` satisfies this system's requirement.
    pub(crate) fn matches(&self, signature: &Signature) -> bool {
        signature.contains_all(&self.signature)
    }

    /// Re-derives the entity's membership after a signature change.
    ///
    /// Pure set-membership recompute: the entity enters when its new
    /// signature becomes a superset of the requirement, leaves when it no
    /// longer is one, and is untouched otherwise.
    pub(crate) fn entity_signature_changed(&mut self, entity: EntityId, new_signature: &Signature) {
        if self.matches(new_signature) {
            if self.entities.insert(entity) {
                trace!("system `{}` subscribed entity {entity}", self.name);
            }
        } else if self.entities.remove(&entity) {
            trace!("system `{}` dropped entity {entity}", self.name);
        }
    }

    /// Drops a destroyed entity from the interest set.
    ///
    /// ## Errors
    /// [`SystemError::MissingSubscriber`] if the entity was not a member.
    /// The facade only routes destruction notices to systems the entity
    /// matched, so this error signals an interest-set desync rather than a
    /// recoverable condition.
    pub(crate) fn entity_destroyed(&mut self, entity: EntityId) -> Result<(), SystemError> {
        if self.entities.remove(&entity) {
            Ok(())
        } else {
            Err(SystemError::MissingSubscriber {
                name: self.name,
                entity,
            })
        }
    }

    /// Runs the system's update hook against its interest set.
    pub(crate) fn run_update(
        &mut self,
        components: &mut ComponentManager,
        delta_time: f32,
    ) -> ECSResult<()> {
        self.system.update(UpdateContext {
            components,
            entities: &self.entities,
            delta_time,
        })
    }

    /// Runs the system's render hook against its interest set.
    pub(crate) fn run_render(&mut self, components: &mut ComponentManager) -> ECSResult<()> {
        self.system.render(RenderContext {
            components,
            entities: &self.entities,
        })
    }
}
