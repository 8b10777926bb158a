//! Core ECS identifiers, capacity configuration, and component signatures.
//!
//! This module defines the fundamental types shared across all subsystems:
//! entity management, component storage, and system dispatch.
//!
//! ## Design
//!
//! The ECS is designed around:
//!
//! - **Dense storage** with stable slot indices,
//! - **Bitset-based signatures** for system matching,
//! - **Stable numeric identifiers** for every ECS concept,
//! - **Fixed capacities with no silent growth**.
//!
//! ## Capacities
//!
//! Entity and system ceilings are runtime configuration, supplied at world
//! construction through [`WorldLimits`]. The component-type ceiling
//! ([`COMPONENT_CAP`]) is a compile-time constant because it fixes the bit
//! width of [`Signature`]. Exceeding any ceiling is a hard error; nothing in
//! the engine reallocates past its configured bound.

/// Opaque handle correlating a row across component pools.
///
/// Ids are unique among currently-live entities and are recycled
/// most-recently-freed first after destruction.
pub type EntityId = u32;

/// Compact identifier assigned to a component type at registration.
///
/// Ids are sequential in registration order and never reused for the
/// lifetime of the process.
pub type ComponentTypeId = u16;

/// Registration index of a system; also its dispatch order.
pub type SystemId = u16;

/// Index of a slot inside a component pool's dense array.
pub type SlotId = u32;

/// Maximum number of distinct registered component types.
///
/// Bounds the bit width of [`Signature`].
pub const COMPONENT_CAP: usize = 128;

/// Number of `u64` words required to represent a full component signature.
pub const SIGNATURE_WORDS: usize = (COMPONENT_CAP + 63) / 64;

/// Default ceiling on live + free entity ids.
pub const DEFAULT_ENTITY_CAP: u32 = 100_000;

/// Default ceiling on registered systems.
pub const DEFAULT_SYSTEM_CAP: u16 = 64;

/// Construction-time capacity configuration for an ECS world.
///
/// ## Fields
/// * `max_entities` — ceiling on live + free entity ids; also sizes the
///   signature table.
/// * `max_systems` — ceiling on registered systems.
/// * `pool_capacity` — slot count for pools registered without an explicit
///   capacity.
///
/// All bounds are fixed once the world is constructed; exceeding one is an
/// error, never a resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldLimits {
    /// Ceiling on live + free entity ids.
    pub max_entities: u32,
    /// Ceiling on registered systems.
    pub max_systems: u16,
    /// Default capacity for component pools registered without one.
    pub pool_capacity: u32,
}

impl Default for WorldLimits {
    fn default() -> Self {
        Self {
            max_entities: DEFAULT_ENTITY_CAP,
            max_systems: DEFAULT_SYSTEM_CAP,
            pool_capacity: DEFAULT_ENTITY_CAP,
        }
    }
}

impl WorldLimits {
    /// Creates limits with the given entity and system ceilings.
    ///
    /// The default pool capacity tracks `max_entities` so that every pool
    /// can hold one component per addressable entity.
    pub fn new(max_entities: u32, max_systems: u16) -> Self {
        Self {
            max_entities,
            max_systems,
            pool_capacity: max_entities,
        }
    }
}

/// Bitset over component type ids, one bit per registered type.
///
/// One signature is kept per entity as the single source of truth for
/// "which components does this entity have"; systems match entities by
/// testing their own required signature against it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    words: [u64; SIGNATURE_WORDS],
}

impl Signature {
    /// Sets the bit corresponding to `component_id`.
    #[inline]
    pub fn set(&mut self, component_id: ComponentTypeId) {
        let index = (component_id as usize) / 64;
        let bit = (component_id as usize) % 64;
        self.words[index] |= 1u64 << bit;
    }

    /// Clears the bit corresponding to `component_id`.
    #[inline]
    pub fn clear(&mut self, component_id: ComponentTypeId) {
        let index = (component_id as usize) / 64;
        let bit = (component_id as usize) % 64;
        self.words[index] &= !(1u64 << bit);
    }

    /// Returns `true` if `component_id` is present in this signature.
    #[inline]
    pub fn has(&self, component_id: ComponentTypeId) -> bool {
        let index = (component_id as usize) / 64;
        let bit = (component_id as usize) % 64;
        (self.words[index] >> bit) & 1 == 1
    }

    /// Returns `true` if every component in `required` is present.
    #[inline]
    pub fn contains_all(&self, required: &Signature) -> bool {
        self.words
            .iter()
            .zip(required.words.iter())
            .all(|(have, need)| (have & need) == *need)
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Iterates over all component type ids set in this signature.
    pub fn iter(&self) -> impl Iterator<Item = ComponentTypeId> + '_ {
        self.words.iter().enumerate().flat_map(|(word_index, &word)| {
            let base = word_index * 64;
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let tz = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some((base + tz) as ComponentTypeId)
            })
        })
    }

    /// Builds a signature from a list of component type ids.
    pub fn from_ids(component_ids: &[ComponentTypeId]) -> Self {
        let mut signature = Signature::default();
        for &component_id in component_ids {
            signature.set(component_id);
        }
        signature
    }
}
