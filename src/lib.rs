//! # Scene ECS
//!
//! Archetype-based entity/component storage core for a scene runtime.
//!
//! ## Design Goals
//! - Archetype-based storage: entities grouped by exact component set,
//!   contiguous per-type columns
//! - O(1) removal by swap-with-last compaction, with explicit relocation
//!   reporting
//! - Generational entity handles: stale handles fail loudly instead of
//!   addressing relocated data
//! - Atomic migration: a rejected add/remove leaves the entity untouched
//! - Safe, explicit data access; single-threaded by contract

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

pub mod engine;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

// Core storage types

pub use engine::world::{
    Entity,
    World,
};

pub use engine::component::{
    Aabb,
    Collidable,
    Component,
    ComponentKind,
    ModelHandle,
    Physics,
    PointLight,
    Renderable,
    ShaderHandle,
    TextureHandle,
    Transform,
    signature_of,
};

pub use engine::storage::SwitchArray;
pub use engine::archetype::{Column, ComponentSetStorage};
pub use engine::query::Query;

pub use engine::error::{
    StorageError,
    WorldError,
};

pub use engine::types::{
    ArchetypeId,
    Generation,
    RowIndex,
    Signature,
};

// ─────────────────────────────────────────────────────────────────────────────
// Prelude (Optional but recommended)
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used storage types.
///
/// Import with:
/// ```rust
/// use scene_ecs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Aabb,
        Collidable,
        Component,
        ComponentKind,
        Entity,
        ModelHandle,
        Physics,
        PointLight,
        Query,
        Renderable,
        ShaderHandle,
        TextureHandle,
        Signature,
        StorageError,
        Transform,
        World,
        WorldError,
    };
}
