//! Error types for the storage engine.
//!
//! ## Purpose
//! Every failure in this crate is a synchronous contract violation reported
//! through these enums; there are no retry semantics. [`StorageError`] covers
//! the column and archetype layers, [`WorldError`] wraps it and adds the
//! handle-level failures only the world can detect.
//!
//! Most variants are local rejections: the operation did nothing and the
//! caller can correct the request. [`StorageError::SynchronizationViolation`]
//! is the exception. It means the columns of one archetype have drifted out
//! of alignment, which storage cannot repair, so callers must propagate it
//! rather than swallow it.

use crate::engine::component::ComponentKind;
use crate::engine::types::{RowIndex, Signature};
use crate::engine::world::Entity;

/// Failures raised by [`SwitchArray`](crate::engine::storage::SwitchArray)
/// and [`ComponentSetStorage`](crate::engine::archetype::ComponentSetStorage).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// An index was outside the occupied range of a column.
    #[error("index {index} out of range for storage of length {len}")]
    IndexOutOfRange {
        /// The rejected index.
        index: RowIndex,
        /// Occupied length at the time of the access.
        len: usize,
    },

    /// A component tuple did not match the archetype's registered set.
    ///
    /// Raised when a kind is missing, duplicated, or extraneous; the storage
    /// requires exactly one instance per registered kind.
    #[error("component tuple {got:?} does not match registered set {expected:?}")]
    ArityMismatch {
        /// The archetype's registered component set.
        expected: Signature,
        /// The kinds present in the offered tuple.
        got: Signature,
    },

    /// A component kind is not registered in the addressed archetype.
    #[error("component kind {} is not registered in this archetype", .kind.name())]
    UnknownComponentType {
        /// The unregistered kind.
        kind: ComponentKind,
    },

    /// Constituent columns disagreed on a row index.
    ///
    /// This is fatal: the archetype's columns are no longer row-aligned and
    /// entity data can no longer be correlated across them.
    #[error(
        "column {} reported row {got}, other columns reported {expected}",
        .kind.name()
    )]
    SynchronizationViolation {
        /// The column that disagreed.
        kind: ComponentKind,
        /// The index reported by the preceding columns.
        expected: RowIndex,
        /// The index this column reported.
        got: RowIndex,
    },
}

/// Failures raised by [`World`](crate::engine::world::World) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// An operation went through a destroyed or superseded entity handle.
    ///
    /// Structural operations consume the handle they are given and return a
    /// fresh one; any retained copy, and any handle to a destroyed entity,
    /// fails with this.
    #[error("entity {entity:?} is destroyed or the handle is stale")]
    UseAfterDestroy {
        /// The rejected handle.
        entity: Entity,
    },

    /// An add request named a component kind the entity already has.
    ///
    /// Overwriting an existing component goes through
    /// [`set_components`](crate::engine::world::World::set_components).
    #[error("entity already has a {} component", .kind.name())]
    DuplicateComponent {
        /// The kind that was already present.
        kind: ComponentKind,
    },

    /// A storage-layer failure, propagated unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
