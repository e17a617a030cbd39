//! Row-aligned multi-column storage for one component set.
//!
//! ## Purpose
//! A [`ComponentSetStorage`] holds every entity whose component set equals its
//! [`Signature`]. It stacks one [`Column`] per registered kind, in
//! registration order, and keeps them row-aligned: row `r` of every column
//! belongs to the same entity.
//!
//! ## Behavior
//! `create` pushes one value into every column and checks that all columns
//! hand back the same row; `destroy` removes the row from every column and
//! checks that all columns relocate the same former-last row. A disagreement
//! in either direction is a [`StorageError::SynchronizationViolation`], after
//! which the storage can no longer correlate rows across columns. That error
//! must propagate to the caller.
//!
//! ## Errors
//! All operations validate before mutating where possible: arity and kind
//! checks happen up front, so a rejected `create` or `set` leaves the storage
//! untouched.

use crate::engine::component::{
    signature_of, Collidable, Component, ComponentKind, Physics, PointLight, Renderable,
    Transform,
};
use crate::engine::error::StorageError;
use crate::engine::storage::SwitchArray;
use crate::engine::types::{RowIndex, Signature};

/// One typed column of an archetype.
///
/// Static-dispatch wrapper over the per-kind [`SwitchArray`]s; each operation
/// is a `match` on the kind tag.
#[derive(Debug, Clone)]
pub enum Column {
    /// Column of [`Transform`] values.
    Transform(SwitchArray<Transform>),
    /// Column of [`Renderable`] values.
    Renderable(SwitchArray<Renderable>),
    /// Column of [`PointLight`] values.
    PointLight(SwitchArray<PointLight>),
    /// Column of [`Physics`] values.
    Physics(SwitchArray<Physics>),
    /// Column of [`Collidable`] values.
    Collidable(SwitchArray<Collidable>),
}

impl Column {
    /// Creates an empty column for `kind`.
    pub fn empty(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Transform => Column::Transform(SwitchArray::new()),
            ComponentKind::Renderable => Column::Renderable(SwitchArray::new()),
            ComponentKind::PointLight => Column::PointLight(SwitchArray::new()),
            ComponentKind::Physics => Column::Physics(SwitchArray::new()),
            ComponentKind::Collidable => Column::Collidable(SwitchArray::new()),
        }
    }

    /// The component kind this column stores.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Column::Transform(_) => ComponentKind::Transform,
            Column::Renderable(_) => ComponentKind::Renderable,
            Column::PointLight(_) => ComponentKind::PointLight,
            Column::Physics(_) => ComponentKind::Physics,
            Column::Collidable(_) => ComponentKind::Collidable,
        }
    }

    /// Number of occupied rows.
    pub fn len(&self) -> usize {
        match self {
            Column::Transform(array) => array.len(),
            Column::Renderable(array) => array.len(),
            Column::PointLight(array) => array.len(),
            Column::Physics(array) => array.len(),
            Column::Collidable(array) => array.len(),
        }
    }

    /// Returns `true` when the column holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the last occupied row, if any.
    pub fn last_occupied(&self) -> Option<RowIndex> {
        match self {
            Column::Transform(array) => array.last_occupied(),
            Column::Renderable(array) => array.last_occupied(),
            Column::PointLight(array) => array.last_occupied(),
            Column::Physics(array) => array.last_occupied(),
            Column::Collidable(array) => array.last_occupied(),
        }
    }

    /// Appends `component`, which must match the column's kind.
    pub fn push(&mut self, component: Component) -> Result<RowIndex, StorageError> {
        match (self, component) {
            (Column::Transform(array), Component::Transform(value)) => Ok(array.push(value)),
            (Column::Renderable(array), Component::Renderable(value)) => Ok(array.push(value)),
            (Column::PointLight(array), Component::PointLight(value)) => Ok(array.push(value)),
            (Column::Physics(array), Component::Physics(value)) => Ok(array.push(value)),
            (Column::Collidable(array), Component::Collidable(value)) => Ok(array.push(value)),
            (_, component) => {
                Err(StorageError::UnknownComponentType { kind: component.kind() })
            }
        }
    }

    /// Clones the value at `row` out of the column.
    pub fn get(&self, row: RowIndex) -> Result<Component, StorageError> {
        match self {
            Column::Transform(array) => array.get(row).map(|v| Component::Transform(*v)),
            Column::Renderable(array) => {
                array.get(row).map(|v| Component::Renderable(v.clone()))
            }
            Column::PointLight(array) => array.get(row).map(|v| Component::PointLight(*v)),
            Column::Physics(array) => array.get(row).map(|v| Component::Physics(*v)),
            Column::Collidable(array) => array.get(row).map(|v| Component::Collidable(*v)),
        }
    }

    /// Overwrites the value at `row`; `component` must match the column kind.
    pub fn set(&mut self, row: RowIndex, component: Component) -> Result<(), StorageError> {
        match (self, component) {
            (Column::Transform(array), Component::Transform(value)) => array.set(row, value),
            (Column::Renderable(array), Component::Renderable(value)) => array.set(row, value),
            (Column::PointLight(array), Component::PointLight(value)) => array.set(row, value),
            (Column::Physics(array), Component::Physics(value)) => array.set(row, value),
            (Column::Collidable(array), Component::Collidable(value)) => array.set(row, value),
            (_, component) => {
                Err(StorageError::UnknownComponentType { kind: component.kind() })
            }
        }
    }

    /// Removes `row`, returning the index the relocated last row vacated.
    pub fn destroy(&mut self, row: RowIndex) -> Result<RowIndex, StorageError> {
        match self {
            Column::Transform(array) => array.destroy(row),
            Column::Renderable(array) => array.destroy(row),
            Column::PointLight(array) => array.destroy(row),
            Column::Physics(array) => array.destroy(row),
            Column::Collidable(array) => array.destroy(row),
        }
    }
}

/// Storage for every entity sharing one exact component set.
#[derive(Debug)]
pub struct ComponentSetStorage {
    signature: Signature,
    columns: Vec<Column>,
}

impl ComponentSetStorage {
    /// Creates empty storage for `signature`, one column per kind in
    /// registration order.
    pub fn new(signature: Signature) -> Self {
        let columns = signature.kinds().map(Column::empty).collect();
        ComponentSetStorage { signature, columns }
    }

    /// The component set this storage holds.
    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Number of occupied rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Returns `true` when the storage holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the column for `kind`.
    pub fn column(&self, kind: ComponentKind) -> Result<&Column, StorageError> {
        self.column_index(kind).map(|i| &self.columns[i])
    }

    /// Inserts one row built from `components`.
    ///
    /// The tuple must contain exactly one instance per registered kind, in
    /// any order. Each column reports the row it placed the value at; all
    /// reports must agree, and the shared row is returned.
    pub fn create(&mut self, components: Vec<Component>) -> Result<RowIndex, StorageError> {
        let got = signature_of(&components);
        if got != self.signature || components.len() != self.signature.len() {
            return Err(StorageError::ArityMismatch { expected: self.signature, got });
        }

        // Reorder the tuple into registration order before touching columns.
        let mut ordered = components;
        ordered.sort_by_key(Component::kind);

        let mut shared: Option<RowIndex> = None;
        for (column, component) in self.columns.iter_mut().zip(ordered) {
            let row = column.push(component)?;
            match shared {
                None => shared = Some(row),
                Some(expected) if expected != row => {
                    return Err(StorageError::SynchronizationViolation {
                        kind: column.kind(),
                        expected,
                        got: row,
                    });
                }
                Some(_) => {}
            }
        }
        match shared {
            Some(row) => Ok(row),
            None => unreachable!("signatures are non-empty by construction"),
        }
    }

    /// Clones out the full row at `row`, one value per registered kind in
    /// registration order.
    pub fn get_row(&self, row: RowIndex) -> Result<Vec<Component>, StorageError> {
        self.columns.iter().map(|column| column.get(row)).collect()
    }

    /// Clones out the requested kinds at `row`, in the requested order.
    pub fn get(
        &self,
        row: RowIndex,
        kinds: &[ComponentKind],
    ) -> Result<Vec<Component>, StorageError> {
        kinds
            .iter()
            .map(|kind| self.column(*kind).and_then(|column| column.get(row)))
            .collect()
    }

    /// Overwrites components at `row` in place, dispatched by each value's
    /// kind. Kinds are validated before any write.
    pub fn set(&mut self, row: RowIndex, components: Vec<Component>) -> Result<(), StorageError> {
        let targets: Vec<usize> = components
            .iter()
            .map(|component| self.column_index(component.kind()))
            .collect::<Result<_, _>>()?;
        for (index, component) in targets.into_iter().zip(components) {
            self.columns[index].set(row, component)?;
        }
        Ok(())
    }

    /// Removes `row` from every column.
    ///
    /// All columns must relocate the same former-last row; the shared
    /// relocated index is returned so the caller can repair whatever
    /// addressed it. A disagreement means the columns have drifted apart and
    /// is reported as fatal.
    pub fn destroy(&mut self, row: RowIndex) -> Result<RowIndex, StorageError> {
        let mut shared: Option<RowIndex> = None;
        for column in &mut self.columns {
            let relocated = column.destroy(row)?;
            match shared {
                None => shared = Some(relocated),
                Some(expected) if expected != relocated => {
                    return Err(StorageError::SynchronizationViolation {
                        kind: column.kind(),
                        expected,
                        got: relocated,
                    });
                }
                Some(_) => {}
            }
        }
        match shared {
            Some(relocated) => Ok(relocated),
            None => unreachable!("signatures are non-empty by construction"),
        }
    }

    fn column_index(&self, kind: ComponentKind) -> Result<usize, StorageError> {
        self.columns
            .iter()
            .position(|column| column.kind() == kind)
            .ok_or(StorageError::UnknownComponentType { kind })
    }
}
