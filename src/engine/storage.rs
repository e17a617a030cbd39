//! Dense single-type storage with switch-with-last removal.
//!
//! ## Purpose
//! [`SwitchArray`] is the leaf container of the engine: one contiguous run of
//! values of a single type, indexed by [`RowIndex`]. Archetypes stack one
//! `SwitchArray` per component kind and keep them row-aligned.
//!
//! ## Behavior
//! Values occupy a dense prefix of the slot vector. Removal never leaves a
//! hole: the destroyed slot is overwritten by swapping in the last occupied
//! slot, and the index that slot vacated is returned so callers can update
//! whatever addressed it. The vector always keeps at least one vacant slot
//! past the occupied prefix, so a subsequent insert reuses the vacancy before
//! the vector grows.
//!
//! ## Invariants
//! - `slots[0..len]` are occupied, `slots[len..]` are vacant.
//! - `slots.len() >= len + 1` at all times.
//! - Indices in `[0, len)` are valid; everything else is rejected with
//!   [`StorageError::IndexOutOfRange`].

use crate::engine::error::StorageError;
use crate::engine::types::RowIndex;

/// Dense store for values of one type, with O(1) swap-with-last removal.
#[derive(Debug, Clone)]
pub struct SwitchArray<T> {
    slots: Vec<Option<T>>,
    len: usize,
}

impl<T> Default for SwitchArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SwitchArray<T> {
    /// Creates an empty array holding only the spare slot.
    pub fn new() -> Self {
        SwitchArray { slots: vec![None], len: 0 }
    }

    /// Creates an array pre-filled from `items`, returning the array and the
    /// index of the last inserted value, or `None` if `items` was empty.
    pub fn create<I>(items: I) -> (Self, Option<RowIndex>)
    where
        I: IntoIterator<Item = T>,
    {
        let mut array = Self::new();
        let mut last = None;
        for item in items {
            last = Some(array.push(item));
        }
        (array, last)
    }

    /// Inserts `value` into the first vacant slot and returns its index.
    ///
    /// The first vacant slot is always `slots[len]`; a fresh spare is
    /// appended when the inserted value consumed the only one.
    pub fn push(&mut self, value: T) -> RowIndex {
        let index = self.len;
        self.slots[index] = Some(value);
        self.len += 1;
        if self.len == self.slots.len() {
            self.slots.push(None);
        }
        index as RowIndex
    }

    /// Borrows the value at `index`.
    pub fn get(&self, index: RowIndex) -> Result<&T, StorageError> {
        self.occupied(index)?;
        match &self.slots[index as usize] {
            Some(value) => Ok(value),
            None => unreachable!("occupied prefix holds no vacant slot"),
        }
    }

    /// Mutably borrows the value at `index`.
    pub fn get_mut(&mut self, index: RowIndex) -> Result<&mut T, StorageError> {
        self.occupied(index)?;
        match &mut self.slots[index as usize] {
            Some(value) => Ok(value),
            None => unreachable!("occupied prefix holds no vacant slot"),
        }
    }

    /// Overwrites the value at `index`.
    pub fn set(&mut self, index: RowIndex, value: T) -> Result<(), StorageError> {
        self.occupied(index)?;
        self.slots[index as usize] = Some(value);
        Ok(())
    }

    /// Removes the value at `index` by swapping in the last occupied slot.
    ///
    /// Returns the index the relocated value vacated, i.e. the former last
    /// occupied index. Destroying the last occupied slot is the degenerate
    /// case: nothing relocates and the returned index equals `index`.
    pub fn destroy(&mut self, index: RowIndex) -> Result<RowIndex, StorageError> {
        self.occupied(index)?;
        let last = self.len - 1;
        self.slots.swap(index as usize, last);
        self.slots[last] = None;
        self.len = last;
        Ok(last as RowIndex)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the last occupied slot, if any.
    pub fn last_occupied(&self) -> Option<RowIndex> {
        if self.len == 0 {
            None
        } else {
            Some((self.len - 1) as RowIndex)
        }
    }

    /// Total slot count, occupied plus vacant.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over the occupied prefix in index order.
    ///
    /// The iterator is lazy and finite; calling `iter` again restarts from
    /// the first slot.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    fn occupied(&self, index: RowIndex) -> Result<(), StorageError> {
        if (index as usize) < self.len {
            Ok(())
        } else {
            Err(StorageError::IndexOutOfRange { index, len: self.len })
        }
    }
}
