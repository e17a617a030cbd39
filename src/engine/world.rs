//! Entity handles and the world that owns all storage.
//!
//! ## Purpose
//! [`World`] is the single owner of every archetype and of the entity slot
//! table. Entities themselves own nothing: an [`Entity`] is an index into the
//! slot table plus a generation counter, and all component data lives in the
//! world's [`ComponentSetStorage`]s.
//!
//! ## Behavior
//! Entities are grouped by their exact component set. Adding or removing
//! components migrates the entity between archetypes: the merged row is
//! created in the destination first, and only then is the old row destroyed,
//! so a rejected operation leaves the entity untouched. Structural operations
//! consume the handle and return a fresh one; the slot generation is bumped
//! on every structural change, so any retained copy of the old handle fails
//! with [`WorldError::UseAfterDestroy`].
//!
//! Archetypes are created lazily on first use, keyed by signature, and never
//! evicted. An emptied archetype keeps its arena slot and its storage.
//!
//! ## Invariants
//! - Row `r` of archetype `a` and `entries[a].entities[r]` describe the same
//!   entity, in both directions.
//! - A slot in state `Stored` always points at a live row.
//! - Generations only increase; a `Dead` slot's generation has already been
//!   bumped past every handle ever issued for it.

use std::collections::HashMap;

use crate::engine::archetype::ComponentSetStorage;
use crate::engine::component::{signature_of, Component, ComponentKind};
use crate::engine::error::{StorageError, WorldError};
use crate::engine::query::Query;
use crate::engine::types::{ArchetypeId, Generation, RowIndex, Signature};

/// Handle to an entity.
///
/// Opaque and `Copy`; owns no data. Structural world operations consume the
/// handle and return a fresh one, and only the most recently returned handle
/// for an entity is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    generation: Generation,
}

impl Entity {
    /// Slot index of this handle.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation this handle was issued at.
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

/// Where an entity's data lives, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    /// Destroyed; terminal. The slot index is free for reuse.
    Dead,
    /// Alive with an empty component set; no storage anywhere.
    Empty,
    /// Alive with data at one row of one archetype.
    Stored { archetype: ArchetypeId, row: RowIndex },
}

#[derive(Debug)]
struct EntitySlot {
    generation: Generation,
    state: SlotState,
}

/// One archetype plus its row-to-entity map.
///
/// `entities[r]` is the slot index of the entity stored at row `r`; it is
/// what makes swap-repair possible after a row is destroyed.
#[derive(Debug)]
pub(crate) struct ArchetypeEntry {
    pub(crate) storage: ComponentSetStorage,
    pub(crate) entities: Vec<u32>,
}

/// Owner of all entities and archetypes.
#[derive(Debug, Default)]
pub struct World {
    archetypes: Vec<ArchetypeEntry>,
    archetype_ids: HashMap<Signature, ArchetypeId>,
    slots: Vec<EntitySlot>,
    free: Vec<u32>,
    live: usize,
}

impl World {
    /// Creates an empty world with no archetypes.
    pub fn new() -> Self {
        World::default()
    }

    /// Creates a live entity with an empty component set.
    pub fn create_entity(&mut self) -> Entity {
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].state = SlotState::Empty;
                index
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(EntitySlot { generation: 0, state: SlotState::Empty });
                index
            }
        };
        self.live += 1;
        Entity { index, generation: self.slots[index as usize].generation }
    }

    /// Creates an entity carrying `components`.
    ///
    /// Equivalent to [`create_entity`](World::create_entity) followed by
    /// [`add_components`](World::add_components); if the add is rejected, no
    /// entity is created.
    pub fn create_entity_with(&mut self, components: Vec<Component>) -> Result<Entity, WorldError> {
        let entity = self.create_entity();
        match self.add_components(entity, components) {
            Ok(entity) => Ok(entity),
            Err(err) => {
                // The fresh entity never reached storage; retire its slot.
                let slot = &mut self.slots[entity.index as usize];
                slot.state = SlotState::Dead;
                slot.generation += 1;
                self.free.push(entity.index);
                self.live -= 1;
                Err(err)
            }
        }
    }

    /// Destroys an entity, releasing its row and tombstoning its slot.
    ///
    /// The consumed handle, and every older handle for this entity, fails
    /// all further operations with [`WorldError::UseAfterDestroy`].
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), WorldError> {
        let state = self.resolve(entity)?;
        if let SlotState::Stored { archetype, row } = state {
            self.detach_row(archetype, row)?;
        }
        let slot = &mut self.slots[entity.index as usize];
        slot.state = SlotState::Dead;
        slot.generation += 1;
        self.free.push(entity.index);
        self.live -= 1;
        log::debug!("destroyed entity {}", entity.index);
        Ok(())
    }

    /// Adds `new` components to the entity, migrating it to the archetype of
    /// the widened component set.
    ///
    /// Consumes the handle and returns the successor. Rejected with
    /// [`WorldError::DuplicateComponent`] if a kind appears twice in `new` or
    /// is already part of the entity's set; rejection happens before any
    /// mutation. Adding nothing is a no-op and returns the same handle.
    pub fn add_components(
        &mut self,
        entity: Entity,
        new: Vec<Component>,
    ) -> Result<Entity, WorldError> {
        let state = self.resolve(entity)?;
        if new.is_empty() {
            return Ok(entity);
        }

        let old_key = self.key_of(state);
        let mut offered = Signature::EMPTY;
        for component in &new {
            let kind = component.kind();
            if offered.has(kind) || old_key.has(kind) {
                return Err(WorldError::DuplicateComponent { kind });
            }
            offered.set(kind);
        }

        let mut merged = match state {
            SlotState::Stored { archetype, row } => {
                self.archetypes[archetype as usize].storage.get_row(row)?
            }
            _ => Vec::new(),
        };
        merged.extend(new);

        let destination = self.get_or_create_archetype(old_key.union(&offered));
        let new_row = self.attach_row(destination, entity.index, merged)?;
        if let SlotState::Stored { archetype, row } = state {
            self.detach_row(archetype, row)?;
        }

        self.relocate(entity.index, SlotState::Stored { archetype: destination, row: new_row })
    }

    /// Removes the listed kinds from the entity, migrating it to the
    /// archetype of the narrowed component set.
    ///
    /// Consumes the handle and returns the successor. Every requested kind
    /// must be present in the entity's current set
    /// ([`StorageError::UnknownComponentType`] otherwise, before any
    /// mutation); a kind repeated in `kinds` is folded, not an error.
    /// Removing every component leaves a live entity with an empty set.
    pub fn remove_components(
        &mut self,
        entity: Entity,
        kinds: &[ComponentKind],
    ) -> Result<Entity, WorldError> {
        let state = self.resolve(entity)?;
        if kinds.is_empty() {
            return Ok(entity);
        }

        let old_key = self.key_of(state);
        let removal: Signature = kinds.iter().copied().collect();
        for kind in removal.kinds() {
            if !old_key.has(kind) {
                return Err(StorageError::UnknownComponentType { kind }.into());
            }
        }
        let (archetype, row) = match state {
            SlotState::Stored { archetype, row } => (archetype, row),
            _ => unreachable!("a non-empty key implies stored state"),
        };

        let new_key = old_key.difference(&removal);
        if new_key.is_empty() {
            self.detach_row(archetype, row)?;
            return self.relocate(entity.index, SlotState::Empty);
        }

        let kept: Vec<Component> = self.archetypes[archetype as usize]
            .storage
            .get_row(row)?
            .into_iter()
            .filter(|component| new_key.has(component.kind()))
            .collect();
        let destination = self.get_or_create_archetype(new_key);
        let new_row = self.attach_row(destination, entity.index, kept)?;
        self.detach_row(archetype, row)?;

        self.relocate(entity.index, SlotState::Stored { archetype: destination, row: new_row })
    }

    /// Clones out the entity's full component tuple, in registration order.
    ///
    /// An empty-set entity yields an empty vector.
    pub fn get_components(&self, entity: Entity) -> Result<Vec<Component>, WorldError> {
        match self.resolve(entity)? {
            SlotState::Stored { archetype, row } => {
                Ok(self.archetypes[archetype as usize].storage.get_row(row)?)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Clones out the requested kinds, in the requested order.
    pub fn get_components_of(
        &self,
        entity: Entity,
        kinds: &[ComponentKind],
    ) -> Result<Vec<Component>, WorldError> {
        match self.resolve(entity)? {
            SlotState::Stored { archetype, row } => {
                Ok(self.archetypes[archetype as usize].storage.get(row, kinds)?)
            }
            _ => match kinds.first() {
                None => Ok(Vec::new()),
                Some(kind) => Err(StorageError::UnknownComponentType { kind: *kind }.into()),
            },
        }
    }

    /// Overwrites components in place, dispatched by each value's kind.
    ///
    /// Does not change the entity's component set and does not invalidate
    /// the handle.
    pub fn set_components(
        &mut self,
        entity: Entity,
        components: Vec<Component>,
    ) -> Result<(), WorldError> {
        match self.resolve(entity)? {
            SlotState::Stored { archetype, row } => {
                Ok(self.archetypes[archetype as usize].storage.set(row, components)?)
            }
            _ => match components.first() {
                None => Ok(()),
                Some(component) => {
                    Err(StorageError::UnknownComponentType { kind: component.kind() }.into())
                }
            },
        }
    }

    /// The entity's current component set.
    pub fn signature_of(&self, entity: Entity) -> Result<Signature, WorldError> {
        let state = self.resolve(entity)?;
        Ok(self.key_of(state))
    }

    /// Returns `true` when `entity` is the current handle of a live entity.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.resolve(entity).is_ok()
    }

    /// The entity's storage location, or `None` for an empty-set entity.
    pub fn location_of(
        &self,
        entity: Entity,
    ) -> Result<Option<(ArchetypeId, RowIndex)>, WorldError> {
        match self.resolve(entity)? {
            SlotState::Stored { archetype, row } => Ok(Some((archetype, row))),
            _ => Ok(None),
        }
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.live
    }

    /// Number of archetypes ever created.
    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    /// A live view over every entity whose component set is a superset of
    /// `kinds`; see [`Query`].
    pub fn query<'w>(&'w self, kinds: &[ComponentKind]) -> Query<'w> {
        Query::new(self, kinds)
    }

    pub(crate) fn archetype_entries(&self) -> &[ArchetypeEntry] {
        &self.archetypes
    }

    pub(crate) fn handle_of(&self, slot_index: u32) -> Entity {
        Entity { index: slot_index, generation: self.slots[slot_index as usize].generation }
    }

    /// Validates the handle: live slot, matching generation.
    fn resolve(&self, entity: Entity) -> Result<SlotState, WorldError> {
        match self.slots.get(entity.index as usize) {
            Some(slot)
                if slot.generation == entity.generation && slot.state != SlotState::Dead =>
            {
                Ok(slot.state)
            }
            _ => Err(WorldError::UseAfterDestroy { entity }),
        }
    }

    fn key_of(&self, state: SlotState) -> Signature {
        match state {
            SlotState::Stored { archetype, .. } => {
                self.archetypes[archetype as usize].storage.signature()
            }
            _ => Signature::EMPTY,
        }
    }

    fn get_or_create_archetype(&mut self, signature: Signature) -> ArchetypeId {
        if let Some(id) = self.archetype_ids.get(&signature) {
            return *id;
        }
        let id = self.archetypes.len() as ArchetypeId;
        self.archetypes.push(ArchetypeEntry {
            storage: ComponentSetStorage::new(signature),
            entities: Vec::new(),
        });
        self.archetype_ids.insert(signature, id);
        log::debug!("created archetype {id} for {signature:?}");
        id
    }

    fn attach_row(
        &mut self,
        archetype: ArchetypeId,
        slot_index: u32,
        components: Vec<Component>,
    ) -> Result<RowIndex, WorldError> {
        let entry = &mut self.archetypes[archetype as usize];
        let row = entry.storage.create(components)?;
        entry.entities.push(slot_index);
        debug_assert_eq!(entry.entities.len() - 1, row as usize);
        Ok(row)
    }

    /// Destroys a row and repairs the location of the entity the compaction
    /// swapped into its place.
    fn detach_row(&mut self, archetype: ArchetypeId, row: RowIndex) -> Result<(), WorldError> {
        let moved = {
            let entry = &mut self.archetypes[archetype as usize];
            entry.storage.destroy(row)?;
            entry.entities.swap_remove(row as usize);
            entry.entities.get(row as usize).copied()
        };
        if let Some(slot_index) = moved {
            self.slots[slot_index as usize].state = SlotState::Stored { archetype, row };
            log::trace!("entity {slot_index} relocated to row {row} of archetype {archetype}");
        }
        Ok(())
    }

    /// Commits a structural change: rewrites the slot's location, bumps the
    /// generation, and issues the successor handle.
    fn relocate(&mut self, slot_index: u32, state: SlotState) -> Result<Entity, WorldError> {
        let slot = &mut self.slots[slot_index as usize];
        slot.state = state;
        slot.generation += 1;
        Ok(Entity { index: slot_index, generation: slot.generation })
    }
}
