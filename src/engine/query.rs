//! Cross-archetype component views.
//!
//! ## Purpose
//! A [`Query`] iterates over every live entity whose component set is a
//! superset of the requested kinds, yielding the requested components in the
//! requested order. Matching archetypes are visited in arena order, rows in
//! ascending order within each archetype.
//!
//! ## Behavior
//! The view is live and uncached: matching archetypes are resolved when the
//! query is built, and rows are read lazily as the iterator advances. Row
//! data is cloned out per step, so a structural mutation between drains can
//! never dangle, but rows visited after a mutation may observe relocated
//! data. Drain or copy out the view before mutating the world.
//!
//! Empty-set entities never match, including when no kinds are requested: a
//! query with an empty request visits every entity that has at least one
//! component.

use crate::engine::component::{Component, ComponentKind};
use crate::engine::types::Signature;
use crate::engine::world::{Entity, World};

/// Iterator over `(entity, components)` rows matching a component request.
///
/// Built by [`World::query`]. Restartable by building it again.
pub struct Query<'w> {
    world: &'w World,
    kinds: Vec<ComponentKind>,
    matching: Vec<usize>,
    archetype_cursor: usize,
    row_cursor: usize,
}

impl<'w> Query<'w> {
    pub(crate) fn new(world: &'w World, kinds: &[ComponentKind]) -> Self {
        let request: Signature = kinds.iter().copied().collect();
        let matching = world
            .archetype_entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.storage.signature().contains_all(&request))
            .map(|(index, _)| index)
            .collect();
        Query {
            world,
            kinds: kinds.to_vec(),
            matching,
            archetype_cursor: 0,
            row_cursor: 0,
        }
    }

    /// Total number of rows this view will yield if drained now.
    pub fn count_rows(&self) -> usize {
        self.matching
            .iter()
            .map(|&index| self.world.archetype_entries()[index].storage.len())
            .sum()
    }
}

impl<'w> Iterator for Query<'w> {
    type Item = (Entity, Vec<Component>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &archetype = self.matching.get(self.archetype_cursor)?;
            let entry = &self.world.archetype_entries()[archetype];
            if self.row_cursor >= entry.storage.len() {
                self.archetype_cursor += 1;
                self.row_cursor = 0;
                continue;
            }
            let row = self.row_cursor as u32;
            self.row_cursor += 1;

            // Rows in [0, len) of a consistent world always resolve.
            let components = entry
                .storage
                .get(row, &self.kinds)
                .expect("matching archetype row within bounds");
            let entity = self.world.handle_of(entry.entities[row as usize]);
            return Some((entity, components));
        }
    }
}
