//! Core identifiers and the component-set bitset.
//!
//! These definitions are shared across all storage layers: archetype and row
//! addressing, entity handle generations, and the [`Signature`] bitset that
//! identifies which component kinds an archetype stores.
//!
//! The engine keeps identifiers small and copyable so they can be embedded in
//! handles and map keys without indirection. A `Signature` doubles as the
//! archetype key: two entities live in the same archetype exactly when their
//! component sets produce equal signatures.

use crate::engine::component::ComponentKind;

/// Arena index of an archetype inside the world registry.
pub type ArchetypeId = u16;

/// Row index inside an archetype's component columns.
pub type RowIndex = u32;

/// Generation counter used to detect stale entity handles.
pub type Generation = u32;

/// Bitset over [`ComponentKind`], identifying an archetype's component set.
///
/// ## Notes
/// The component universe is a closed enum, so one word is enough. Bit `k` is
/// set when kind `k` is part of the set. Signatures are `Copy`, cheap to
/// compare, and hashable, which makes them usable directly as archetype keys.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    bits: u8,
}

impl Signature {
    /// The empty component set.
    pub const EMPTY: Signature = Signature { bits: 0 };

    /// Sets the bit for `kind`.
    #[inline]
    pub fn set(&mut self, kind: ComponentKind) {
        self.bits |= kind.bit();
    }

    /// Clears the bit for `kind`.
    #[inline]
    pub fn clear(&mut self, kind: ComponentKind) {
        self.bits &= !kind.bit();
    }

    /// Returns `true` if `kind` is present in this set.
    #[inline]
    pub fn has(&self, kind: ComponentKind) -> bool {
        self.bits & kind.bit() != 0
    }

    /// Returns `true` if every kind in `other` is also present in `self`.
    #[inline]
    pub fn contains_all(&self, other: &Signature) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Returns `true` if no kind is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of kinds in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Set union.
    #[inline]
    pub fn union(&self, other: &Signature) -> Signature {
        Signature { bits: self.bits | other.bits }
    }

    /// Set difference (`self \ other`).
    #[inline]
    pub fn difference(&self, other: &Signature) -> Signature {
        Signature { bits: self.bits & !other.bits }
    }

    /// Iterates over the kinds in this set, in registration order.
    ///
    /// Registration order is the declaration order of [`ComponentKind`]; the
    /// storage layer relies on it to keep column layouts deterministic.
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        ComponentKind::ALL.into_iter().filter(|kind| self.has(*kind))
    }
}

impl FromIterator<ComponentKind> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentKind>>(iter: I) -> Self {
        let mut signature = Signature::default();
        for kind in iter {
            signature.set(kind);
        }
        signature
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}
