// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The index front-end: payload storage keyed by slot over a spatial backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::{FlatVec, RTree};
use crate::types::{Aabb2D, Scalar};

/// Handle to an inserted entry.
///
/// Keys are handed out in insertion order and stay valid for the lifetime of
/// the index, since entries are never removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(usize);

impl Key {
    /// Position of the entry in insertion order.
    #[inline]
    pub const fn slot(self) -> usize {
        self.0
    }
}

/// Append-only AABB index generic over coordinate type, payload, and backend.
pub struct IndexGeneric<T: Scalar, P: Copy + Debug, B: Backend<T>> {
    entries: Vec<(Aabb2D<T>, P)>,
    backend: B,
}

/// Index using the flat-vector backend.
pub type Index<T, P> = IndexGeneric<T, P, FlatVec<T>>;

impl<T: Scalar, P: Copy + Debug> Index<T, P> {
    /// Create an empty index backed by linear scans.
    pub fn new() -> Self {
        Self::with_backend(FlatVec::default())
    }

    /// Create an empty index backed by an R-tree.
    pub fn with_rtree() -> IndexGeneric<T, P, RTree<T>> {
        IndexGeneric::with_backend(RTree::default())
    }
}

impl<T: Scalar, P: Copy + Debug> Default for Index<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar, P: Copy + Debug, B: Backend<T>> IndexGeneric<T, P, B> {
    /// Create an empty index over an existing (empty) backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            entries: Vec::new(),
            backend,
        }
    }

    /// Insert a box with its payload and return its key.
    pub fn insert(&mut self, aabb: Aabb2D<T>, payload: P) -> Key {
        let slot = self.entries.len();
        self.entries.push((aabb, payload));
        self.backend.insert(slot, aabb);
        Key(slot)
    }

    /// Returns `true` if any stored box's interior intersects the interior of `rect`.
    pub fn collides(&self, rect: Aabb2D<T>) -> bool {
        self.backend.collides(rect)
    }

    /// Entries whose closed box contains the point, in unspecified order.
    pub fn query_point(&self, x: T, y: T) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend
            .query_point(x, y)
            .map(|slot| (Key(slot), self.entries[slot].1))
    }

    /// Entries whose closed box intersects `rect`, in unspecified order.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend
            .query_rect(rect)
            .map(|slot| (Key(slot), self.entries[slot].1))
    }

    /// Box and payload stored under `key`.
    pub fn get(&self, key: Key) -> Option<(Aabb2D<T>, P)> {
        self.entries.get(key.0).copied()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, Aabb2D<T>, P)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(slot, (aabb, p))| (Key(slot), *aabb, *p))
    }
}

impl<T: Scalar, P: Copy + Debug, B: Backend<T> + Debug> Debug for IndexGeneric<T, P, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexGeneric")
            .field("len", &self.entries.len())
            .field("backend", &self.backend)
            .finish()
    }
}
