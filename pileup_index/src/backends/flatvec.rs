// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets
//! and as a reference for the tree backends.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar};

/// Flat vector backend with linear scans.
///
/// Entries are kept in insertion order as `(slot, box)` pairs.
pub struct FlatVec<T: Scalar> {
    entries: Vec<(usize, Aabb2D<T>)>,
}

impl<T: Scalar> Default for FlatVec<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Scalar> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> FlatVec<T> {
    /// Number of stored boxes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Scalar> Backend<T> for FlatVec<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        self.entries.push((slot, aabb));
    }

    fn collides(&self, rect: Aabb2D<T>) -> bool {
        self.entries.iter().any(|(_, a)| a.overlaps(&rect))
    }

    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, mut f: F) {
        for (slot, a) in &self.entries {
            if a.contains_point(x, y) {
                f(*slot);
            }
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, mut f: F) {
        for (slot, a) in &self.entries {
            if !a.intersect(&rect).is_empty() {
                f(*slot);
            }
        }
    }
}
