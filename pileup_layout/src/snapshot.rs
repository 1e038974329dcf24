// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned export of a finished layout, for bulk rendering.

use alloc::string::String;
use alloc::vec::Vec;

use pileup_index::Aabb2D;

/// One placed rectangle: `[min_x, max_x) x [min_y, max_y)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotRect {
    /// Feature identifier.
    pub id: String,
    /// Placed box.
    pub bounds: Aabb2D<f64>,
}

/// Every placed rectangle of a layout, in placement order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Placed rectangles in the order they were placed.
    pub rects: Vec<SnapshotRect>,
    /// Height needed to draw every rectangle.
    pub total_height: f64,
    /// Whether at least one feature did not fit.
    pub overflowed: bool,
}

impl Snapshot {
    /// Number of placed rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns `true` if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Bounds of the rectangle placed under `id`.
    pub fn get(&self, id: &str) -> Option<Aabb2D<f64>> {
        self.rects.iter().find(|r| r.id == id).map(|r| r.bounds)
    }

    /// Iterate over `(id, bounds)` pairs in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Aabb2D<f64>)> + '_ {
        self.rects.iter().map(|r| (r.id.as_str(), r.bounds))
    }
}
