// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The incremental row layout.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use pileup_index::{Aabb2D, Backend, IndexGeneric, RTreeF64};

use crate::config::LayoutConfig;
use crate::error::{ConfigError, LayoutError};
use crate::feature::Feature;
use crate::logging::{debug, trace};
use crate::snapshot::{Snapshot, SnapshotRect};

/// Margin trimmed from the top and bottom of every probe box.
///
/// Rows that merely touch (one ends exactly where the next starts) are not
/// reported as colliding.
pub const PROBE_EPSILON: f64 = 0.01;

/// Distance the probe moves down after each collision.
pub const ROW_STEP: f64 = 1.0;

/// Result of [`LayoutGeneric::place`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Placement {
    /// The feature occupies `[top, top + height)`.
    Placed {
        /// Vertical offset of the feature's top edge.
        top: f64,
    },
    /// No row within the height budget was free; nothing was recorded.
    Overflow,
}

impl Placement {
    /// Vertical offset if the feature was placed.
    pub fn top(self) -> Option<f64> {
        match self {
            Self::Placed { top } => Some(top),
            Self::Overflow => None,
        }
    }

    /// Returns `true` for [`Placement::Overflow`].
    pub fn is_overflow(self) -> bool {
        matches!(self, Self::Overflow)
    }
}

/// A feature that found a row.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedRect<P> {
    id: String,
    bounds: Aabb2D<f64>,
    payload: Option<P>,
}

impl<P> PlacedRect<P> {
    /// Feature identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Placed box `[min_x, max_x) x [min_y, max_y)`.
    pub fn bounds(&self) -> Aabb2D<f64> {
        self.bounds
    }

    /// Vertical offset of the top edge.
    pub fn top(&self) -> f64 {
        self.bounds.min_y
    }

    /// Payload handed to [`LayoutGeneric::place`].
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }
}

/// Greedy, streaming row layout over a spatial backend.
///
/// Each call to [`place`](Self::place) scans rows downward from zero in
/// [`ROW_STEP`] increments until the feature's span is free, so results depend
/// on call order: place features in a stable order (see
/// [`sort_features`](crate::sort_features)) for reproducible stacks.
///
/// A layout serves one view. It only grows; drop it and build a new one when
/// the visible range changes.
pub struct LayoutGeneric<P, B: Backend<f64>> {
    config: LayoutConfig,
    rects: Vec<PlacedRect<P>>,
    slots: HashMap<String, usize>,
    index: IndexGeneric<f64, usize, B>,
    total_height: f64,
    overflowed: bool,
}

/// Layout backed by an R-tree.
pub type Layout<P = ()> = LayoutGeneric<P, RTreeF64>;

impl<P> Layout<P> {
    /// Empty layout with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(LayoutConfig::default(), RTreeF64::default())
    }

    /// Empty layout with a validated configuration.
    pub fn with_config(config: LayoutConfig) -> Result<Self, ConfigError> {
        Self::with_backend(config, RTreeF64::default())
    }
}

impl<P> Default for Layout<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, B: Backend<f64>> LayoutGeneric<P, B> {
    /// Empty layout over an empty backend.
    pub fn with_backend(config: LayoutConfig, backend: B) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, backend))
    }

    fn from_parts(config: LayoutConfig, backend: B) -> Self {
        Self {
            config,
            rects: Vec::new(),
            slots: HashMap::new(),
            index: IndexGeneric::with_backend(backend),
            total_height: 0.0,
            overflowed: false,
        }
    }

    /// Assign a row to the feature `id` spanning `[left, right)` with the given height.
    ///
    /// Calling again with an identifier that already has a row returns that row
    /// and ignores the other arguments. Identifiers that overflowed are not
    /// remembered, so a repeated call searches again.
    ///
    /// Fails only for malformed geometry; the layout is left untouched in that
    /// case. Running out of room is reported as [`Placement::Overflow`].
    pub fn place(
        &mut self,
        id: &str,
        left: f64,
        right: f64,
        height: f64,
        payload: Option<P>,
    ) -> Result<Placement, LayoutError> {
        if let Some(&slot) = self.slots.get(id) {
            return Ok(Placement::Placed {
                top: self.rects[slot].top(),
            });
        }
        if !(left.is_finite() && right.is_finite() && left < right) {
            return Err(LayoutError::InvalidSpan { left, right });
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(LayoutError::InvalidHeight { height });
        }

        let Some(top) = self.find_top(left, right, height) else {
            if !self.overflowed {
                debug!(id = %id, max_height = ?self.config.max_height, "layout overflowed");
            }
            self.overflowed = true;
            return Ok(Placement::Overflow);
        };

        let bounds = Aabb2D::new(left, top, right, top + height);
        let slot = self.rects.len();
        self.index.insert(bounds, slot);
        self.slots.insert(String::from(id), slot);
        self.rects.push(PlacedRect {
            id: String::from(id),
            bounds,
            payload,
        });
        self.total_height = self
            .config
            .height_limit()
            .min(self.total_height.max(bounds.max_y));
        trace!(id = %id, top, "placed feature");
        Ok(Placement::Placed { top })
    }

    /// Place a [`Feature`] record.
    pub fn place_feature(&mut self, feature: Feature<P>) -> Result<Placement, LayoutError> {
        self.place(
            &feature.id,
            feature.start,
            feature.end,
            feature.height,
            feature.payload,
        )
    }

    /// Place features in iteration order, stopping at the first malformed one.
    ///
    /// Features placed before the failure keep their rows.
    pub fn place_features<I>(&mut self, features: I) -> Result<Vec<Placement>, LayoutError>
    where
        I: IntoIterator<Item = Feature<P>>,
    {
        features
            .into_iter()
            .map(|f| self.place_feature(f))
            .collect()
    }

    /// Lowest free row for a span, or `None` if no row ends within the budget.
    fn find_top(&self, left: f64, right: f64, height: f64) -> Option<f64> {
        let limit = self.config.height_limit();
        if limit <= 0.0 || height >= limit {
            return None;
        }
        let inset = PROBE_EPSILON.min(height / 4.0);
        let mut y = 0.0;
        let mut displaced = false;
        loop {
            if y + height > limit {
                return None;
            }
            let probe = Aabb2D::new(left, y + inset, right, y + height - inset);
            if !self.index.collides(probe) {
                break;
            }
            displaced = true;
            y += ROW_STEP;
        }
        // The spacing gap may carry the feature past the budget; the total
        // height is capped instead.
        if displaced {
            y += self.config.spacing;
        }
        Some(y)
    }

    /// Returns `true` if `id` has a row.
    pub fn seen(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// The feature whose box `[min_x, max_x) x [min_y, max_y)` contains the point.
    ///
    /// If several do, the one placed first wins.
    pub fn lookup_by_point(&self, x: f64, y: f64) -> Option<&str> {
        self.index
            .query_point(x, y)
            .map(|(_, slot)| slot)
            .filter(|&slot| {
                let b = &self.rects[slot].bounds;
                x < b.max_x && y < b.max_y
            })
            .min()
            .map(|slot| self.rects[slot].id.as_str())
    }

    /// Placed box of `id`.
    pub fn lookup_by_id(&self, id: &str) -> Option<Aabb2D<f64>> {
        self.get(id).map(PlacedRect::bounds)
    }

    /// Identifiers of features whose boxes intersect `region`, in unspecified order.
    pub fn lookup_by_region(&self, region: Aabb2D<f64>) -> impl Iterator<Item = &str> + '_ {
        self.index
            .query_rect(region)
            .map(|(_, slot)| self.rects[slot].id.as_str())
    }

    /// Placed record of `id`.
    pub fn get(&self, id: &str) -> Option<&PlacedRect<P>> {
        self.slots.get(id).map(|&slot| &self.rects[slot])
    }

    /// Payload attached to `id` when it was placed.
    pub fn payload(&self, id: &str) -> Option<&P> {
        self.get(id).and_then(PlacedRect::payload)
    }

    /// Placed features in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedRect<P>> + '_ {
        self.rects.iter()
    }

    /// Copy out every placed box, in placement order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rects: self
                .rects
                .iter()
                .map(|r| SnapshotRect {
                    id: r.id.clone(),
                    bounds: r.bounds,
                })
                .collect(),
            total_height: self.total_height,
            overflowed: self.overflowed,
        }
    }

    /// Bottom of the lowest placed feature, capped at the height budget.
    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// Returns `true` once any placement has overflowed.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Number of placed features.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns `true` if nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Configuration the layout was built with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
}

impl<P, B: Backend<f64> + fmt::Debug> fmt::Debug for LayoutGeneric<P, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutGeneric")
            .field("config", &self.config)
            .field("placed", &self.rects.len())
            .field("total_height", &self.total_height)
            .field("overflowed", &self.overflowed)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
