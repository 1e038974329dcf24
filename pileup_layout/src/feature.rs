// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-side feature records.

use alloc::string::String;
use core::cmp::Ordering;

/// A horizontal interval waiting to be placed.
///
/// This is the record shape a read source hands to the layout: an identifier
/// unique within the view, a half-open span `[start, end)`, the height of the
/// row it needs, and an optional payload the renderer wants back later (for
/// example the strand of an aligned read).
#[derive(Clone, Debug, PartialEq)]
pub struct Feature<P> {
    /// Identifier, unique within a layout.
    pub id: String,
    /// Left edge, inclusive.
    pub start: f64,
    /// Right edge, exclusive.
    pub end: f64,
    /// Requested row height.
    pub height: f64,
    /// Opaque caller data.
    pub payload: Option<P>,
}

impl<P> Feature<P> {
    /// A feature without payload.
    pub fn new(id: impl Into<String>, start: f64, end: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            height,
            payload: None,
        }
    }

    /// Attach a payload.
    #[must_use]
    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Sort features into the order that gives stable, readable stacking.
///
/// Rows are filled greedily in call order, so placing features left to right
/// keeps the pileup compact and makes the result independent of the order the
/// source produced them in. Ties are broken by end, then by identifier.
pub fn sort_features<P>(features: &mut [Feature<P>]) {
    features.sort_by(feature_order);
}

/// Ordering used by [`sort_features`], exposed for callers keeping their own
/// sorted containers.
pub fn feature_order<P>(a: &Feature<P>, b: &Feature<P>) -> Ordering {
    a.start
        .total_cmp(&b.start)
        .then_with(|| a.end.total_cmp(&b.end))
        .then_with(|| a.id.cmp(&b.id))
}
