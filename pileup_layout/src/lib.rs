// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pileup Layout: incremental row assignment for overlapping intervals.
//!
//! Given a stream of horizontal intervals, each with a height, the layout gives
//! every interval a vertical offset so that intervals whose spans overlap never
//! overlap vertically, while disjoint intervals may share a row. This is the
//! stacking step behind a read pileup: thousands of aligned reads drawn as
//! non-overlapping bars under an optional height budget.
//!
//! The algorithm is greedy and streaming, not an optimal packer:
//!
//! - The probe starts at row zero and moves down by [`ROW_STEP`] until the
//!   span is free. Free is decided by the spatial index in [`pileup_index`],
//!   with [`PROBE_EPSILON`] trimmed off the probe so touching rows are fine.
//! - If no free row ends within [`LayoutConfig::max_height`], the feature
//!   overflows: nothing is recorded and [`LayoutGeneric::overflowed`] stays
//!   `true` from then on.
//! - A feature that had to move at all gets [`LayoutConfig::spacing`] extra
//!   gap above it. The gap may push it past the budget, in which case
//!   [`LayoutGeneric::total_height`] stays capped at the budget.
//! - Placing an identifier that already has a row returns that row.
//!
//! ## Example
//!
//! ```rust
//! use pileup_layout::{Layout, Placement};
//!
//! let mut layout = Layout::<()>::new();
//! assert_eq!(layout.place("a", 0.0, 10.0, 5.0, None)?, Placement::Placed { top: 0.0 });
//! // Overlaps `a`: moved below it, plus the default spacing of 2.
//! assert_eq!(layout.place("b", 5.0, 15.0, 5.0, None)?, Placement::Placed { top: 7.0 });
//! // Disjoint from both: shares row zero.
//! assert_eq!(layout.place("c", 20.0, 30.0, 5.0, None)?, Placement::Placed { top: 0.0 });
//!
//! assert_eq!(layout.total_height(), 12.0);
//! assert_eq!(layout.lookup_by_point(3.0, 2.0), Some("a"));
//! assert_eq!(layout.snapshot().len(), 3);
//! # Ok::<(), pileup_layout::LayoutError>(())
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit placement (`trace`) and first-overflow (`debug`) events.
//! - `serde`: derive `Serialize`/`Deserialize` for [`LayoutConfig`] and
//!   [`Snapshot`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod config;
mod error;
mod feature;
mod layout;
mod logging;
mod snapshot;

pub use config::{DEFAULT_SPACING, LayoutConfig};
pub use error::{ConfigError, LayoutError};
pub use feature::{Feature, feature_order, sort_features};
pub use layout::{Layout, LayoutGeneric, PROBE_EPSILON, Placement, PlacedRect, ROW_STEP};
pub use snapshot::{Snapshot, SnapshotRect};

pub use pileup_index::Aabb2D;
