// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pileup Index: an append-only 2D AABB index with pluggable backends.
//!
//! The index stores axis-aligned boxes together with a small `Copy` payload and
//! answers three kinds of questions:
//!
//! - [`IndexGeneric::collides`]: does any stored box's *interior* intersect a
//!   query box? Edge-touching boxes do not collide.
//! - [`IndexGeneric::query_rect`]: which stored boxes intersect a query box
//!   (closed extents)?
//! - [`IndexGeneric::query_point`]: which stored boxes contain a point (closed
//!   extents)?
//!
//! Entries are never removed or moved, which keeps [`Key`]s stable and lets the
//! backends skip bookkeeping for deletion.
//!
//! ## Backends
//!
//! - [`FlatVec`]: linear scans; exact and tiny, useful as a reference.
//! - [`RTree`]: dynamic R-tree with SAH-like splits and early-exit collision
//!   queries. Use this once you hold more than a few hundred boxes.
//!
//! ## Example
//!
//! ```rust
//! use pileup_index::{Aabb2D, Index};
//!
//! let mut idx = Index::<f64, u32>::with_rtree();
//! idx.insert(Aabb2D::new(0.0, 0.0, 10.0, 5.0), 1);
//! idx.insert(Aabb2D::new(20.0, 0.0, 30.0, 5.0), 2);
//!
//! // Sharing an edge is not a collision.
//! assert!(!idx.collides(Aabb2D::new(10.0, 0.0, 20.0, 5.0)));
//! assert!(idx.collides(Aabb2D::new(5.0, 0.01, 15.0, 4.99)));
//!
//! let hits: Vec<u32> = idx.query_point(25.0, 2.0).map(|(_, p)| p).collect();
//! assert_eq!(hits, vec![2]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod backend;
pub mod backends;
mod index;
mod types;

pub use backend::Backend;
pub use backends::{FlatVec, RTree, RTreeF32, RTreeF64, RTreeI64};
pub use index::{Index, IndexGeneric, Key};
pub use types::{Aabb2D, Scalar, ScalarAcc, area, union_aabb};
