// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core geometric types: the [`Scalar`] coordinate abstraction and [`Aabb2D`].

use core::fmt::Debug;
use core::ops::{Add, Mul, Sub};

/// Coordinate type usable by the index.
///
/// Implemented for `f32`, `f64`, and `i64`. Area metrics used by the R-tree
/// split heuristic are computed in a widened accumulator (`f32`→`f64`,
/// `f64`→`f64`, `i64`→`i128`) so that comparisons stay robust for large
/// coordinates.
pub trait Scalar: Copy + PartialOrd + Debug + Add<Output = Self> + Sub<Output = Self> {
    /// Widened accumulator for area computations.
    type Acc: Copy
        + PartialOrd
        + Debug
        + Add<Output = Self::Acc>
        + Sub<Output = Self::Acc>
        + Mul<Output = Self::Acc>;

    /// Additive identity.
    fn zero() -> Self;

    /// Midpoint of `a` and `b`, rounded toward `a` for integers.
    fn mid(a: Self, b: Self) -> Self;

    /// Widen a value into the accumulator type.
    fn widen(self) -> Self::Acc;

    /// Convert a count into the accumulator type.
    fn acc_from_usize(n: usize) -> Self::Acc;
}

/// Accumulator type for a given scalar.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        (a + b) * 0.5
    }

    #[inline]
    fn widen(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn acc_from_usize(n: usize) -> f64 {
        n as f64
    }
}

impl Scalar for f64 {
    type Acc = f64;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        (a + b) * 0.5
    }

    #[inline]
    fn widen(self) -> f64 {
        self
    }

    #[inline]
    fn acc_from_usize(n: usize) -> f64 {
        n as f64
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        a + (b - a) / 2
    }

    #[inline]
    fn widen(self) -> i128 {
        i128::from(self)
    }

    #[inline]
    fn acc_from_usize(n: usize) -> i128 {
        i128::try_from(n).unwrap_or(i128::MAX)
    }
}

/// Axis-aligned bounding box in 2D.
///
/// Boxes are stored as `[min_x, max_x] x [min_y, max_y]`. Queries treat the
/// extent as closed except for [`Aabb2D::overlaps`], which only considers
/// interiors.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb2D<T> {
    /// Minimum x.
    pub min_x: T,
    /// Minimum y.
    pub min_y: T,
    /// Maximum x.
    pub max_x: T,
    /// Maximum y.
    pub max_y: T,
}

impl<T: Scalar> Aabb2D<T> {
    /// Create a box from its corner coordinates.
    #[inline]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a box from an origin and a size.
    #[inline]
    pub fn from_xywh(x: T, y: T, w: T, h: T) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> T {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> T {
        self.max_y - self.min_y
    }

    /// Returns `true` if the box has no points (min exceeds max on some axis).
    ///
    /// Boxes with zero width or height are not empty: they still contain their
    /// boundary.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Closed intersection of two boxes. The result may be empty.
    #[inline]
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(
            max_of(self.min_x, other.min_x),
            max_of(self.min_y, other.min_y),
            min_of(self.max_x, other.max_x),
            min_of(self.max_y, other.max_y),
        )
    }

    /// Returns `true` if the closed box contains the point.
    #[inline]
    pub fn contains_point(&self, x: T, y: T) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Returns `true` if the interiors of the two boxes intersect.
    ///
    /// Boxes that only share an edge or a corner do not overlap, and a box with
    /// zero width or height overlaps nothing.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
            && self.min_x < self.max_x
            && self.min_y < self.max_y
            && other.min_x < other.max_x
            && other.min_y < other.max_y
    }
}

/// Smallest box containing both `a` and `b`.
#[inline]
pub fn union_aabb<T: Scalar>(a: Aabb2D<T>, b: Aabb2D<T>) -> Aabb2D<T> {
    Aabb2D::new(
        min_of(a.min_x, b.min_x),
        min_of(a.min_y, b.min_y),
        max_of(a.max_x, b.max_x),
        max_of(a.max_y, b.max_y),
    )
}

/// Area of a box in the widened accumulator. Empty boxes have zero area.
#[inline]
pub fn area<T: Scalar>(a: &Aabb2D<T>) -> ScalarAcc<T> {
    if a.is_empty() {
        return T::zero().widen();
    }
    a.width().widen() * a.height().widen()
}

#[inline]
fn min_of<T: PartialOrd>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

#[inline]
fn max_of<T: PartialOrd>(a: T, b: T) -> T {
    if b > a { b } else { a }
}
