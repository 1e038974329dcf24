// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Running out of vertical room is not an error: it is reported through
//! [`Placement::Overflow`](crate::Placement::Overflow). These types cover
//! inputs that fall outside the placement contract.

use core::fmt;

/// A feature could not be placed because its geometry is malformed.
///
/// Rejected features leave the layout untouched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LayoutError {
    /// The span is inverted, empty, or not finite.
    InvalidSpan {
        /// Requested left edge.
        left: f64,
        /// Requested right edge.
        right: f64,
    },
    /// The height is not a positive finite number.
    InvalidHeight {
        /// Requested height.
        height: f64,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpan { left, right } => {
                write!(f, "invalid span [{left}, {right}): expected finite left < right")
            }
            Self::InvalidHeight { height } => {
                write!(f, "invalid height {height}: expected a positive finite value")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

/// A [`LayoutConfig`](crate::LayoutConfig) was rejected.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Spacing must be finite and non-negative.
    InvalidSpacing {
        /// Configured spacing.
        spacing: f64,
    },
    /// The maximum height must not be NaN.
    InvalidMaxHeight {
        /// Configured maximum height.
        max_height: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpacing { spacing } => {
                write!(f, "invalid spacing {spacing}: expected a finite value >= 0")
            }
            Self::InvalidMaxHeight { max_height } => {
                write!(f, "invalid maximum height {max_height}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
