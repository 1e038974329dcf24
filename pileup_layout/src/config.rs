// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration.

use crate::error::ConfigError;

/// Gap added above a feature that had to be moved past at least one collision.
pub const DEFAULT_SPACING: f64 = 2.0;

/// Options fixed when a layout is created.
///
/// ```rust
/// use pileup_layout::LayoutConfig;
///
/// let config = LayoutConfig::new().with_max_height(1000.0).with_spacing(1.0);
/// assert_eq!(config.max_height, Some(1000.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Cap on the total stacked height. `None` means unbounded.
    ///
    /// A feature with no free row ending within this height overflows. The
    /// spacing gap of a displaced feature is not checked against it.
    pub max_height: Option<f64>,
    /// Extra gap inserted above a feature that was displaced from row zero.
    pub spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_height: None,
            spacing: DEFAULT_SPACING,
        }
    }
}

impl LayoutConfig {
    /// Unbounded height with [`DEFAULT_SPACING`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the total stacked height.
    #[must_use]
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Set the displacement gap.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Check that the options describe a usable layout.
    ///
    /// A non-positive `max_height` is accepted: such a layout overflows on
    /// every placement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(ConfigError::InvalidSpacing {
                spacing: self.spacing,
            });
        }
        if let Some(max_height) = self.max_height
            && max_height.is_nan()
        {
            return Err(ConfigError::InvalidMaxHeight { max_height });
        }
        Ok(())
    }

    /// Height budget as a plain number, `+inf` when unbounded.
    pub(crate) fn height_limit(&self) -> f64 {
        self.max_height.unwrap_or(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.max_height, None);
        assert_eq!(config.spacing, 2.0);
        assert_eq!(config.height_limit(), f64::INFINITY);
    }

    #[test]
    fn rejects_bad_spacing_and_nan_height() {
        assert_eq!(
            LayoutConfig::new().with_spacing(-1.0).validate(),
            Err(ConfigError::InvalidSpacing { spacing: -1.0 })
        );
        assert!(LayoutConfig::new().with_spacing(f64::INFINITY).validate().is_err());
        assert!(matches!(
            LayoutConfig::new().with_max_height(f64::NAN).validate(),
            Err(ConfigError::InvalidMaxHeight { .. })
        ));
        assert!(LayoutConfig::new().with_max_height(-5.0).validate().is_ok());
    }
}
