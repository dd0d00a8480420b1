//! Configuration primitives for the D7S driver.

use crate::params::{Axis, Threshold};

/// User-facing configuration for the D7S sensor.
///
/// Maps onto the writable fields of the `CTRL` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Axis selection used for SI calculation.
    pub axis: Axis,
    /// Shutoff judgment threshold.
    pub threshold: Threshold,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the axis selection.
    pub fn axis(mut self, axis: Axis) -> Self {
        self.config.axis = axis;
        self
    }

    /// Overrides the shutoff judgment threshold.
    pub fn threshold(mut self, threshold: Threshold) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        // Chip factory defaults: axis switched at installation, threshold H.
        Self {
            axis: Axis::SwitchAtInstallation,
            threshold: Threshold::High,
        }
    }
}
