use crate::{NavError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tuning for containment and visibility sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Steps per visibility segment. Samples are taken at `k / sample_resolution` for
    /// `k = 0..=sample_resolution`, so the default of 100 probes every 1%.
    pub sample_resolution: u32,
    /// Half-length of each containment probe (world units).
    pub probe_extent: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            sample_resolution: 100,
            probe_extent: 0.01,
        }
    }
}

impl NavConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_resolution == 0 {
            return Err(NavError::ZeroResolution);
        }
        if !self.probe_extent.is_finite() || self.probe_extent < 0.0 {
            return Err(NavError::InvalidProbeExtent(self.probe_extent));
        }
        Ok(())
    }
}
