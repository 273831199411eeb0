use crate::error::{PreprocessError, PreprocessResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kernel sizes and thresholds of the segmentation chain.
///
/// Sizes are full window widths; square kernels of side `size` are centered
/// on the pixel, so even sizes behave like the next odd size.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PreprocessConfig {
    /// Grayscale opening applied to the green channel
    pub tophat_size: u32,
    pub mean_size: u32,
    pub gaussian_sigma: f32,
    pub median_size: u32,
    /// Neighborhood of the adaptive threshold, odd
    pub threshold_block: u32,
    /// Subtracted from the local mean before comparison
    pub threshold_offset: i16,
    pub closing_size: u32,
    pub opening_size: u32,
    /// Components with this many pixels or fewer are dropped
    pub min_area: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            tophat_size: 13,
            mean_size: 13,
            gaussian_sigma: 1.0,
            median_size: 60,
            threshold_block: 41,
            threshold_offset: 5,
            closing_size: 7,
            opening_size: 3,
            min_area: 150,
        }
    }
}

impl PreprocessConfig {
    pub fn validate(&self) -> PreprocessResult<()> {
        for (name, size) in [
            ("tophat", self.tophat_size),
            ("mean", self.mean_size),
            ("median", self.median_size),
            ("closing", self.closing_size),
            ("opening", self.opening_size),
        ] {
            if size == 0 || size / 2 > u8::MAX as u32 {
                return Err(PreprocessError::InvalidKernel { name, size });
            }
        }
        if self.threshold_block < 3 || self.threshold_block % 2 == 0 {
            return Err(PreprocessError::InvalidKernel {
                name: "threshold",
                size: self.threshold_block,
            });
        }
        if !(self.gaussian_sigma > 0.0) {
            return Err(PreprocessError::InvalidSigma(self.gaussian_sigma));
        }
        Ok(())
    }

    /// Half-width of a square window of side `size`
    pub(crate) fn radius(size: u32) -> u8 {
        (size / 2).min(u8::MAX as u32) as u8
    }

    /// Gaussian sigma matching a threshold block, as used by adaptive
    /// Gaussian thresholding
    pub fn threshold_sigma(&self) -> f32 {
        0.3 * ((self.threshold_block as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }
}
