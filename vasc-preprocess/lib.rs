//! Retinal vessel segmentation.
//!
//! Turns an RGB fundus photograph into the two binary masks junction
//! detection works on: the segmented vessels and their one-pixel skeleton.

pub mod background;
pub mod cleanup;
pub mod config;
pub mod convert;
pub mod error;
pub mod thinning;
pub mod threshold;

pub use config::PreprocessConfig;
pub use convert::{green_channel, mask_from_gray, mask_to_gray};
pub use error::{PreprocessError, PreprocessResult};
pub use thinning::Skeletonizer;

use image::RgbImage;
use vasc_core::Mask;

/// Vessel mask and its skeleton, both `(rows, cols) = (height, width)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessOutput {
    pub vessels: Mask,
    pub skeleton: Mask,
}

#[derive(Debug, Clone)]
pub struct Preprocessor {
    cfg: PreprocessConfig,
}

impl Preprocessor {
    pub fn new(cfg: PreprocessConfig) -> PreprocessResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.cfg
    }

    /// Segments the vessels of `image` and thins them
    pub fn run(&self, image: &RgbImage) -> PreprocessResult<PreprocessOutput> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(PreprocessError::EmptyImage { width, height });
        }

        let vessels = self.segment(image);
        let skeleton = Skeletonizer::skeletonize(&vessels);
        log::info!(
            "Segmented {}x{} image: {} vessel pixels, {} skeleton pixels",
            width,
            height,
            vessels.count(),
            skeleton.count()
        );

        Ok(PreprocessOutput { vessels, skeleton })
    }

    fn segment(&self, image: &RgbImage) -> Mask {
        let cfg = &self.cfg;
        let green = green_channel(image);
        let flat = background::flatten_illumination(&green, cfg);
        log::debug!("Background removed");

        let binary =
            threshold::adaptive_threshold_inv(&flat, cfg.threshold_sigma(), cfg.threshold_offset);
        let smoothed = cleanup::close_then_open(
            &binary,
            PreprocessConfig::radius(cfg.closing_size),
            PreprocessConfig::radius(cfg.opening_size),
        );
        let cleaned = cleanup::remove_small_areas(&smoothed, cfg.min_area);
        mask_from_gray(&cleaned)
    }
}
