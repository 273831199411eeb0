use crate::candidates::CandidateFinder;
use crate::error::{JunctionError, JunctionResult};
use crate::types::DetectionTrace;
use crate::validation::AnnulusValidator;
use crate::width::WidthEstimator;
use vasc_core::{Candidate, JunctionSet, Mask, VascConfig, WidthTaggedCandidate};

/// Junction detector for vessel masks of a fixed size
#[derive(Debug, Clone)]
pub struct JunctionDetector {
    cfg: VascConfig,
    rows: usize,
    cols: usize,
}

impl JunctionDetector {
    /// Creates a new junction detector with validation
    pub fn new(cfg: VascConfig, rows: usize, cols: usize) -> JunctionResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(JunctionError::InvalidDimensions { rows, cols });
        }
        if cfg.ring_scale == 0 {
            return Err(JunctionError::InvalidRingScale(cfg.ring_scale));
        }
        if cfg.n_threads == 0 {
            return Err(JunctionError::InvalidThreadCount(cfg.n_threads));
        }

        Ok(Self { cfg, rows, cols })
    }

    /// Both masks must match the detector's dimensions
    fn validate_masks(&self, vessels: &Mask, skeleton: &Mask) -> JunctionResult<()> {
        if vessels.dimensions() != skeleton.dimensions() {
            return Err(JunctionError::DimensionMismatch {
                vessels: vessels.dimensions(),
                skeleton: skeleton.dimensions(),
            });
        }
        self.validate_mask(skeleton)
    }

    fn validate_mask(&self, mask: &Mask) -> JunctionResult<()> {
        if mask.dimensions() != (self.rows, self.cols) {
            return Err(JunctionError::InvalidMaskData {
                expected_len: self.rows * self.cols,
                actual_len: mask.rows() * mask.cols(),
            });
        }
        Ok(())
    }

    pub fn find_candidates(&self, skeleton: &Mask) -> JunctionResult<Vec<Candidate>> {
        self.validate_mask(skeleton)?;
        Ok(CandidateFinder::find(skeleton))
    }

    pub fn estimate_widths(
        &self,
        vessels: &Mask,
        candidates: &[Candidate],
    ) -> JunctionResult<Vec<WidthTaggedCandidate>> {
        self.validate_mask(vessels)?;
        Ok(WidthEstimator::estimate(vessels, candidates))
    }

    pub fn validate_candidates(
        &self,
        skeleton: &Mask,
        measured: &[WidthTaggedCandidate],
    ) -> JunctionResult<JunctionSet> {
        self.validate_mask(skeleton)?;
        Ok(AnnulusValidator::validate(measured, skeleton, self.cfg.ring_scale))
    }

    /// Run the three stages and keep their intermediate outputs
    pub fn detect_with_trace(
        &self,
        vessels: &Mask,
        skeleton: &Mask,
    ) -> JunctionResult<DetectionTrace> {
        self.validate_masks(vessels, skeleton)?;

        let candidates = CandidateFinder::find(skeleton);
        log::debug!(
            "{} candidate points on {} skeleton pixels",
            candidates.len(),
            skeleton.count()
        );

        let measured = WidthEstimator::estimate(vessels, &candidates);
        log::debug!(
            "vessel widths measured, {} of {} candidates have zero width",
            measured.iter().filter(|m| m.diameter == 0).count(),
            measured.len()
        );

        let junctions = AnnulusValidator::validate(&measured, skeleton, self.cfg.ring_scale);
        log::debug!(
            "{} bifurcations and {} intersections confirmed",
            junctions.bifurcations.len(),
            junctions.intersections.len()
        );

        Ok(DetectionTrace {
            candidates,
            measured,
            junctions,
        })
    }

    /// Detect bifurcations and intersections from a vessel mask and its skeleton
    pub fn detect(&self, vessels: &Mask, skeleton: &Mask) -> JunctionResult<JunctionSet> {
        Ok(self.detect_with_trace(vessels, skeleton)?.junctions)
    }

    /// Get detector configuration
    pub fn config(&self) -> &VascConfig {
        &self.cfg
    }

    /// `(rows, cols)` the detector accepts
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}
