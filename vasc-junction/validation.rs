use crate::ring::{RingCache, RingTemplate};
use rayon::prelude::*;
use vasc_core::{Junction, JunctionKind, JunctionSet, Mask, WidthTaggedCandidate};

/// Geometric confirmation of candidates with a ring sized from the vessel width
pub struct AnnulusValidator;

impl AnnulusValidator {
    /// Confirm candidates whose ring overlap matches their degree.
    ///
    /// Candidates whose ring would leave the skeleton, and any degree/overlap
    /// mismatch, are dropped without diagnostics.
    pub fn validate(
        candidates: &[WidthTaggedCandidate],
        skeleton: &Mask,
        ring_scale: usize,
    ) -> JunctionSet {
        let cache = Self::ring_cache(candidates, skeleton, ring_scale);

        let confirmed: Vec<Junction> = candidates
            .par_iter()
            .filter_map(|tagged| Self::validate_one(tagged, skeleton, ring_scale, &cache))
            .collect();

        confirmed.into_iter().collect()
    }

    /// Templates for the candidates whose ring fits inside the skeleton
    pub fn ring_cache(
        candidates: &[WidthTaggedCandidate],
        skeleton: &Mask,
        ring_scale: usize,
    ) -> RingCache {
        RingCache::for_diameters(
            candidates
                .iter()
                .filter_map(|tagged| Self::fitting_diameter(tagged, skeleton, ring_scale)),
        )
    }

    pub fn validate_one(
        tagged: &WidthTaggedCandidate,
        skeleton: &Mask,
        ring_scale: usize,
        cache: &RingCache,
    ) -> Option<Junction> {
        let diameter = Self::fitting_diameter(tagged, skeleton, ring_scale)?;
        let (row, col) = (tagged.candidate.row, tagged.candidate.col);

        let built;
        let ring = match cache.get(diameter) {
            Some(ring) => ring,
            None => {
                built = RingTemplate::new(diameter);
                &built
            }
        };

        let overlap = Self::overlap(skeleton, row, col, ring);
        Self::classify(tagged.candidate.degree, overlap).map(|kind| Junction::new(row, col, kind))
    }

    /// Ring diameter for `tagged`, or `None` when the ring would leave the skeleton
    fn fitting_diameter(
        tagged: &WidthTaggedCandidate,
        skeleton: &Mask,
        ring_scale: usize,
    ) -> Option<usize> {
        let diameter = Self::ring_diameter(tagged.diameter, ring_scale)?;
        let (row, col) = (tagged.candidate.row, tagged.candidate.col);
        Self::fits(skeleton, row, col, diameter / 2).then_some(diameter)
    }

    /// `ring_scale * width`, bumped to the next odd value; `None` on overflow
    pub fn ring_diameter(width: usize, ring_scale: usize) -> Option<usize> {
        let diameter = ring_scale.checked_mul(width)?;
        if diameter % 2 == 0 {
            diameter.checked_add(1)
        } else {
            Some(diameter)
        }
    }

    /// Whether a `(2 * radius + 1)` window centered at `(row, col)` lies inside the mask
    pub fn fits(mask: &Mask, row: usize, col: usize, radius: usize) -> bool {
        row >= radius
            && col >= radius
            && radius < mask.rows().saturating_sub(row)
            && radius < mask.cols().saturating_sub(col)
    }

    /// Skeleton pixels lying on the ring centered at `(row, col)`
    pub fn overlap(skeleton: &Mask, row: usize, col: usize, ring: &RingTemplate) -> usize {
        let (r, c) = (row as isize, col as isize);
        ring.offsets()
            .iter()
            .filter(|&&(dr, dc)| skeleton.get_signed(r + dr, c + dc))
            .count()
    }

    /// 3/3 is a bifurcation, 4/4 an intersection, anything else is noise
    pub fn classify(degree: u8, overlap: usize) -> Option<JunctionKind> {
        JunctionKind::from_arms(overlap).filter(|kind| kind.arms() == degree as usize)
    }
}
