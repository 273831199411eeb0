use rayon::prelude::*;
use vasc_core::{Candidate, Mask, WidthTaggedCandidate};

/// Opposite direction pairs walked through the vessel mask: along the
/// column index, along the row index, main diagonal, anti-diagonal.
const SPAN_AXES: [((isize, isize), (isize, isize)); 4] = [
    ((0, 1), (0, -1)),
    ((1, 0), (-1, 0)),
    ((1, 1), (-1, -1)),
    ((1, -1), (-1, 1)),
];

/// Local vessel caliber estimation by ray casting
pub struct WidthEstimator;

impl WidthEstimator {
    /// Tag every candidate with its estimated diameter. Order and count are preserved.
    pub fn estimate(vessels: &Mask, candidates: &[Candidate]) -> Vec<WidthTaggedCandidate> {
        candidates
            .par_iter()
            .map(|&candidate| WidthTaggedCandidate {
                candidate,
                diameter: Self::diameter_at(vessels, candidate.row, candidate.col),
            })
            .collect()
    }

    /// Minimum of the four axis spans through `(row, col)`.
    ///
    /// The center pixel is counted once by each half-walk, so a foreground
    /// point always measures at least 2.
    pub fn diameter_at(vessels: &Mask, row: usize, col: usize) -> usize {
        SPAN_AXES
            .iter()
            .map(|&(forward, backward)| {
                Self::walk(vessels, row, col, forward) + Self::walk(vessels, row, col, backward)
            })
            .min()
            .unwrap_or(0)
    }

    /// Steps taken from `(row, col)` while still in bounds and on foreground
    pub fn walk(vessels: &Mask, row: usize, col: usize, (dr, dc): (isize, isize)) -> usize {
        let (mut r, mut c) = (row as isize, col as isize);
        let mut steps = 0;
        while vessels.get_signed(r, c) {
            steps += 1;
            r += dr;
            c += dc;
        }
        steps
    }
}
