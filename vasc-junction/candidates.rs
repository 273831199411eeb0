use rayon::prelude::*;
use vasc_core::{Candidate, Mask};

/// Candidate branch/crossing detection on a skeleton
pub struct CandidateFinder;

impl CandidateFinder {
    /// The 8 pixels surrounding a center, clockwise from north-west
    pub const RING_OFFSETS: [(isize, isize); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
        (0, -1),
    ];

    /// Scan the skeleton for pixels whose 3x3 ring holds exactly 3 or 4 foreground pixels.
    ///
    /// Pixels on the outermost row or column are never reported. The result is in
    /// raster order.
    pub fn find(skeleton: &Mask) -> Vec<Candidate> {
        let (rows, cols) = skeleton.dimensions();
        if rows < 3 || cols < 3 {
            return Vec::new();
        }

        (1..rows - 1)
            .into_par_iter()
            .flat_map_iter(|row| {
                let mut v = Vec::new();
                for col in 1..cols - 1 {
                    if !skeleton.get(row, col) {
                        continue;
                    }
                    let degree = Self::ring_sum(skeleton, row, col);
                    if degree == 3 || degree == 4 {
                        v.push(Candidate::new(row, col, degree as u8));
                    }
                }
                v
            })
            .collect()
    }

    /// Count of foreground pixels in the 3x3 ring, center excluded
    #[inline]
    pub fn ring_sum(skeleton: &Mask, row: usize, col: usize) -> usize {
        let (r, c) = (row as isize, col as isize);
        Self::RING_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| skeleton.get_signed(r + dr, c + dc))
            .count()
    }
}
