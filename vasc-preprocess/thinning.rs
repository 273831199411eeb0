use rayon::prelude::*;
use vasc_core::Mask;

/// Neighbors P2..P9 clockwise from north
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Peels south-east boundary and north-west corners
    First,
    /// Peels north-west boundary and south-east corners
    Second,
}

/// Zhang-Suen thinning down to one-pixel-wide centerlines
pub struct Skeletonizer;

impl Skeletonizer {
    pub fn skeletonize(mask: &Mask) -> Mask {
        let mut current = mask.clone();
        let mut iterations = 0usize;
        loop {
            let removed =
                Self::pass(&mut current, Step::First) + Self::pass(&mut current, Step::Second);
            iterations += 1;
            if removed == 0 {
                break;
            }
        }
        log::debug!(
            "Thinning converged after {} iterations: {} -> {} pixels",
            iterations,
            mask.count(),
            current.count()
        );
        current
    }

    fn pass(mask: &mut Mask, step: Step) -> usize {
        let snapshot: &Mask = mask;
        let doomed: Vec<(usize, usize)> = (0..snapshot.rows())
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..snapshot.cols())
                    .filter(move |&col| {
                        snapshot.get(row, col) && Self::deletable(snapshot, row, col, step)
                    })
                    .map(move |col| (row, col))
            })
            .collect();

        for &(row, col) in &doomed {
            mask.set(row, col, false);
        }
        doomed.len()
    }

    fn deletable(mask: &Mask, row: usize, col: usize, step: Step) -> bool {
        let mut p = [false; 8];
        for (slot, &(dr, dc)) in p.iter_mut().zip(NEIGHBORS.iter()) {
            *slot = mask.get_signed(row as isize + dr, col as isize + dc);
        }

        let set = p.iter().filter(|&&v| v).count();
        if !(2..=6).contains(&set) {
            return false;
        }

        let transitions = (0..8).filter(|&i| !p[i] && p[(i + 1) % 8]).count();
        if transitions != 1 {
            return false;
        }

        let (n, e, s, w) = (p[0], p[2], p[4], p[6]);
        match step {
            Step::First => !(n && e && s) && !(e && s && w),
            Step::Second => !(n && e && w) && !(n && s && w),
        }
    }
}
