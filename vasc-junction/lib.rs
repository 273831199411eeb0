//! Bifurcation and intersection detection on skeletonized vessel masks.
//!
//! Detection runs in three stages over a binary vessel mask and its
//! one-pixel-wide skeleton:
//!
//! 1. [`CandidateFinder`] keeps skeleton pixels whose 3x3 ring holds 3 or 4 pixels.
//! 2. [`WidthEstimator`] measures the vessel diameter at each candidate.
//! 3. [`AnnulusValidator`] counts skeleton crossings on a ring three widths wide
//!    and keeps candidates whose crossing count matches their degree.

pub mod builder;
pub mod candidates;
pub mod detector;
pub mod error;
pub mod ring;
pub mod types;
pub mod validation;
pub mod width;

pub use builder::DetectorBuilder;
pub use candidates::CandidateFinder;
pub use detector::JunctionDetector;
pub use error::{JunctionError, JunctionResult};
pub use ring::{RingCache, RingTemplate};
pub use types::DetectionTrace;
pub use validation::AnnulusValidator;
pub use width::WidthEstimator;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vasc_core::{JunctionKind, Mask, VascConfig};

    fn create_test_config() -> VascConfig {
        VascConfig {
            ring_scale: 3,
            n_threads: 1,
        }
    }

    fn band_cross(size: usize, lo: usize, hi: usize) -> Mask {
        Mask::from_fn(size, size, |r, c| (lo..=hi).contains(&r) || (lo..=hi).contains(&c))
    }

    fn dilate(mask: &Mask) -> Mask {
        Mask::from_fn(mask.rows(), mask.cols(), |r, c| {
            (-1isize..=1).any(|dr| {
                (-1isize..=1).any(|dc| mask.get_signed(r as isize + dr, c as isize + dc))
            })
        })
    }

    #[test]
    fn test_valid_constructor() {
        let detector = JunctionDetector::new(create_test_config(), 100, 80);
        assert!(detector.is_ok());
        assert_eq!(detector.unwrap().dimensions(), (100, 80));
    }

    #[test]
    fn test_invalid_dimensions() {
        let result = JunctionDetector::new(create_test_config(), 0, 100);
        assert!(matches!(result, Err(JunctionError::InvalidDimensions { .. })));

        let result = JunctionDetector::new(create_test_config(), 100, 0);
        assert!(matches!(result, Err(JunctionError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_invalid_config() {
        let mut cfg = create_test_config();
        cfg.ring_scale = 0;
        let result = JunctionDetector::new(cfg, 10, 10);
        assert!(matches!(result, Err(JunctionError::InvalidRingScale(0))));

        let mut cfg = create_test_config();
        cfg.n_threads = 0;
        let result = JunctionDetector::new(cfg, 10, 10);
        assert!(matches!(result, Err(JunctionError::InvalidThreadCount(0))));
    }

    #[test]
    fn test_mismatched_masks() {
        let detector = JunctionDetector::new(create_test_config(), 20, 20).unwrap();
        let vessels = Mask::new(20, 20);
        let skeleton = Mask::new(20, 21);
        let result = detector.detect(&vessels, &skeleton);
        assert!(matches!(result, Err(JunctionError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_masks_of_wrong_size() {
        let detector = JunctionDetector::new(create_test_config(), 20, 20).unwrap();
        let vessels = Mask::new(10, 10);
        let skeleton = Mask::new(10, 10);
        let result = detector.detect(&vessels, &skeleton);
        assert!(matches!(result, Err(JunctionError::InvalidMaskData { .. })));
    }

    #[test]
    fn test_empty_masks() {
        let detector = JunctionDetector::new(create_test_config(), 30, 30).unwrap();
        let junctions = detector.detect(&Mask::new(30, 30), &Mask::new(30, 30)).unwrap();
        assert!(junctions.is_empty());
    }

    #[test]
    fn test_plus_crossing_end_to_end() {
        let vessels = band_cross(61, 28, 31);
        let skeleton = Mask::from_fn(61, 61, |r, c| r == 30 || c == 30);
        let detector = JunctionDetector::new(create_test_config(), 61, 61).unwrap();

        let trace = detector.detect_with_trace(&vessels, &skeleton).unwrap();
        assert!(trace.candidates.iter().any(|c| (c.row, c.col, c.degree) == (30, 30, 4)));

        let center = trace
            .measured
            .iter()
            .find(|m| (m.candidate.row, m.candidate.col) == (30, 30))
            .unwrap();
        // Four pixels wide, center counted by both half-walks of the diagonal
        assert_eq!(center.diameter, 5);
        assert_eq!(AnnulusValidator::ring_diameter(center.diameter, 3), Some(15));

        // The center and its four neighbours all see four arms on the skeleton
        let cluster = vec![(29, 30), (30, 29), (30, 30), (30, 31), (31, 30)];
        let candidates: Vec<_> = trace.candidates.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(candidates, cluster);
        assert!(trace.candidates.iter().all(|c| c.degree == 4));

        let junctions = trace.junctions;
        assert!(junctions.bifurcations.is_empty());
        let confirmed: Vec<_> = junctions.intersections.iter().map(|j| (j.row, j.col)).collect();
        assert_eq!(confirmed, cluster);
    }

    #[test]
    fn test_diagonal_crossing_yields_single_intersection() {
        // Five-pixel-wide diagonal vessels: width 6 gives a radius-9 ring that the
        // diagonals cross at (+-7, +-7)
        let vessels = Mask::from_fn(41, 41, |r, c| r.abs_diff(c) <= 2 || (r + c).abs_diff(40) <= 2);
        let skeleton = Mask::from_fn(41, 41, |r, c| r == c || r + c == 40);
        let detector = JunctionDetector::new(create_test_config(), 41, 41).unwrap();

        let junctions = detector.detect(&vessels, &skeleton).unwrap();
        assert!(junctions.bifurcations.is_empty());
        assert_eq!(junctions.intersections.len(), 1);
        assert_eq!((junctions.intersections[0].row, junctions.intersections[0].col), (20, 20));
    }

    #[test]
    fn test_t_branch_end_to_end() {
        let vessels = Mask::from_fn(41, 41, |r, c| {
            (19..=21).contains(&r) || ((19..=21).contains(&c) && r >= 19)
        });
        let skeleton = Mask::from_fn(41, 41, |r, c| r == 20 || (c == 20 && r >= 20));
        let detector = JunctionDetector::new(create_test_config(), 41, 41).unwrap();

        let junctions = detector.detect(&vessels, &skeleton).unwrap();
        assert!(junctions.intersections.is_empty());
        assert!(junctions.bifurcations.iter().any(|j| (j.row, j.col) == (20, 20)));
    }

    #[test]
    fn test_straight_vessel_has_no_junctions() {
        let vessels = Mask::from_fn(30, 30, |r, _| (13..=16).contains(&r));
        let skeleton = Mask::from_fn(30, 30, |r, _| r == 15);
        let detector = JunctionDetector::new(create_test_config(), 30, 30).unwrap();

        let trace = detector.detect_with_trace(&vessels, &skeleton).unwrap();
        assert!(trace.candidates.is_empty());
        assert!(trace.junctions.is_empty());
        assert_eq!(trace.rejected(), 0);
    }

    #[test]
    fn test_huge_ring_scale_does_not_panic() {
        let vessels = Mask::from_fn(41, 41, |r, c| {
            (19..=21).contains(&r) || ((19..=21).contains(&c) && r >= 19)
        });
        let skeleton = Mask::from_fn(41, 41, |r, c| r == 20 || (c == 20 && r >= 20));

        for ring_scale in [usize::MAX / 4, usize::MAX] {
            let cfg = VascConfig {
                ring_scale,
                n_threads: 1,
            };
            let detector = JunctionDetector::new(cfg, 41, 41).unwrap();
            let trace = detector.detect_with_trace(&vessels, &skeleton).unwrap();
            assert!(!trace.candidates.is_empty());
            assert!(trace.junctions.is_empty());
        }
    }

    #[test]
    fn test_stages_match_detect() {
        let vessels = Mask::from_fn(41, 41, |r, c| {
            (19..=21).contains(&r) || ((19..=21).contains(&c) && r >= 19)
        });
        let skeleton = Mask::from_fn(41, 41, |r, c| r == 20 || (c == 20 && r >= 20));
        let detector = JunctionDetector::new(create_test_config(), 41, 41).unwrap();

        let candidates = detector.find_candidates(&skeleton).unwrap();
        let measured = detector.estimate_widths(&vessels, &candidates).unwrap();
        assert_eq!(measured.len(), candidates.len());
        let junctions = detector.validate_candidates(&skeleton, &measured).unwrap();
        assert_eq!(junctions, detector.detect(&vessels, &skeleton).unwrap());
    }

    #[test]
    fn test_stages_reject_wrong_size() {
        let detector = JunctionDetector::new(create_test_config(), 20, 20).unwrap();
        let small = Mask::new(10, 20);
        let expected = JunctionError::InvalidMaskData {
            expected_len: 400,
            actual_len: 200,
        };

        assert_eq!(detector.find_candidates(&small), Err(expected.clone()));
        assert_eq!(detector.estimate_widths(&small, &[]), Err(expected.clone()));
        assert_eq!(detector.validate_candidates(&small, &[]), Err(expected));
    }

    #[test]
    fn test_builder() {
        let builder = DetectorBuilder::new(64, 48).ring_scale(4).threads(2);
        assert!(builder.summary().contains("ring_scale=4"));
        let detector = builder.build().unwrap();
        assert_eq!(detector.config().ring_scale, 4);
        assert_eq!(detector.config().n_threads, 2);
        assert_eq!(detector.dimensions(), (64, 48));

        assert!(DetectorBuilder::new(64, 48).ring_scale(0).build().is_err());
    }

    #[test]
    fn test_parallel_safety() {
        let vessels = band_cross(61, 28, 31);
        let skeleton = Mask::from_fn(61, 61, |r, c| r == 30 || c == 30);
        let detector = JunctionDetector::new(create_test_config(), 61, 61).unwrap();

        let first = detector.detect(&vessels, &skeleton).unwrap();
        for _ in 0..10 {
            assert_eq!(detector.detect(&vessels, &skeleton).unwrap(), first);
        }
    }

    const SIZE: usize = 24;

    fn arb_mask(density: f64) -> impl Strategy<Value = Mask> {
        proptest::collection::vec(proptest::bool::weighted(density), SIZE * SIZE)
            .prop_map(|data| Mask::from_vec(SIZE, SIZE, data).unwrap())
    }

    proptest! {
        #[test]
        fn prop_candidates_avoid_border(skeleton in arb_mask(0.3)) {
            for c in CandidateFinder::find(&skeleton) {
                prop_assert!(c.row >= 1 && c.row <= SIZE - 2);
                prop_assert!(c.col >= 1 && c.col <= SIZE - 2);
                prop_assert!(c.degree == 3 || c.degree == 4);
                let ring_sum = CandidateFinder::ring_sum(&skeleton, c.row, c.col);
                prop_assert_eq!(ring_sum, c.degree as usize);
            }
        }

        #[test]
        fn prop_junctions_agree_with_degree_and_overlap(
            vessels in arb_mask(0.7),
            skeleton in arb_mask(0.25),
        ) {
            let detector = JunctionDetector::new(create_test_config(), SIZE, SIZE).unwrap();
            let trace = detector.detect_with_trace(&vessels, &skeleton).unwrap();

            for junction in trace.junctions.iter() {
                let measured = trace
                    .measured
                    .iter()
                    .find(|m| m.candidate.row == junction.row && m.candidate.col == junction.col)
                    .unwrap();
                let diameter = AnnulusValidator::ring_diameter(measured.diameter, 3).unwrap();
                let radius = diameter / 2;
                prop_assert!(AnnulusValidator::fits(&skeleton, junction.row, junction.col, radius));

                let overlap = AnnulusValidator::overlap(
                    &skeleton,
                    junction.row,
                    junction.col,
                    &RingTemplate::new(diameter),
                );
                prop_assert_eq!(measured.candidate.degree as usize, junction.kind.arms());
                prop_assert_eq!(overlap, junction.kind.arms());
            }
        }

        #[test]
        fn prop_bifurcations_and_intersections_are_disjoint(
            vessels in arb_mask(0.7),
            skeleton in arb_mask(0.25),
        ) {
            let detector = JunctionDetector::new(create_test_config(), SIZE, SIZE).unwrap();
            let junctions = detector.detect(&vessels, &skeleton).unwrap();
            for b in &junctions.bifurcations {
                prop_assert_eq!(b.kind, JunctionKind::Bifurcation);
                let crossed = junctions
                    .intersections
                    .iter()
                    .any(|i| (i.row, i.col) == (b.row, b.col));
                prop_assert!(!crossed);
            }
            for i in &junctions.intersections {
                prop_assert_eq!(i.kind, JunctionKind::Intersection);
            }
        }

        #[test]
        fn prop_dilation_never_narrows_vessels(
            vessels in arb_mask(0.5),
            row in 0..SIZE,
            col in 0..SIZE,
        ) {
            let wider = dilate(&vessels);
            prop_assert!(
                WidthEstimator::diameter_at(&wider, row, col)
                    >= WidthEstimator::diameter_at(&vessels, row, col)
            );
        }

        #[test]
        fn prop_ring_template_is_deterministic(diameter in 0usize..80) {
            let ring = RingTemplate::new(diameter);
            prop_assert_eq!(&ring, &RingTemplate::new(diameter));
            prop_assert_eq!(ring.diameter() % 2, 1);
            prop_assert!(ring.len() <= ring.diameter() * ring.diameter());
        }
    }
}
