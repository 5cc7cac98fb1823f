//! Euclidean distance and tour scoring.
//!
//! - [`distance`] — Euclidean distance between two points
//! - [`tour_length`] — closed-cycle length of a permutation over a point
//!   sequence; exposed so reporting layers can recompute tour lengths
//!   without re-running the search
//! - [`DistanceMatrix`] — dense pairwise distances for the inner loop

mod matrix;

pub use matrix::DistanceMatrix;

use crate::models::Point;

/// Euclidean distance between two points.
///
/// Pure and total for all finite inputs.
pub fn distance(a: &Point, b: &Point) -> f64 {
    a.distance_to(b)
}

/// Length of the closed tour visiting `points` in `permutation` order.
///
/// Position `i` connects to position `i − 1` with wrap-around, so the tour
/// is a closed cycle. A single point (or an empty sequence) scores 0.0.
///
/// # Panics
///
/// Panics if `permutation` indexes outside `points`.
///
/// # Examples
///
/// ```
/// use bitour::distance::tour_length;
/// use bitour::models::Point;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 0.0),
///     Point::new(3.0, 4.0),
/// ];
/// // 3 + 4 + 5 around the triangle
/// assert!((tour_length(&points, &[0, 1, 2]) - 12.0).abs() < 1e-10);
/// ```
pub fn tour_length(points: &[Point], permutation: &[usize]) -> f64 {
    let n = permutation.len();
    if n <= 1 {
        return 0.0;
    }
    let mut total = 0.0;
    for i in 0..n {
        let prev = permutation[(i + n - 1) % n];
        total += points[permutation[i]].distance_to(&points[prev]);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance_matches_point_method() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_tour_length_single_point_is_zero() {
        let points = vec![Point::new(123.0, -456.0)];
        assert_eq!(tour_length(&points, &[0]), 0.0);
    }

    #[test]
    fn test_tour_length_empty_is_zero() {
        assert_eq!(tour_length(&[], &[]), 0.0);
    }

    #[test]
    fn test_tour_length_matches_matrix() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 5.0),
        ];
        let dm = DistanceMatrix::from_points(&points);
        let perm = [2, 0, 3, 1];
        assert!((tour_length(&points, &perm) - dm.cycle_length(&perm)).abs() < 1e-10);
    }

    fn rotated(permutation: &[usize], by: usize) -> Vec<usize> {
        let n = permutation.len();
        (0..n).map(|i| permutation[(i + by) % n]).collect()
    }

    proptest! {
        #[test]
        fn test_tour_length_rotation_invariant(
            coords in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..12),
            by in 0usize..12,
        ) {
            let points: Vec<Point> = coords.iter().map(|&(x, y)| Point::new(x, y)).collect();
            let permutation: Vec<usize> = (0..points.len()).collect();
            let base = tour_length(&points, &permutation);
            let turned = tour_length(&points, &rotated(&permutation, by % points.len()));
            prop_assert!((base - turned).abs() < 1e-9 * (1.0 + base));
        }

        #[test]
        fn test_tour_length_reversal_invariant(
            coords in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..12),
        ) {
            let points: Vec<Point> = coords.iter().map(|&(x, y)| Point::new(x, y)).collect();
            let permutation: Vec<usize> = (0..points.len()).collect();
            let reversed: Vec<usize> = permutation.iter().rev().copied().collect();
            let base = tour_length(&points, &permutation);
            let back = tour_length(&points, &reversed);
            prop_assert!((base - back).abs() < 1e-9 * (1.0 + base));
        }
    }
}
