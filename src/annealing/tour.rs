//! Inner tour optimization by simulated annealing.
//!
//! # Algorithm
//!
//! Starts from a uniform random shuffle of the point indices, then repeats:
//! swap two distinct positions (a single transposition), score the closed
//! cycle, and accept by the Metropolis criterion. The temperature decays
//! geometrically after every candidate evaluation, so the number of
//! evaluations depends only on the schedule; each evaluation costs O(n).
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

use rand::seq::SliceRandom;
use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::models::Point;

use super::config::Schedule;

/// Result of one tour optimization run.
#[derive(Debug, Clone)]
pub struct TourResult {
    /// The best permutation seen, a bijection over `0..points.len()`.
    pub permutation: Vec<usize>,

    /// Cycle length of `permutation`; a lower bound over every candidate
    /// evaluated during the run.
    pub best_score: f64,

    /// Highest cycle length among every candidate evaluated.
    pub worst_score: f64,
}

/// Optimizes a closed tour over `points` by simulated annealing.
///
/// Sequences of length ≤ 1 are degenerate: the score is 0.0 and no moves
/// are attempted. The caller is expected to pass a validated `schedule`.
///
/// # Examples
///
/// ```
/// use bitour::annealing::{optimize_tour, Schedule};
/// use bitour::models::Point;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
/// ];
/// let mut rng = StdRng::seed_from_u64(42);
/// let result = optimize_tour(&points, &Schedule::new(300.0, 1.0, 0.95), &mut rng);
/// assert_eq!(result.permutation.len(), 3);
/// assert!(result.best_score <= result.worst_score);
/// ```
pub fn optimize_tour<R: Rng>(points: &[Point], schedule: &Schedule, rng: &mut R) -> TourResult {
    let n = points.len();
    let mut current: Vec<usize> = (0..n).collect();
    current.shuffle(rng);

    if n <= 1 {
        return TourResult {
            permutation: current,
            best_score: 0.0,
            worst_score: 0.0,
        };
    }

    let distances = DistanceMatrix::from_points(points);
    let mut current_score = distances.cycle_length(&current);
    let mut best = current.clone();
    let mut best_score = current_score;
    let mut worst_score = current_score;

    let mut temperature = schedule.initial_temperature;
    while temperature > schedule.stopping_temperature {
        let candidate = transpose(&current, rng);
        let candidate_score = distances.cycle_length(&candidate);

        if candidate_score < best_score {
            best.clone_from(&candidate);
            best_score = candidate_score;
        }
        worst_score = worst_score.max(candidate_score);

        let delta = candidate_score - current_score;
        if delta < 0.0 || rng.random_range(0.0..1.0) < (-delta / temperature).exp() {
            current = candidate;
            current_score = candidate_score;
        }

        temperature *= schedule.decay;
    }

    TourResult {
        permutation: best,
        best_score,
        worst_score,
    }
}

/// Produces a candidate one transposition away: two distinct positions
/// chosen uniformly at random are swapped.
fn transpose<R: Rng>(permutation: &[usize], rng: &mut R) -> Vec<usize> {
    let mut candidate = permutation.to_vec();
    let i = rng.random_range(0..candidate.len());
    let mut j = rng.random_range(0..candidate.len());
    while j == i {
        j = rng.random_range(0..candidate.len());
    }
    candidate.swap(i, j);
    candidate
}
