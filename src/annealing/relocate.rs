//! Partition relocation move operator.
//!
//! # Algorithm
//!
//! One uniform draw picks the move direction: A→B when the draw is ≥ 0.5
//! and side A is non-empty, or whenever side B is empty; B→A otherwise. The
//! departing target is then drawn with probability proportional to an
//! inverse power of its distance to the opposite depot, so targets sitting
//! near the other depot are the likeliest to defect. A side with a single
//! candidate gives it up with probability 1.
//!
//! The Metropolis accept/reject on the candidate's combined score is the
//! caller's job; this operator only proposes.

use rand::Rng;

use crate::models::{Depots, Partition, Side};

use super::config::MoveWeighting;

/// Floor applied to depot distances so a target coincident with the
/// opposite depot keeps a finite (if enormous) weight.
const MIN_DISTANCE: f64 = 1e-9;

/// Proposes a neighbor partition by relocating one target to the other
/// side. Returns the partition unchanged when the working set is empty.
///
/// # Examples
///
/// ```
/// use bitour::annealing::{propose_relocation, MoveWeighting};
/// use bitour::models::{Depots, Partition, Point, Side, Target};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let depots = Depots::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
/// let partition = Partition::new(vec![Target::new(0, 1.0, 0.0)], vec![]).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let candidate = propose_relocation(&partition, &depots, &MoveWeighting::default(), &mut rng);
/// // Side B was empty, so the single target is forced across.
/// assert_eq!(candidate.side(Side::B).len(), 1);
/// ```
pub fn propose_relocation<R: Rng>(
    partition: &Partition,
    depots: &Depots,
    weighting: &MoveWeighting,
    rng: &mut R,
) -> Partition {
    if partition.is_empty() {
        return partition.clone();
    }

    let side_a = partition.side(Side::A);
    let side_b = partition.side(Side::B);

    let draw: f64 = rng.random_range(0.0..1.0);
    let (from, exponent) =
        if (draw >= 0.5 && !side_a.is_empty()) || (draw < 0.5 && side_b.is_empty()) {
            (Side::A, weighting.a_to_b_exponent)
        } else {
            (Side::B, weighting.b_to_a_exponent)
        };

    let opposite = depots.get(from.other());
    let weights: Vec<f64> = partition
        .side(from)
        .iter()
        .map(|t| t.distance_to(&opposite).max(MIN_DISTANCE).powf(-exponent))
        .collect();

    let index = weighted_index(&weights, rng);
    let mut candidate = partition.clone();
    candidate.relocate(from, index);
    candidate
}

/// Cumulative-sum weighted draw over positive finite weights.
fn weighted_index<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    let mut remaining = rng.random_range(0.0..total);
    for (index, weight) in weights.iter().enumerate() {
        if remaining < *weight {
            return index;
        }
        remaining -= weight;
    }
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Point, Target};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn depots() -> Depots {
        Depots::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
    }

    #[test]
    fn test_empty_working_set_is_identity() {
        let partition = Partition::new(vec![], vec![]).expect("disjoint");
        let mut rng = StdRng::seed_from_u64(42);
        let candidate =
            propose_relocation(&partition, &depots(), &MoveWeighting::default(), &mut rng);
        assert_eq!(candidate, partition);
    }

    #[test]
    fn test_moves_exactly_one_target() {
        let partition = Partition::new(
            vec![Target::new(0, 1.0, 0.0), Target::new(1, 2.0, 0.0)],
            vec![Target::new(2, 9.0, 0.0)],
        )
        .expect("disjoint");
        let mut rng = StdRng::seed_from_u64(42);

        let candidate =
            propose_relocation(&partition, &depots(), &MoveWeighting::default(), &mut rng);
        assert_eq!(candidate.total_targets(), 3);
        let moved = (candidate.side(Side::A).len() as i64
            - partition.side(Side::A).len() as i64)
            .abs();
        assert_eq!(moved, 1);
    }

    #[test]
    fn test_forced_move_when_b_empty() {
        let partition =
            Partition::new(vec![Target::new(0, 1.0, 0.0)], vec![]).expect("disjoint");
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let candidate =
                propose_relocation(&partition, &depots(), &MoveWeighting::default(), &mut rng);
            assert!(candidate.side(Side::A).is_empty());
            assert_eq!(candidate.side(Side::B).len(), 1);
        }
    }

    #[test]
    fn test_a_empty_moves_from_b() {
        let partition =
            Partition::new(vec![], vec![Target::new(0, 9.0, 0.0)]).expect("disjoint");
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let candidate =
                propose_relocation(&partition, &depots(), &MoveWeighting::default(), &mut rng);
            assert_eq!(candidate.side(Side::A).len(), 1);
            assert!(candidate.side(Side::B).is_empty());
        }
    }

    #[test]
    fn test_partition_invariant_over_many_steps() {
        let targets: Vec<Target> = (0..8)
            .map(|i| Target::new(i, i as f64, (i % 3) as f64))
            .collect();
        let original_ids: HashSet<usize> = targets.iter().map(|t| t.id()).collect();

        let mut partition = Partition::new(targets, vec![]).expect("disjoint");
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            partition =
                propose_relocation(&partition, &depots(), &MoveWeighting::default(), &mut rng);

            let ids_a: HashSet<usize> =
                partition.side(Side::A).iter().map(|t| t.id()).collect();
            let ids_b: HashSet<usize> =
                partition.side(Side::B).iter().map(|t| t.id()).collect();
            assert!(ids_a.is_disjoint(&ids_b));
            let union: HashSet<usize> = ids_a.union(&ids_b).copied().collect();
            assert_eq!(union, original_ids);
        }
    }

    #[test]
    fn test_proximity_bias() {
        // Target 1 sits on top of depot B; target 0 sits far from it. With
        // inverse-squared weighting, target 1 should leave side A in the
        // overwhelming majority of proposals.
        let partition = Partition::new(
            vec![Target::new(0, 0.5, 0.0), Target::new(1, 10.0, 0.0)],
            vec![],
        )
        .expect("disjoint");

        let mut near_moves = 0;
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let candidate =
                propose_relocation(&partition, &depots(), &MoveWeighting::default(), &mut rng);
            if candidate.side(Side::B)[0].id() == 1 {
                near_moves += 1;
            }
        }
        assert!(near_moves >= 90, "only {near_moves}/100 moved the near target");
    }

    #[test]
    fn test_weighted_index_degenerate_single() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(weighted_index(&[3.5], &mut rng), 0);
        }
    }

    #[test]
    fn test_weighted_index_respects_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let weights = [1.0, 9999.0];
        let mut heavy = 0;
        for _ in 0..100 {
            if weighted_index(&weights, &mut rng) == 1 {
                heavy += 1;
            }
        }
        assert!(heavy >= 95, "heavy weight picked only {heavy}/100 times");
    }
}
