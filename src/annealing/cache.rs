//! Partition memoization cache.
//!
//! The outer search revisits partitions constantly (a relocation followed by
//! its reverse restores a previous state), and each evaluation costs a full
//! pair of tour-annealing runs. The cache guarantees at most one such pair
//! per distinct partition: entries are keyed by the sorted side-A target
//! ids, which for a fixed working set determine side B as the complement.
//!
//! Stored tours are target-id orders rather than index permutations, so an
//! entry stays valid when the caller reorders its side arrays; translation
//! back to indices happens against the live arrays on every hit and fails
//! loudly if the working set changed under the key.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::models::{Depots, Partition, Point, Side, Target};

use super::config::Schedule;
use super::tour::optimize_tour;

/// Inconsistency between a cache entry and the live partition.
///
/// Indicates a broken invariant — the working target set changed while a
/// colliding cache key stayed the same — and is never recoverable by
/// retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    /// A cached tour references a target id absent from the live side.
    #[error("cached tour references target id {id} missing from the live partition")]
    UnknownTarget {
        /// The id that could not be resolved.
        id: usize,
    },

    /// A cached tour and the live side disagree on target count.
    #[error("cached tour holds {cached} targets but the live side holds {live}")]
    SideMismatch {
        /// Targets in the cached tour.
        cached: usize,
        /// Targets in the live side.
        live: usize,
    },
}

/// Best tours computed for one partition.
#[derive(Debug, Clone)]
pub struct PlannedTours {
    /// Sum of the two sides' best tour lengths.
    pub combined_score: f64,

    /// Best permutation over side A's tour points, where tour-point index
    /// `side_a.len()` is the depot.
    pub permutation_a: Vec<usize>,

    /// Best permutation over side B's tour points, where tour-point index
    /// `side_b.len()` is the depot.
    pub permutation_b: Vec<usize>,
}

/// One memoized partition: the combined score plus each side's best tour as
/// a depot-last target-id order. Inserted once, never mutated.
#[derive(Debug, Clone)]
struct CacheEntry {
    combined_score: f64,
    order_a: Vec<usize>,
    order_b: Vec<usize>,
}

/// Memoizes fully annealed partitions for one search run.
///
/// Owned by the search runner and passed by `&mut`; [`clear`](Self::clear)
/// resets the entries (the runner does so before the terminal refinement,
/// whose slower schedule changes the scoring characteristics).
///
/// # Examples
///
/// ```
/// use bitour::annealing::{PartitionCache, Schedule};
/// use bitour::models::{Depots, Partition, Point, Target};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let depots = Depots::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
/// let partition = Partition::new(
///     vec![Target::new(0, 1.0, 0.0)],
///     vec![Target::new(1, 9.0, 0.0)],
/// )
/// .unwrap();
///
/// let mut cache = PartitionCache::new();
/// let mut rng = StdRng::seed_from_u64(42);
/// let schedule = Schedule::new(300.0, 1.0, 0.95);
///
/// let first = cache.lookup_or_compute(&partition, &depots, &schedule, &mut rng).unwrap();
/// let second = cache.lookup_or_compute(&partition, &depots, &schedule, &mut rng).unwrap();
/// assert_eq!(first.combined_score, second.combined_score);
/// assert_eq!(cache.misses(), 1);
/// assert_eq!(cache.hits(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PartitionCache {
    entries: HashMap<Vec<usize>, CacheEntry>,
    hits: usize,
    misses: usize,
}

impl PartitionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all entries. Hit/miss counters keep accumulating.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of memoized partitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no partition is memoized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups served from a stored entry.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Lookups that ran the tour optimizer.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Returns the tours for `partition`, annealing both sides only when
    /// the partition has not been seen before.
    ///
    /// On a hit the stored target-id orders are translated back to index
    /// permutations against the live side arrays; any id that cannot be
    /// resolved is a [`CacheError`].
    pub fn lookup_or_compute<R: Rng>(
        &mut self,
        partition: &Partition,
        depots: &Depots,
        schedule: &Schedule,
        rng: &mut R,
    ) -> Result<PlannedTours, CacheError> {
        let key = signature(partition.side(Side::A));

        if let Some(entry) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(PlannedTours {
                combined_score: entry.combined_score,
                permutation_a: translate(&entry.order_a, partition.side(Side::A))?,
                permutation_b: translate(&entry.order_b, partition.side(Side::B))?,
            });
        }
        self.misses += 1;

        // Each side anneals on its own child stream, so the two runs are
        // independent of evaluation order (and of the `parallel` feature).
        let mut rng_a = StdRng::seed_from_u64(rng.random());
        let mut rng_b = StdRng::seed_from_u64(rng.random());
        let points_a = tour_points(partition.side(Side::A), depots.a());
        let points_b = tour_points(partition.side(Side::B), depots.b());

        #[cfg(feature = "parallel")]
        let (result_a, result_b) = rayon::join(
            || optimize_tour(&points_a, schedule, &mut rng_a),
            || optimize_tour(&points_b, schedule, &mut rng_b),
        );
        #[cfg(not(feature = "parallel"))]
        let (result_a, result_b) = (
            optimize_tour(&points_a, schedule, &mut rng_a),
            optimize_tour(&points_b, schedule, &mut rng_b),
        );

        let combined_score = result_a.best_score + result_b.best_score;
        self.entries.insert(
            key,
            CacheEntry {
                combined_score,
                order_a: id_order(&result_a.permutation, partition.side(Side::A)),
                order_b: id_order(&result_b.permutation, partition.side(Side::B)),
            },
        );

        Ok(PlannedTours {
            combined_score,
            permutation_a: result_a.permutation,
            permutation_b: result_b.permutation,
        })
    }
}

/// Canonical cache key: side-A target ids, sorted. Stable under any
/// reordering of the side arrays.
fn signature(targets: &[Target]) -> Vec<usize> {
    let mut ids: Vec<usize> = targets.iter().map(|t| t.id()).collect();
    ids.sort_unstable();
    ids
}

/// One side's tour points: its targets' positions with the depot appended
/// last.
fn tour_points(targets: &[Target], depot: Point) -> Vec<Point> {
    let mut points: Vec<Point> = targets.iter().map(|t| t.position()).collect();
    points.push(depot);
    points
}

/// Rotates the cycle so the depot comes last, then records the remaining
/// positions as target ids. Rotation does not change the cycle.
fn id_order(permutation: &[usize], targets: &[Target]) -> Vec<usize> {
    let depot_index = targets.len();
    let depot_at = permutation
        .iter()
        .position(|&idx| idx == depot_index)
        .expect("valid permutation contains the depot position");

    let mut order = Vec::with_capacity(targets.len());
    for step in 1..permutation.len() {
        let idx = permutation[(depot_at + step) % permutation.len()];
        order.push(targets[idx].id());
    }
    order
}

/// Resolves a stored target-id order against the live side array, producing
/// an index permutation over that side's tour points (depot last).
fn translate(order: &[usize], targets: &[Target]) -> Result<Vec<usize>, CacheError> {
    if order.len() != targets.len() {
        return Err(CacheError::SideMismatch {
            cached: order.len(),
            live: targets.len(),
        });
    }

    let mut permutation = Vec::with_capacity(order.len() + 1);
    for &id in order {
        let index = targets
            .iter()
            .position(|t| t.id() == id)
            .ok_or(CacheError::UnknownTarget { id })?;
        permutation.push(index);
    }
    permutation.push(targets.len());
    Ok(permutation)
}
