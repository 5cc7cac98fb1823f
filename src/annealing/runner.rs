//! Bi-level search driver.
//!
//! The outer loop anneals the target partition: each iteration proposes a
//! single-target relocation, scores the candidate through the partition
//! cache (which anneals both sides' tours on a miss), and applies the
//! Metropolis criterion at the current outer temperature. Once the outer
//! schedule runs out, the cache is cleared and the best partition found is
//! re-annealed once on a much slower inner schedule, sharpening the tours
//! that are reported without paying that cost on every candidate.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Depots, Partition, Target};

use super::cache::{CacheError, PartitionCache};
use super::config::{ConfigError, Schedule, SearchConfig};
use super::relocate::propose_relocation;

/// Failure of a search run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The partition cache detected a broken invariant.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Two input targets share an id.
    #[error("duplicate target id {0}")]
    DuplicateTargetId(usize),
}

/// Result of a full bi-level search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The best partition found.
    pub partition: Partition,

    /// Tour permutation over side A's tour points, where index
    /// `partition.side(Side::A).len()` is depot A.
    pub permutation_a: Vec<usize>,

    /// Tour permutation over side B's tour points, where index
    /// `partition.side(Side::B).len()` is depot B.
    pub permutation_b: Vec<usize>,

    /// Combined length of the two reported tours.
    pub best_score: f64,

    /// Highest combined score among the partitions evaluated.
    pub worst_score: f64,

    /// Outer-loop iterations performed.
    pub iterations: usize,

    /// Outer moves accepted (including improvements).
    pub accepted_moves: usize,

    /// Outer moves that improved on the then-current score.
    pub improving_moves: usize,

    /// Partition evaluations served from the cache.
    pub cache_hits: usize,

    /// Partition evaluations that ran the tour optimizer.
    pub cache_misses: usize,

    /// Best-known combined score after each outer iteration.
    pub score_history: Vec<f64>,
}

/// Executes the bi-level annealing search.
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the full search: nearest-depot initial partition, outer
    /// partition annealing, then the terminal refinement pass.
    ///
    /// Fails fast on an invalid configuration or duplicate target ids;
    /// an empty target set degenerates to a zero-score result.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitour::annealing::{SearchConfig, SearchRunner};
    /// use bitour::models::{Depots, Point, Target};
    ///
    /// let targets = vec![
    ///     Target::new(0, 160.0, 390.0),
    ///     Target::new(1, 200.0, 500.0),
    ///     Target::new(2, 650.0, 480.0),
    ///     Target::new(3, 700.0, 340.0),
    /// ];
    /// let depots = Depots::new(Point::new(110.0, 440.0), Point::new(730.0, 440.0));
    /// let config = SearchConfig::default().with_seed(42);
    ///
    /// let result = SearchRunner::run(targets, depots, &config).unwrap();
    /// assert!(result.best_score > 0.0);
    /// assert!(result.best_score <= result.worst_score);
    /// ```
    pub fn run(
        targets: Vec<Target>,
        depots: Depots,
        config: &SearchConfig,
    ) -> Result<SearchResult, SearchError> {
        config.validate()?;
        check_unique_ids(&targets)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut cache = PartitionCache::new();
        let mut current = Partition::nearest_depot(&targets, &depots);
        let mut current_score = f64::INFINITY;

        let mut best: Option<Partition> = None;
        let mut best_score = f64::INFINITY;
        let mut worst_score = f64::NEG_INFINITY;

        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut score_history = Vec::with_capacity(config.outer.steps());

        let mut temperature = config.outer.initial_temperature;
        while temperature > config.outer.stopping_temperature {
            let candidate = propose_relocation(&current, &depots, &config.weighting, &mut rng);
            let planned = cache.lookup_or_compute(&candidate, &depots, &config.inner, &mut rng)?;

            if planned.combined_score < best_score {
                best_score = planned.combined_score;
                best = Some(candidate.clone());
            }
            worst_score = worst_score.max(planned.combined_score);

            let delta = planned.combined_score - current_score;
            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else {
                rng.random_range(0.0..1.0) < (-delta / temperature).exp()
            };
            if accept {
                current = candidate;
                current_score = planned.combined_score;
                accepted_moves += 1;
            }

            score_history.push(best_score);
            iterations += 1;
            temperature *= config.outer.decay;
        }

        // Terminal refinement: the slower schedule changes the scoring
        // characteristics, so stale entries must not be reused.
        cache.clear();
        let refinement = Schedule {
            decay: config.final_inner_decay,
            ..config.inner
        };
        let best_partition = best.unwrap_or(current);
        let planned = cache.lookup_or_compute(&best_partition, &depots, &refinement, &mut rng)?;
        let best_score = planned.combined_score;
        let worst_score = worst_score.max(best_score);

        Ok(SearchResult {
            partition: best_partition,
            permutation_a: planned.permutation_a,
            permutation_b: planned.permutation_b,
            best_score,
            worst_score,
            iterations,
            accepted_moves,
            improving_moves,
            cache_hits: cache.hits(),
            cache_misses: cache.misses(),
            score_history,
        })
    }
}

fn check_unique_ids(targets: &[Target]) -> Result<(), SearchError> {
    let mut seen = HashSet::with_capacity(targets.len());
    for target in targets {
        if !seen.insert(target.id()) {
            return Err(SearchError::DuplicateTargetId(target.id()));
        }
    }
    Ok(())
}
