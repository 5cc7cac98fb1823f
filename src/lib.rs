//! # bitour
//!
//! Two-depot tour planning: partition a set of targets between two fixed
//! depots and compute a closed tour per depot, minimizing the combined tour
//! length. Both levels are optimized by simulated annealing — the tour
//! optimizer runs nested inside the partition search — with a memoization
//! cache ensuring each distinct partition is annealed at most once.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, Target, Depots, Partition)
//! - [`distance`] — Euclidean distance, cycle scoring, distance matrix
//! - [`annealing`] — The bi-level search (tour optimizer, partition cache,
//!   relocation operator, search runner)
//!
//! ## Example
//!
//! ```
//! use bitour::annealing::{SearchConfig, SearchRunner};
//! use bitour::models::{Depots, Point, Target};
//!
//! let targets = vec![
//!     Target::new(0, 160.0, 390.0),
//!     Target::new(1, 250.0, 382.0),
//!     Target::new(2, 562.0, 365.0),
//!     Target::new(3, 650.0, 480.0),
//! ];
//! let depots = Depots::new(Point::new(110.0, 440.0), Point::new(730.0, 440.0));
//!
//! let config = SearchConfig::default().with_seed(42);
//! let result = SearchRunner::run(targets, depots, &config).unwrap();
//! assert!(result.best_score > 0.0);
//! ```

pub mod annealing;
pub mod distance;
pub mod models;
