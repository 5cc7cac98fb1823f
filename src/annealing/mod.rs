//! Bi-level simulated annealing.
//!
//! The outer level anneals the assignment of targets to the two depots; the
//! inner level anneals each side's closed tour. A partition cache sits
//! between the two so each distinct partition pays for tour annealing at
//! most once.
//!
//! - [`SearchRunner`] — outer driver: partition annealing plus the terminal
//!   refinement pass
//! - [`optimize_tour`] — inner tour optimizer
//! - [`PartitionCache`] — partition memoization boundary
//! - [`propose_relocation`] — proximity-weighted relocation move operator
//! - [`SearchConfig`] — schedules, weighting exponents, and seed
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod cache;
mod config;
mod relocate;
mod runner;
mod tour;

pub use cache::{CacheError, PartitionCache, PlannedTours};
pub use config::{ConfigError, MoveWeighting, Schedule, SearchConfig};
pub use relocate::propose_relocation;
pub use runner::{SearchError, SearchResult, SearchRunner};
pub use tour::{optimize_tour, TourResult};
