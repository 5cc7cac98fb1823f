//! Search configuration and cooling schedules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failure in a schedule or search configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A temperature bound is zero or negative.
    #[error("temperatures must be positive, got initial {initial} / stopping {stopping}")]
    NonPositiveTemperature {
        /// Configured initial temperature.
        initial: f64,
        /// Configured stopping temperature.
        stopping: f64,
    },

    /// The stopping temperature does not lie below the initial temperature.
    #[error("stopping temperature {stopping} must be below initial temperature {initial}")]
    StoppingNotBelowInitial {
        /// Configured initial temperature.
        initial: f64,
        /// Configured stopping temperature.
        stopping: f64,
    },

    /// A geometric decay factor lies outside (0, 1).
    #[error("decay must be in (0, 1), got {0}")]
    DecayOutOfRange(f64),

    /// A relocation weighting exponent is negative or not finite.
    #[error("weighting exponent must be finite and non-negative, got {0}")]
    InvalidExponent(f64),
}

/// A geometric cooling schedule.
///
/// The temperature starts at `initial_temperature` and is multiplied by
/// `decay` after every candidate evaluation; the loop it governs stops once
/// the temperature drops to `stopping_temperature` or below. The number of
/// evaluations therefore depends only on the schedule, not on problem size.
///
/// # Examples
///
/// ```
/// use bitour::annealing::Schedule;
///
/// let schedule = Schedule::new(300.0, 1.0, 0.95);
/// assert!(schedule.validate().is_ok());
/// assert_eq!(schedule.steps(), 112);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Starting temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// The loop stops once the temperature is at or below this value.
    pub stopping_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub decay: f64,
}

impl Schedule {
    /// Creates a new schedule.
    pub fn new(initial_temperature: f64, stopping_temperature: f64, decay: f64) -> Self {
        Self {
            initial_temperature,
            stopping_temperature,
            decay,
        }
    }

    /// Validates the schedule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_temperature <= 0.0 || self.stopping_temperature <= 0.0 {
            return Err(ConfigError::NonPositiveTemperature {
                initial: self.initial_temperature,
                stopping: self.stopping_temperature,
            });
        }
        if self.stopping_temperature >= self.initial_temperature {
            return Err(ConfigError::StoppingNotBelowInitial {
                initial: self.initial_temperature,
                stopping: self.stopping_temperature,
            });
        }
        if self.decay <= 0.0 || self.decay >= 1.0 {
            return Err(ConfigError::DecayOutOfRange(self.decay));
        }
        Ok(())
    }

    /// Number of candidate evaluations a valid schedule performs:
    /// `⌈log(stopping/initial) / log(decay)⌉`.
    pub fn steps(&self) -> usize {
        let ratio = (self.stopping_temperature / self.initial_temperature).ln();
        (ratio / self.decay.ln()).ceil() as usize
    }
}

/// Exponents for the proximity-weighted relocation draw.
///
/// When a target leaves side A its selection weight is
/// `d(target, depot B)^-a_to_b_exponent`; when a target leaves side B the
/// weight is `d(target, depot A)^-b_to_a_exponent`. The defaults are
/// deliberately asymmetric (inverse squared toward B, plain inverse toward
/// A); tune the pair to taste.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveWeighting {
    /// Exponent applied when moving a target from side A to side B.
    pub a_to_b_exponent: f64,

    /// Exponent applied when moving a target from side B to side A.
    pub b_to_a_exponent: f64,
}

impl Default for MoveWeighting {
    fn default() -> Self {
        Self {
            a_to_b_exponent: 2.0,
            b_to_a_exponent: 1.0,
        }
    }
}

impl MoveWeighting {
    /// Validates the exponent pair.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &exponent in [self.a_to_b_exponent, self.b_to_a_exponent].iter() {
            if !exponent.is_finite() || exponent < 0.0 {
                return Err(ConfigError::InvalidExponent(exponent));
            }
        }
        Ok(())
    }
}

/// Configuration for the bi-level search.
///
/// `outer` governs partition exploration, `inner` governs each tour
/// optimization during the search, and `final_inner_decay` replaces the
/// inner decay for the single refinement pass on the best partition after
/// the outer loop ends.
///
/// # Examples
///
/// ```
/// use bitour::annealing::{Schedule, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_outer(Schedule::new(500.0, 1.0, 0.9))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Schedule for the outer partition loop.
    pub outer: Schedule,

    /// Schedule for tour optimization during the search.
    pub inner: Schedule,

    /// Slower inner decay used for the terminal refinement pass.
    pub final_inner_decay: f64,

    /// Relocation weighting exponents.
    pub weighting: MoveWeighting,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            outer: Schedule::new(1000.0, 1.0, 0.9),
            inner: Schedule::new(300.0, 1.0, 0.95),
            final_inner_decay: 0.999,
            weighting: MoveWeighting::default(),
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_outer(mut self, schedule: Schedule) -> Self {
        self.outer = schedule;
        self
    }

    pub fn with_inner(mut self, schedule: Schedule) -> Self {
        self.inner = schedule;
        self
    }

    pub fn with_final_inner_decay(mut self, decay: f64) -> Self {
        self.final_inner_decay = decay;
        self
    }

    pub fn with_weighting(mut self, weighting: MoveWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration. Checked before any search begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.outer.validate()?;
        self.inner.validate()?;
        if self.final_inner_decay <= 0.0 || self.final_inner_decay >= 1.0 {
            return Err(ConfigError::DecayOutOfRange(self.final_inner_decay));
        }
        self.weighting.validate()
    }
}
