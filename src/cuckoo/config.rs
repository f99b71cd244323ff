//! Cuckoo Search configuration and step schedules.

use super::walk::RandomWalk;
use crate::error::CuckooError;

/// How the walk parameters evolve during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepSchedule {
    /// Every step uses the configured `alpha` and `lambda`.
    #[default]
    Constant,

    /// Parameters are derived from the objective's tuning ranges.
    ///
    /// - `lambda` is interpolated by cuckoo rank `i` (0 = best) of `n`:
    ///   `lambda_max - i * (lambda_max - lambda_min) / n`. Good cuckoos take
    ///   short steps, poor ones explore.
    /// - `alpha` decays geometrically over the iteration budget from
    ///   `alpha_max` to `alpha_min`.
    Adaptive,
}

/// Configuration for the Cuckoo Search algorithm.
///
/// # Examples
///
/// ```
/// use u_cuckoo::cuckoo::{CuckooConfig, RandomWalk};
///
/// let config = CuckooConfig::default()
///     .with_host_count(30)
///     .with_cuckoo_count(3)
///     .with_walk(RandomWalk::Mantegna)
///     .with_alpha(1.5)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CuckooConfig {
    /// Number of host nests. Typically larger than `cuckoo_count`.
    pub host_count: usize,

    /// Number of cuckoos performing random walks.
    pub cuckoo_count: usize,

    /// Step generator.
    pub walk: RandomWalk,

    /// Step scale (Lévy) or stability index (Mantegna).
    pub alpha: f64,

    /// Lévy tail exponent. Ignored by Mantegna.
    pub lambda: f64,

    /// Parameter schedule.
    pub schedule: StepSchedule,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for CuckooConfig {
    fn default() -> Self {
        Self {
            host_count: 50,
            cuckoo_count: 5,
            walk: RandomWalk::Levy,
            alpha: 1.0,
            lambda: 1.5,
            schedule: StepSchedule::Constant,
            seed: None,
        }
    }
}

impl CuckooConfig {
    pub fn with_host_count(mut self, n: usize) -> Self {
        self.host_count = n;
        self
    }

    pub fn with_cuckoo_count(mut self, n: usize) -> Self {
        self.cuckoo_count = n;
        self
    }

    pub fn with_walk(mut self, walk: RandomWalk) -> Self {
        self.walk = walk;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_schedule(mut self, schedule: StepSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the population sizes.
    ///
    /// Walk parameters are checked by the generators themselves when a step
    /// is drawn, so an out-of-range `alpha` or `lambda` surfaces from
    /// [`CuckooSearch::iteration`](super::CuckooSearch::iteration).
    pub fn validate(&self) -> Result<(), CuckooError> {
        if self.host_count == 0 {
            return Err(CuckooError::EmptyHosts);
        }
        if self.cuckoo_count == 0 {
            return Err(CuckooError::EmptyCuckoos);
        }
        Ok(())
    }
}
