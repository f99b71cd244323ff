//! Objective descriptors and the candidate solution type.
//!
//! [`Objective`] is the single capability the engine needs from a problem:
//! scoring a point. [`ObjectiveFunction`] bundles an objective with the
//! search box and the walk tuning parameters, and [`Candidate`] is a point
//! in that box together with its cached fitness.

use crate::error::CuckooError;
use rand::Rng;

/// Scores a point of the search space. Lower is better.
///
/// Implementations must be deterministic and free of side effects; the
/// engine caches each candidate's fitness and never re-evaluates an
/// unchanged position.
///
/// Any `Fn(&[f64]) -> f64` closure is an objective:
///
/// ```
/// use u_cuckoo::cuckoo::Objective;
///
/// let booth = |x: &[f64]| (x[0] + 2.0 * x[1] - 7.0).powi(2) + (2.0 * x[0] + x[1] - 5.0).powi(2);
/// assert_eq!(booth.evaluate(&[1.0, 3.0]), 0.0);
/// ```
pub trait Objective: Send + Sync {
    /// Returns the fitness of `position`.
    ///
    /// `position.len()` always equals the owning
    /// [`ObjectiveFunction::dimensions`].
    fn evaluate(&self, position: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, position: &[f64]) -> f64 {
        self(position)
    }
}

/// An objective together with its search box and tuning parameters.
///
/// Bounds are shared by every axis: the search space is the hyper-cube
/// `[lower_bound, upper_bound]^dimensions`.
///
/// # Examples
///
/// ```
/// use u_cuckoo::cuckoo::ObjectiveFunction;
///
/// let function = ObjectiveFunction::new(|x: &[f64]| x.iter().map(|v| v.abs()).sum::<f64>())
///     .with_bounds(-10.0, 10.0)
///     .with_dimensions(3)
///     .with_iteration_budget(2_000);
/// assert!(function.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ObjectiveFunction<E> {
    /// The scoring expression.
    pub expression: E,

    /// Lower bound of every axis.
    pub lower_bound: f64,

    /// Upper bound of every axis.
    pub upper_bound: f64,

    /// Number of decision variables.
    pub dimensions: usize,

    /// Smallest Lévy exponent used by the adaptive schedule.
    pub lambda_min: f64,

    /// Largest Lévy exponent used by the adaptive schedule.
    pub lambda_max: f64,

    /// Final step scale of the adaptive schedule.
    pub alpha_min: f64,

    /// Initial step scale of the adaptive schedule.
    pub alpha_max: f64,

    /// Number of iterations a batch run performs.
    pub iteration_budget: usize,
}

impl<E: Objective> ObjectiveFunction<E> {
    /// Wraps `expression` with default bounds `[-1, 1]`, two dimensions
    /// and a budget of 10 000 iterations.
    pub fn new(expression: E) -> Self {
        Self {
            expression,
            lower_bound: -1.0,
            upper_bound: 1.0,
            dimensions: 2,
            lambda_min: 3.0,
            lambda_max: 30.0,
            alpha_min: 1.0,
            alpha_max: 1.0,
            iteration_budget: 10_000,
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_lambda_range(mut self, min: f64, max: f64) -> Self {
        self.lambda_min = min;
        self.lambda_max = max;
        self
    }

    pub fn with_alpha_range(mut self, min: f64, max: f64) -> Self {
        self.alpha_min = min;
        self.alpha_max = max;
        self
    }

    pub fn with_iteration_budget(mut self, iterations: usize) -> Self {
        self.iteration_budget = iterations;
        self
    }

    /// Evaluates the expression at `position`.
    #[inline]
    pub fn evaluate(&self, position: &[f64]) -> f64 {
        self.expression.evaluate(position)
    }

    /// Clamps `value` into the box. NaN lands on the lower bound.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.lower_bound).min(self.upper_bound)
    }

    /// Returns `true` if every coordinate of `position` lies in the box.
    pub fn contains(&self, position: &[f64]) -> bool {
        position.len() == self.dimensions
            && position
                .iter()
                .all(|&x| self.lower_bound <= x && x <= self.upper_bound)
    }

    /// Validates the descriptor.
    pub fn validate(&self) -> Result<(), CuckooError> {
        if self.dimensions == 0 {
            return Err(CuckooError::ZeroDimensions);
        }
        // The width must be representable for uniform sampling.
        if !(self.upper_bound - self.lower_bound).is_finite()
            || self.lower_bound >= self.upper_bound
        {
            return Err(CuckooError::InvalidBounds {
                lower: self.lower_bound,
                upper: self.upper_bound,
            });
        }
        if !(self.lambda_min > 0.0 && self.lambda_min <= self.lambda_max) {
            return Err(CuckooError::InvalidRange {
                name: "lambda",
                min: self.lambda_min,
                max: self.lambda_max,
            });
        }
        if !(self.alpha_min > 0.0 && self.alpha_min <= self.alpha_max) {
            return Err(CuckooError::InvalidRange {
                name: "alpha",
                min: self.alpha_min,
                max: self.alpha_max,
            });
        }
        Ok(())
    }
}

/// A point of the search space with its cached fitness.
///
/// Called a *bird*: the same type serves as host nest and as cuckoo.
/// Candidates are pooled; the engine mutates them in place rather than
/// reallocating.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub(crate) position: Vec<f64>,
    pub(crate) fitness: f64,
}

impl Default for Candidate {
    fn default() -> Self {
        Self::new()
    }
}

impl Candidate {
    /// An empty, unevaluated candidate. Its fitness is `f64::MAX`, so it
    /// loses every minimization comparison against an evaluated one.
    pub fn new() -> Self {
        Self {
            position: Vec::new(),
            fitness: f64::MAX,
        }
    }

    /// A candidate at `position`, evaluated against `function`.
    pub fn at<E: Objective>(position: Vec<f64>, function: &ObjectiveFunction<E>) -> Self {
        let fitness = function.evaluate(&position);
        Self { position, fitness }
    }

    /// Coordinates of the candidate.
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Cached objective value. `f64::MAX` until first evaluated.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Moves to a uniformly random point of the box and re-evaluates.
    ///
    /// # Panics
    /// Panics if the bounds are not a finite, non-empty interval with a
    /// finite width (call [`ObjectiveFunction::validate`] first).
    pub fn relocate_random<E: Objective, R: Rng>(
        &mut self,
        function: &ObjectiveFunction<E>,
        rng: &mut R,
    ) {
        let bounds = function.lower_bound..=function.upper_bound;
        self.position.clear();
        self.position
            .extend((0..function.dimensions).map(|_| rng.random_range(bounds.clone())));
        self.fitness = function.evaluate(&self.position);
    }

    /// Overwrites position and fitness with `other`'s, reusing the buffer.
    pub(crate) fn adopt(&mut self, other: &Candidate) {
        self.position.clear();
        self.position.extend_from_slice(&other.position);
        self.fitness = other.fitness;
    }

    /// Re-evaluates the cached fitness after an in-place move.
    pub(crate) fn evaluate<E: Objective>(&mut self, function: &ObjectiveFunction<E>) {
        self.fitness = function.evaluate(&self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use u_numflow::random::create_rng;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_new_candidate_is_worst() {
        let candidate = Candidate::new();
        assert!(candidate.position().is_empty());
        assert_eq!(candidate.fitness(), f64::MAX);
    }

    #[test]
    fn test_relocate_random_evaluates() {
        let function = ObjectiveFunction::new(sphere)
            .with_bounds(-3.0, 7.0)
            .with_dimensions(4);
        let mut rng = create_rng(42);
        let mut candidate = Candidate::new();
        candidate.relocate_random(&function, &mut rng);

        assert_eq!(candidate.position().len(), 4);
        assert!(function.contains(candidate.position()));
        assert_eq!(candidate.fitness(), sphere(candidate.position()));
    }

    #[test]
    fn test_relocate_reuses_length() {
        let function = ObjectiveFunction::new(sphere).with_dimensions(3);
        let mut rng = create_rng(1);
        let mut candidate = Candidate::new();
        for _ in 0..10 {
            candidate.relocate_random(&function, &mut rng);
            assert_eq!(candidate.position().len(), 3);
        }
    }

    #[test]
    fn test_adopt_copies_position_and_fitness() {
        let function = ObjectiveFunction::new(sphere);
        let source = Candidate::at(vec![0.5, -0.5], &function);
        let mut target = Candidate::new();
        target.adopt(&source);
        assert_eq!(target, source);
        assert!((target.fitness() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_clamp_is_hard() {
        let function = ObjectiveFunction::new(sphere).with_bounds(-2.0, 2.0);
        assert_eq!(function.clamp(5.0), 2.0);
        assert_eq!(function.clamp(-5.0), -2.0);
        assert_eq!(function.clamp(1.25), 1.25);
        assert_eq!(function.clamp(f64::INFINITY), 2.0);
        assert_eq!(function.clamp(f64::NEG_INFINITY), -2.0);
        assert_eq!(function.clamp(f64::NAN), -2.0);
    }

    #[test]
    fn test_validate_ok() {
        assert!(ObjectiveFunction::new(sphere).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_dimensions() {
        let function = ObjectiveFunction::new(sphere).with_dimensions(0);
        assert_eq!(function.validate(), Err(CuckooError::ZeroDimensions));
    }

    #[test]
    fn test_validate_inverted_bounds() {
        let function = ObjectiveFunction::new(sphere).with_bounds(1.0, 1.0);
        assert!(matches!(
            function.validate(),
            Err(CuckooError::InvalidBounds { .. })
        ));

        let function = ObjectiveFunction::new(sphere).with_bounds(0.0, f64::INFINITY);
        assert!(function.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_width() {
        let function = ObjectiveFunction::new(sphere)
            .with_bounds(-1e308, 1e308)
            .with_dimensions(1);
        assert_eq!(
            function.validate(),
            Err(CuckooError::InvalidBounds {
                lower: -1e308,
                upper: 1e308,
            })
        );

        // Wide but representable boxes are fine and sample inside.
        let function = ObjectiveFunction::new(sphere)
            .with_bounds(-1e307, 1e307)
            .with_dimensions(2);
        assert!(function.validate().is_ok());
        let mut rng = create_rng(42);
        let mut candidate = Candidate::new();
        candidate.relocate_random(&function, &mut rng);
        assert!(function.contains(candidate.position()));
    }

    #[test]
    fn test_validate_bad_ranges() {
        let function = ObjectiveFunction::new(sphere).with_lambda_range(3.0, 1.0);
        assert!(matches!(
            function.validate(),
            Err(CuckooError::InvalidRange { name: "lambda", .. })
        ));

        let function = ObjectiveFunction::new(sphere).with_alpha_range(0.0, 1.0);
        assert!(matches!(
            function.validate(),
            Err(CuckooError::InvalidRange { name: "alpha", .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_relocate_stays_in_box(
            seed in any::<u64>(),
            lower in -1e3f64..1e3,
            width in 1e-3f64..1e3,
            dimensions in 1usize..16,
        ) {
            let function = ObjectiveFunction::new(sphere)
                .with_bounds(lower, lower + width)
                .with_dimensions(dimensions);
            let mut rng = create_rng(seed);
            let mut candidate = Candidate::new();
            candidate.relocate_random(&function, &mut rng);

            prop_assert_eq!(candidate.position().len(), dimensions);
            prop_assert!(function.contains(candidate.position()));
            prop_assert_eq!(candidate.fitness(), sphere(candidate.position()));
        }
    }
}
