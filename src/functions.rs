//! Built-in benchmark functions.
//!
//! A static catalog of classic continuous test problems, each exposed as a
//! ready-to-run [`ObjectiveFunction`] with its customary bounds, a
//! two-dimensional default (so it can be drawn as a heatmap) and a default
//! iteration budget.
//!
//! | Function   | Bounds              | Budget  | Global minimum        |
//! |------------|---------------------|---------|-----------------------|
//! | Sphere     | [-100, 100]         | 10 000  | 0 at the origin       |
//! | Ackley     | [-32.768, 32.768]   | 10 000  | 0 at the origin       |
//! | Griewank   | [-100, 100]         | 10 000  | 0 at the origin       |
//! | Rastrigin  | [-5.12, 5.12]       | 150 000 | 0 at the origin       |
//! | Rosenbrock | [-2.048, 2.048]     | 10 000  | 0 at `(1, ..., 1)`    |
//!
//! # References
//!
//! - Jamil, M. & Yang, X.-S. (2013), "A literature survey of benchmark
//!   functions for global optimization problems"

use crate::cuckoo::{Objective, ObjectiveFunction};
use crate::error::CuckooError;
use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

/// Named benchmark objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Benchmark {
    /// `Σ x_i²`. Unimodal, separable.
    Sphere,
    /// Nearly flat outer region with a deep central funnel.
    Ackley,
    /// `Σ x_i²/4000 - Π cos(x_i/√(i+1)) + 1`. Many regularly spaced minima.
    Griewank,
    /// `10d + Σ (x_i² - 10 cos 2πx_i)`. Highly multimodal.
    Rastrigin,
    /// `Σ 100 (x_{i+1} - x_i²)² + (x_i - 1)²`. Narrow curved valley.
    Rosenbrock,
}

impl Benchmark {
    /// Every catalog entry.
    pub const ALL: [Benchmark; 5] = [
        Benchmark::Sphere,
        Benchmark::Ackley,
        Benchmark::Griewank,
        Benchmark::Rastrigin,
        Benchmark::Rosenbrock,
    ];

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Benchmark::Sphere => "sphere",
            Benchmark::Ackley => "ackley",
            Benchmark::Griewank => "griewank",
            Benchmark::Rastrigin => "rastrigin",
            Benchmark::Rosenbrock => "rosenbrock",
        }
    }

    /// Symmetric search bound `b`: the box is `[-b, b]`.
    pub fn bound(self) -> f64 {
        match self {
            Benchmark::Sphere | Benchmark::Griewank => 100.0,
            Benchmark::Ackley => 32.768,
            Benchmark::Rastrigin => 5.12,
            Benchmark::Rosenbrock => 2.048,
        }
    }

    /// Default iteration budget for a batch run.
    pub fn iteration_budget(self) -> usize {
        match self {
            Benchmark::Rastrigin => 150_000,
            _ => 10_000,
        }
    }

    /// Location of the global minimum in `dimensions` dimensions.
    pub fn optimum(self, dimensions: usize) -> Vec<f64> {
        match self {
            Benchmark::Rosenbrock => vec![1.0; dimensions],
            _ => vec![0.0; dimensions],
        }
    }

    /// The catalog configuration: two dimensions, customary bounds and
    /// budget. Adjust with the `with_*` builders.
    pub fn function(self) -> ObjectiveFunction<Benchmark> {
        let bound = self.bound();
        ObjectiveFunction::new(self)
            .with_bounds(-bound, bound)
            .with_dimensions(2)
            .with_iteration_budget(self.iteration_budget())
    }
}

impl Objective for Benchmark {
    fn evaluate(&self, x: &[f64]) -> f64 {
        match self {
            Benchmark::Sphere => sphere(x),
            Benchmark::Ackley => ackley(x),
            Benchmark::Griewank => griewank(x),
            Benchmark::Rastrigin => rastrigin(x),
            Benchmark::Rosenbrock => rosenbrock(x),
        }
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Benchmark {
    type Err = CuckooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Benchmark::ALL
            .into_iter()
            .find(|b| b.name() == name)
            .ok_or_else(|| CuckooError::UnknownBenchmark(s.to_string()))
    }
}

pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|t| t * t).sum()
}

pub fn ackley(x: &[f64]) -> f64 {
    let inv_d = 1.0 / x.len() as f64;
    let squares: f64 = x.iter().map(|t| t * t).sum();
    let cosines: f64 = x.iter().map(|t| (2.0 * PI * t).cos()).sum();
    -20.0 * (-0.2 * (inv_d * squares).sqrt()).exp() - (inv_d * cosines).exp() + 20.0 + E
}

pub fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|t| t * t / 4000.0).sum();
    let product: f64 = x
        .iter()
        .enumerate()
        .map(|(i, t)| (t / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - product + 1.0
}

pub fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|t| t * t - 10.0 * (2.0 * PI * t).cos())
            .sum::<f64>()
}

pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (w[0] - 1.0).powi(2))
        .sum()
}
