//! Cuckoo Search engine and batch runner.
//!
//! [`CuckooSearch`] is the stepwise engine: `initialize` once, then
//! `iteration` as many times as the driver wants, reading the population
//! in between (for animation or reporting). [`CuckooRunner`] wraps it in a
//! fixed-budget batch loop, like the other runners of this crate family.

use super::config::{CuckooConfig, StepSchedule};
use super::population::{compare_fitness, Population};
use super::types::{Candidate, Objective, ObjectiveFunction};
use super::walk::RandomWalk;
use crate::error::CuckooError;
use log::{debug, trace};
use rand::Rng;
use std::cmp::Ordering as FitnessOrdering;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use u_numflow::random::create_rng;

/// Stepwise Cuckoo Search optimizer.
///
/// All run state lives here; the random source is passed into every
/// stateful call, so two instances driven by equally seeded generators
/// evolve identically.
///
/// # Usage
///
/// ```
/// use u_cuckoo::cuckoo::{CuckooConfig, CuckooSearch};
/// use u_cuckoo::functions::Benchmark;
/// use u_numflow::random::create_rng;
///
/// let function = Benchmark::Sphere.function();
/// let config = CuckooConfig::default().with_host_count(20).with_cuckoo_count(3);
/// let mut rng = create_rng(42);
///
/// let mut search = CuckooSearch::new();
/// search.initialize(&config, &function, &mut rng).unwrap();
/// for _ in 0..100 {
///     search.iteration(&function, &mut rng).unwrap();
/// }
/// assert!(search.best().fitness() < f64::MAX);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CuckooSearch {
    population: Population,
    walk: RandomWalk,
    alpha: f64,
    lambda: f64,
    schedule: StepSchedule,
    dimensions: usize,
    iteration: usize,
    last_improvement: usize,
    best: Candidate,
    initialized: bool,
}

impl CuckooSearch {
    /// Creates an uninitialized optimizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run, discarding any previous progress.
    ///
    /// Fills `host_count` hosts and `cuckoo_count` cuckoos with random
    /// candidates, resets the counters and the best tracker, and stores the
    /// walk configuration.
    pub fn initialize<E: Objective, R: Rng>(
        &mut self,
        config: &CuckooConfig,
        function: &ObjectiveFunction<E>,
        rng: &mut R,
    ) -> Result<(), CuckooError> {
        config.validate()?;
        function.validate()?;

        self.population
            .populate(config.host_count, config.cuckoo_count, function, rng);
        self.walk = config.walk;
        self.alpha = config.alpha;
        self.lambda = config.lambda;
        self.schedule = config.schedule;
        self.dimensions = function.dimensions;
        self.iteration = 0;
        self.last_improvement = 0;
        self.best = Candidate::new();
        self.initialized = true;

        debug!(
            "cuckoo search: {} hosts, {} cuckoos, {} dims, {} walk (alpha={}, lambda={})",
            config.host_count,
            config.cuckoo_count,
            function.dimensions,
            self.walk,
            self.alpha,
            self.lambda
        );
        Ok(())
    }

    /// Advances the run by one iteration.
    ///
    /// Cuckoos are sorted best first; then, for each cuckoo in turn, it
    /// walks (every axis perturbed and hard-clamped), is re-evaluated,
    /// attacks one uniformly chosen host, the worst quarter of the hosts is
    /// abandoned and the best tracker is refreshed. Host overwrites and
    /// abandonments of one cuckoo are visible to the next.
    ///
    /// # Errors
    ///
    /// - [`CuckooError::NotInitialized`] before [`initialize`](Self::initialize).
    /// - [`CuckooError::DimensionMismatch`] if `function` is not the
    ///   dimensionality the population was built for.
    /// - [`CuckooError::InvalidLambda`] / [`CuckooError::InvalidAlpha`] if the
    ///   walk parameters are out of range. These are detected before any
    ///   candidate moves, so the population is left untouched.
    pub fn iteration<E: Objective, R: Rng>(
        &mut self,
        function: &ObjectiveFunction<E>,
        rng: &mut R,
    ) -> Result<(), CuckooError> {
        if !self.initialized {
            return Err(CuckooError::NotInitialized);
        }
        if function.dimensions != self.dimensions {
            return Err(CuckooError::DimensionMismatch {
                expected: self.dimensions,
                actual: function.dimensions,
            });
        }

        let iteration = self.iteration + 1;
        let cuckoo_count = self.population.cuckoos.len();
        let alpha = self.scheduled_alpha(function, iteration);
        for rank in 0..cuckoo_count {
            let lambda = self.scheduled_lambda(function, rank, cuckoo_count);
            self.walk.validate(lambda, alpha)?;
        }
        self.iteration = iteration;

        self.population.sort_cuckoos_ascending();

        for rank in 0..cuckoo_count {
            let lambda = self.scheduled_lambda(function, rank, cuckoo_count);

            // Random walk
            let cuckoo = &mut self.population.cuckoos[rank];
            for x in cuckoo.position.iter_mut() {
                let step = self.walk.step(lambda, alpha, rng)?;
                *x = function.clamp(*x + step);
            }
            cuckoo.evaluate(function);

            // Host attack
            let target = rng.random_range(0..self.population.hosts.len());
            let cuckoo = &self.population.cuckoos[rank];
            let host = &mut self.population.hosts[target];
            if cuckoo.fitness < host.fitness {
                trace!(
                    "iteration {}: cuckoo {} took host {} ({} -> {})",
                    iteration,
                    rank,
                    target,
                    host.fitness,
                    cuckoo.fitness
                );
                host.adopt(cuckoo);
                self.last_improvement = iteration;
            }

            // Abandon worst nests
            self.population.abandon_worst(function, rng);

            if let Some(best) = self.population.hosts.last() {
                self.best.adopt(best);
            }
        }

        Ok(())
    }

    /// Step scale (Lévy) or stability index (Mantegna) for `iteration`.
    fn scheduled_alpha<E>(&self, function: &ObjectiveFunction<E>, iteration: usize) -> f64 {
        match self.schedule {
            StepSchedule::Constant => self.alpha,
            StepSchedule::Adaptive => {
                let budget = function.iteration_budget;
                if budget == 0 {
                    return function.alpha_max;
                }
                let progress = iteration.min(budget) as f64 / budget as f64;
                function.alpha_max * (function.alpha_min / function.alpha_max).powf(progress)
            }
        }
    }

    /// Lévy exponent for the cuckoo at `rank` (0 = best) of `count`.
    fn scheduled_lambda<E>(
        &self,
        function: &ObjectiveFunction<E>,
        rank: usize,
        count: usize,
    ) -> f64 {
        match self.schedule {
            StepSchedule::Constant => self.lambda,
            StepSchedule::Adaptive => {
                function.lambda_max
                    - rank as f64 * (function.lambda_max - function.lambda_min) / count as f64
            }
        }
    }

    /// Current host and cuckoo pools.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Snapshot of the best host after the latest step.
    ///
    /// Before the first iteration this is an empty candidate with fitness
    /// `f64::MAX`.
    pub fn best(&self) -> &Candidate {
        &self.best
    }

    /// Number of completed iterations since [`initialize`](Self::initialize).
    pub fn iteration_count(&self) -> usize {
        self.iteration
    }

    /// Iteration in which a cuckoo last took over a host (0 if never).
    pub fn last_improvement(&self) -> usize {
        self.last_improvement
    }

    /// Walk variant of the current run.
    pub fn walk(&self) -> RandomWalk {
        self.walk
    }

    /// Whether [`initialize`](Self::initialize) has been called.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

/// Result of a Cuckoo Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CuckooResult {
    /// Coordinates of the best host found.
    pub best_position: Vec<f64>,

    /// Fitness of the best host found.
    pub best_fitness: f64,

    /// Iteration in which a cuckoo last took over a host (0 if never).
    pub last_improvement: usize,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best fitness of the initial hosts followed by the best fitness after
    /// every iteration.
    pub fitness_history: Vec<f64>,
}

/// Executes fixed-budget Cuckoo Search runs.
///
/// # Usage
///
/// ```
/// use u_cuckoo::cuckoo::{CuckooConfig, CuckooRunner};
/// use u_cuckoo::functions::Benchmark;
///
/// let function = Benchmark::Rosenbrock.function().with_iteration_budget(500);
/// let config = CuckooConfig::default().with_seed(42);
/// let result = CuckooRunner::run(&function, &config).unwrap();
/// assert_eq!(result.iterations, 500);
/// ```
pub struct CuckooRunner;

impl CuckooRunner {
    /// Runs `function.iteration_budget` iterations.
    pub fn run<E: Objective>(
        function: &ObjectiveFunction<E>,
        config: &CuckooConfig,
    ) -> Result<CuckooResult, CuckooError> {
        Self::run_with_cancel(function, config, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked before every iteration; once set, the run stops
    /// and returns the best solution found so far.
    pub fn run_with_cancel<E: Objective>(
        function: &ObjectiveFunction<E>,
        config: &CuckooConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<CuckooResult, CuckooError> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let mut search = CuckooSearch::new();
        search.initialize(config, function, &mut rng)?;

        let initial_best = search
            .population()
            .best_host()
            .map_or(f64::MAX, Candidate::fitness);
        let mut fitness_history = Vec::with_capacity(function.iteration_budget + 1);
        fitness_history.push(initial_best);

        let mut cancelled = false;
        for _ in 0..function.iteration_budget {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            search.iteration(function, &mut rng)?;
            fitness_history.push(search.best().fitness());
        }

        // Without any iteration the tracker still holds its placeholder.
        let best = if search.iteration_count() == 0 {
            search
                .population()
                .hosts()
                .iter()
                .min_by(|a, b| compare_fitness(a.fitness(), b.fitness()))
                .cloned()
                .unwrap_or_default()
        } else {
            search.best().clone()
        };

        debug!(
            "cuckoo search finished: best={} after {} iterations (last improvement #{}{})",
            best.fitness(),
            search.iteration_count(),
            search.last_improvement(),
            if cancelled { ", cancelled" } else { "" }
        );

        Ok(CuckooResult {
            best_fitness: best.fitness(),
            best_position: best.position,
            last_improvement: search.last_improvement(),
            iterations: search.iteration_count(),
            cancelled,
            fitness_history,
        })
    }

    /// Runs one independent optimization per seed.
    ///
    /// Every run owns its optimizer, population and random source. With the
    /// `parallel` feature the runs are spread over rayon's thread pool.
    /// Results are returned in seed order.
    pub fn run_batch<E: Objective>(
        function: &ObjectiveFunction<E>,
        config: &CuckooConfig,
        seeds: &[u64],
    ) -> Vec<Result<CuckooResult, CuckooError>> {
        let run_seed = |&seed: &u64| Self::run(function, &config.clone().with_seed(seed));

        #[cfg(feature = "parallel")]
        let results = {
            use rayon::prelude::*;
            seeds.par_iter().map(run_seed).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let results = seeds.iter().map(run_seed).collect();

        results
    }

    /// Picks the best result of a batch, ignoring failed runs.
    pub fn best_of(results: &[Result<CuckooResult, CuckooError>]) -> Option<&CuckooResult> {
        results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .min_by(|a, b| match compare_fitness(a.best_fitness, b.best_fitness) {
                FitnessOrdering::Equal => a.last_improvement.cmp(&b.last_improvement),
                other => other,
            })
    }
}
