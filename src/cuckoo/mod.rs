//! Cuckoo Search (CS).
//!
//! A population-based metaheuristic inspired by the brood parasitism of
//! cuckoos. Each iteration the cuckoos perform heavy-tailed random walks
//! (Lévy flights), lay their egg in a randomly chosen host nest when they
//! beat it, and a fixed fraction of the worst nests is abandoned and
//! rebuilt at random.
//!
//! # Key Types
//!
//! - [`ObjectiveFunction`]: objective plus box bounds and tuning parameters
//! - [`CuckooConfig`]: population sizes, walk variant and parameters
//! - [`CuckooSearch`]: stepwise engine (`initialize` / `iteration`)
//! - [`CuckooRunner`]: fixed-budget batch runs producing a [`CuckooResult`]
//!
//! # References
//!
//! - Yang, X.-S. & Deb, S. (2009), "Cuckoo Search via Lévy Flights",
//!   *World Congress on Nature & Biologically Inspired Computing*, 210-214.
//! - Yang, X.-S. & Deb, S. (2010), "Engineering Optimisation by Cuckoo Search"
//! - Mantegna, R. N. (1994), "Fast, accurate algorithm for numerical
//!   simulation of Lévy stable stochastic processes"

mod config;
mod population;
mod runner;
mod types;
pub mod walk;

pub use config::{CuckooConfig, StepSchedule};
pub use population::{abandonment_count, compare_fitness, Population, ABANDONMENT_FRACTION};
pub use runner::{CuckooResult, CuckooRunner, CuckooSearch};
pub use types::{Candidate, Objective, ObjectiveFunction};
pub use walk::RandomWalk;
