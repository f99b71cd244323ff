//! Cuckoo Search metaheuristic for box-bounded continuous minimization.
//!
//! - **Cuckoo Search (CS)**: hosts and cuckoos, Lévy-flight random walks,
//!   host parasitism and abandonment of the worst nests. Driven either
//!   step by step ([`cuckoo::CuckooSearch`]) or as a batch
//!   ([`cuckoo::CuckooRunner`]).
//! - **Random walks**: Lévy power-law steps and Mantegna's algorithm,
//!   with the polar Gaussian sampler they rely on.
//! - **Benchmarks**: Sphere, Ackley, Griewank, Rastrigin and Rosenbrock as
//!   ready-made objective functions.
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem,
//! depending on `u-numflow` (Layer 1: Foundation) for seeded random
//! sources and log-Gamma. Rendering, animation and interactive controls
//! are left to consumers, which only call `initialize` once and
//! `iteration` repeatedly, reading the population in between.

pub mod cuckoo;
pub mod error;
pub mod functions;

pub use error::CuckooError;
