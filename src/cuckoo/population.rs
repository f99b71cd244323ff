//! Host and cuckoo pools.

use super::types::{Candidate, Objective, ObjectiveFunction};
use rand::Rng;
use std::cmp::Ordering;

/// Fraction of the hosts relocated by each abandonment step.
pub const ABANDONMENT_FRACTION: f64 = 0.25;

/// Total order on fitness values for minimization.
///
/// NaN ranks after every number (including `+inf`), so a candidate whose
/// evaluation failed is always treated as the worst one.
pub fn compare_fitness(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Number of hosts abandoned per step: `floor(0.25 * host_count)`.
pub fn abandonment_count(host_count: usize) -> usize {
    (ABANDONMENT_FRACTION * host_count as f64).floor() as usize
}

/// The two candidate pools of one run.
///
/// Sizes are fixed by [`Population::populate`]; afterwards candidates are
/// only moved, re-evaluated or overwritten in place.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    pub(crate) hosts: Vec<Candidate>,
    pub(crate) cuckoos: Vec<Candidate>,
}

impl Population {
    /// Host nests. After an iteration they are ordered worst first, so the
    /// best host is the last element.
    pub fn hosts(&self) -> &[Candidate] {
        &self.hosts
    }

    /// Cuckoos, in the order of their last walk (best first at the start
    /// of the iteration that moved them).
    pub fn cuckoos(&self) -> &[Candidate] {
        &self.cuckoos
    }

    /// Returns `true` before the first [`populate`](Self::populate).
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty() && self.cuckoos.is_empty()
    }

    /// Clears both pools and refills them with random candidates, hosts
    /// first.
    pub fn populate<E: Objective, R: Rng>(
        &mut self,
        host_count: usize,
        cuckoo_count: usize,
        function: &ObjectiveFunction<E>,
        rng: &mut R,
    ) {
        fill_random(&mut self.hosts, host_count, function, rng);
        fill_random(&mut self.cuckoos, cuckoo_count, function, rng);
    }

    /// Sorts cuckoos by ascending fitness (best first). Stable.
    pub fn sort_cuckoos_ascending(&mut self) {
        self.cuckoos.sort_by(|a, b| compare_fitness(a.fitness, b.fitness));
    }

    /// Sorts hosts by descending fitness (worst first). Stable.
    pub fn sort_hosts_descending(&mut self) {
        self.hosts.sort_by(|a, b| compare_fitness(b.fitness, a.fitness));
    }

    /// Relocates the worst `floor(0.25 * hosts)` nests to random points.
    ///
    /// Hosts are sorted worst first before and after the relocation, so on
    /// return the best host is the last one. Returns the number abandoned.
    pub fn abandon_worst<E: Objective, R: Rng>(
        &mut self,
        function: &ObjectiveFunction<E>,
        rng: &mut R,
    ) -> usize {
        self.sort_hosts_descending();
        let count = abandonment_count(self.hosts.len());
        for host in &mut self.hosts[..count] {
            host.relocate_random(function, rng);
        }
        self.sort_hosts_descending();
        count
    }

    /// Host with the lowest fitness, if any.
    pub fn best_host(&self) -> Option<&Candidate> {
        self.hosts
            .iter()
            .min_by(|a, b| compare_fitness(a.fitness, b.fitness))
    }
}

fn fill_random<E: Objective, R: Rng>(
    pool: &mut Vec<Candidate>,
    count: usize,
    function: &ObjectiveFunction<E>,
    rng: &mut R,
) {
    pool.clear();
    pool.extend((0..count).map(|_| {
        let mut candidate = Candidate::new();
        candidate.relocate_random(function, rng);
        candidate
    }));
}
