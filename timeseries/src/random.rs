//! Randomness for the all-type schema cells.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of the random values written into all-type schema rows.
pub trait RandomSource {
    /// Returns an integer in `0..bound`.
    fn next_int(&mut self, bound: i64) -> i64;

    /// Returns a float in `0.0..1.0`.
    fn next_double(&mut self) -> f64;

    fn next_bool(&mut self) -> bool;
}

/// [`RandomSource`] backed by a [`SmallRng`].
pub struct SmallRngSource {
    rng: SmallRng,
}

impl SmallRngSource {
    /// Seeds from the operating system.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for SmallRngSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SmallRngSource {
    fn next_int(&mut self, bound: i64) -> i64 {
        if bound <= 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }

    fn next_double(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_bool(&mut self) -> bool {
        self.rng.random::<bool>()
    }
}

/// [`RandomSource`] replaying fixed values, cycling when exhausted.
///
/// Integers are reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct FixedSource {
    ints: VecDeque<i64>,
    doubles: VecDeque<f64>,
    bools: VecDeque<bool>,
}

impl FixedSource {
    pub fn new(ints: Vec<i64>, doubles: Vec<f64>, bools: Vec<bool>) -> Self {
        Self {
            ints: ints.into(),
            doubles: doubles.into(),
            bools: bools.into(),
        }
    }
}

fn cycle<T: Copy + Default>(values: &mut VecDeque<T>) -> T {
    match values.pop_front() {
        Some(v) => {
            values.push_back(v);
            v
        }
        None => T::default(),
    }
}

impl RandomSource for FixedSource {
    fn next_int(&mut self, bound: i64) -> i64 {
        let v = cycle(&mut self.ints);
        if bound <= 0 { 0 } else { v.rem_euclid(bound) }
    }

    fn next_double(&mut self) -> f64 {
        cycle(&mut self.doubles)
    }

    fn next_bool(&mut self) -> bool {
        cycle(&mut self.bools)
    }
}
