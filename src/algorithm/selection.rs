//! Seeded random selection shared by every packing phase
//!
//! All randomness of a generator flows through one [`RandomSelector`], so a
//! fixed seed and a fixed sequence of generation calls reproduce the same room.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random source with the selection primitives used by the packers
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic when a seed is given, otherwise seeded from the system
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Weighted random selection
    ///
    /// Returns an index with probability proportional to its weight. Negative
    /// weights count as zero. When every weight is zero the choice is uniform.
    /// Returns `None` only for an empty slice.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
        if total <= 0.0 || !total.is_finite() {
            return self.index(weights.len());
        }

        let target = self.rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        for (i, &weight) in weights.iter().enumerate() {
            cumulative += weight.max(0.0);
            if target < cumulative {
                return Some(i);
            }
        }
        Some(weights.len() - 1)
    }

    /// Weighted selection over items carrying their own weight
    pub fn weighted_pick<'a, T>(
        &mut self,
        items: &'a [T],
        weight: impl Fn(&T) -> f64,
    ) -> Option<&'a T> {
        let weights: Vec<f64> = items.iter().map(weight).collect();
        self.weighted_choice(&weights)
            .and_then(|index| items.get(index))
    }

    /// Uniform index in `0..len`
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniform choice of one item
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).and_then(|index| items.get(index))
    }

    /// Uniform integer in `min..=max`, or `min` when the range is empty
    pub fn range_inclusive(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
