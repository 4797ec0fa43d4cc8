//! Welford's online mean/variance accumulator.
//!
//! ## Purpose
//!
//! This module provides a standalone accumulator implementing Welford's
//! online algorithm, the same recurrence the radial statistics tables
//! apply in place. It exists for callers that post-process or parallelize
//! the aggregation: per-partition accumulators can be combined with
//! [`Welford::merge`] without losing numerical stability.
//!
//! ## Design notes
//!
//! * **Algorithm**: Welford (1962), maintaining running mean and sum of
//!   squared deviations, avoiding the catastrophic cancellation of the
//!   naive `E[X²] - (E[X])²` formula.
//! * **Count as `T`**: The count is stored in the float type so the
//!   accumulator round-trips through the caller-owned statistics tables
//!   unchanged.
//!
//! ## Invariants
//!
//! * Mean and sum of squared deviations are updated together per sample,
//!   never independently.
//! * `merge` of two accumulators equals (within floating-point tolerance)
//!   a single accumulator fed both streams.

use num_traits::Float;

/// Online mean/variance accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Welford<T> {
    count: T,
    mean: T,
    sum_sq_dev: T,
}

impl<T: Float> Welford<T> {
    /// Create an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self {
            count: T::zero(),
            mean: T::zero(),
            sum_sq_dev: T::zero(),
        }
    }

    /// Reconstruct an accumulator from stored state.
    #[inline]
    pub fn from_parts(count: T, mean: T, sum_sq_dev: T) -> Self {
        Self {
            count,
            mean,
            sum_sq_dev,
        }
    }

    /// Fold one sample into the accumulator.
    ///
    /// The squared-deviation term uses the *updated* mean:
    /// `count += 1; delta = v - mean; mean += delta/count;
    /// sum_sq_dev += delta * (v - mean)`.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.count = self.count + T::one();
        let delta = value - self.mean;
        self.mean = self.mean + delta / self.count;
        self.sum_sq_dev = self.sum_sq_dev + delta * (value - self.mean);
    }

    /// Combine two accumulators as if their streams were concatenated.
    ///
    /// Chan et al. parallel form; required to preserve correctness when
    /// distinct partitions contribute samples to the same bin.
    pub fn merge(&self, other: &Self) -> Self {
        if other.count == T::zero() {
            return *self;
        }
        if self.count == T::zero() {
            return *other;
        }

        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        let mean = self.mean + delta * (other.count / count);
        let sum_sq_dev =
            self.sum_sq_dev + other.sum_sq_dev + delta * delta * (self.count * other.count / count);

        Self {
            count,
            mean,
            sum_sq_dev,
        }
    }

    /// Number of samples seen.
    #[inline]
    pub fn count(&self) -> T {
        self.count
    }

    /// Running mean (zero when empty).
    #[inline]
    pub fn mean(&self) -> T {
        self.mean
    }

    /// Running sum of squared deviations.
    #[inline]
    pub fn sum_sq_dev(&self) -> T {
        self.sum_sq_dev
    }

    /// Population variance (`sum_sq_dev / count`), or `None` when empty.
    pub fn population_variance(&self) -> Option<T> {
        if self.count == T::zero() {
            None
        } else {
            Some(self.sum_sq_dev / self.count)
        }
    }

    /// Sample variance (`sum_sq_dev / (count - 1)`), or `None` for fewer
    /// than two samples.
    pub fn sample_variance(&self) -> Option<T> {
        if self.count < T::from(2.0).unwrap() {
            None
        } else {
            Some(self.sum_sq_dev / (self.count - T::one()))
        }
    }
}

impl<T: Float> Default for Welford<T> {
    fn default() -> Self {
        Self::new()
    }
}
