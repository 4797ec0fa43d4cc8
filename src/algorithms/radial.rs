//! Streaming radial-bin statistics aggregator.
//!
//! ## Purpose
//!
//! This module reduces a 2-D detector image to per-radius statistics in a
//! single pass: for every pixel it computes the integer distance to the
//! beam center, then folds the pixel value into the intensity histogram
//! and the running count/mean/sum-of-squared-deviations for that bin.
//! A second, independent predicate optionally accumulates readout noise
//! from the pixels a noise mask excludes from the signal.
//!
//! ## Design notes
//!
//! * **Single pass**: O(X·Y) time, O(1) space beyond the provided buffers.
//! * **Order independent**: Per-bin updates are associative, so the
//!   row-major traversal order does not affect the result.
//! * **Unchecked core**: The kernel trusts pre-validated shapes; the
//!   validator rejects mismatched masks and undersized buffers upstream.
//!
//! ## Key concepts
//!
//! * **Radial bin**: The set of pixels sharing the same truncated distance
//!   from the center.
//! * **Signal predicate**: `low_q < r < high_q`, mask value `1`, and a
//!   strictly positive pixel value.
//! * **Noise predicate**: `low_q < r < high_q - 1` and noise-mask value
//!   `0`; evaluated independently of the signal predicate, so one pixel
//!   may contribute to both.
//!
//! ## Invariants
//!
//! * A bin's count increases only for pixels meeting the relevant
//!   inclusion predicate.
//! * Mean and sum of squared deviations are updated together per
//!   Welford's recurrence, never independently.
//!
//! ## Non-goals
//!
//! * This module does not derive intensities or error bars from the
//!   accumulated statistics (API layer).
//! * This module does not allocate or size the output buffers.

use num_traits::Float;

use crate::primitives::view::{BinStats, MatrixView, NoiseStats};

/// Center and bin bounds for one aggregation pass.
#[derive(Debug, Clone, Copy)]
pub struct RadialGeometry<T> {
    /// Beam center x-coordinate, in pixels.
    pub x_c: T,
    /// Beam center y-coordinate, in pixels.
    pub y_c: T,
    /// Lower bin bound, exclusive.
    pub low_q: usize,
    /// Upper bin bound, exclusive.
    pub high_q: usize,
}

/// Accumulate radial statistics for every pixel of `image`.
///
/// For each pixel `(x, y)` the bin index is
/// `r = floor(sqrt((x - x_c)^2 + (y_c - y)^2))`. Pixels passing the
/// signal predicate add their value to `hist[r]` and update the Welford
/// state in `stats`; when `noise` is provided, pixels passing the noise
/// predicate update the readout-noise accumulator. Both predicates may
/// hold for the same pixel.
///
/// Shapes are the caller's contract: `mask` (and the noise mask, when
/// present) match `image`, `hist` has at least `high_q` entries, and
/// `stats` covers at least `high_q` bins.
pub fn accumulate<T: Float>(
    image: MatrixView<'_, T>,
    mask: MatrixView<'_, T>,
    geometry: &RadialGeometry<T>,
    hist: &mut [T],
    stats: &mut BinStats<'_, T>,
    mut noise: Option<(MatrixView<'_, T>, &mut NoiseStats<'_, T>)>,
) {
    let (xlen, ylen) = image.shape();
    let one = T::one();
    let zero = T::zero();

    for x in 0..xlen {
        let rel_x = T::from(x).unwrap() - geometry.x_c;
        for y in 0..ylen {
            let rel_y = geometry.y_c - T::from(y).unwrap();

            let r = (rel_x * rel_x + rel_y * rel_y).sqrt();
            let bin = match r.floor().to_usize() {
                Some(bin) => bin,
                None => continue,
            };

            let value = image.get(x, y);

            if bin > geometry.low_q
                && bin < geometry.high_q
                && mask.get(x, y) == one
                && value > zero
            {
                hist[bin] = hist[bin] + value;
                stats.push(bin, value);
            }

            if let Some((noise_mask, ref mut readout)) = noise {
                if bin > geometry.low_q
                    && bin + 1 < geometry.high_q
                    && noise_mask.get(x, y) == zero
                {
                    readout.push(value);
                }
            }
        }
    }
}
