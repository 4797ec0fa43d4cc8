//! Typed strided views over caller-owned buffers.
//!
//! ## Purpose
//!
//! This module provides the dense-array view abstraction both kernels
//! consume: a shape plus per-axis element strides over a caller-owned
//! slice. It replaces per-type handler glue with one generic, stateless
//! abstraction. It also provides the in-place statistics tables the
//! radial aggregator mutates (`BinStats`, `NoiseStats`).
//!
//! ## Design notes
//!
//! * **Zero-copy**: Views never own or reallocate the underlying buffer.
//! * **Strided**: Element strides allow non-contiguous layouts (e.g. a
//!   transposed or sub-sampled detector image) without copying.
//! * **Checked at construction**: A view verifies once that its maximum
//!   reachable index fits in the buffer; element access is then plain
//!   indexing.
//!
//! ## Invariants
//!
//! * `get(i, j)` with `i < rows`, `j < cols` is always in bounds for a
//!   successfully constructed view.
//! * `BinStats` updates count, running mean, and running sum of squared
//!   deviations together, never independently.
//!
//! ## Non-goals
//!
//! * This module does not implement arithmetic on views.
//! * This module does not support broadcasting or reshaping.

use num_traits::Float;

use crate::primitives::errors::SasError;

// ============================================================================
// MatrixView
// ============================================================================

/// An immutable 2-D view with shape and per-axis element strides.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    row_stride: usize,
    col_stride: usize,
}

impl<'a, T: Copy> MatrixView<'a, T> {
    /// Create a contiguous row-major view over `data`.
    pub fn from_slice(data: &'a [T], rows: usize, cols: usize) -> Result<Self, SasError> {
        Self::with_strides(data, rows, cols, cols, 1)
    }

    /// Create a view with explicit element strides.
    ///
    /// Returns an error when the highest reachable index does not fit in
    /// `data`.
    pub fn with_strides(
        data: &'a [T],
        rows: usize,
        cols: usize,
        row_stride: usize,
        col_stride: usize,
    ) -> Result<Self, SasError> {
        if rows == 0 || cols == 0 {
            return Err(SasError::EmptyInput);
        }
        let max_index = (rows - 1) * row_stride + (cols - 1) * col_stride;
        if max_index >= data.len() {
            return Err(SasError::BufferTooSmall {
                name: "matrix",
                needed: max_index + 1,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            row_stride,
            col_stride,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as (rows, cols).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Element at row `i`, column `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[i * self.row_stride + j * self.col_stride]
    }
}

// ============================================================================
// BinStats
// ============================================================================

/// A mutable view over a caller-owned `3 x bins` statistics table.
///
/// Row 0 holds the per-bin sample count, row 1 the running mean, and
/// row 2 the running sum of squared deviations, updated together via
/// Welford's recurrence.
#[derive(Debug)]
pub struct BinStats<'a, T> {
    data: &'a mut [T],
    bins: usize,
}

impl<'a, T: Float> BinStats<'a, T> {
    /// Wrap a row-major `3 x bins` buffer.
    pub fn new(data: &'a mut [T], bins: usize) -> Result<Self, SasError> {
        if data.len() < 3 * bins {
            return Err(SasError::BufferTooSmall {
                name: "hist_count",
                needed: 3 * bins,
                got: data.len(),
            });
        }
        Ok(Self { data, bins })
    }

    /// Number of radial bins covered by the table.
    #[inline]
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Sample count for bin `r`.
    #[inline]
    pub fn count(&self, r: usize) -> T {
        self.data[r]
    }

    /// Running mean for bin `r`.
    #[inline]
    pub fn mean(&self, r: usize) -> T {
        self.data[self.bins + r]
    }

    /// Running sum of squared deviations for bin `r`.
    #[inline]
    pub fn sum_sq_dev(&self, r: usize) -> T {
        self.data[2 * self.bins + r]
    }

    /// Fold sample `value` into bin `r`.
    ///
    /// Welford's recurrence; the squared-deviation term uses the updated
    /// mean.
    #[inline]
    pub fn push(&mut self, r: usize, value: T) {
        let bins = self.bins;
        self.data[r] = self.data[r] + T::one();
        let count = self.data[r];
        let delta = value - self.data[bins + r];
        self.data[bins + r] = self.data[bins + r] + delta / count;
        self.data[2 * bins + r] = self.data[2 * bins + r] + delta * (value - self.data[bins + r]);
    }
}

// ============================================================================
// NoiseStats
// ============================================================================

/// A mutable view over a caller-owned length-4 noise accumulator.
///
/// Slots hold, in order: sample count, raw sum, running mean, and running
/// sum of squared deviations.
#[derive(Debug)]
pub struct NoiseStats<'a, T> {
    data: &'a mut [T],
}

impl<'a, T: Float> NoiseStats<'a, T> {
    /// Wrap a length-4 accumulator buffer.
    pub fn new(data: &'a mut [T]) -> Result<Self, SasError> {
        if data.len() < 4 {
            return Err(SasError::BufferTooSmall {
                name: "readout_noise",
                needed: 4,
                got: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Sample count.
    #[inline]
    pub fn count(&self) -> T {
        self.data[0]
    }

    /// Raw sum of samples.
    ///
    /// The slot is always maintained by [`NoiseStats::push`]; the
    /// accessor is read back by diagnostics and tests.
    #[cfg(feature = "dev")]
    #[inline]
    pub fn sum(&self) -> T {
        self.data[1]
    }

    /// Running mean.
    #[inline]
    pub fn mean(&self) -> T {
        self.data[2]
    }

    /// Running sum of squared deviations.
    #[inline]
    pub fn sum_sq_dev(&self) -> T {
        self.data[3]
    }

    /// Fold sample `value` into the accumulator.
    ///
    /// Same Welford recurrence as [`BinStats::push`], plus a running raw
    /// sum.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.data[0] = self.data[0] + T::one();
        self.data[1] = self.data[1] + value;
        let delta = value - self.data[2];
        self.data[2] = self.data[2] + delta / self.data[0];
        self.data[3] = self.data[3] + delta * (value - self.data[2]);
    }
}
