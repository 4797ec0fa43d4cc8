//! High-level API for the reduction kernels.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points: a fluent
//! builder for the regularized IFT solver ([`Ift`]) and one for the
//! radial averager ([`RadialAverager`]). Builders validate parameters at
//! `build()`, the built executors validate shapes at call time, allocate
//! output buffers, invoke the kernels, and post-process results into
//! typed values.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builders with sensible defaults for all
//!   parameters.
//! * **Validated**: Nothing reaches a kernel without passing the
//!   validator; the kernels themselves stay unchecked and allocation-free.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration flow
//!
//! 1. Create a builder via `Ift::new()` or `RadialAverager::new()`.
//! 2. Chain configuration methods.
//! 3. Call `.build()` to validate and obtain an executor.
//! 4. Call `.solve(..)` / `.average(..)` with data.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use num_traits::Float;

use crate::algorithms::radial::{accumulate, RadialGeometry};
use crate::engine::validator::Validator;
use crate::engine::{solver, workspace};
use crate::primitives::view::{BinStats, NoiseStats};

// Publicly re-exported types
pub use crate::algorithms::prior::sphere_prior;
pub use crate::algorithms::system::{assemble, IftSystem};
pub use crate::algorithms::transfer::transfer_matrix;
pub use crate::engine::solver::SolverControls;
pub use crate::engine::workspace::IftWorkspace;
pub use crate::math::welford::Welford;
pub use crate::primitives::errors::SasError;
pub use crate::primitives::view::MatrixView;

// ============================================================================
// IFT solver builder
// ============================================================================

/// Fluent builder for the regularized IFT solver.
///
/// Unset parameters fall back to the defaults of
/// [`SolverControls::default`]; the backtracking ceiling defaults to the
/// `bkkmax` of the system being solved.
#[derive(Debug, Clone, Default)]
pub struct Ift<T> {
    alpha: Option<T>,
    omega: Option<T>,
    omegamin: Option<T>,
    omegareduction: Option<T>,
    bkkmax: Option<T>,
    maxit: Option<usize>,
    minit: Option<usize>,
    dotsptol: Option<T>,
}

impl<T: Float> Ift<T> {
    /// Create a builder with every parameter unset.
    pub fn new() -> Self {
        Self {
            alpha: None,
            omega: None,
            omegamin: None,
            omegareduction: None,
            bkkmax: None,
            maxit: None,
            minit: None,
            dotsptol: None,
        }
    }

    /// Regularization weight `alpha`.
    pub fn alpha(mut self, alpha: T) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Initial relaxation factor `omega` (in `(0, 1]`).
    pub fn relaxation(mut self, omega: T) -> Self {
        self.omega = Some(omega);
        self
    }

    /// Relaxation floor `omegamin`.
    pub fn relaxation_floor(mut self, omegamin: T) -> Self {
        self.omegamin = Some(omegamin);
        self
    }

    /// Backtracking divisor `omegareduction` (> 1).
    pub fn step_reduction(mut self, reduction: T) -> Self {
        self.omegareduction = Some(reduction);
        self
    }

    /// Override the backtracking ceiling `bkkmax`.
    ///
    /// When unset, the ceiling comes from the [`IftSystem`] being solved.
    pub fn backtracking_ceiling(mut self, bkkmax: T) -> Self {
        self.bkkmax = Some(bkkmax);
        self
    }

    /// Maximum outer iterations.
    pub fn max_iterations(mut self, maxit: usize) -> Self {
        self.maxit = Some(maxit);
        self
    }

    /// Minimum outer iterations.
    pub fn min_iterations(mut self, minit: usize) -> Self {
        self.minit = Some(minit);
        self
    }

    /// Convergence tolerance on `|1 - dotsp|`.
    pub fn tolerance(mut self, dotsptol: T) -> Self {
        self.dotsptol = Some(dotsptol);
        self
    }

    /// Validate the configuration and build a solver.
    pub fn build(self) -> Result<IftSolver<T>, SasError> {
        let defaults = SolverControls::default();
        let controls = SolverControls {
            alpha: self.alpha.unwrap_or(defaults.alpha),
            omega: self.omega.unwrap_or(defaults.omega),
            omegamin: self.omegamin.unwrap_or(defaults.omegamin),
            omegareduction: self.omegareduction.unwrap_or(defaults.omegareduction),
            bkkmax: self.bkkmax.unwrap_or(defaults.bkkmax),
            maxit: self.maxit.unwrap_or(defaults.maxit),
            minit: self.minit.unwrap_or(defaults.minit),
            dotsptol: self.dotsptol.unwrap_or(defaults.dotsptol),
            dotsp0: defaults.dotsp0,
        };
        Validator::validate_controls(&controls)?;

        Ok(IftSolver {
            controls,
            ceiling_override: self.bkkmax.is_some(),
        })
    }
}

/// A validated, reusable solver configuration.
#[derive(Debug, Clone)]
pub struct IftSolver<T> {
    controls: SolverControls<T>,
    ceiling_override: bool,
}

/// Result of one regularized solve.
#[derive(Debug, Clone)]
pub struct IftSolution<T> {
    /// The converged pair-distance distribution.
    pub pr: Vec<T>,
    /// Penalty `s = -Σ (P[k] - m[k])^2` of the final estimate.
    pub penalty: T,
}

impl<T: Float> IftSolver<T> {
    /// The step-control scalars this solver was built with.
    pub fn controls(&self) -> &SolverControls<T> {
        &self.controls
    }

    /// Solve an assembled system starting from `prior`.
    ///
    /// The prior seeds both the estimate and the first smoothness
    /// evaluation, matching the established reduction driver. Allocates
    /// the estimate and a fresh workspace; use [`IftSolver::solve_in_place`]
    /// to reuse caller-owned buffers.
    pub fn solve(&self, system: &IftSystem<T>, prior: &[T]) -> Result<IftSolution<T>, SasError> {
        Validator::validate_estimate(prior)?;
        Validator::validate_length(prior, system.n, "prior")?;

        let mut p = prior.to_vec();
        let mut ws = workspace::IftWorkspace::new(system.n);
        ws.m.copy_from_slice(prior);

        let controls = self.resolve_controls(system);
        let penalty = solver::solve(
            &controls,
            system.b_view(),
            system.bmat_view(),
            &system.sum_dia,
            &system.bkk,
            &mut p,
            &mut ws,
        );

        Ok(IftSolution { pr: p, penalty })
    }

    /// Solve with caller-owned buffers, mutating `p` in place.
    ///
    /// `b` and `bmat` must be `n x n` for `n = p.len()`; `sum_dia`,
    /// `bkk`, and all workspace buffers must have length `n`. The
    /// incoming contents of `ws.m` seed the first gradient evaluation.
    /// Returns the penalty of the final estimate.
    #[allow(clippy::too_many_arguments)]
    pub fn solve_in_place(
        &self,
        b: MatrixView<'_, T>,
        bmat: MatrixView<'_, T>,
        sum_dia: &[T],
        bkk: &[T],
        p: &mut [T],
        ws: &mut IftWorkspace<T>,
    ) -> Result<T, SasError> {
        Validator::validate_estimate(p)?;
        let n = p.len();
        Validator::validate_square(&b, n, "B")?;
        Validator::validate_square(&bmat, n, "Bmat")?;
        Validator::validate_length(sum_dia, n, "sum_dia")?;
        Validator::validate_length(bkk, n, "bkk")?;
        Validator::validate_length(&ws.m, n, "workspace.m")?;
        Validator::validate_length(&ws.psumi, n, "workspace.psumi")?;
        Validator::validate_length(&ws.dp, n, "workspace.dp")?;
        Validator::validate_length(&ws.pold, n, "workspace.pold")?;

        Ok(solver::solve(&self.controls, b, bmat, sum_dia, bkk, p, ws))
    }

    fn resolve_controls(&self, system: &IftSystem<T>) -> SolverControls<T> {
        let mut controls = self.controls;
        if !self.ceiling_override {
            controls.bkkmax = system.bkkmax;
        }
        controls
    }
}

// ============================================================================
// Radial averager builder
// ============================================================================

/// Fluent builder for the radial averager.
#[derive(Debug, Clone, Default)]
pub struct RadialAverager<T> {
    x_c: Option<T>,
    y_c: Option<T>,
    bounds: Option<(usize, usize)>,
}

impl<T: Float> RadialAverager<T> {
    /// Create a builder with every parameter unset.
    pub fn new() -> Self {
        Self {
            x_c: None,
            y_c: None,
            bounds: None,
        }
    }

    /// Beam center, in pixel coordinates.
    pub fn center(mut self, x_c: T, y_c: T) -> Self {
        self.x_c = Some(x_c);
        self.y_c = Some(y_c);
        self
    }

    /// Explicit radial bounds `(low_q, high_q)`, exclusive on both sides.
    ///
    /// When unset, `low_q = 0` and `high_q` is the largest distance from
    /// the center to an image edge.
    pub fn bounds(mut self, low_q: usize, high_q: usize) -> Self {
        self.bounds = Some((low_q, high_q));
        self
    }

    /// Validate the configuration and build an averager.
    pub fn build(self) -> Result<Averager<T>, SasError> {
        let x_c = self.x_c.ok_or(SasError::MissingParameter {
            parameter: "center",
        })?;
        let y_c = self.y_c.ok_or(SasError::MissingParameter {
            parameter: "center",
        })?;
        Validator::validate_center(x_c, y_c)?;

        Ok(Averager {
            x_c,
            y_c,
            bounds: self.bounds,
        })
    }
}

/// A validated, reusable radial-averaging configuration.
#[derive(Debug, Clone)]
pub struct Averager<T> {
    x_c: T,
    y_c: T,
    bounds: Option<(usize, usize)>,
}

/// Radially averaged intensity profile with Poisson error bars.
#[derive(Debug, Clone)]
pub struct RadialProfile<T> {
    /// Mean intensity per radial bin (`0` for empty bins).
    pub intensity: Vec<T>,
    /// Error bar per bin: population standard deviation over the square
    /// root of the count, readout-noise inflated when a noise mask was
    /// supplied.
    pub errors: Vec<T>,
    /// Number of pixels contributing to each bin.
    pub counts: Vec<T>,
}

impl<T: Float> Averager<T> {
    /// Radially average `image` around the configured center.
    ///
    /// `mask` (same shape as `image`; `1` includes a pixel) defaults to
    /// all-ones. When `noise_mask` is supplied, readout noise is
    /// accumulated from its zero-valued pixels, its mean is subtracted
    /// from every bin intensity, and the error bars are inflated
    /// accordingly.
    pub fn average(
        &self,
        image: MatrixView<'_, T>,
        mask: Option<MatrixView<'_, T>>,
        noise_mask: Option<MatrixView<'_, T>>,
    ) -> Result<RadialProfile<T>, SasError> {
        let (xlen, ylen) = image.shape();

        let ones;
        let mask = match mask {
            Some(view) => {
                Validator::validate_mask(&image, &view, "mask")?;
                view
            }
            None => {
                ones = vec![T::one(); xlen * ylen];
                MatrixView::from_slice(&ones, xlen, ylen)?
            }
        };
        if let Some(ref view) = noise_mask {
            Validator::validate_mask(&image, view, "readout_noise_mask")?;
        }

        let (low_q, high_q) = match self.bounds {
            Some(bounds) => bounds,
            None => (0, self.default_high_q(xlen, ylen)),
        };

        let mut hist = vec![T::zero(); high_q];
        let mut stats_buf = vec![T::zero(); 3 * high_q];
        let mut noise_buf = vec![T::zero(); 4];
        let mut stats = BinStats::new(&mut stats_buf, high_q)?;
        Validator::validate_bins(low_q, high_q, hist.len(), stats.bins())?;

        let geometry = RadialGeometry {
            x_c: self.x_c,
            y_c: self.y_c,
            low_q,
            high_q,
        };

        {
            let mut readout = NoiseStats::new(&mut noise_buf)?;
            let noise = match noise_mask {
                Some(view) => Some((view, &mut readout)),
                None => None,
            };
            accumulate(image, mask, &geometry, &mut hist, &mut stats, noise);
        }

        // Derive intensities and Poisson error bars from the bin tables.
        let mut intensity = vec![T::zero(); high_q];
        let mut errors = vec![T::zero(); high_q];
        let mut counts = vec![T::zero(); high_q];
        for r in 0..high_q {
            let count = stats.count(r);
            counts[r] = count;
            if count > T::zero() {
                intensity[r] = stats.mean(r);
                let std = (stats.sum_sq_dev(r) / count).sqrt();
                errors[r] = std / count.sqrt();
            }
        }

        // The center pixel never passes the distance predicate; report it
        // directly in bin zero as the reduction convention expects.
        if low_q == 0 && high_q > 0 {
            if let (Some(xi), Some(yi)) = (
                self.x_c.floor().to_usize(),
                self.y_c.floor().to_usize(),
            ) {
                if xi < xlen && yi < ylen {
                    intensity[0] = image.get(xi, yi);
                }
            }
        }

        if noise_mask.is_some() {
            let readout = NoiseStats::new(&mut noise_buf)?;
            self.subtract_noise(&readout, &mut intensity, &mut errors);
        }

        Ok(RadialProfile {
            intensity,
            errors,
            counts,
        })
    }

    /// Largest distance from the center to an image edge, used as the
    /// default upper bound.
    fn default_high_q(&self, xlen: usize, ylen: usize) -> usize {
        let spans = [
            T::from(xlen).unwrap() - self.x_c,
            T::from(ylen).unwrap() - self.y_c,
            self.x_c,
            self.y_c,
        ];
        let max = spans.iter().copied().fold(T::zero(), T::max);
        max.trunc().to_usize().unwrap_or(0)
    }

    /// Subtract the mean readout noise from every bin and inflate the
    /// error bars with the noise error in quadrature.
    fn subtract_noise(
        &self,
        readout: &NoiseStats<'_, T>,
        intensity: &mut [T],
        errors: &mut [T],
    ) {
        let count = readout.count();
        if count <= T::zero() {
            return;
        }

        let noise_mean = readout.mean();
        let noise_std = (readout.sum_sq_dev() / count).sqrt();
        let noise_err = noise_std / count.sqrt();

        for value in intensity.iter_mut() {
            *value = *value - noise_mean;
        }
        for err in errors.iter_mut() {
            *err = (*err * *err + noise_err * noise_err).sqrt();
        }
    }
}
