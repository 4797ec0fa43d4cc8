//! Prior distributions for the estimate vector.
//!
//! ## Purpose
//!
//! The regularized solver starts from (and is smoothed toward) a prior
//! pair-distance distribution. This module provides the sphere prior,
//! the default starting shape for globular scatterers.
//!
//! ## Design notes
//!
//! * The profile is the analytic `P(r)` of a homogeneous sphere of
//!   diameter `dmax`, scaled so its integral tracks the forward
//!   scattering `I(0)`.
//! * Values are floored at `pmin * max(P)` and then rescaled to preserve
//!   the pre-floor sum, so the solver never starts from exact zeros at
//!   the tails.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

use num_traits::Float;

use crate::primitives::errors::SasError;

/// Fraction of the profile maximum used as the floor value.
const PMIN: f64 = 0.005;

/// Sphere prior `P(r)` over `n` points on `[0, dmax]`.
///
/// Returns the prior values and the matching r-axis. `scale` is the
/// forward scattering `I(0)` of the measured curve.
///
/// Errors with [`SasError::TooFewPoints`] when `n < 2` and
/// [`SasError::InvalidNumericValue`] when `dmax` is not a positive
/// finite value or `scale` is not finite.
///
/// Profile: `P(r) = r^2 (1 - 1.5 (r/dmax) + 0.5 (r/dmax)^3) * norm` with
/// `norm = scale / (dmax^3 / 24) * dr`, floored at `pmin * max(P)` and
/// rescaled to the pre-floor sum.
pub fn sphere_prior<T: Float>(n: usize, dmax: T, scale: T) -> Result<(Vec<T>, Vec<T>), SasError> {
    if n < 2 {
        return Err(SasError::TooFewPoints { got: n, min: 2 });
    }
    if !dmax.is_finite() || dmax <= T::zero() {
        return Err(SasError::InvalidNumericValue(format!(
            "dmax={}",
            dmax.to_f64().unwrap_or(f64::NAN)
        )));
    }
    if !scale.is_finite() {
        return Err(SasError::InvalidNumericValue(format!(
            "scale={}",
            scale.to_f64().unwrap_or(f64::NAN)
        )));
    }

    let one = T::one();
    let half = T::from(0.5).unwrap();
    let three_halves = T::from(1.5).unwrap();
    let pmin = T::from(PMIN).unwrap();

    let step = dmax / T::from(n - 1).unwrap();
    let r_axis: Vec<T> = (0..n).map(|k| step * T::from(k).unwrap()).collect();

    let psum = dmax * dmax * dmax / T::from(24.0).unwrap();
    let norm = scale / psum * step;

    let mut p: Vec<T> = r_axis
        .iter()
        .map(|&r| {
            let x = r / dmax;
            r * r * (one - three_halves * x + half * x * x * x) * norm
        })
        .collect();

    // Floor the tails at pmin * max(P), then rescale to the pre-floor sum.
    let max = p.iter().copied().fold(T::zero(), T::max);
    let floor = pmin * max;

    let sum_before = p.iter().copied().fold(T::zero(), |acc, v| acc + v);
    for v in p.iter_mut() {
        if *v <= floor {
            *v = floor;
        }
    }
    let sum_after = p.iter().copied().fold(T::zero(), |acc, v| acc + v);

    if sum_after > T::zero() {
        let rescale = sum_before / sum_after;
        for v in p.iter_mut() {
            *v = *v * rescale;
        }
    }

    Ok((p, r_axis))
}
