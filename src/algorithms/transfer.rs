//! Sinc transfer-matrix construction.
//!
//! ## Purpose
//!
//! The regularized solver inverts the linear model
//! `I(q_i) = Σ_j T[i,j] * P(r_j)`. This module fills the transfer matrix
//! `T` for the Debye sphere kernel: `T[i,j] = c * sin(q_i*r_j)/(q_i*r_j)`.
//!
//! ## Design notes
//!
//! * The `4*pi*dr` scale is deliberately folded into `c` by the caller
//!   (or left at 1, absorbing it into the solved distribution).
//! * The `q*r = 0` entry takes the analytic limit `c` instead of the
//!   indeterminate `0/0`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

use num_traits::Float;

use crate::primitives::errors::SasError;

/// Fill a row-major `q.len() x r.len()` buffer with the sinc transfer
/// matrix `t[i*r.len() + j] = c * sin(q[i]*r[j]) / (q[i]*r[j])`.
///
/// Entries where `q*r` is zero are set to `c` (the `sinc` limit).
///
/// Errors with [`SasError::EmptyInput`] when either axis is empty,
/// [`SasError::InvalidNumericValue`] when `c` is not finite, and
/// [`SasError::BufferTooSmall`] when `t` holds fewer than
/// `q.len() * r.len()` elements.
pub fn transfer_matrix<T: Float>(q: &[T], r: &[T], c: T, t: &mut [T]) -> Result<(), SasError> {
    if q.is_empty() || r.is_empty() {
        return Err(SasError::EmptyInput);
    }
    if !c.is_finite() {
        return Err(SasError::InvalidNumericValue(format!(
            "c={}",
            c.to_f64().unwrap_or(f64::NAN)
        )));
    }
    let rlen = r.len();
    let needed = q.len() * rlen;
    if t.len() < needed {
        return Err(SasError::BufferTooSmall {
            name: "t",
            needed,
            got: t.len(),
        });
    }

    for (i, &qi) in q.iter().enumerate() {
        for (j, &rj) in r.iter().enumerate() {
            let qr = qi * rj;
            let entry = c * qr.sin() / qr;
            t[i * rlen + j] = if entry.is_nan() { c } else { entry };
        }
    }

    Ok(())
}
