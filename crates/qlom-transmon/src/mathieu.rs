//! Analytic transmon bands from Mathieu characteristic values.
//!
//! The transmon Schrödinger equation in the phase basis is a Mathieu
//! equation, so level `m` at offset charge `ng` is `EC · a_k(−EJ/2EC)` with
//! `k = kidx(m, ng)`. Characteristic values are computed for integer order
//! from the three-term recurrence of the Fourier coefficients, truncated to
//! a symmetric tridiagonal eigenproblem.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TransmonError, TransmonResult};

/// Offset charges of the raw three-point grid.
pub const RAW_GRID: [f64; 3] = [-0.5, 0.0, 0.5];

/// Number of points in the periodic extension over [-2, 2].
pub const PERIODIC_POINTS: usize = 9;

/// Levels tabulated by [`mathieu_bands`].
pub const BAND_LEVELS: usize = 4;

/// Mathieu characteristic index for level `m` at offset charge `ng`.
///
/// ```rust
/// use qlom_transmon::mathieu::kidx;
///
/// assert_eq!(kidx(0, 0.0), 0.0);
/// assert_eq!(kidx(1, 0.0), 2.0);
/// assert_eq!(kidx(0, 0.5), 1.0);
/// ```
pub fn kidx(m: u32, ng: f64) -> f64 {
    let m1 = f64::from(m) + 1.0;
    let base = m1 - m1 % 2.0;
    if ng == 0.0 {
        return base;
    }
    // (−1)^(m − (sign(ng) − 1)/2): exponent is m for ng > 0, m + 1 for ng < 0.
    let odd = if ng > 0.0 { m % 2 == 1 } else { m % 2 == 0 };
    let parity = if odd { -1.0 } else { 1.0 };
    base + 2.0 * ng * parity
}

/// Characteristic value `a_r(q)` of the even Mathieu function `ce_r`.
///
/// Negative orders map to `|r|`.
pub fn mathieu_a(order: i64, q: f64) -> f64 {
    let r = order.unsigned_abs() as usize;
    let even = r % 2 == 0;
    let rank = r / 2;
    let dim = rank + 40 + q.abs().sqrt().ceil() as usize;

    let diag = |k: usize| -> f64 {
        let p = if even { 2 * k } else { 2 * k + 1 } as f64;
        p * p
    };
    let m = DMatrix::from_fn(dim, dim, |i, j| {
        if i == j {
            if !even && i == 0 { 1.0 + q } else { diag(i) }
        } else if i.abs_diff(j) == 1 {
            if even && i.min(j) == 0 {
                std::f64::consts::SQRT_2 * q
            } else {
                q
            }
        } else {
            0.0
        }
    });

    let mut eig: Vec<f64> = m.symmetric_eigenvalues().iter().copied().collect();
    eig.sort_by(f64::total_cmp);
    eig[rank]
}

/// Energy of transmon level `m` at offset charge `ng`, for `EJ/EC = ratio`,
/// in the unit of `ec`.
pub fn transmon_eigenvalue(m: u32, ng: f64, ratio: f64, ec: f64) -> TransmonResult<f64> {
    let index = kidx(m, ng);
    let rounded = index.round();
    if (index - rounded).abs() > 1e-9 {
        return Err(TransmonError::NonIntegerMathieuOrder(index));
    }
    Ok(ec * mathieu_a(rounded as i64, -0.5 * ratio))
}

/// Extend values on [`RAW_GRID`] to `N` points spaced by 0.5 starting at
/// ng = −N/4: entries 0 and 1 come from raw positions 1 and 0, every later
/// entry repeats the one two places back.
pub fn periodic_extension<const N: usize>(raw: &[f64; 3]) -> [f64; N] {
    let mut out = [0.0; N];
    for i in 0..N {
        out[i] = match i {
            0 => raw[1],
            1 => raw[0],
            _ => out[i - 2],
        };
    }
    out
}

/// Offset charges of the periodic extension, evenly spaced over [-2, 2].
pub fn periodic_offset_charges() -> [f64; PERIODIC_POINTS] {
    let mut out = [0.0; PERIODIC_POINTS];
    for (i, v) in out.iter_mut().enumerate() {
        *v = -2.0 + 0.5 * i as f64;
    }
    out
}

/// The lowest [`BAND_LEVELS`] analytic bands over [-2, 2].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathieuBands {
    /// EJ/EC used.
    pub ratio: f64,
    /// Charging energy scale.
    pub ec: f64,
    /// Offset charges of the extension.
    pub offset_charges: [f64; PERIODIC_POINTS],
    /// `levels[m][i]` is level `m` at `offset_charges[i]`.
    pub levels: [[f64; PERIODIC_POINTS]; BAND_LEVELS],
}

/// Tabulate the analytic bands for `EJ/EC = ratio`.
pub fn mathieu_bands(ratio: f64, ec: f64) -> TransmonResult<MathieuBands> {
    let mut levels = [[0.0; PERIODIC_POINTS]; BAND_LEVELS];
    for (m, row) in levels.iter_mut().enumerate() {
        let mut raw = [0.0; 3];
        for (slot, &ng) in raw.iter_mut().zip(RAW_GRID.iter()) {
            *slot = transmon_eigenvalue(m as u32, ng, ratio, ec)?;
        }
        debug!(m, ?raw, "Mathieu band samples");
        *row = periodic_extension::<PERIODIC_POINTS>(&raw);
    }
    Ok(MathieuBands {
        ratio,
        ec,
        offset_charges: periodic_offset_charges(),
        levels,
    })
}
