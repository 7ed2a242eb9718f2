//! Charge-basis level solver.
//!
//! For each offset charge `ng` on a uniform grid over [-1, 1] the Cooper-pair
//! Hamiltonian
//!
//! ```text
//! H = 4·EC·(n − ng)² − EJ/2 · Σ (|n⟩⟨n+1| + |n+1⟩⟨n|)
//! ```
//!
//! is diagonalized in the charge basis n = −40..=40, and the spectrum is
//! shifted so the ground level sits at zero.

use std::f64::consts::PI;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{E_CHARGE, HBAR, PLANCK};
use crate::error::{TransmonError, TransmonResult, require_positive};

/// Charge cutoff: states n = −NMAX..=NMAX.
pub const NMAX: usize = 40;

/// Dimension of the truncated charge basis.
pub const BASIS_DIM: usize = 2 * NMAX + 1;

/// Number of levels kept per offset-charge sample.
pub const KEPT_LEVELS: usize = 4;

/// Grid size used by the fitter and the coupled-oscillator extraction.
pub const DEFAULT_GRID: usize = 51;

/// Levels of one transmon across the offset-charge grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmonLevels {
    /// Mean 0→1 transition frequency (GHz).
    pub f01_ghz: f64,
    /// Mean anharmonicity E2 − 2·E1 (MHz).
    pub anharmonicity_mhz: f64,
    /// Peak-to-peak variation of E1 over the grid (Hz).
    pub charge_dispersion_hz: f64,
    /// Dephasing time implied by the charge dispersion (ms).
    pub tphi_ms: f64,
    /// Charging energy EC/h (GHz).
    pub ec_ghz: f64,
    /// Josephson energy EJ/h (GHz).
    pub ej_ghz: f64,
    /// Offset charges sampled, in units of 2e.
    pub offset_charges: Vec<f64>,
    /// Lowest levels at each offset charge relative to the ground level (GHz).
    pub energies_ghz: Vec<[f64; KEPT_LEVELS]>,
}

impl TransmonLevels {
    /// f02/2 (GHz), the second fit target.
    pub fn f02_half_ghz(&self) -> f64 {
        self.f01_ghz + self.anharmonicity_mhz / 2.0 / 1e3
    }
}

/// `n` evenly spaced offset charges over [-1, 1]; `n` must be odd.
pub fn offset_charge_grid(n: usize) -> TransmonResult<Vec<f64>> {
    if n == 0 || n % 2 == 0 {
        return Err(TransmonError::InvalidGrid(n));
    }
    if n == 1 {
        return Ok(vec![-1.0]);
    }
    let step = 2.0 / (n - 1) as f64;
    Ok((0..n).map(|i| -1.0 + step * i as f64).collect())
}

/// Charge-basis Hamiltonian at offset charge `ng`, with energies in the
/// same unit as `ec` and `ej`.
pub fn charge_hamiltonian(ec: f64, ej: f64, ng: f64) -> DMatrix<f64> {
    DMatrix::from_fn(BASIS_DIM, BASIS_DIM, |i, j| {
        if i == j {
            let n = i as f64 - NMAX as f64;
            4.0 * ec * (n - ng).powi(2)
        } else if i.abs_diff(j) == 1 {
            -0.5 * ej
        } else {
            0.0
        }
    })
}

/// Solve the transmon levels for total capacitance `cq_ff` (fF) and critical
/// current `ic_na` (nA) on a grid of `grid_points` offset charges.
pub fn levels_vs_ng(cq_ff: f64, ic_na: f64, grid_points: usize) -> TransmonResult<TransmonLevels> {
    let c = require_positive("cq_ff", cq_ff)? * 1e-15;
    let ic = require_positive("ic_na", ic_na)? * 1e-9;
    let charges = offset_charge_grid(grid_points)?;

    let ec_ghz = E_CHARGE.powi(2) / 2.0 / c / PLANCK / 1e9;
    let ej_ghz = ic * HBAR / 2.0 / E_CHARGE / PLANCK / 1e9;
    debug!(ec_ghz, ej_ghz, grid_points, "Solving charge-basis levels");

    let mut energies_ghz = Vec::with_capacity(charges.len());
    for &ng in &charges {
        let h = charge_hamiltonian(ec_ghz, ej_ghz, ng);
        if h != h.transpose() {
            return Err(TransmonError::NotHermitian { ng });
        }

        let mut spectrum: Vec<f64> = h.symmetric_eigenvalues().iter().copied().collect();
        spectrum.sort_by(f64::total_cmp);
        let ground = spectrum[0];
        let mut kept = [0.0; KEPT_LEVELS];
        for (slot, e) in kept.iter_mut().zip(&spectrum) {
            *slot = e - ground;
        }
        energies_ghz.push(kept);
    }

    let n = energies_ghz.len() as f64;
    let f01_ghz = energies_ghz.iter().map(|e| e[1]).sum::<f64>() / n;
    let anharmonicity_mhz = energies_ghz
        .iter()
        .map(|e| 1000.0 * (e[2] - 2.0 * e[1]))
        .sum::<f64>()
        / n;

    let (lo, hi) = energies_ghz
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
            (lo.min(e[1]), hi.max(e[1]))
        });
    let charge_dispersion_hz = (hi - lo) * 1e9;
    let tphi_ms = 2.0 / (2.0 * PI * charge_dispersion_hz * PI * 1e-4 * 1e-3);

    info!("Mean Frequency {f01_ghz:.6} [GHz]");
    info!("Anharmonicity {anharmonicity_mhz:.6} [MHz]");
    info!("EC {ec_ghz:.6} [GHz]");
    info!("Charge Dispersion {:.6} [kHz]", charge_dispersion_hz / 1e3);
    info!("Dephasing Time {tphi_ms:.6} [ms]");

    Ok(TransmonLevels {
        f01_ghz,
        anharmonicity_mhz,
        charge_dispersion_hz,
        tphi_ms,
        ec_ghz,
        ej_ghz,
        offset_charges: charges,
        energies_ghz,
    })
}
