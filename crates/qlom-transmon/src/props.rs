//! Closed-form transmon parameters and conversion helpers.
//!
//! All inputs and outputs are SI; energies are angular frequencies (rad/s)
//! unless the name says otherwise.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::{E_CHARGE, HBAR, REDUCED_FLUX_QUANTUM, Z0};
use crate::error::{TransmonResult, require_positive};

/// Derived properties of a transmon with critical current `Ic` and total
/// capacitance `Cq`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransmonProps {
    /// Josephson inductance (H).
    pub lj: f64,
    /// Josephson energy (rad/s).
    pub ej: f64,
    /// Qubit characteristic impedance √(LJ/Cq) (Ω).
    pub zqp: f64,
    /// Charging energy (rad/s).
    pub ec: f64,
    /// Harmonic frequency minus EC (rad/s).
    pub wq: f64,
    /// Harmonic frequency 1/√(LJ·Cq) (rad/s).
    pub wq0: f64,
    /// Asymptotic charge dispersion of the first excited level (rad/s).
    pub eps1: f64,
}

/// Compute LJ, EJ, Zqp, EC, ωq, ωq0 and ε1 from `ic` (A) and `cq` (F).
pub fn transmon_props(ic: f64, cq: f64) -> TransmonResult<TransmonProps> {
    let ic = require_positive("ic", ic)?;
    let cq = require_positive("cq", cq)?;

    let lj = REDUCED_FLUX_QUANTUM / ic;
    let ej = REDUCED_FLUX_QUANTUM.powi(2) / lj / HBAR;
    let zqp = (lj / cq).sqrt();
    let ec = E_CHARGE.powi(2) / 2.0 / cq / HBAR;
    let wq0 = 1.0 / (lj * cq).sqrt();
    let wq = wq0 - ec;
    let eps1 = ec
        * 2f64.powi(9)
        * (2.0 / PI.sqrt())
        * (ej / 2.0 / ec).powf(1.25)
        * (-(8.0 * ej / ec).sqrt()).exp();

    Ok(TransmonProps {
        lj,
        ej,
        zqp,
        ec,
        wq,
        wq0,
        eps1,
    })
}

/// Critical current (A) of a junction with inductance `lj` (H).
pub fn ic_from_lj(lj: f64) -> f64 {
    REDUCED_FLUX_QUANTUM / lj
}

/// Critical current (A) for Josephson energy `ej` (J).
pub fn ic_from_ej(ej: f64) -> f64 {
    ej / REDUCED_FLUX_QUANTUM
}

/// Shunt capacitance (F) giving charging energy `ec` (J).
pub fn cs_from_ec(ec: f64) -> f64 {
    E_CHARGE.powi(2) / (2.0 * ec)
}

/// T1 (s) limited by a charge line coupled through `c_charge` (F) into a
/// 50 Ω environment, for a qubit of capacitance `cq` (F) at `f01` (Hz).
pub fn chargeline_t1(c_charge: f64, cq: f64, f01: f64) -> f64 {
    cq / (c_charge.powi(2) * Z0 * (2.0 * PI * f01).powi(2))
}

/// Inductance (H) equivalent to Josephson energy `ej` given in rad/s.
pub fn lq_from_ej(ej: f64) -> f64 {
    REDUCED_FLUX_QUANTUM.powi(2) / (HBAR * ej)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PLANCK;

    #[test]
    fn test_ic_lj_roundtrip() {
        let lj = 10e-9;
        let ic = ic_from_lj(lj);
        assert!((ic - 32.9e-9).abs() < 0.1e-9);
        let p = transmon_props(ic, 80e-15).unwrap();
        assert!((p.lj - lj).abs() / lj < 1e-12);
        assert!((lq_from_ej(p.ej) - lj).abs() / lj < 1e-12);
    }

    #[test]
    fn test_ec_matches_cs_from_ec() {
        let cq = 80e-15;
        let p = transmon_props(20e-9, cq).unwrap();
        let ec_joule = p.ec * HBAR;
        assert!((cs_from_ec(ec_joule) - cq).abs() / cq < 1e-12);
        // ~242 MHz for 80 fF
        let ec_mhz = ec_joule / PLANCK / 1e6;
        assert!((ec_mhz - 242.1).abs() < 1.0, "{ec_mhz}");
    }

    #[test]
    fn test_ic_from_ej() {
        let ic = 20e-9;
        let ej = ic * REDUCED_FLUX_QUANTUM;
        assert!((ic_from_ej(ej) - ic).abs() < 1e-20);
    }

    #[test]
    fn test_dispersion_shrinks_with_ratio() {
        let small = transmon_props(10e-9, 80e-15).unwrap();
        let large = transmon_props(40e-9, 80e-15).unwrap();
        assert!(large.eps1 < small.eps1);
        assert!(small.wq < small.wq0);
    }

    #[test]
    fn test_chargeline_t1() {
        let t1 = chargeline_t1(0.1e-15, 80e-15, 5e9);
        // Cq / (Cc² · 50 · ω²)
        let expected = 80e-15 / (1e-32 * 50.0 * (2.0 * PI * 5e9).powi(2));
        assert!((t1 - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(transmon_props(0.0, 80e-15).is_err());
        assert!(transmon_props(20e-9, -1.0).is_err());
    }
}
