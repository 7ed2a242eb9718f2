//! Physical constants in SI units.
//!
//! Pre-2019 SI values; reported parameters are calibrated against these.

use std::f64::consts::PI;

/// Elementary charge (C).
pub const E_CHARGE: f64 = 1.602_176_57e-19;

/// Planck constant (J·s).
pub const PLANCK: f64 = 6.626_069_57e-34;

/// Reduced Planck constant (J·s).
pub const HBAR: f64 = 1.054_571_8e-34;

/// Magnetic flux quantum h/2e (Wb).
pub const FLUX_QUANTUM: f64 = 2.067e-15;

/// Reduced flux quantum Φ0/2π (Wb).
pub const REDUCED_FLUX_QUANTUM: f64 = FLUX_QUANTUM / (2.0 * PI);

/// Characteristic impedance of the coupled resonators (Ω).
pub const Z0: f64 = 50.0;
