//! Qubit-port couplings, dispersive shifts and Purcell-limited lifetimes.

use std::f64::consts::PI;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

use qlom_transmon::dispersive::{chi, nearly_equal};
use qlom_transmon::levels::TransmonLevels;
use qlom_transmon::props::TransmonProps;

use crate::error::{LomError, LomResult};
use crate::reduce::ReducedCircuit;
use crate::resonator::Resonator;

/// Assumed quality factor of the readout resonator.
pub const Q_READOUT: f64 = 1e4;

/// Assumed quality factor of the bus resonators.
pub const Q_BUS: f64 = 1e5;

/// Total T1 (s) reported when no port couples to the qubit.
pub const UNCOUPLED_T1: f64 = 100.0;

/// Relative tolerance of the resonator/transition degeneracy check.
pub const DEGENERACY_TOL: f64 = 1e-9;

/// Coupling of the qubit to one port (angular units, SI).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortCoupling {
    /// Effective port impedance √(Lr/tCSbus) (Ω).
    pub impedance: f64,
    /// Qubit-resonator coupling g (rad/s).
    pub g: f64,
    /// Full dispersive splitting 2χ (rad/s).
    pub chi: f64,
    /// Resonator quality factor.
    pub quality_factor: f64,
    /// Purcell-limited T1 through this port (s); `None` when g = 0.
    pub t1: Option<f64>,
}

/// Couplings of every port plus the combined lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingEstimate {
    /// Per-port couplings, readout first.
    pub ports: Vec<PortCoupling>,
    /// Port-to-port couplings (rad/s).
    pub bus_bus: DMatrix<f64>,
    /// Combined Purcell T1 (s) of the coupled ports, or [`UNCOUPLED_T1`]
    /// when none couples.
    pub t1: f64,
}

/// Estimate g, χ and Purcell T1 for each port.
///
/// `levels` supplies the numerical qubit frequency and anharmonicity;
/// `props` the qubit impedance.
pub fn estimate_couplings(
    reduced: &ReducedCircuit,
    resonators: &[Resonator],
    levels: &TransmonLevels,
    props: &TransmonProps,
    g_scale: f64,
) -> LomResult<CouplingEstimate> {
    let n = resonators.len();
    let wq = 2.0 * PI * levels.f01_ghz * 1e9;
    let w12 = wq + levels.anharmonicity_mhz * 2.0 * PI * 1e6;

    let mut ports = Vec::with_capacity(n);
    for (k, res) in resonators.iter().enumerate() {
        for transition in [wq, w12] {
            if nearly_equal(res.omega, transition, DEGENERACY_TOL) {
                return Err(LomError::DegenerateResonance {
                    port: k,
                    resonator_ghz: res.freq_ghz(),
                    transition_ghz: transition / 2.0 / PI / 1e9,
                });
            }
        }

        let impedance = (res.inductance / reduced.tcsbus[k]).sqrt();
        let g = 0.5 * res.omega * reduced.bbus[k] * (impedance / props.zqp).sqrt() * g_scale;
        let quality_factor = if k == 0 { Q_READOUT } else { Q_BUS };
        let kappa = res.omega / quality_factor;
        let t1 = (g != 0.0).then(|| {
            (res.omega.powi(2) - wq.powi(2)).powi(2) / (4.0 * kappa * g.powi(2) * wq.powi(2))
        });
        let splitting = 2.0 * chi(g, res.omega, wq, w12);

        debug!(
            port = k,
            g_mhz = g / 2.0 / PI / 1e6,
            chi_mhz = splitting / 2.0 / PI / 1e6,
            t1_us = ?t1.map(|t| t / 1e-6),
            "Port coupling"
        );
        ports.push(PortCoupling {
            impedance,
            g,
            chi: splitting,
            quality_factor,
            t1,
        });
    }

    let bus_bus = DMatrix::from_fn(n, n, |i, j| {
        0.01 * reduced.tcqbusbus[(i, j)] / (reduced.tcsbus[i] * reduced.tcsbus[j])
    });

    let rate: f64 = ports.iter().filter_map(|p| p.t1).map(|t| 1.0 / t).sum();
    let t1 = if rate > 0.0 { 1.0 / rate } else { UNCOUPLED_T1 };

    Ok(CouplingEstimate { ports, bus_bus, t1 })
}
