//! Hamiltonian parameter report in laboratory units.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use qlom_transmon::levels::TransmonLevels;
use qlom_transmon::props::{TransmonProps, lq_from_ej};

use crate::coupling::CouplingEstimate;
use crate::reduce::ReducedCircuit;
use crate::resonator::Resonator;

/// Per-port entries of a [`HamiltonianReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortReport {
    /// 1-based port number; port 1 is the readout.
    pub port: usize,
    /// Resonator frequency (GHz).
    pub resonator_ghz: f64,
    /// Effective qubit-to-port capacitance (fF).
    pub tcqbus_ff: f64,
    /// Coupling g/2π (MHz).
    pub g_mhz: f64,
    /// Dispersive splitting 2χ/2π (MHz).
    pub chi_mhz: f64,
    /// Purcell decay rate 1/(2π·T1) (Hz); zero for an uncoupled port.
    pub purcell_rate_hz: f64,
    /// Purcell-limited T1 (µs); `None` for an uncoupled port.
    pub t1_us: Option<f64>,
}

/// Coupling between two ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusBusCoupling {
    /// 1-based first port.
    pub from: usize,
    /// 1-based second port.
    pub to: usize,
    /// Coupling /2π (MHz).
    pub g_mhz: f64,
}

/// Transmon Hamiltonian parameters and couplings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianReport {
    /// Qubit frequency (GHz).
    pub f_q_ghz: f64,
    /// Charging energy EC/h (MHz).
    pub ec_mhz: f64,
    /// Josephson energy EJ/h (GHz).
    pub ej_ghz: f64,
    /// Anharmonicity (MHz).
    pub alpha_mhz: f64,
    /// Charge dispersion (kHz).
    pub dispersion_khz: f64,
    /// Junction inductance (nH).
    pub lq_nh: f64,
    /// Total qubit capacitance (fF).
    pub cq_ff: f64,
    /// Combined Purcell T1 (µs).
    pub t1_us: f64,
    /// Per-port couplings, readout first.
    pub ports: Vec<PortReport>,
    /// Couplings between distinct ports, `from < to`.
    pub bus_bus: Vec<BusBusCoupling>,
}

impl HamiltonianReport {
    /// Assemble the report from the intermediate results.
    pub fn new(
        reduced: &ReducedCircuit,
        props: &TransmonProps,
        levels: &TransmonLevels,
        couplings: &CouplingEstimate,
        resonators: &[Resonator],
    ) -> Self {
        let to_mhz = |w: f64| w / 2.0 / PI / 1e6;

        let ports = couplings
            .ports
            .iter()
            .zip(resonators)
            .enumerate()
            .map(|(k, (c, res))| PortReport {
                port: k + 1,
                resonator_ghz: res.freq_ghz(),
                tcqbus_ff: reduced.tcqbus[k] / 1e-15,
                g_mhz: to_mhz(c.g),
                chi_mhz: to_mhz(c.chi),
                purcell_rate_hz: c.t1.map_or(0.0, |t| 1.0 / t / (2.0 * PI)),
                t1_us: c.t1.map(|t| t / 1e-6),
            })
            .collect();

        let n = couplings.ports.len();
        let mut bus_bus = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                bus_bus.push(BusBusCoupling {
                    from: i + 1,
                    to: j + 1,
                    g_mhz: to_mhz(couplings.bus_bus[(i, j)]),
                });
            }
        }

        Self {
            f_q_ghz: levels.f01_ghz,
            ec_mhz: to_mhz(props.ec),
            ej_ghz: props.ej / 2.0 / PI / 1e9,
            alpha_mhz: levels.anharmonicity_mhz,
            dispersion_khz: levels.charge_dispersion_hz / 1e3,
            lq_nh: lq_from_ej(props.ej) / 1e-9,
            cq_ff: reduced.cq / 1e-15,
            t1_us: couplings.t1 / 1e-6,
            ports,
            bus_bus,
        }
    }
}

impl fmt::Display for HamiltonianReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predicted Values")?;
        writeln!(f)?;
        writeln!(f, "Transmon Properties")?;
        writeln!(f, "f_Q {:.6} [GHz]", self.f_q_ghz)?;
        writeln!(f, "EC {:.6} [MHz]", self.ec_mhz)?;
        writeln!(f, "EJ {:.6} [GHz]", self.ej_ghz)?;
        writeln!(f, "alpha {:.6} [MHz]", self.alpha_mhz)?;
        writeln!(f, "dispersion {:.6} [KHz]", self.dispersion_khz)?;
        writeln!(f, "Lq {:.6} [nH]", self.lq_nh)?;
        writeln!(f, "Cq {:.6} [fF]", self.cq_ff)?;
        writeln!(f, "T1 {:.6} [us]", self.t1_us)?;
        writeln!(f)?;
        writeln!(f, "**Coupling Properties**")?;
        for p in &self.ports {
            writeln!(f)?;
            writeln!(f, "tCqbus{} {:.6} [fF]", p.port, p.tcqbus_ff)?;
            writeln!(f, "gbus{}_in_MHz {:.6} [MHz]", p.port, p.g_mhz)?;
            writeln!(f, "χ_bus{} {:.6} [MHz]", p.port, p.chi_mhz)?;
            writeln!(f, "1/T1bus{} {:.6} [Hz]", p.port, p.purcell_rate_hz)?;
            match p.t1_us {
                Some(t1) => writeln!(f, "T1bus{} {:.6} [us]", p.port, t1)?,
                None => writeln!(f, "T1bus{} uncoupled", p.port)?,
            }
        }
        writeln!(f, "Bus-Bus Couplings")?;
        for c in &self.bus_bus {
            writeln!(f, "gbus{}_{} {:.6} [MHz]", c.from, c.to, c.g_mhz)?;
        }
        Ok(())
    }
}
