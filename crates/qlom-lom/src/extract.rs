//! End-to-end extraction: capacitance matrix to Hamiltonian report.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use qlom_q3d::{MaxwellMatrix, NodeRoles, Q3dExport, canonical_order, scale_to_units};
use qlom_transmon::levels::{DEFAULT_GRID, TransmonLevels, levels_vs_ng};
use qlom_transmon::props::{TransmonProps, transmon_props};
use qlom_units::UnitRegistry;

use crate::coupling::{CouplingEstimate, estimate_couplings};
use crate::error::{LomError, LomResult};
use crate::reduce::{ReducedCircuit, reduce_capacitance, validate_ports};
use crate::report::HamiltonianReport;
use crate::resonator::{BusFrequencies, Resonator, port_resonators};

/// Inputs of the extraction besides the capacitance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionParams {
    /// Junction critical current (A).
    pub critical_current: f64,
    /// Junction capacitance (F).
    pub junction_capacitance: f64,
    /// Number of coupling ports: one readout plus `ports − 1` buses.
    pub ports: i64,
    /// Readout resonator frequency (GHz).
    pub readout_frequency_ghz: f64,
    /// Bus resonator frequencies (GHz).
    pub bus_frequencies_ghz: BusFrequencies,
    /// Per-port quarter-wave flags; half-wave when absent.
    pub quarter_wave: Option<Vec<bool>>,
    /// Multiplier on every qubit-port coupling.
    pub g_scale: f64,
    /// Offset-charge grid of the level solve.
    pub grid_points: usize,
}

impl ExtractionParams {
    /// Parameters for a transmon with `ports` coupling ports.
    pub fn new(critical_current: f64, junction_capacitance: f64, ports: i64, readout_ghz: f64) -> Self {
        Self {
            critical_current,
            junction_capacitance,
            ports,
            readout_frequency_ghz: readout_ghz,
            bus_frequencies_ghz: BusFrequencies::default(),
            quarter_wave: None,
            g_scale: 1.0,
            grid_points: DEFAULT_GRID,
        }
    }

    /// Set the bus resonator frequencies.
    pub fn with_bus_frequencies(mut self, buses: BusFrequencies) -> Self {
        self.bus_frequencies_ghz = buses;
        self
    }

    /// Mark ports as quarter-wave resonators.
    pub fn with_quarter_wave(mut self, flags: Vec<bool>) -> Self {
        self.quarter_wave = Some(flags);
        self
    }

    /// Scale every qubit-port coupling.
    pub fn with_g_scale(mut self, g_scale: f64) -> Self {
        self.g_scale = g_scale;
        self
    }

    /// Set the offset-charge grid size.
    pub fn with_grid_points(mut self, grid_points: usize) -> Self {
        self.grid_points = grid_points;
        self
    }

    fn validate(&self) -> LomResult<()> {
        if !(self.critical_current.is_finite() && self.critical_current > 0.0) {
            return Err(LomError::InvalidParameter {
                name: "critical_current",
                value: self.critical_current,
            });
        }
        if !(self.junction_capacitance.is_finite() && self.junction_capacitance >= 0.0) {
            return Err(LomError::InvalidParameter {
                name: "junction_capacitance",
                value: self.junction_capacitance,
            });
        }
        if !self.g_scale.is_finite() {
            return Err(LomError::InvalidParameter {
                name: "g_scale",
                value: self.g_scale,
            });
        }
        Ok(())
    }
}

/// Every intermediate of one extraction, plus the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LomAnalysis {
    /// Port resonators, readout first.
    pub resonators: Vec<Resonator>,
    /// Lumped capacitances.
    pub reduced: ReducedCircuit,
    /// Closed-form transmon properties at the reduced capacitance.
    pub props: TransmonProps,
    /// Numerical levels at the reduced capacitance.
    pub levels: TransmonLevels,
    /// Port couplings and lifetimes.
    pub couplings: CouplingEstimate,
    /// Summary in laboratory units.
    pub report: HamiltonianReport,
}

/// Extract the transmon Hamiltonian and its couplings from `cap`, a Maxwell
/// capacitance matrix in farads ordered
/// `[bus_1 .. bus_{N-1}, ground, pad_1, pad_2, readout]`.
pub fn extract_transmon_coupled(
    cap: &DMatrix<f64>,
    params: &ExtractionParams,
) -> LomResult<LomAnalysis> {
    let ports = validate_ports(params.ports, cap.nrows())?;
    params.validate()?;

    let resonators = port_resonators(
        ports,
        params.readout_frequency_ghz,
        &params.bus_frequencies_ghz,
        params.quarter_wave.as_deref(),
    )?;
    let reduced = reduce_capacitance(cap, &resonators, params.junction_capacitance)?;
    let props = transmon_props(params.critical_current, reduced.cq)?;
    let levels = levels_vs_ng(
        reduced.cq / 1e-15,
        params.critical_current / 1e-9,
        params.grid_points,
    )?;
    let couplings = estimate_couplings(&reduced, &resonators, &levels, &props, params.g_scale)?;
    let report = HamiltonianReport::new(&reduced, &props, &levels, &couplings, &resonators);

    info!(
        f_q_ghz = report.f_q_ghz,
        alpha_mhz = report.alpha_mhz,
        cq_ff = report.cq_ff,
        ports,
        "Extracted transmon Hamiltonian"
    );

    Ok(LomAnalysis {
        resonators,
        reduced,
        props,
        levels,
        couplings,
        report,
    })
}

/// Convert an export to farads, optionally reorder it by node roles, and
/// run [`extract_transmon_coupled`].
pub fn analyze_export(
    export: &Q3dExport,
    roles: Option<&NodeRoles>,
    params: &ExtractionParams,
) -> LomResult<LomAnalysis> {
    let (si, factor) = scale_to_units(export.clone(), &UnitRegistry::new(), "F")?;
    debug!(factor, "Scaled capacitance matrix to farads");

    let ordered: MaxwellMatrix = match roles {
        Some(roles) => canonical_order(&si.capacitance, roles)?,
        None => si.capacitance,
    };
    debug!(labels = ?ordered.labels(), "Extraction basis");
    extract_transmon_coupled(ordered.values(), params)
}
