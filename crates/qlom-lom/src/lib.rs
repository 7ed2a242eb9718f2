//! Lumped-Oscillator Model
//!
//! Reduces a capacitively coupled transmon to lumped oscillators.
//!
//! Takes a Maxwell capacitance matrix in the canonical node order, reduces it
//! to the qubit's total capacitance and its coupling to each readout/bus
//! resonator, solves the transmon levels, and reports frequency,
//! anharmonicity, couplings, dispersive shifts and Purcell lifetimes.
//!
//! # Quick start
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use qlom_lom::{ExtractionParams, extract_transmon_coupled};
//!
//! // ground, pad 1, pad 2, readout (fF)
//! let cap = DMatrix::from_row_slice(4, 4, &[
//!     150.0, -50.0, -50.0, -50.0,
//!     -50.0, 100.0, -45.0,  -5.0,
//!     -50.0, -45.0, 100.0,  -5.0,
//!     -50.0,  -5.0,  -5.0,  60.0,
//! ]) * 1e-15;
//!
//! let params = ExtractionParams::new(20e-9, 2e-15, 1, 7.0).with_grid_points(11);
//! let analysis = extract_transmon_coupled(&cap, &params).unwrap();
//! assert!((analysis.report.cq_ff - 74.5).abs() < 1e-6);
//! println!("{}", analysis.report);
//! ```

pub mod coupling;
pub mod error;
pub mod extract;
pub mod reduce;
pub mod report;
pub mod resonator;

pub use coupling::{CouplingEstimate, PortCoupling, estimate_couplings};
pub use error::{LomError, LomResult};
pub use extract::{ExtractionParams, LomAnalysis, analyze_export, extract_transmon_coupled};
pub use reduce::{ReducedCircuit, reduce_capacitance, validate_ports};
pub use report::{BusBusCoupling, HamiltonianReport, PortReport};
pub use resonator::{BusFrequencies, Resonator, port_resonators};
