//! Error types for the lom crate.

use thiserror::Error;

/// Errors produced by the lumped-oscillator extraction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LomError {
    /// The number of coupling ports is negative.
    #[error("Number of coupling ports must be non-negative, got {0}")]
    NegativePortCount(i64),

    /// The capacitance matrix does not have `ports + 3` rows.
    #[error("Capacitance matrix is {found}x{found}, expected {expected}x{expected}")]
    MatrixSize {
        /// Required dimension.
        expected: usize,
        /// Actual dimension.
        found: usize,
    },

    /// A bus port has no resonator frequency.
    #[error("No resonator frequency for bus port {port} ({available} given)")]
    MissingBusFrequency {
        /// 1-based port index (0 is the readout).
        port: usize,
        /// Number of bus frequencies supplied.
        available: usize,
    },

    /// The quarter-wave flags do not cover every port.
    #[error("Expected {expected} quarter-wave flags, got {found}")]
    QuarterWaveLength {
        /// Number of ports.
        expected: usize,
        /// Number of flags.
        found: usize,
    },

    /// A physical input is out of range.
    #[error("Invalid parameter {name} = {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// A resonator sits exactly on a qubit transition, where χ diverges.
    #[error(
        "Resonator on port {port} at {resonator_ghz} GHz is degenerate with the qubit transition at {transition_ghz} GHz"
    )]
    DegenerateResonance {
        /// 0-based port index (0 is the readout).
        port: usize,
        /// Resonator frequency (GHz).
        resonator_ghz: f64,
        /// Qubit 0-1 or 1-2 transition frequency (GHz).
        transition_ghz: f64,
    },

    /// Level solve or transmon property failure.
    #[error("Transmon error: {0}")]
    Transmon(#[from] qlom_transmon::TransmonError),

    /// Matrix reordering or unit conversion failure.
    #[error("Matrix error: {0}")]
    Matrix(#[from] qlom_q3d::Q3dError),
}

/// Result type for lom operations.
pub type LomResult<T> = Result<T, LomError>;
