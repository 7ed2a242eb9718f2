//! Error types for the transmon crate.

use thiserror::Error;

/// Errors produced by the level solver, the analytic helpers and the fitter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransmonError {
    /// The offset-charge grid must have an odd, positive number of points.
    #[error("Offset-charge grid must be odd and at least 1, got {0}")]
    InvalidGrid(usize),

    /// The charge-basis Hamiltonian failed the exact symmetry check.
    #[error("Hamiltonian is not Hermitian at ng = {ng}")]
    NotHermitian {
        /// Offset charge of the offending sample.
        ng: f64,
    },

    /// The Mathieu characteristic index came out non-integer.
    #[error("Mathieu characteristic index {0} is not an integer")]
    NonIntegerMathieuOrder(f64),

    /// A physical input is out of range (non-positive capacitance, etc.).
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// What the value must satisfy.
        reason: &'static str,
    },

    /// The fitter stopped at its iteration cap before meeting the tolerance.
    #[error("Fit did not converge after {iterations} iterations (residual {residual:.3e} GHz)")]
    FitNotConverged {
        /// Iterations performed.
        iterations: usize,
        /// Best cost reached.
        residual: f64,
    },
}

/// Result type for transmon operations.
pub type TransmonResult<T> = Result<T, TransmonError>;

pub(crate) fn require_positive(name: &'static str, value: f64) -> TransmonResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TransmonError::InvalidParameter {
            name,
            value,
            reason: "must be positive and finite",
        })
    }
}
