//! Error types for unit parsing and conversion.

use thiserror::Error;

use crate::registry::Dimension;

/// Errors produced while parsing or converting units.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UnitError {
    /// The unit string matched no known prefix/base combination.
    #[error("Unknown unit: '{0}'")]
    UnknownUnit(String),

    /// Conversion between units of different physical dimensions.
    #[error("Cannot convert {from_unit} ({from:?}) to {to_unit} ({to:?})")]
    DimensionMismatch {
        /// Source unit as written.
        from_unit: String,
        /// Source dimension.
        from: Dimension,
        /// Target unit as written.
        to_unit: String,
        /// Target dimension.
        to: Dimension,
    },

    /// A quantity string had no parseable magnitude.
    #[error("Invalid quantity '{0}': expected a number optionally followed by a unit")]
    InvalidQuantity(String),
}

/// Result type for unit operations.
pub type UnitResult<T> = Result<T, UnitError>;
