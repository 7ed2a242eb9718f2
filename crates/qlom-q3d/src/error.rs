//! Error types for the q3d crate.

use thiserror::Error;

/// Errors produced while loading or reshaping Maxwell matrices.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Q3dError {
    /// The export has no `Capacitance Matrix` section, or more than one.
    #[error("Expected exactly one 'Capacitance Matrix' section, found {0}")]
    CapacitanceMarker(usize),

    /// The `C Units:` header entry is missing.
    #[error("Missing 'C Units:<unit>,' header entry")]
    MissingUnits,

    /// A numeric cell could not be parsed.
    #[error("Line {line}: invalid number '{token}'")]
    InvalidNumber {
        /// 1-based line within the matrix block.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// A row has the wrong number of entries.
    #[error("Line {line}: expected {expected} values, found {found}")]
    RowLength {
        /// 1-based line within the matrix block.
        line: usize,
        /// Number of columns from the header.
        expected: usize,
        /// Number of values on the row.
        found: usize,
    },

    /// The table is not square.
    #[error("Matrix has {columns} columns but {rows} rows")]
    NotSquare {
        /// Column count.
        columns: usize,
        /// Row count.
        rows: usize,
    },

    /// The matrix block has no header row.
    #[error("Matrix block is empty")]
    EmptyMatrix,

    /// A `.m` export without a `capMatrix = [...]` assignment.
    #[error("No 'capMatrix' assignment found")]
    MissingMatlabMatrix,

    /// An index passed to the reorderer is out of range or repeated.
    #[error("Invalid reorder: {0}")]
    InvalidReorder(String),

    /// A node label was not found in the matrix.
    #[error("Unknown node label '{0}'")]
    UnknownLabel(String),

    /// Unit lookup or conversion failed.
    #[error("Unit error: {0}")]
    Unit(#[from] qlom_units::UnitError),

    /// A comma-delimited table could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Reading the export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for q3d operations.
pub type Q3dResult<T> = Result<T, Q3dError>;
