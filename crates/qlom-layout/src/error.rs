//! Error types for the layout crate.

use thiserror::Error;

/// Errors produced while resolving component options or building geometry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LayoutError {
    /// An option value could not be parsed as a quantity.
    #[error("Option '{option}': {source}")]
    Quantity {
        /// Option name.
        option: String,
        /// Underlying unit error.
        #[source]
        source: qlom_units::UnitError,
    },

    /// A length option was given in non-length units.
    #[error("Option '{option}' must be a length, got '{value}'")]
    NotALength {
        /// Option name.
        option: String,
        /// Offending value.
        value: String,
    },

    /// The inner cut-out of a hollow rectangle crosses its outline.
    #[error("Inner rectangle of '{0}' is not contained in the outer rectangle")]
    InnerNotContained(String),

    /// A qubit declares connection pads but its class has no pad template.
    #[error("Qubit class '{0}' declares connection pads but has no default pad template")]
    MissingPadTemplate(String),

    /// A rectangle has non-positive width or height.
    #[error("Rectangle '{name}' has non-positive size {width} x {height}")]
    DegenerateRectangle {
        /// Shape name.
        name: String,
        /// Width (mm).
        width: f64,
        /// Height (mm).
        height: f64,
    },
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
