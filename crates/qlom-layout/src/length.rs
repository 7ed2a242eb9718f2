//! Length-valued options.
//!
//! Options are written with units (`500um`, `-20 um`, `0.1mm`); a bare
//! number is taken as millimetres, the layout's internal unit.

use std::fmt;

use serde::{Deserialize, Serialize};

use qlom_units::{Dimension, Quantity, UnitRegistry};

use crate::error::{LayoutError, LayoutResult};

/// A length as written in the options, resolved to millimetres on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Length {
    /// Millimetres.
    Mm(f64),
    /// A quantity string such as `500um`.
    Text(String),
}

impl Length {
    /// A length written in micrometres.
    pub fn um(value: f64) -> Self {
        Self::Text(format!("{value}um"))
    }

    /// Resolve to millimetres; `option` names the field in error messages.
    pub fn to_mm(&self, registry: &UnitRegistry, option: &str) -> LayoutResult<f64> {
        match self {
            Self::Mm(v) => Ok(*v),
            Self::Text(text) => {
                let q = Quantity::parse(registry, text).map_err(|source| LayoutError::Quantity {
                    option: option.to_string(),
                    source,
                })?;
                match q.unit.dimension {
                    Dimension::Dimensionless => Ok(q.magnitude),
                    Dimension::Length => Ok(q.to_si() * 1e3),
                    _ => Err(LayoutError::NotALength {
                        option: option.to_string(),
                        value: text.clone(),
                    }),
                }
            }
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm(v) => write!(f, "{v}mm"),
            Self::Text(t) => f.write_str(t),
        }
    }
}
