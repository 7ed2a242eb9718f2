//! Magnitudes with units, parsed from strings such as `500um` or `-20 um`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{UnitError, UnitResult};
use crate::registry::{Dimension, Unit, UnitRegistry};

/// A magnitude paired with the unit it was written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Numeric value in `unit`.
    pub magnitude: f64,
    /// Unit the magnitude is expressed in.
    pub unit: Unit,
}

impl Quantity {
    /// Parse `"<number><unit>"`; whitespace between the parts is allowed and
    /// the unit may be omitted (dimensionless).
    pub fn parse(registry: &UnitRegistry, text: &str) -> UnitResult<Self> {
        let trimmed = text.trim();
        let split = number_prefix_len(trimmed);
        if split == 0 {
            return Err(UnitError::InvalidQuantity(text.to_string()));
        }
        let magnitude: f64 = trimmed[..split]
            .parse()
            .map_err(|_| UnitError::InvalidQuantity(text.to_string()))?;
        let unit = registry.parse_unit(&trimmed[split..])?;
        Ok(Self { magnitude, unit })
    }

    /// Magnitude expressed in SI base units.
    pub fn to_si(&self) -> f64 {
        self.magnitude * self.unit.factor
    }

    /// Magnitude expressed in `target`, which must share this quantity's
    /// dimension. A dimensionless quantity is taken to already be in
    /// `target` units.
    pub fn to(&self, registry: &UnitRegistry, target: &str) -> UnitResult<f64> {
        let target_unit = registry.parse_unit(target)?;
        if self.unit.dimension == Dimension::Dimensionless {
            return Ok(self.magnitude);
        }
        if self.unit.dimension != target_unit.dimension {
            return Err(UnitError::DimensionMismatch {
                from_unit: self.unit.symbol.clone(),
                from: self.unit.dimension,
                to_unit: target_unit.symbol,
                to: target_unit.dimension,
            });
        }
        Ok(self.to_si() / target_unit.factor)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.symbol)
    }
}

/// Length of the leading float literal in `s` (0 if none).
fn number_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut seen_digit = false;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        seen_digit |= bytes[i].is_ascii_digit();
        i += 1;
    }
    if !seen_digit {
        return 0;
    }

    // Exponent only when followed by digits: "2e-3F" but not "5em".
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}
