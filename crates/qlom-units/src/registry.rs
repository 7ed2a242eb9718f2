//! Unit registry: SI prefixes combined with the base units used in layout
//! and electromagnetic-extraction files.
//!
//! Units are case sensitive, as in the exporting tools: `mF` is a
//! millifarad, `MHz` a megahertz. A bare base unit always wins over a
//! prefix reading, so `m` is a metre and `mm` a millimetre.

use serde::{Deserialize, Serialize};

use crate::error::{UnitError, UnitResult};

/// Physical dimension of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Farad.
    Capacitance,
    /// Henry.
    Inductance,
    /// Metre.
    Length,
    /// Hertz.
    Frequency,
    /// Siemens.
    Conductance,
    /// Ampere.
    Current,
    /// Second.
    Time,
    /// Plain number (e.g. degrees of rotation written without a unit).
    Dimensionless,
}

/// A resolved unit: its scale relative to the SI base unit and its dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit as written, e.g. `fF`.
    pub symbol: String,
    /// Multiply a magnitude in this unit by `factor` to get SI base units.
    pub factor: f64,
    /// Physical dimension.
    pub dimension: Dimension,
}

impl Unit {
    /// The dimensionless unit with factor 1.
    pub fn dimensionless() -> Self {
        Self {
            symbol: String::new(),
            factor: 1.0,
            dimension: Dimension::Dimensionless,
        }
    }
}

const PREFIXES: &[(&str, f64)] = &[
    // Long names first so that "milli" is not read as "m" + "illi".
    ("femto", 1e-15),
    ("pico", 1e-12),
    ("nano", 1e-9),
    ("micro", 1e-6),
    ("milli", 1e-3),
    ("centi", 1e-2),
    ("kilo", 1e3),
    ("mega", 1e6),
    ("giga", 1e9),
    ("tera", 1e12),
    ("f", 1e-15),
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("\u{00b5}", 1e-6),
    ("\u{03bc}", 1e-6),
    ("m", 1e-3),
    ("c", 1e-2),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
];

const BASES: &[(&str, Dimension)] = &[
    ("F", Dimension::Capacitance),
    ("farad", Dimension::Capacitance),
    ("farads", Dimension::Capacitance),
    ("H", Dimension::Inductance),
    ("henry", Dimension::Inductance),
    ("henries", Dimension::Inductance),
    ("m", Dimension::Length),
    ("meter", Dimension::Length),
    ("meters", Dimension::Length),
    ("metre", Dimension::Length),
    ("Hz", Dimension::Frequency),
    ("hertz", Dimension::Frequency),
    ("S", Dimension::Conductance),
    ("Sie", Dimension::Conductance),
    ("siemens", Dimension::Conductance),
    ("mho", Dimension::Conductance),
    ("A", Dimension::Current),
    ("amp", Dimension::Current),
    ("ampere", Dimension::Current),
    ("s", Dimension::Time),
    ("sec", Dimension::Time),
    ("second", Dimension::Time),
    ("seconds", Dimension::Time),
];

/// Registry resolving unit strings to scale factors.
///
/// ```rust
/// use qlom_units::UnitRegistry;
///
/// let ureg = UnitRegistry::new();
/// let factor = ureg.conversion_factor("farad", "fF").unwrap();
/// assert!((factor - 1e15).abs() / 1e15 < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    _private: (),
}

impl UnitRegistry {
    /// Create a registry with the built-in prefixes and base units.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a unit string such as `fF`, `farad`, `mSie` or `um`.
    pub fn parse_unit(&self, text: &str) -> UnitResult<Unit> {
        let symbol = text.trim();
        if symbol.is_empty() {
            return Ok(Unit::dimensionless());
        }

        if let Some(dimension) = base_dimension(symbol) {
            return Ok(Unit {
                symbol: symbol.to_string(),
                factor: 1.0,
                dimension,
            });
        }

        for (prefix, scale) in PREFIXES {
            if let Some(rest) = symbol.strip_prefix(prefix) {
                if let Some(dimension) = base_dimension(rest) {
                    return Ok(Unit {
                        symbol: symbol.to_string(),
                        factor: *scale,
                        dimension,
                    });
                }
            }
        }

        Err(UnitError::UnknownUnit(symbol.to_string()))
    }

    /// Factor `k` such that `value[from] * k == value[to]`.
    pub fn conversion_factor(&self, from: &str, to: &str) -> UnitResult<f64> {
        let from_unit = self.parse_unit(from)?;
        let to_unit = self.parse_unit(to)?;
        if from_unit.dimension != to_unit.dimension {
            return Err(UnitError::DimensionMismatch {
                from_unit: from_unit.symbol,
                from: from_unit.dimension,
                to_unit: to_unit.symbol,
                to: to_unit.dimension,
            });
        }
        Ok(from_unit.factor / to_unit.factor)
    }

    /// Convert a magnitude between two units of the same dimension.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> UnitResult<f64> {
        Ok(value * self.conversion_factor(from, to)?)
    }
}

fn base_dimension(symbol: &str) -> Option<Dimension> {
    BASES
        .iter()
        .find(|(name, _)| *name == symbol)
        .map(|(_, dim)| *dim)
}
