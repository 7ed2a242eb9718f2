//! Tests for unit resolution, conversion and quantity parsing.

use proptest::prelude::*;
use qlom_units::{Dimension, Quantity, UnitError, UnitRegistry};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1e-300)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn farad_to_femtofarad() {
    let ureg = UnitRegistry::new();
    assert!(close(ureg.conversion_factor("farad", "fF").unwrap(), 1e15));
}

#[test]
fn picofarad_to_femtofarad() {
    let ureg = UnitRegistry::new();
    assert!(close(ureg.convert(1.5, "pF", "fF").unwrap(), 1500.0));
}

#[test]
fn frequency_prefixes_are_case_sensitive() {
    let ureg = UnitRegistry::new();
    let mhz = ureg.parse_unit("MHz").unwrap();
    let millihz = ureg.parse_unit("mHz").unwrap();
    assert_eq!(mhz.dimension, Dimension::Frequency);
    assert!(close(mhz.factor, 1e6));
    assert!(close(millihz.factor, 1e-3));
}

#[test]
fn micro_sign_variants() {
    let ureg = UnitRegistry::new();
    for text in ["um", "\u{00b5}m", "\u{03bc}m", "micrometer"] {
        let unit = ureg.parse_unit(text).unwrap();
        assert_eq!(unit.dimension, Dimension::Length, "{text}");
        assert!(close(unit.factor, 1e-6), "{text}");
    }
}

#[test]
fn dimension_mismatch_is_rejected() {
    let ureg = UnitRegistry::new();
    let err = ureg.conversion_factor("fF", "nH").unwrap_err();
    assert!(matches!(
        err,
        UnitError::DimensionMismatch {
            from: Dimension::Capacitance,
            to: Dimension::Inductance,
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Quantity
// ---------------------------------------------------------------------------

#[test]
fn quantity_with_space() {
    let ureg = UnitRegistry::new();
    let q = Quantity::parse(&ureg, " -20 um ").unwrap();
    assert!(close(q.magnitude, -20.0));
    assert!(close(q.to(&ureg, "mm").unwrap(), -0.02));
}

#[test]
fn quantity_without_unit_is_dimensionless() {
    let ureg = UnitRegistry::new();
    let q = Quantity::parse(&ureg, "15").unwrap();
    assert_eq!(q.unit.dimension, Dimension::Dimensionless);
    assert!(close(q.to(&ureg, "mm").unwrap(), 15.0));
}

#[test]
fn quantity_scientific_notation() {
    let ureg = UnitRegistry::new();
    let q = Quantity::parse(&ureg, "13nH").unwrap();
    assert!(close(q.to_si(), 13e-9));
    let q = Quantity::parse(&ureg, "5.5E+09 Hz").unwrap();
    assert!(close(q.to(&ureg, "GHz").unwrap(), 5.5));
}

#[test]
fn quantity_rejects_missing_number() {
    let ureg = UnitRegistry::new();
    assert!(matches!(
        Quantity::parse(&ureg, "um"),
        Err(UnitError::InvalidQuantity(_))
    ));
}

proptest! {
    #[test]
    fn conversion_round_trip(value in -1e6_f64..1e6) {
        let ureg = UnitRegistry::new();
        let there = ureg.convert(value, "pF", "fF").unwrap();
        let back = ureg.convert(there, "fF", "pF").unwrap();
        prop_assert!((back - value).abs() <= 1e-9 * value.abs().max(1.0));
    }
}
