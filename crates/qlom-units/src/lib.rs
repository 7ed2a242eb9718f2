//! Units and Quantities
//!
//! Unit registry for chip-layout and extraction quantities.
//!
//! Resolves unit strings as written by layout options (`500um`) and by
//! electromagnetic extraction exports (`C Units:farad`, `G Units:mSie`) and
//! converts magnitudes between units of the same dimension.
//!
//! # Quick start
//!
//! ```rust
//! use qlom_units::{Quantity, UnitRegistry};
//!
//! let ureg = UnitRegistry::new();
//! let width = Quantity::parse(&ureg, "500um").unwrap();
//! assert!((width.to(&ureg, "mm").unwrap() - 0.5).abs() < 1e-12);
//!
//! let c = ureg.convert(2.8829e-13, "farad", "fF").unwrap();
//! assert!((c - 288.29).abs() < 1e-9);
//! ```

pub mod error;
pub mod quantity;
pub mod registry;

pub use error::{UnitError, UnitResult};
pub use quantity::Quantity;
pub use registry::{Dimension, Unit, UnitRegistry};
