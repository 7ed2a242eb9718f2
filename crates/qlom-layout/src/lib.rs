//! Transmon Component Layout
//!
//! Typed component options and their polygons.
//!
//! Options carry lengths with units (`500um`) and documented defaults, so a
//! YAML file only needs the entries that differ. `make` resolves the options
//! to millimetres and returns the component's polygons.
//!
//! # Quick start
//!
//! ```rust
//! use qlom_layout::{Component, RectangleHollowOptions};
//!
//! let geoms = RectangleHollowOptions::default().make("rect1").unwrap();
//! assert_eq!(geoms[0].chip, "main");
//! assert_eq!(geoms[0].polygon.interiors.len(), 1);
//! ```

pub mod component;
pub mod error;
pub mod geometry;
pub mod length;
pub mod qubit;
pub mod rectangle_hollow;

pub use component::{Component, PolyGeometry};
pub use error::{LayoutError, LayoutResult};
pub use geometry::{Point, Polygon};
pub use length::Length;
pub use qubit::{PadOptions, QubitOptions, TransmonPocketOptions, pocket_pad_template};
pub use rectangle_hollow::{InnerRectOptions, RectangleHollowOptions};
