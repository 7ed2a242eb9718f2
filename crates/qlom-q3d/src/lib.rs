//! Capacitance Matrix Exports
//!
//! Maxwell capacitance matrices from electromagnetic extraction.
//!
//! Loads the matrix text exported by a capacitance extractor, normalizes its
//! units, and permutes its node basis into the order expected by the
//! lumped-oscillator analysis.
//!
//! # Quick start
//!
//! ```rust
//! use qlom_q3d::{parse_q3d_export, reorder_basis};
//!
//! let text = "C Units:fF, G Units:mSie\n\
//!             Capacitance Matrix\n\
//!             \tpad ground\n\
//!             pad 80 -60\n\
//!             ground -60 200\n";
//! let export = parse_q3d_export(text).unwrap();
//! assert_eq!(export.units, "fF");
//!
//! let moved = reorder_basis(&export.capacitance, &[1], 0).unwrap();
//! assert_eq!(moved.labels(), &["ground", "pad"]);
//! ```

pub mod error;
pub mod loader;
pub mod matrix;
pub mod reorder;

pub use error::{Q3dError, Q3dResult};
pub use loader::{
    Q3dExport, load_capacitance_matrix, parse_matlab_matrix, parse_q3d_export,
    read_matlab_matrix, read_q3d_matrix, scale_to_units,
};
pub use matrix::MaxwellMatrix;
pub use reorder::{NodeRoles, canonical_order, invert_permutation, move_index_to, reorder_basis};
