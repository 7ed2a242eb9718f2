//! Transmon Physics
//!
//! Numerical charge-basis levels, closed-form transmon parameters, the
//! dispersive shift, analytic Mathieu bands, and a fitter that recovers the
//! shunt capacitance and critical current from measured transition
//! frequencies.
//!
//! # Quick start
//!
//! ```rust
//! use qlom_transmon::levels_vs_ng;
//!
//! // 80 fF total capacitance, 20 nA junction, 11 offset-charge samples.
//! let levels = levels_vs_ng(80.0, 20.0, 11).unwrap();
//! assert!(levels.f01_ghz > 4.0 && levels.f01_ghz < 4.3);
//! assert!(levels.anharmonicity_mhz < -250.0);
//! ```

pub mod constants;
pub mod dispersive;
pub mod error;
pub mod fit;
pub mod levels;
pub mod mathieu;
pub mod optimizer;
pub mod props;

pub use dispersive::chi;
pub use error::{TransmonError, TransmonResult};
pub use fit::{FitOptions, FitOutcome, fit_c_and_ic, fit_cost};
pub use levels::{TransmonLevels, levels_vs_ng, offset_charge_grid};
pub use mathieu::{MathieuBands, kidx, mathieu_bands, periodic_extension, transmon_eigenvalue};
pub use optimizer::{Minimizer, NelderMead, OptimizationResult};
pub use props::{
    TransmonProps, chargeline_t1, cs_from_ec, ic_from_ej, ic_from_lj, lq_from_ej, transmon_props,
};
