//! Fit (C, Ic) to a measured f01 and f02/2.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{TransmonError, TransmonResult, require_positive};
use crate::levels::{DEFAULT_GRID, TransmonLevels, levels_vs_ng};
use crate::optimizer::{Minimizer, NelderMead};

/// Settings for [`fit_c_and_ic`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Iteration cap of the local optimizer.
    pub max_iterations: usize,
    /// Optimizer tolerance.
    pub tolerance: f64,
    /// Offset-charge grid size for each level solve.
    pub grid_points: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-4,
            grid_points: DEFAULT_GRID,
        }
    }
}

/// Best (C, Ic) found by the fitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitOutcome {
    /// Fitted total capacitance (fF).
    pub capacitance_ff: f64,
    /// Fitted critical current (nA).
    pub critical_current_na: f64,
    /// Cost at the optimum (GHz).
    pub residual_ghz: f64,
    /// Optimizer iterations.
    pub iterations: usize,
    /// Level solves performed.
    pub evaluations: usize,
    /// Whether the optimizer met its tolerance.
    pub converged: bool,
}

impl FitOutcome {
    /// Keep the outcome only if the optimizer converged.
    pub fn into_converged(self) -> TransmonResult<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(TransmonError::FitNotConverged {
                iterations: self.iterations,
                residual: self.residual_ghz,
            })
        }
    }

    /// Re-solve the levels at the fitted point.
    pub fn levels(&self, grid_points: usize) -> TransmonResult<TransmonLevels> {
        levels_vs_ng(self.capacitance_ff, self.critical_current_na, grid_points)
    }
}

/// Distance (GHz) between the predicted (f01, f02/2) of a transmon with
/// `c_ff`/`ic_na` and the targets.
pub fn fit_cost(
    c_ff: f64,
    ic_na: f64,
    f01_ghz: f64,
    f02_half_ghz: f64,
    grid_points: usize,
) -> TransmonResult<f64> {
    let lv = levels_vs_ng(c_ff, ic_na, grid_points)?;
    Ok(((lv.f01_ghz - f01_ghz).powi(2) + (lv.f02_half_ghz() - f02_half_ghz).powi(2)).sqrt())
}

/// Find the capacitance (fF) and critical current (nA) whose levels match
/// `f01_ghz` and `f02_half_ghz`, starting from the given guesses.
///
/// Points where the level solve fails (non-positive C or Ic) cost infinity.
/// A non-converged search is still returned; see
/// [`FitOutcome::into_converged`].
pub fn fit_c_and_ic(
    c_guess_ff: f64,
    ic_guess_na: f64,
    f01_ghz: f64,
    f02_half_ghz: f64,
    options: &FitOptions,
) -> TransmonResult<FitOutcome> {
    require_positive("c_guess_ff", c_guess_ff)?;
    require_positive("ic_guess_na", ic_guess_na)?;
    require_positive("f01_ghz", f01_ghz)?;
    require_positive("f02_half_ghz", f02_half_ghz)?;
    // Surface a bad grid before the optimizer swallows it as infinite cost.
    crate::levels::offset_charge_grid(options.grid_points)?;

    let optimizer = NelderMead::new()
        .with_maxiter(options.max_iterations)
        .with_tol(options.tolerance);
    let result = optimizer.minimize(
        |x| fit_cost(x[0], x[1], f01_ghz, f02_half_ghz, options.grid_points)
            .unwrap_or(f64::INFINITY),
        vec![c_guess_ff, ic_guess_na],
    );

    let outcome = FitOutcome {
        capacitance_ff: result.optimal_params[0],
        critical_current_na: result.optimal_params[1],
        residual_ghz: result.optimal_value,
        iterations: result.num_iterations,
        evaluations: result.num_evaluations,
        converged: result.converged,
    };

    if outcome.converged {
        info!(
            c_ff = outcome.capacitance_ff,
            ic_na = outcome.critical_current_na,
            residual_ghz = outcome.residual_ghz,
            iterations = outcome.iterations,
            "Fit converged"
        );
    } else {
        warn!(
            iterations = outcome.iterations,
            residual_ghz = outcome.residual_ghz,
            "Fit stopped at the iteration cap without converging"
        );
    }
    Ok(outcome)
}
