//! Fit command implementation.

use anyhow::Result;
use console::style;
use tracing::warn;

use qlom_transmon::{FitOptions, FitOutcome, fit_c_and_ic};

/// Execute the fit command.
pub fn execute(
    c_guess_ff: f64,
    ic_guess_na: f64,
    f01_ghz: f64,
    f02_half_ghz: f64,
    options: &FitOptions,
    allow_unconverged: bool,
) -> Result<()> {
    println!(
        "{} Fitting C and Ic to f01 = {} GHz, f02/2 = {} GHz",
        style("→").cyan().bold(),
        style(f01_ghz).yellow(),
        style(f02_half_ghz).yellow()
    );

    let outcome = run(
        c_guess_ff,
        ic_guess_na,
        f01_ghz,
        f02_half_ghz,
        options,
        allow_unconverged,
    )?;

    let mark = if outcome.converged {
        style("✓").green().bold()
    } else {
        style("!").yellow().bold()
    };
    println!(
        "{} C = {:.6} fF, Ic = {:.6} nA",
        mark, outcome.capacitance_ff, outcome.critical_current_na
    );
    println!(
        "  Residual {:.3e} GHz after {} iterations ({} level solves)",
        outcome.residual_ghz, outcome.iterations, outcome.evaluations
    );

    let levels = outcome.levels(options.grid_points)?;
    println!(
        "  f01 {:.6} GHz, f02/2 {:.6} GHz, alpha {:.3} MHz",
        levels.f01_ghz,
        levels.f02_half_ghz(),
        levels.anharmonicity_mhz
    );

    Ok(())
}

/// Run the fit, failing on non-convergence unless `allow_unconverged`.
pub fn run(
    c_guess_ff: f64,
    ic_guess_na: f64,
    f01_ghz: f64,
    f02_half_ghz: f64,
    options: &FitOptions,
    allow_unconverged: bool,
) -> Result<FitOutcome> {
    let outcome = fit_c_and_ic(c_guess_ff, ic_guess_na, f01_ghz, f02_half_ghz, options)?;
    if allow_unconverged {
        if !outcome.converged {
            warn!(
                iterations = outcome.iterations,
                residual = outcome.residual_ghz,
                "Returning unconverged fit"
            );
        }
        Ok(outcome)
    } else {
        Ok(outcome.into_converged()?)
    }
}
