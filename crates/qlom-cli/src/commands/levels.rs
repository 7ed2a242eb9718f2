//! Levels command implementation.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qlom_transmon::{TransmonLevels, levels_vs_ng};

/// Execute the levels command.
pub fn execute(cq_ff: f64, ic_na: f64, grid: usize, export: Option<&Path>) -> Result<()> {
    let levels = levels_vs_ng(cq_ff, ic_na, grid)?;

    println!(
        "{} Transmon with C = {} fF, Ic = {} nA ({} offset charges)",
        style("→").cyan().bold(),
        style(cq_ff).yellow(),
        style(ic_na).yellow(),
        grid
    );
    println!("  EC        {:.6} [GHz]", levels.ec_ghz);
    println!("  EJ        {:.6} [GHz]", levels.ej_ghz);
    println!("  f01       {:.6} [GHz]", levels.f01_ghz);
    println!("  f02/2     {:.6} [GHz]", levels.f02_half_ghz());
    println!("  alpha     {:.6} [MHz]", levels.anharmonicity_mhz);
    println!("  disp      {:.6e} [Hz]", levels.charge_dispersion_hz);
    println!("  Tphi      {:.6e} [ms]", levels.tphi_ms);

    if let Some(path) = export {
        let context = || format!("Failed to write {}", path.display());
        if is_json(path) {
            fs::write(path, serde_json::to_string_pretty(&levels)?).with_context(context)?;
        } else {
            let mut wtr = csv::Writer::from_path(path).with_context(context)?;
            write_levels_csv(&levels, &mut wtr).with_context(context)?;
            wtr.flush().with_context(context)?;
        }
        println!("  Output: {}", style(path.display()).green());
    }

    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Tabulate the levels as CSV: one row per offset charge.
pub fn write_levels_csv<W: io::Write>(
    levels: &TransmonLevels,
    wtr: &mut csv::Writer<W>,
) -> csv::Result<()> {
    wtr.write_record(["ng", "E0_ghz", "E1_ghz", "E2_ghz", "E3_ghz"])?;
    for (ng, row) in levels.offset_charges.iter().zip(&levels.energies_ghz) {
        let mut record = vec![ng.to_string()];
        record.extend(row.iter().map(f64::to_string));
        wtr.write_record(&record)?;
    }
    Ok(())
}
