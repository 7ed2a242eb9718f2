//! Matrix command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qlom_q3d::{Q3dExport, reorder_basis, scale_to_units};
use qlom_units::UnitRegistry;

use super::common::{OutputFormat, load_export};

/// Execute the matrix command.
pub fn execute(
    input: &Path,
    units: Option<&str>,
    reorder: Option<(&[usize], usize)>,
    format: OutputFormat,
) -> Result<()> {
    let export = load_export(input)?;
    let export = transform(export, units, reorder)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&export)?),
        OutputFormat::Table => {
            println!(
                "{} {} [{}]",
                style("→").cyan().bold(),
                style(input.display()).green(),
                style(&export.units).yellow()
            );
            print!("{}", export.capacitance);
        }
    }
    Ok(())
}

/// Convert to `units`, then move the `reorder.0` indices to `reorder.1`.
pub fn transform(
    export: Q3dExport,
    units: Option<&str>,
    reorder: Option<(&[usize], usize)>,
) -> Result<Q3dExport> {
    let export = match units {
        Some(units) => scale_to_units(export, &UnitRegistry::new(), units)?.0,
        None => export,
    };

    let Some((from, to)) = reorder else {
        return Ok(export);
    };
    let capacitance = reorder_basis(&export.capacitance, from, to)
        .context("Failed to reorder the matrix basis")?;
    Ok(Q3dExport {
        capacitance,
        ..export
    })
}
