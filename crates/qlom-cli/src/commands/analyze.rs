//! Analyze command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qlom_lom::{LomAnalysis, analyze_export};
use qlom_q3d::{Q3dExport, scale_to_units};
use qlom_units::UnitRegistry;

use super::common::{OutputFormat, load_export};
use crate::config::AnalysisConfig;

/// Execute the analyze command.
pub fn execute(
    input: &Path,
    config_file: Option<&Path>,
    ports: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let config = AnalysisConfig::load(config_file)?;
    let export = load_export(input)?;
    let analysis = run(&export, &config, ports)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&analysis.report)?);
        }
        OutputFormat::Table => {
            println!(
                "{} Analyzing {} ({} nodes, {})",
                style("→").cyan().bold(),
                style(input.display()).green(),
                export.capacitance.size(),
                style(&export.units).yellow()
            );
            if !export.design_variation.is_empty() {
                println!("  Design variation: {}", export.design_variation);
            }

            let (shown, _) =
                scale_to_units(export.clone(), &UnitRegistry::new(), &config.user_units)?;
            println!();
            println!("Capacitance matrix [{}]", shown.units);
            print!("{}", shown.capacitance);
            println!();
            print!("{}", analysis.report);
            println!();
            println!("{} Extraction complete", style("✓").green().bold());
        }
    }

    Ok(())
}

/// Run the extraction on a loaded export.
///
/// The port count comes from `ports`, else from the configured node roles,
/// else from the matrix size (buses, ground, two pads and a readout).
pub fn run(export: &Q3dExport, config: &AnalysisConfig, ports: Option<usize>) -> Result<LomAnalysis> {
    let roles = config.node_roles();
    let ports = match (ports, &roles) {
        (Some(p), _) => p,
        (None, Some(roles)) => roles.port_count(),
        (None, None) => export.capacitance.size().checked_sub(3).with_context(|| {
            format!(
                "A {}-node matrix is too small; expected ground and two pads",
                export.capacitance.size()
            )
        })?,
    };

    let params = config.to_extraction_params(ports)?;
    Ok(analyze_export(export, roles.as_ref(), &params)?)
}
