//! Helpers shared by several commands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::debug;

use qlom_q3d::{Q3dExport, read_matlab_matrix, read_q3d_matrix};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Units assumed for `.m` exports, which carry no unit header.
pub const MATLAB_UNITS: &str = "farad";

/// Load a capacitance export, dispatching on the file extension.
pub fn load_export(path: &Path) -> Result<Q3dExport> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let is_matlab = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("m"));

    let export = if is_matlab {
        let capacitance = read_matlab_matrix(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Q3dExport {
            capacitance,
            units: MATLAB_UNITS.to_string(),
            design_variation: String::new(),
            conductance: None,
        }
    } else {
        read_q3d_matrix(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    debug!(
        nodes = export.capacitance.size(),
        units = %export.units,
        "Loaded capacitance export"
    );
    Ok(export)
}
