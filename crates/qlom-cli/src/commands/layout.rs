//! Layout command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;

use qlom_layout::{Component, PolyGeometry, RectangleHollowOptions, TransmonPocketOptions};

use super::common::OutputFormat;

/// Components the layout command can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ComponentKind {
    /// Rectangle with a rotated cut-out
    RectangleHollow,
    /// Two-pad transmon with connection pads
    TransmonPocket,
}

/// Execute the layout command.
pub fn execute(
    kind: ComponentKind,
    name: &str,
    options: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let yaml = match options {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => String::new(),
    };
    let geometry = build(kind, name, &yaml)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&geometry)?),
        OutputFormat::Table => {
            println!(
                "{} {} ({:?}): {} polygons",
                style("→").cyan().bold(),
                style(name).green(),
                kind,
                geometry.len()
            );
            for g in &geometry {
                let ([x0, y0], [x1, y1]) = g.polygon.bounds();
                println!(
                    "  {:<24} layer {:<3} chip {:<8} bounds ({x0:.4}, {y0:.4})..({x1:.4}, {y1:.4}) mm, area {:.6} mm²",
                    g.name,
                    g.layer,
                    g.chip,
                    g.polygon.area()
                );
            }
        }
    }
    Ok(())
}

/// Build a component from YAML options; empty text uses the defaults.
pub fn build(kind: ComponentKind, name: &str, yaml: &str) -> Result<Vec<PolyGeometry>> {
    let geometry = match kind {
        ComponentKind::RectangleHollow => parse_options::<RectangleHollowOptions>(yaml)?.make(name)?,
        ComponentKind::TransmonPocket => parse_options::<TransmonPocketOptions>(yaml)?.make(name)?,
    };
    Ok(geometry)
}

fn parse_options<T>(yaml: &str) -> Result<T>
where
    T: Default + serde::de::DeserializeOwned,
{
    if yaml.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml_ng::from_str(yaml).context("Invalid component options")
}
