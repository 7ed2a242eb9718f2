//! Version command implementation.

use anyhow::Result;
use console::style;
use serde::{Deserialize, Serialize};

use super::common::OutputFormat;

/// Build metadata of the running binary, read from its package manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// One-line package description.
    pub description: String,
    /// SPDX license expression.
    pub license: String,
    /// Minimum supported Rust version.
    pub rust_version: String,
}

impl VersionInfo {
    /// Capture the metadata this binary was compiled with.
    pub fn capture() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
            license: env!("CARGO_PKG_LICENSE").to_string(),
            rust_version: env!("CARGO_PKG_RUST_VERSION").to_string(),
        }
    }
}

/// Execute the version command.
pub fn execute(format: OutputFormat) -> Result<()> {
    let info = VersionInfo::capture();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        OutputFormat::Table => {
            println!(
                "{} {} - {}",
                style(&info.name).cyan().bold(),
                style(format!("v{}", info.version)).yellow(),
                info.description
            );
            println!("MSRV:       {}", info.rust_version);
            println!("License:    {}", style(&info.license).dim());
        }
    }
    Ok(())
}
