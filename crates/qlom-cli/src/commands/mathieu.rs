//! Mathieu command implementation.

use anyhow::Result;
use console::style;

use qlom_transmon::mathieu_bands;

use super::common::OutputFormat;

/// Execute the mathieu command.
pub fn execute(ratio: f64, ec: f64, format: OutputFormat) -> Result<()> {
    let bands = mathieu_bands(ratio, ec)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bands)?),
        OutputFormat::Table => {
            println!(
                "{} Analytic transmon bands, EJ/EC = {}, EC = {}",
                style("→").cyan().bold(),
                style(ratio).yellow(),
                style(ec).yellow()
            );
            print!("{:>8}", "ng");
            for m in 0..bands.levels.len() {
                print!("{:>14}", format!("E{m}"));
            }
            println!();
            for (i, ng) in bands.offset_charges.iter().enumerate() {
                print!("{ng:>8.2}");
                for level in &bands.levels {
                    print!("{:>14.6}", level[i]);
                }
                println!();
            }
        }
    }
    Ok(())
}
