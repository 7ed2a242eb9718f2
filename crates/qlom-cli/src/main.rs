//! qlom command-line interface.
//!
//! Extracts transmon Hamiltonian parameters from Maxwell capacitance
//! matrices and exposes the level solver, fitter and layout helpers.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use qlom_cli::commands::{analyze, fit, layout, levels, mathieu, matrix, version};
use qlom_cli::{Cli, Commands};
use qlom_transmon::FitOptions;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Analyze {
            input,
            config,
            ports,
            format,
        } => analyze::execute(&input, config.as_deref(), ports, format),

        Commands::Levels {
            cq_ff,
            ic_na,
            grid,
            export,
        } => levels::execute(cq_ff, ic_na, grid, export.as_deref()),

        Commands::Fit {
            c_guess_ff,
            ic_guess_na,
            f01_ghz,
            f02_half_ghz,
            max_iterations,
            allow_unconverged,
        } => {
            let options = FitOptions {
                max_iterations,
                ..FitOptions::default()
            };
            fit::execute(
                c_guess_ff,
                ic_guess_na,
                f01_ghz,
                f02_half_ghz,
                &options,
                allow_unconverged,
            )
        }

        Commands::Matrix {
            input,
            units,
            move_from,
            move_to,
            format,
        } => matrix::execute(
            &input,
            units.as_deref(),
            move_from.as_deref().zip(move_to),
            format,
        ),

        Commands::Mathieu { ratio, ec, format } => mathieu::execute(ratio, ec, format),

        Commands::Layout {
            component,
            name,
            options,
            format,
        } => layout::execute(component, &name, options.as_deref(), format),

        Commands::Version { format } => version::execute(format),
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
