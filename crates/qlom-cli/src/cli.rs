//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::common::OutputFormat;
use crate::commands::layout::ComponentKind;

/// qlom - transmon Hamiltonians from Maxwell capacitance matrices
#[derive(Debug, Parser)]
#[command(name = "qlom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract the transmon Hamiltonian from a capacitance export
    Analyze {
        /// Capacitance export (.txt, .csv or .m)
        #[arg(short, long)]
        input: PathBuf,

        /// Analysis configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of coupling ports (readout plus buses)
        #[arg(long)]
        ports: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Solve the transmon levels over the offset-charge grid
    Levels {
        /// Total qubit capacitance (fF)
        #[arg(long)]
        cq_ff: f64,

        /// Junction critical current (nA)
        #[arg(long)]
        ic_na: f64,

        /// Number of offset-charge samples (odd)
        #[arg(long, default_value = "51")]
        grid: usize,

        /// Write the level table (.csv or .json)
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Fit capacitance and critical current to measured frequencies
    Fit {
        /// Initial capacitance (fF)
        #[arg(long)]
        c_guess_ff: f64,

        /// Initial critical current (nA)
        #[arg(long)]
        ic_guess_na: f64,

        /// Measured 0-1 frequency (GHz)
        #[arg(long)]
        f01_ghz: f64,

        /// Measured f02/2 (GHz)
        #[arg(long)]
        f02_half_ghz: f64,

        /// Optimizer iteration cap
        #[arg(long, default_value = "100")]
        max_iterations: usize,

        /// Report a fit that did not converge instead of failing
        #[arg(long)]
        allow_unconverged: bool,
    },

    /// Print, convert and reorder a capacitance matrix
    Matrix {
        /// Capacitance export (.txt, .csv or .m)
        #[arg(short, long)]
        input: PathBuf,

        /// Convert to these capacitance units (e.g. fF)
        #[arg(long)]
        units: Option<String>,

        /// Comma-separated indices to move
        #[arg(long, value_delimiter = ',', requires = "move_to")]
        move_from: Option<Vec<usize>>,

        /// Target index of the moved block
        #[arg(long, requires = "move_from")]
        move_to: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Tabulate the analytic (Mathieu) transmon bands
    Mathieu {
        /// EJ/EC
        #[arg(long, default_value = "1.0")]
        ratio: f64,

        /// Charging energy scale
        #[arg(long, default_value = "1.0")]
        ec: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Build component geometry from options
    Layout {
        /// Component to build
        #[arg(long, value_enum, default_value = "rectangle-hollow")]
        component: ComponentKind,

        /// Component name
        #[arg(short, long, default_value = "comp")]
        name: String,

        /// Component options (YAML); defaults when omitted
        #[arg(short, long)]
        options: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Show version information
    Version {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}
