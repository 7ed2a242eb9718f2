//! Library side of the `qlom` command-line tool: argument definitions,
//! analysis configuration and command implementations.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Commands};
pub use config::{AnalysisConfig, ConfigError, NodesConfig};
