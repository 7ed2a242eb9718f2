//! Configuration for `qlom analyze`.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QLOM_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use qlom_lom::{BusFrequencies, ExtractionParams};
use qlom_q3d::NodeRoles;
use qlom_transmon::levels::DEFAULT_GRID;
use qlom_units::{Dimension, UnitRegistry};

/// Junction and resonator parameters of one extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Junction critical current (nA)
    #[serde(default = "default_critical_current")]
    pub critical_current_na: f64,

    /// Junction capacitance (fF)
    #[serde(default = "default_junction_capacitance")]
    pub junction_capacitance_ff: f64,

    /// Readout resonator frequency (GHz)
    #[serde(default = "default_readout_frequency")]
    pub readout_frequency_ghz: f64,

    /// Bus resonator frequencies (GHz): one number for all buses, or a list
    #[serde(default)]
    pub bus_frequencies_ghz: BusFrequencies,

    /// Per-port quarter-wave flags, readout first
    #[serde(default)]
    pub quarter_wave: Option<Vec<bool>>,

    /// Multiplier on every qubit-port coupling
    #[serde(default = "default_g_scale")]
    pub g_scale: f64,

    /// Units the capacitance matrix is displayed in
    #[serde(default = "default_user_units")]
    pub user_units: String,

    /// Offset-charge grid of the level solve
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,

    /// Node labels; when present the matrix is reordered by label
    #[serde(default)]
    pub nodes: Option<NodesConfig>,
}

/// Labels of the nodes the extraction needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodesConfig {
    /// Ground plane
    pub ground: String,

    /// The two qubit pads
    pub pads: [String; 2],

    /// Readout coupling pad
    #[serde(default)]
    pub readout: Option<String>,

    /// Bus coupling pads, in port order
    #[serde(default)]
    pub buses: Vec<String>,
}

impl From<&NodesConfig> for NodeRoles {
    fn from(nodes: &NodesConfig) -> Self {
        NodeRoles {
            ground: nodes.ground.clone(),
            pads: nodes.pads.clone(),
            readout: nodes.readout.clone(),
            buses: nodes.buses.clone(),
        }
    }
}

// Default value functions
fn default_critical_current() -> f64 {
    20.0
}

fn default_junction_capacitance() -> f64 {
    2.0
}

fn default_readout_frequency() -> f64 {
    7.0
}

fn default_g_scale() -> f64 {
    1.0
}

fn default_user_units() -> String {
    "fF".to_string()
}

fn default_grid_points() -> usize {
    DEFAULT_GRID
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            critical_current_na: default_critical_current(),
            junction_capacitance_ff: default_junction_capacitance(),
            readout_frequency_ghz: default_readout_frequency(),
            bus_frequencies_ghz: BusFrequencies::default(),
            quarter_wave: None,
            g_scale: default_g_scale(),
            user_units: default_user_units(),
            grid_points: default_grid_points(),
            nodes: None,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => AnalysisConfig::default(),
        };
        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge `QLOM_*` environment variables into this configuration.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from `lookup`, keyed by environment variable name.
    ///
    /// Only variables that are set override the file-loaded (or default)
    /// values. Numbers that fail to parse are ignored.
    pub fn merge_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());

        if let Some(v) = number("QLOM_IC_NA") {
            self.critical_current_na = v;
        }
        if let Some(v) = number("QLOM_CJ_FF") {
            self.junction_capacitance_ff = v;
        }
        if let Some(v) = number("QLOM_READOUT_GHZ") {
            self.readout_frequency_ghz = v;
        }
        if let Some(v) = number("QLOM_G_SCALE") {
            self.g_scale = v;
        }
        if let Some(v) = lookup("QLOM_USER_UNITS") {
            self.user_units = v;
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.critical_current_na.is_finite() && self.critical_current_na > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "critical_current_na must be positive, got {}",
                self.critical_current_na
            )));
        }

        if !(self.junction_capacitance_ff.is_finite() && self.junction_capacitance_ff >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "junction_capacitance_ff must not be negative, got {}",
                self.junction_capacitance_ff
            )));
        }

        if !(self.readout_frequency_ghz.is_finite() && self.readout_frequency_ghz > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "readout_frequency_ghz must be positive, got {}",
                self.readout_frequency_ghz
            )));
        }

        let buses: Vec<f64> = match &self.bus_frequencies_ghz {
            BusFrequencies::Uniform(f) => vec![*f],
            BusFrequencies::PerBus(list) => list.clone(),
        };
        if let Some(bad) = buses.iter().find(|f| !(f.is_finite() && **f > 0.0)) {
            return Err(ConfigError::ValidationError(format!(
                "bus frequencies must be positive, got {bad}"
            )));
        }

        if !self.g_scale.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "g_scale must be finite, got {}",
                self.g_scale
            )));
        }

        let unit = UnitRegistry::new()
            .parse_unit(&self.user_units)
            .map_err(|e| ConfigError::ValidationError(format!("user_units: {e}")))?;
        if unit.dimension != Dimension::Capacitance {
            return Err(ConfigError::ValidationError(format!(
                "user_units must be a capacitance unit, got {}",
                self.user_units
            )));
        }

        if let Some(nodes) = &self.nodes {
            if nodes.readout.is_none() && !nodes.buses.is_empty() {
                return Err(ConfigError::ValidationError(
                    "nodes.buses requires nodes.readout".to_string(),
                ));
            }
            if let Some(flags) = &self.quarter_wave {
                let ports = NodeRoles::from(nodes).port_count();
                if flags.len() != ports {
                    return Err(quarter_wave_mismatch(flags.len(), ports));
                }
            }
        }

        Ok(())
    }

    /// Node roles for reordering, when configured.
    pub fn node_roles(&self) -> Option<NodeRoles> {
        self.nodes.as_ref().map(NodeRoles::from)
    }

    /// Extraction parameters for a matrix with `ports` coupling ports.
    pub fn to_extraction_params(&self, ports: usize) -> Result<ExtractionParams, ConfigError> {
        let mut params = ExtractionParams::new(
            self.critical_current_na * 1e-9,
            self.junction_capacitance_ff * 1e-15,
            ports as i64,
            self.readout_frequency_ghz,
        )
        .with_bus_frequencies(self.bus_frequencies_ghz.clone())
        .with_g_scale(self.g_scale)
        .with_grid_points(self.grid_points);

        if let Some(flags) = &self.quarter_wave {
            if flags.len() != ports {
                return Err(quarter_wave_mismatch(flags.len(), ports));
            }
            params = params.with_quarter_wave(flags.clone());
        }
        Ok(params)
    }
}

fn quarter_wave_mismatch(found: usize, ports: usize) -> ConfigError {
    ConfigError::ValidationError(format!(
        "quarter_wave has {found} entries but there are {ports} ports"
    ))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
