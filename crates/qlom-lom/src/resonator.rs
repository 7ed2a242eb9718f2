//! Transmission-line resonators attached to the coupling ports.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use qlom_transmon::constants::Z0;

use crate::error::{LomError, LomResult};

/// Bus resonator frequencies: one value for every bus, or one per bus in
/// port order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BusFrequencies {
    /// Same frequency (GHz) for every bus.
    Uniform(f64),
    /// Per-bus frequencies (GHz).
    PerBus(Vec<f64>),
}

impl Default for BusFrequencies {
    fn default() -> Self {
        Self::PerBus(Vec::new())
    }
}

impl BusFrequencies {
    /// Frequency (GHz) of bus `bus` (0-based, excluding the readout).
    pub fn get(&self, bus: usize) -> Option<f64> {
        match self {
            Self::Uniform(f) => Some(*f),
            Self::PerBus(list) => list.get(bus).copied(),
        }
    }
}

/// Lumped L/C equivalent of a resonator near its fundamental mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resonator {
    /// Angular frequency (rad/s).
    pub omega: f64,
    /// Equivalent capacitance (F).
    pub capacitance: f64,
    /// Equivalent inductance (H).
    pub inductance: f64,
}

impl Resonator {
    /// Half-wave resonator at `freq_ghz` on a 50 Ω line.
    pub fn half_wave(freq_ghz: f64) -> Self {
        let omega = 2.0 * PI * freq_ghz * 1e9;
        let capacitance = 0.5 * PI / (omega * Z0);
        let inductance = 1.0 / omega.powi(2) / capacitance;
        Self {
            omega,
            capacitance,
            inductance,
        }
    }

    /// Quarter-wave equivalent: same frequency, half the capacitance and
    /// twice the inductance.
    pub fn quarter_wave(self) -> Self {
        Self {
            capacitance: self.capacitance / 2.0,
            inductance: self.inductance * 2.0,
            ..self
        }
    }

    /// Frequency in GHz.
    pub fn freq_ghz(&self) -> f64 {
        self.omega / 2.0 / PI / 1e9
    }
}

/// Resonators for `ports` coupling ports: port 0 is the readout at
/// `readout_ghz`, ports 1.. are buses.
pub fn port_resonators(
    ports: usize,
    readout_ghz: f64,
    buses: &BusFrequencies,
    quarter_wave: Option<&[bool]>,
) -> LomResult<Vec<Resonator>> {
    if let Some(flags) = quarter_wave {
        if flags.len() != ports {
            return Err(LomError::QuarterWaveLength {
                expected: ports,
                found: flags.len(),
            });
        }
    }

    let mut out = Vec::with_capacity(ports);
    for port in 0..ports {
        let freq = if port == 0 {
            readout_ghz
        } else {
            buses.get(port - 1).ok_or(LomError::MissingBusFrequency {
                port,
                available: match buses {
                    BusFrequencies::Uniform(_) => 1,
                    BusFrequencies::PerBus(list) => list.len(),
                },
            })?
        };
        if !(freq.is_finite() && freq > 0.0) {
            return Err(LomError::InvalidParameter {
                name: "resonator frequency (GHz)",
                value: freq,
            });
        }

        let res = Resonator::half_wave(freq);
        let quarter = quarter_wave.is_some_and(|flags| flags[port]);
        out.push(if quarter { res.quarter_wave() } else { res });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_wave_values() {
        let r = Resonator::half_wave(7.0);
        assert!((r.capacitance - 714.3e-15).abs() < 0.1e-15);
        let w = 1.0 / (r.inductance * r.capacitance).sqrt();
        assert!((w - r.omega).abs() / r.omega < 1e-12);
        assert!((r.freq_ghz() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_quarter_wave_keeps_frequency() {
        let r = Resonator::half_wave(6.0);
        let q = r.quarter_wave();
        assert_eq!(q.capacitance, r.capacitance / 2.0);
        assert_eq!(q.inductance, r.inductance * 2.0);
        assert!((1.0 / (q.inductance * q.capacitance).sqrt() - r.omega).abs() / r.omega < 1e-12);
    }

    #[test]
    fn test_uniform_bus_frequency() {
        let rs = port_resonators(3, 7.0, &BusFrequencies::Uniform(6.5), None).unwrap();
        assert!((rs[1].freq_ghz() - 6.5).abs() < 1e-12);
        assert!((rs[2].freq_ghz() - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_bus_frequency() {
        let err = port_resonators(3, 7.0, &BusFrequencies::PerBus(vec![6.5]), None).unwrap_err();
        assert!(matches!(
            err,
            LomError::MissingBusFrequency {
                port: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn test_quarter_wave_flags_must_match() {
        let flags = [true];
        assert!(matches!(
            port_resonators(2, 7.0, &BusFrequencies::Uniform(6.0), Some(&flags)),
            Err(LomError::QuarterWaveLength {
                expected: 2,
                found: 1
            })
        ));
    }
}
