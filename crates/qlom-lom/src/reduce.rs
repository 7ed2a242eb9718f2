//! Reduction of the Maxwell capacitance matrix to lumped circuit parameters.
//!
//! The matrix must be in the canonical node order
//!
//! ```text
//! bus_1 .. bus_{N-1}, ground, pad_1, pad_2, readout
//! ```
//!
//! Port 0 is the readout pad (last row); ports 1.. are the buses in the
//! leading rows. Each coupling pad is treated as grounded when summing the
//! capacitance seen by a qubit pad.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LomError, LomResult};
use crate::resonator::Resonator;

/// Check the port count against the matrix dimension and return it unsigned.
pub fn validate_ports(ports: i64, size: usize) -> LomResult<usize> {
    let ports = usize::try_from(ports).map_err(|_| LomError::NegativePortCount(ports))?;
    if size != ports + 3 {
        return Err(LomError::MatrixSize {
            expected: ports + 3,
            found: size,
        });
    }
    Ok(ports)
}

/// Lumped capacitances of a two-pad transmon and its coupling ports (F).
///
/// Per-port vectors are indexed by port: 0 is the readout, 1.. the buses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedCircuit {
    /// Matrix row of the ground node.
    pub ground_index: usize,
    /// Matrix rows of the two qubit pads.
    pub qubit_index: [usize; 2],
    /// Matrix row of each port.
    pub port_index: Vec<usize>,
    /// Pad-to-ground capacitances.
    pub cg: [f64; 2],
    /// Pad-to-pad capacitance.
    pub cs: f64,
    /// `cbus[p][k]`: qubit pad `p` to port `k`.
    pub cbus: [DVector<f64>; 2],
    /// Port-to-port capacitances, zero on the diagonal.
    pub cbusbus: DMatrix<f64>,
    /// Total capacitance from each pad to ground, ports grounded.
    pub c_sum: [f64; 2],
    /// Series capacitance across the junction, excluding `CJ`.
    pub tcsq: f64,
    /// Effective total capacitance of each port, resonator included.
    pub tcsbus: DVector<f64>,
    /// Effective qubit-to-port capacitance.
    pub tcqbus: DVector<f64>,
    /// Effective port-to-port capacitance.
    pub tcqbusbus: DMatrix<f64>,
    /// Voltage-division ratio from the qubit to each port.
    pub bbus: DVector<f64>,
    /// Total qubit capacitance, junction included.
    pub cq: f64,
}

/// Reduce `cap` (F, canonical order) with `resonators.len()` ports and
/// junction capacitance `cj` (F).
pub fn reduce_capacitance(
    cap: &DMatrix<f64>,
    resonators: &[Resonator],
    cj: f64,
) -> LomResult<ReducedCircuit> {
    let n = resonators.len();
    if cap.nrows() != n + 3 || cap.ncols() != n + 3 {
        return Err(LomError::MatrixSize {
            expected: n + 3,
            found: cap.nrows(),
        });
    }

    let len = cap.nrows();
    let ground_index = n.saturating_sub(1);
    let qubit_index = [ground_index + 1, ground_index + 2];
    let port_index: Vec<usize> = (0..n).map(|k| if k == 0 { len - 1 } else { k - 1 }).collect();
    debug!(ground_index, ?qubit_index, ?port_index, "Capacitance matrix layout");

    let [q0, q1] = qubit_index;
    let cg = [-cap[(q0, ground_index)], -cap[(q1, ground_index)]];
    let cs = -cap[(q0, q1)];
    let cbus = [
        DVector::from_fn(n, |k, _| -cap[(q0, port_index[k])]),
        DVector::from_fn(n, |k, _| -cap[(q1, port_index[k])]),
    ];
    let cbusbus = DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            0.0
        } else {
            -cap[(port_index[i], port_index[j])]
        }
    });

    let c1s = cg[0] + cbus[0].sum();
    let c2s = cg[1] + cbus[1].sum();
    let c_total = c1s + c2s;
    let tcsq = cs + c1s * c2s / c_total;

    // Sum over both pads of the pad-to-port capacitance.
    let pad_sum = &cbus[0] + &cbus[1];
    let tcsbus = DVector::from_fn(n, |i, _| {
        resonators[i].capacitance - pad_sum[i].powi(2) / c_total
            + pad_sum[i]
            + cbusbus.row(i).sum()
    });
    let tcqbus = (&cbus[0] * c2s - &cbus[1] * c1s) / c_total;
    let tcqbusbus =
        DMatrix::from_fn(n, n, |i, j| cbusbus[(i, j)] + pad_sum[i] * pad_sum[j] / c_total);
    let bbus = (&cbus[0] * c2s - &cbus[1] * c1s) / (c_total * cs + c1s * c2s);
    let cq = tcsq + cj;

    debug!(c1s, c2s, tcsq, cq, "Reduced qubit capacitances");

    Ok(ReducedCircuit {
        ground_index,
        qubit_index,
        port_index,
        cg,
        cs,
        cbus,
        cbusbus,
        c_sum: [c1s, c2s],
        tcsq,
        tcsbus,
        tcqbus,
        tcqbusbus,
        bbus,
        cq,
    })
}
