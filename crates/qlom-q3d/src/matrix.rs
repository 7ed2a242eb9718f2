//! Labeled square matrices over circuit nodes.
//!
//! A Maxwell capacitance matrix holds each node's total capacitance on the
//! diagonal and the negated mutual capacitances off the diagonal. The same
//! container carries the optional conductance matrix of an export.

use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{Q3dError, Q3dResult};

/// A square matrix whose rows and columns share one list of node labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxwellMatrix {
    labels: Vec<String>,
    values: DMatrix<f64>,
}

impl MaxwellMatrix {
    /// Build from labels and values; the matrix must be square with one
    /// label per row.
    pub fn new(labels: Vec<String>, values: DMatrix<f64>) -> Q3dResult<Self> {
        if values.nrows() != values.ncols() {
            return Err(Q3dError::NotSquare {
                columns: values.ncols(),
                rows: values.nrows(),
            });
        }
        if labels.len() != values.nrows() {
            return Err(Q3dError::NotSquare {
                columns: labels.len(),
                rows: values.nrows(),
            });
        }
        Ok(Self { labels, values })
    }

    /// Build with numeric labels `"0"`, `"1"`, ...
    pub fn unlabeled(values: DMatrix<f64>) -> Q3dResult<Self> {
        let labels = (0..values.nrows()).map(|i| i.to_string()).collect();
        Self::new(labels, values)
    }

    /// Node labels in row order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Raw values.
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Consume into the raw values.
    pub fn into_values(self) -> DMatrix<f64> {
        self.values
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// Row/column index of a node label.
    pub fn index_of(&self, label: &str) -> Q3dResult<usize> {
        self.labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| Q3dError::UnknownLabel(label.to_string()))
    }

    /// Entry addressed by node labels.
    pub fn get(&self, row: &str, col: &str) -> Q3dResult<f64> {
        Ok(self.values[(self.index_of(row)?, self.index_of(col)?)])
    }

    /// Every entry multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            labels: self.labels.clone(),
            values: &self.values * factor,
        }
    }

    /// Largest |C_ij − C_ji|.
    pub fn asymmetry(&self) -> f64 {
        let n = self.size();
        let mut worst = 0.0_f64;
        for i in 0..n {
            for j in (i + 1)..n {
                worst = worst.max((self.values[(i, j)] - self.values[(j, i)]).abs());
            }
        }
        worst
    }

    /// True when symmetric to within `rel_tol` of the largest entry.
    pub fn is_symmetric(&self, rel_tol: f64) -> bool {
        let scale = self.values.amax().max(f64::MIN_POSITIVE);
        self.asymmetry() <= rel_tol * scale
    }

    /// Apply `perm` to rows, columns and labels: new position `k` holds old
    /// node `perm[k]`. `perm` must be a permutation of `0..size`.
    pub fn permuted(&self, perm: &[usize]) -> Q3dResult<Self> {
        crate::reorder::check_permutation(perm, self.size())?;
        let n = self.size();
        let values = DMatrix::from_fn(n, n, |i, j| self.values[(perm[i], perm[j])]);
        let labels = perm.iter().map(|&p| self.labels[p].clone()).collect();
        Ok(Self { labels, values })
    }
}

/// Two-decimal table with labels, in the style of the extraction tool's
/// own matrix view.
impl fmt::Display for MaxwellMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.labels.iter().map(String::len).max().unwrap_or(0);
        let cell_width = self
            .values
            .iter()
            .map(|v| format!("{v:.2}").len())
            .chain(self.labels.iter().map(|l| l.len().min(12)))
            .max()
            .unwrap_or(0);

        write!(f, "{:label_width$}", "")?;
        for label in &self.labels {
            let short: String = label.chars().take(12).collect();
            write!(f, "  {short:>cell_width$}")?;
        }
        writeln!(f)?;

        for (i, label) in self.labels.iter().enumerate() {
            write!(f, "{label:label_width$}")?;
            for j in 0..self.size() {
                write!(f, "  {:>cell_width$.2}", self.values[(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
