//! Loaders for capacitance-matrix exports.
//!
//! The text export ("data table") looks like:
//!
//! ```text
//! DesignVariation:$BBoxL='650um' $QubitGap='30um' Lj_1='13nH'
//! Setup1:LastAdaptive
//! Problem Type:C
//! C Units:farad, G Units:mSie
//! Reduce Matrix:Original
//! Frequency: 5.5E+09 Hz
//!
//! Capacitance Matrix
//!     ground_plane  Q1_pad_bot   Q1_pad_top1
//! ground_plane  2.8829E-13  -4.0063E-14  -4.3842E-14
//! Q1_pad_bot   -4.0063E-14   9.5831E-14  -3.2415E-14
//! Q1_pad_top1  -4.3842E-14  -3.2415E-14   9.132E-14
//!
//! Conductance Matrix
//!     ground_plane  Q1_pad_bot   Q1_pad_top1
//! ground_plane  0  0  0
//! ...
//! ```
//!
//! Tables may be whitespace or comma delimited. CSV tables may quote labels
//! and use CRLF line endings; a trailing empty CSV column is dropped.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use csv::{ReaderBuilder, StringRecord, Trim};
use nalgebra::DMatrix;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use qlom_units::UnitRegistry;

use crate::error::{Q3dError, Q3dResult};
use crate::matrix::MaxwellMatrix;

const CAPACITANCE_MARKER: &str = "Capacitance Matrix";
const CONDUCTANCE_MARKER: &str = "Conductance Matrix";

/// Relative asymmetry above which a loaded matrix is reported.
const SYMMETRY_TOLERANCE: f64 = 1e-6;

static UNITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"C Units:([^,]*),").expect("valid units pattern"));
static VARIATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Design ?Variation:([^\r\n]*)").expect("valid design variation pattern")
});
static MATLAB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)capMatrix (.*?)\]").expect("valid capMatrix pattern"));

/// Contents of a capacitance-matrix export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Q3dExport {
    /// Maxwell capacitance matrix.
    pub capacitance: MaxwellMatrix,
    /// Capacitance unit of `capacitance`, e.g. `farad` or `fF`.
    pub units: String,
    /// Design-variation string, empty when the header has none.
    pub design_variation: String,
    /// Conductance matrix, when exported.
    pub conductance: Option<MaxwellMatrix>,
}

/// Parse the text of a capacitance-matrix export.
pub fn parse_q3d_export(text: &str) -> Q3dResult<Q3dExport> {
    let sections: Vec<&str> = text.split(CAPACITANCE_MARKER).collect();
    if sections.len() != 2 {
        return Err(Q3dError::CapacitanceMarker(sections.len() - 1));
    }

    let mut blocks = sections[1].split(CONDUCTANCE_MARKER);
    let cap_block = blocks.next().unwrap_or_default();
    let capacitance = parse_table(cap_block)?;
    let conductance = blocks.next().map(parse_table).transpose()?;

    let units = UNITS_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or(Q3dError::MissingUnits)?;

    let design_variation = VARIATION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_end().to_string())
        .unwrap_or_default();

    if !capacitance.is_symmetric(SYMMETRY_TOLERANCE) {
        warn!(
            asymmetry = capacitance.asymmetry(),
            "Capacitance matrix is not symmetric"
        );
    }
    debug!(
        nodes = capacitance.size(),
        %units,
        has_conductance = conductance.is_some(),
        "Parsed capacitance export"
    );

    Ok(Q3dExport {
        capacitance,
        units,
        design_variation,
        conductance,
    })
}

/// Read and parse a capacitance-matrix export from disk.
pub fn read_q3d_matrix(path: impl AsRef<Path>) -> Q3dResult<Q3dExport> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_q3d_export(&text)
}

/// Read an export and convert the capacitance matrix to `user_units`.
pub fn load_capacitance_matrix(path: impl AsRef<Path>, user_units: &str) -> Q3dResult<Q3dExport> {
    let path = path.as_ref();
    let export = read_q3d_matrix(path)?;
    let (scaled, _) = scale_to_units(export, &UnitRegistry::new(), user_units)?;
    info!(
        "Imported capacitance matrix from {} now converted to USER UNITS [{}]",
        path.display(),
        user_units
    );
    Ok(scaled)
}

/// Rescale the capacitance matrix to `user_units`, returning the export and
/// the factor applied.
pub fn scale_to_units(
    export: Q3dExport,
    registry: &UnitRegistry,
    user_units: &str,
) -> Q3dResult<(Q3dExport, f64)> {
    let factor = registry.conversion_factor(&export.units, user_units)?;
    info!(
        from = %export.units,
        to = %user_units,
        factor,
        "Converted capacitance matrix units"
    );
    Ok((
        Q3dExport {
            capacitance: export.capacitance.scaled(factor),
            units: user_units.to_string(),
            ..export
        },
        factor,
    ))
}

/// Parse a `.m` export, which holds `capMatrix = [ ... ]` with
/// comma-separated rows and no labels.
pub fn parse_matlab_matrix(text: &str) -> Q3dResult<MaxwellMatrix> {
    let body = MATLAB_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or(Q3dError::MissingMatlabMatrix)?;
    let body = body.trim_matches(|c: char| c == '=' || c == ' ' || c == '[' || c == '\n');

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (line_no, line) in body.split(['\n', ';']).enumerate() {
        let tokens: Vec<&str> = line
            .split([',', ' ', '\t', '\r'])
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            continue;
        }
        let row = tokens
            .iter()
            .map(|t| parse_number(t, line_no + 1))
            .collect::<Q3dResult<Vec<f64>>>()?;
        rows.push(row);
    }

    let n = rows.first().map(Vec::len).ok_or(Q3dError::EmptyMatrix)?;
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(Q3dError::RowLength {
                line: i + 1,
                expected: n,
                found: row.len(),
            });
        }
    }
    if rows.len() != n {
        return Err(Q3dError::NotSquare {
            columns: n,
            rows: rows.len(),
        });
    }

    let values = DMatrix::from_fn(n, n, |i, j| rows[i][j]);
    MaxwellMatrix::unlabeled(values)
}

/// Read a `.m` export from disk.
pub fn read_matlab_matrix(path: impl AsRef<Path>) -> Q3dResult<MaxwellMatrix> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_matlab_matrix(&text)
}

/// One table line split into cells, with its 1-based line number.
type Cells = (usize, Vec<String>);

/// Parse one labeled table: a header of column labels followed by rows of
/// `label value value ...`.
fn parse_table(block: &str) -> Q3dResult<MaxwellMatrix> {
    let ((header_line, mut columns), lines) = split_table(block)?;

    let mut row_labels = Vec::new();
    let mut rows: Vec<(usize, Vec<f64>)> = Vec::new();
    for (line_no, cells) in lines {
        let Some((label, rest)) = cells.split_first() else {
            continue;
        };
        let values = rest
            .iter()
            .map(|t| parse_number(t, line_no))
            .collect::<Q3dResult<Vec<f64>>>()?;
        row_labels.push(label.clone());
        rows.push((line_no, values));
    }

    let n = rows.first().map(|(_, r)| r.len()).ok_or(Q3dError::EmptyMatrix)?;
    // A CSV header may carry a corner cell above the row labels.
    if columns.len() == n + 1 {
        columns.remove(0);
    }
    if columns.len() != n {
        return Err(Q3dError::RowLength {
            line: header_line,
            expected: n,
            found: columns.len(),
        });
    }
    for (line, row) in &rows {
        if row.len() != n {
            return Err(Q3dError::RowLength {
                line: *line,
                expected: n,
                found: row.len(),
            });
        }
    }
    if rows.len() != n {
        return Err(Q3dError::NotSquare {
            columns: n,
            rows: rows.len(),
        });
    }

    if row_labels != columns {
        warn!(?row_labels, ?columns, "Row labels differ from column labels");
    }

    let values = DMatrix::from_fn(n, n, |i, j| rows[i].1[j]);
    MaxwellMatrix::new(columns, values)
}

/// Split a table block into its header and data rows. A header holding a
/// comma selects CSV; anything else is whitespace delimited.
fn split_table(block: &str) -> Q3dResult<(Cells, Vec<Cells>)> {
    let skipped = block.lines().take_while(|l| l.trim().is_empty()).count();
    let start: usize = block.split_inclusive('\n').take(skipped).map(str::len).sum();
    let table = &block[start..];
    let header = table.lines().next().ok_or(Q3dError::EmptyMatrix)?;

    if header.contains(',') {
        return csv_table(table, skipped);
    }

    let mut lines = table
        .lines()
        .enumerate()
        .map(|(i, l)| (skipped + i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i, l.split_whitespace().map(str::to_string).collect::<Vec<_>>()));
    let header = lines.next().ok_or(Q3dError::EmptyMatrix)?;
    Ok((header, lines.collect()))
}

fn csv_table(table: &str, skipped: usize) -> Q3dResult<(Cells, Vec<Cells>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(table.as_bytes());

    let header = (skipped + 1, record_cells(reader.headers()?));
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells = record_cells(&record);
        if cells.is_empty() {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line() as usize);
        rows.push((skipped + line, cells));
    }
    Ok((header, rows))
}

/// Cells of a CSV record without the empty trailing column.
fn record_cells(record: &StringRecord) -> Vec<String> {
    let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

fn parse_number(token: &str, line: usize) -> Q3dResult<f64> {
    token.trim().parse().map_err(|_| Q3dError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}
