//! Basis reordering of Maxwell matrices.
//!
//! The extraction step expects the nodes in a fixed order
//! (bus pads, ground, qubit pads, readout pad). Exports list nodes in
//! whatever order the design tool chose, usually alphabetical, so a block of
//! rows/columns is moved to its canonical position before reduction.

use tracing::debug;

use crate::error::{Q3dError, Q3dResult};
use crate::matrix::MaxwellMatrix;

/// Permutation that removes the indices `from` and reinserts them, as a
/// contiguous block in their given order, starting at position `to` of the
/// remaining sequence.
///
/// ```rust
/// use qlom_q3d::reorder::move_index_to;
///
/// assert_eq!(move_index_to(&[0], 4, 6).unwrap(), vec![1, 2, 3, 4, 0, 5]);
/// ```
pub fn move_index_to(from: &[usize], to: usize, len: usize) -> Q3dResult<Vec<usize>> {
    let mut seen = vec![false; len];
    for &i in from {
        if i >= len {
            return Err(Q3dError::InvalidReorder(format!(
                "index {i} out of range for dimension {len}"
            )));
        }
        if seen[i] {
            return Err(Q3dError::InvalidReorder(format!("index {i} repeated")));
        }
        seen[i] = true;
    }

    let mut rest: Vec<usize> = (0..len).filter(|i| !seen[*i]).collect();
    if to > rest.len() {
        return Err(Q3dError::InvalidReorder(format!(
            "destination {to} beyond the {} remaining indices",
            rest.len()
        )));
    }
    rest.splice(to..to, from.iter().copied());
    Ok(rest)
}

/// Inverse of a permutation: `inv[perm[k]] == k`.
pub fn invert_permutation(perm: &[usize]) -> Q3dResult<Vec<usize>> {
    check_permutation(perm, perm.len())?;
    let mut inv = vec![0; perm.len()];
    for (k, &p) in perm.iter().enumerate() {
        inv[p] = k;
    }
    Ok(inv)
}

pub(crate) fn check_permutation(perm: &[usize], len: usize) -> Q3dResult<()> {
    if perm.len() != len {
        return Err(Q3dError::InvalidReorder(format!(
            "permutation has {} entries for dimension {len}",
            perm.len()
        )));
    }
    let mut seen = vec![false; len];
    for &p in perm {
        if p >= len || seen[p] {
            return Err(Q3dError::InvalidReorder(format!(
                "{perm:?} is not a permutation of 0..{len}"
            )));
        }
        seen[p] = true;
    }
    Ok(())
}

/// Move the nodes at `from` to start at `to`, reordering rows, columns and
/// labels alike. The input is left untouched.
pub fn reorder_basis(matrix: &MaxwellMatrix, from: &[usize], to: usize) -> Q3dResult<MaxwellMatrix> {
    let perm = move_index_to(from, to, matrix.size())?;
    debug!(?from, to, ?perm, "Reordering matrix basis");
    matrix.permuted(&perm)
}

/// Node labels identifying the roles the extraction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRoles {
    /// Ground plane.
    pub ground: String,
    /// The two qubit pads.
    pub pads: [String; 2],
    /// Readout coupling pad, absent for an uncoupled qubit.
    pub readout: Option<String>,
    /// Bus coupling pads, in port order.
    pub buses: Vec<String>,
}

impl NodeRoles {
    /// Number of coupling ports (readout plus buses).
    pub fn port_count(&self) -> usize {
        if self.readout.is_some() {
            1 + self.buses.len()
        } else {
            0
        }
    }
}

/// Permute `matrix` into the canonical order
/// `[bus_1 .. bus_{N-1}, ground, pad_1, pad_2, readout]`.
///
/// Every node of the matrix must be named by `roles`; buses without a
/// readout pad are rejected.
pub fn canonical_order(matrix: &MaxwellMatrix, roles: &NodeRoles) -> Q3dResult<MaxwellMatrix> {
    if roles.readout.is_none() && !roles.buses.is_empty() {
        return Err(Q3dError::InvalidReorder(
            "bus pads given without a readout pad".into(),
        ));
    }

    let mut perm = Vec::with_capacity(matrix.size());
    for bus in &roles.buses {
        perm.push(matrix.index_of(bus)?);
    }
    perm.push(matrix.index_of(&roles.ground)?);
    perm.push(matrix.index_of(&roles.pads[0])?);
    perm.push(matrix.index_of(&roles.pads[1])?);
    if let Some(readout) = &roles.readout {
        perm.push(matrix.index_of(readout)?);
    }

    if perm.len() != matrix.size() {
        return Err(Q3dError::InvalidReorder(format!(
            "{} nodes named but the matrix has {}",
            perm.len(),
            matrix.size()
        )));
    }
    debug!(?perm, "Canonical node order");
    matrix.permuted(&perm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_block_forward() {
        assert_eq!(move_index_to(&[0, 1], 2, 5).unwrap(), vec![2, 3, 0, 1, 4]);
    }

    #[test]
    fn test_move_to_end() {
        assert_eq!(move_index_to(&[1], 3, 4).unwrap(), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_move_rejects_repeats() {
        assert!(move_index_to(&[1, 1], 0, 4).is_err());
    }

    #[test]
    fn test_move_rejects_far_destination() {
        assert!(move_index_to(&[0], 4, 4).is_err());
    }

    #[test]
    fn test_invert() {
        assert_eq!(invert_permutation(&[2, 0, 1]).unwrap(), vec![1, 2, 0]);
    }
}
