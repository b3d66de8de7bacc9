//! Dense changeover cost matrix.

use serde::{Deserialize, Serialize};

use crate::error::{ChangeoverError, Result};
use crate::optimizer::MAX_EXACT_ITEMS;

/// Largest accepted transition cost.
///
/// A path over [`MAX_EXACT_ITEMS`] items sums fewer than that many entries,
/// so any path cost stays finite.
pub const MAX_COST: f64 = f64::MAX / MAX_EXACT_ITEMS as f64;

/// Whether `cost` is usable as a matrix entry.
pub fn is_valid_cost(cost: f64) -> bool {
    cost.is_finite() && (0.0..=MAX_COST).contains(&cost)
}

/// Square matrix of transition costs, indexed by position in an item ordering.
///
/// `get(i, j)` is the cost of switching from item `i` to item `j`.
///
/// # Invariants
/// - The diagonal is zero.
/// - Every entry is finite, non-negative and at most [`MAX_COST`].
///
/// Storage is row-major in a single `Vec<f64>`. Serialized as nested rows;
/// deserialization goes through [`CostMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CostMatrix {
    size: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Creates an `n × n` matrix of zeros.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Creates a matrix from rows, checking the invariants.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(ChangeoverError::InvalidMatrix {
                    reason: format!("row {i} has {} entries, expected {size}", row.len()),
                });
            }
            for (j, value) in row.into_iter().enumerate() {
                if !is_valid_cost(value) {
                    return Err(ChangeoverError::InvalidMatrix {
                        reason: format!("entry ({i}, {j}) = {value} is not a cost in 0..={MAX_COST:e}"),
                    });
                }
                if i == j && value != 0.0 {
                    return Err(ChangeoverError::InvalidMatrix {
                        reason: format!("diagonal entry ({i}, {i}) = {value} is not zero"),
                    });
                }
                data.push(value);
            }
        }
        Ok(Self { size, data })
    }

    /// Creates a matrix with every off-diagonal entry set to `cost`.
    ///
    /// `cost` must lie in `0..=MAX_COST`.
    pub fn uniform(size: usize, cost: f64) -> Self {
        debug_assert!(is_valid_cost(cost));
        let mut matrix = Self::zeros(size);
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    matrix.set(i, j, cost);
                }
            }
        }
        matrix
    }

    /// Sets an entry. Callers keep the invariants.
    pub(crate) fn set(&mut self, from: usize, to: usize, cost: f64) {
        debug_assert!(cost.is_finite() && cost >= 0.0);
        debug_assert!(from < self.size && to < self.size);
        debug_assert!(from != to || cost == 0.0);
        self.data[from * self.size + to] = cost;
    }

    /// Number of items (rows).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the matrix has no items.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Transition cost from `from` to `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// One row of the matrix.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.size).map(|i| self.row(i).to_vec()).collect()
    }

    /// Total cost of visiting `order` (indices) front to back.
    ///
    /// Summation runs left to right so results are reproducible.
    pub fn path_cost(&self, order: &[usize]) -> f64 {
        order
            .windows(2)
            .fold(0.0, |acc, pair| acc + self.get(pair[0], pair[1]))
    }

    /// Relabels the matrix: entry `(p, q)` of the result is
    /// `(perm[p], perm[q])` of `self`.
    ///
    /// `perm` must be a permutation of `0..size`.
    pub fn permuted(&self, perm: &[usize]) -> Self {
        debug_assert_eq!(perm.len(), self.size);
        let mut data = Vec::with_capacity(self.data.len());
        for &from in perm {
            for &to in perm {
                data.push(self.get(from, to));
            }
        }
        Self {
            size: self.size,
            data,
        }
    }

    /// The matrix for the ordering that starts at `start` and wraps around.
    pub fn rotated(&self, start: usize) -> Self {
        let perm: Vec<usize> = (0..self.size).map(|p| (start + p) % self.size).collect();
        self.permuted(&perm)
    }

    /// Checks the diagonal and finiteness invariants.
    pub fn is_well_formed(&self) -> bool {
        (0..self.size).all(|i| self.get(i, i) == 0.0)
            && self.data.iter().all(|v| is_valid_cost(*v))
            && self.data.len() == self.size * self.size
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = ChangeoverError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix.to_rows()
    }
}
