//! Optimization outputs.

use serde::{Deserialize, Serialize};

use super::CleaningProcess;

/// A visiting order (Hamiltonian path) and its total changeover cost.
///
/// `cost` is the left-to-right sum of `matrix[order[i]][order[i + 1]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Item names in production order.
    pub order: Vec<String>,
    /// Total changeover cost along `order`.
    pub cost: f64,
}

impl OptimizationResult {
    /// Creates a result.
    pub fn new(order: Vec<String>, cost: f64) -> Self {
        Self { order, cost }
    }

    /// Number of items in the path.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// First item produced.
    pub fn first(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }
}

/// One changeover step in an optimized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Item produced before the changeover.
    pub from: String,
    /// Item produced after the changeover.
    pub to: String,
    /// Cleaning process, when the source recorded one.
    pub process: Option<CleaningProcess>,
    /// Cost charged for the step (gallons).
    pub cost: f64,
}
