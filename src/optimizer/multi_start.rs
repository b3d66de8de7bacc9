//! Multi-start search over every starting item.
//!
//! The Held–Karp routine fixes the start at index 0. Trying each rotation
//! of the item list makes every item the start once; the cheapest rotation
//! wins, and ties keep the earliest rotation.
//!
//! One canonical matrix is built and each rotation's matrix is derived by
//! relabeling indices, so the transition source is consulted once.
//!
//! # Complexity
//! O(n) solver runs: O(n³ · 2ⁿ) total.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::held_karp::solve_from_start;
use crate::builder::MatrixBuilder;
use crate::error::{ChangeoverError, Result};
use crate::models::{CostMatrix, LineId, OptimizationResult};
use crate::source::TransitionSource;

/// Cooperative cancellation flag shared between a caller and a search.
///
/// The search checks it between rotations, never inside a DP run.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Exact optimizer that tries every starting item.
#[derive(Debug, Clone, Default)]
pub struct MultiStartOptimizer {
    cancel: Option<CancellationToken>,
}

impl MultiStartOptimizer {
    /// Creates an optimizer without cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the matrix for `items` on `line` and optimizes it.
    pub fn optimize<S>(
        &self,
        source: &S,
        builder: &MatrixBuilder,
        line: LineId,
        items: &[String],
    ) -> Result<OptimizationResult>
    where
        S: TransitionSource + ?Sized,
    {
        let matrix = builder.build_matrix(source, line, items)?;
        self.optimize_matrix(&matrix, items)
    }

    /// Optimizes over a prebuilt matrix whose rows follow `items`.
    ///
    /// The returned order uses the names in `items`.
    pub fn optimize_matrix(&self, matrix: &CostMatrix, items: &[String]) -> Result<OptimizationResult> {
        let n = items.len();
        let mut best: Option<OptimizationResult> = None;

        for start in 0..n {
            if self.is_cancelled() {
                debug!(start, items = n, "multi-start search cancelled");
                return Err(ChangeoverError::Cancelled);
            }

            let rotated_names: Vec<String> = items[start..]
                .iter()
                .chain(&items[..start])
                .cloned()
                .collect();
            let result = solve_from_start(&matrix.rotated(start), &rotated_names)?;
            debug!(start = %items[start], cost = result.cost, "rotation solved");

            match &best {
                Some(current) if result.cost >= current.cost => {}
                _ => best = Some(result),
            }
        }

        // Zero items is the only way to finish without a result.
        best.map_or_else(|| solve_from_start(matrix, items), Ok)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransitionTable;
    use crate::source::LineCatalog;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn drinks_matrix() -> CostMatrix {
        // Cola, Lemonade, Water
        CostMatrix::from_rows(vec![
            vec![0.0, 50.0, 10.0],
            vec![50.0, 0.0, 200.0],
            vec![10.0, 200.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_best_start_found() {
        let items = names(&["Cola", "Lemonade", "Water"]);
        let result = MultiStartOptimizer::new()
            .optimize_matrix(&drinks_matrix(), &items)
            .unwrap();
        assert_eq!(result.order, vec!["Lemonade", "Cola", "Water"]);
        assert_eq!(result.cost, 60.0);
    }

    #[test]
    fn test_deterministic() {
        let items = names(&["Cola", "Lemonade", "Water"]);
        let optimizer = MultiStartOptimizer::new();
        let a = optimizer.optimize_matrix(&drinks_matrix(), &items).unwrap();
        let b = optimizer.optimize_matrix(&drinks_matrix(), &items).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_costs() {
        let items = names(&["A", "B", "C", "D"]);
        let result = MultiStartOptimizer::new()
            .optimize_matrix(&CostMatrix::uniform(4, 100.0), &items)
            .unwrap();
        assert_eq!(result.cost, 300.0);
        assert_eq!(result.first(), Some("A")); // first rotation kept on ties
    }

    #[test]
    fn test_better_than_fixed_start() {
        // Switching into "Z" is expensive, so it should run first.
        let items = names(&["A", "B", "Z"]);
        let m = CostMatrix::from_rows(vec![
            vec![0.0, 5.0, 100.0],
            vec![5.0, 0.0, 100.0],
            vec![1.0, 1.0, 0.0],
        ])
        .unwrap();
        let fixed = solve_from_start(&m, &items).unwrap();
        let multi = MultiStartOptimizer::new().optimize_matrix(&m, &items).unwrap();
        assert_eq!(fixed.cost, 101.0);
        assert_eq!(multi.cost, 6.0);
        assert_eq!(multi.first(), Some("Z"));
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let optimizer = MultiStartOptimizer::new().with_cancellation(token.clone());
        let err = optimizer
            .optimize_matrix(&drinks_matrix(), &names(&["Cola", "Lemonade", "Water"]))
            .unwrap_err();
        assert!(matches!(err, ChangeoverError::Cancelled));
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_optimize_through_source() {
        let table = TransitionTable::new(LineId(3))
            .with_item("Cola")
            .with_item("Water")
            .with_cost("Cola", "Water", 40.0)
            .with_cost("Water", "Cola", 5.0);
        let catalog = LineCatalog::new().with_table(table);
        let result = MultiStartOptimizer::new()
            .optimize(&catalog, &MatrixBuilder::new(), LineId(3), &names(&["Cola", "Water"]))
            .unwrap();
        assert_eq!(result.order, vec!["Water", "Cola"]);
        assert_eq!(result.cost, 5.0);
    }

    #[test]
    fn test_largest_costs_keep_every_item() {
        let big = crate::models::MAX_COST;
        let items = names(&["A", "B", "C", "D"]);
        let m = CostMatrix::from_rows(vec![
            vec![0.0, big, big, big],
            vec![big, 0.0, big, 1.0],
            vec![big, big, 0.0, big],
            vec![big, big, big, 0.0],
        ])
        .unwrap();
        let result = MultiStartOptimizer::new().optimize_matrix(&m, &items).unwrap();
        assert_eq!(result.len(), 4);
        assert!(result.cost.is_finite());
        assert_eq!(result.cost, m.path_cost(&[0, 1, 3, 2]));
    }

    #[test]
    fn test_empty_items_rejected() {
        let err = MultiStartOptimizer::new()
            .optimize_matrix(&CostMatrix::zeros(0), &[])
            .unwrap_err();
        assert!(matches!(err, ChangeoverError::InvalidItemCount { .. }));
    }
}
