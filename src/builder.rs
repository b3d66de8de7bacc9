//! Cost matrix construction.
//!
//! Turns a line's transition table and an ordered item list into a dense
//! [`CostMatrix`]. Lookups go by item name in both directions, so the
//! matrix follows the caller's ordering, not the table's.
//!
//! # Fallback policy
//! A transition with no usable data (unknown item, missing cell,
//! unparseable cell) gets the fallback cost instead of failing the build.
//! Data gaps degrade the optimum but never abort it.

use tracing::{debug, warn};

use crate::config::DEFAULT_FALLBACK_COST;
use crate::error::{ChangeoverError, Result};
use crate::models::{is_valid_cost, CleaningProcess, CostMatrix, LineId, TransitionTable};
use crate::source::TransitionSource;

/// Builds cost matrices from transition tables.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixBuilder {
    fallback_cost: f64,
}

impl Default for MatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixBuilder {
    /// Creates a builder with the default fallback cost.
    pub fn new() -> Self {
        Self {
            fallback_cost: DEFAULT_FALLBACK_COST,
        }
    }

    /// Sets the fallback cost. Must lie in `0..=MAX_COST`.
    pub fn with_fallback_cost(mut self, cost: f64) -> Result<Self> {
        if !is_valid_cost(cost) {
            return Err(ChangeoverError::InvalidConfig {
                field: "fallback_cost".into(),
                value: cost.to_string(),
            });
        }
        self.fallback_cost = cost;
        Ok(self)
    }

    /// The cost used for transitions without data.
    pub fn fallback_cost(&self) -> f64 {
        self.fallback_cost
    }

    /// Builds the matrix for `items` on `line`.
    ///
    /// Fails only with `LineNotFound` (or a source error); unknown items
    /// and missing cells fall back to the fallback cost.
    pub fn build_matrix<S>(&self, source: &S, line: LineId, items: &[String]) -> Result<CostMatrix>
    where
        S: TransitionSource + ?Sized,
    {
        let table = source.table(line)?;
        Ok(self.build_from_table(&table, items))
    }

    /// Builds the matrix for `items` from an already-resolved table.
    pub fn build_from_table<T: AsRef<str>>(&self, table: &TransitionTable, items: &[T]) -> CostMatrix {
        let n = items.len();
        let mut matrix = CostMatrix::zeros(n);
        let mut fallbacks = 0usize;

        for (i, from) in items.iter().enumerate() {
            for (j, to) in items.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (cost, known) = self.lookup(table, from.as_ref(), to.as_ref());
                if !known {
                    fallbacks += 1;
                    debug!(
                        line = %table.line,
                        from = from.as_ref(),
                        to = to.as_ref(),
                        cost,
                        "no transition data, using fallback cost"
                    );
                }
                matrix.set(i, j, cost);
            }
        }

        if fallbacks > 0 {
            warn!(
                line = %table.line,
                items = n,
                fallbacks,
                fallback_cost = self.fallback_cost,
                "transitions without data priced at fallback cost"
            );
        }
        matrix
    }

    /// Cost and cleaning process for a single transition.
    ///
    /// Same-item transitions cost nothing.
    pub fn transition(
        &self,
        table: &TransitionTable,
        from: &str,
        to: &str,
    ) -> (f64, Option<CleaningProcess>) {
        if from == to {
            return (0.0, None);
        }
        let process = table.get_transition(from, to).and_then(|c| c.process());
        (self.lookup(table, from, to).0, process)
    }

    fn lookup(&self, table: &TransitionTable, from: &str, to: &str) -> (f64, bool) {
        match table.get_transition(from, to).and_then(|cell| cell.cost()) {
            Some(cost) => (cost, true),
            None => (self.fallback_cost, false),
        }
    }
}
