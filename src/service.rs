//! Caller-facing changeover API.
//!
//! Wraps a [`TransitionSource`] with validation, matrix construction,
//! multi-start optimization and baseline comparison.
//!
//! # Example
//!
//! ```
//! use u_changeover::config::OptimizerConfig;
//! use u_changeover::models::{LineId, TransitionTable};
//! use u_changeover::service::{ChangeoverService, OptimizationRequest};
//! use u_changeover::source::LineCatalog;
//!
//! let table = TransitionTable::new(LineId(3))
//!     .with_item("Cola")
//!     .with_item("Lemonade")
//!     .with_item("Water")
//!     .with_cost("Cola", "Lemonade", 50.0)
//!     .with_cost("Lemonade", "Cola", 50.0)
//!     .with_cost("Cola", "Water", 10.0)
//!     .with_cost("Water", "Cola", 10.0)
//!     .with_cost("Lemonade", "Water", 200.0)
//!     .with_cost("Water", "Lemonade", 200.0);
//! let service = ChangeoverService::new(
//!     LineCatalog::new().with_table(table),
//!     OptimizerConfig::default(),
//! ).unwrap();
//!
//! let request = OptimizationRequest::new(LineId(3), vec![
//!     "Cola".into(), "Lemonade".into(), "Water".into(),
//! ]);
//! let report = service.optimize(&request).unwrap();
//! assert_eq!(report.order, vec!["Lemonade", "Cola", "Water"]);
//! assert_eq!(report.total_cost, 60.0);
//! assert_eq!(report.baseline_cost, 250.0);
//! assert_eq!(report.saved, 190.0);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info};

use crate::builder::MatrixBuilder;
use crate::config::OptimizerConfig;
use crate::error::{ChangeoverError, Result};
use crate::models::{LineId, Transition, TransitionTable};
use crate::optimizer::{CancellationToken, MultiStartOptimizer};
use crate::source::{JsonFileLoader, TransitionSource, WorkbookCache};
use crate::validation::{check_item_count, resolve_baseline, resolve_items};

/// An optimization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// Production line.
    pub line: LineId,
    /// Items to sequence.
    pub items: Vec<String>,
    /// Reference order for the savings figure. Defaults to `items`.
    #[serde(default)]
    pub baseline: Option<Vec<String>>,
}

impl OptimizationRequest {
    /// Creates a request with the submitted order as baseline.
    pub fn new(line: LineId, items: Vec<String>) -> Self {
        Self {
            line,
            items,
            baseline: None,
        }
    }

    /// Sets an explicit baseline order.
    pub fn with_baseline(mut self, baseline: Vec<String>) -> Self {
        self.baseline = Some(baseline);
        self
    }
}

/// Result of an optimization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// Production line.
    pub line: LineId,
    /// Optimal production order.
    pub order: Vec<String>,
    /// Changeover cost of `order`.
    pub total_cost: f64,
    /// Changeover cost of the baseline order.
    pub baseline_cost: f64,
    /// `baseline_cost - total_cost`, never negative.
    pub saved: f64,
    /// Step-by-step changeovers along `order`.
    pub transitions: Vec<Transition>,
}

/// Changeover optimization service over a transition source.
#[derive(Debug)]
pub struct ChangeoverService<S> {
    source: S,
    config: OptimizerConfig,
    builder: MatrixBuilder,
}

impl ChangeoverService<WorkbookCache<JsonFileLoader>> {
    /// Creates a service over a JSON workbook file, loaded on first use.
    pub fn from_workbook_file(path: impl AsRef<Path>, config: OptimizerConfig) -> Result<Self> {
        let cache = WorkbookCache::new(
            JsonFileLoader::new(path.as_ref()),
            config.item_column.clone(),
        );
        Self::new(cache, config)
    }
}

impl<S: TransitionSource> ChangeoverService<S> {
    /// Creates a service. Fails if the configuration is invalid.
    pub fn new(source: S, config: OptimizerConfig) -> Result<Self> {
        config.validate()?;
        let builder = MatrixBuilder::new().with_fallback_cost(config.fallback_cost)?;
        Ok(Self {
            source,
            config,
            builder,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// The underlying transition source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Lines with transition data, ascending.
    pub fn list_lines(&self) -> Result<Vec<LineId>> {
        self.source.lines()
    }

    /// Items known on a line, in table order.
    pub fn list_items(&self, line: LineId) -> Result<Vec<String>> {
        Ok(self.source.table(line)?.items().to_vec())
    }

    /// Finds the cheapest production order for the request.
    pub fn optimize(&self, request: &OptimizationRequest) -> Result<OptimizationReport> {
        self.run(request, MultiStartOptimizer::new())
    }

    /// Like [`optimize`](Self::optimize), abandoning the search once
    /// `token` is cancelled.
    pub fn optimize_with_cancel(
        &self,
        request: &OptimizationRequest,
        token: CancellationToken,
    ) -> Result<OptimizationReport> {
        self.run(request, MultiStartOptimizer::new().with_cancellation(token))
    }

    fn run(
        &self,
        request: &OptimizationRequest,
        optimizer: MultiStartOptimizer,
    ) -> Result<OptimizationReport> {
        // Reject oversized requests before touching the source.
        check_item_count(request.items.len(), self.config.max_items)?;

        let ignore_case = self.config.case_insensitive_items;
        let table = self.source.table(request.line)?;
        let items = resolve_items(&table, &request.items, ignore_case)?;
        let baseline = match &request.baseline {
            Some(order) => resolve_baseline(&table, order, &items, ignore_case)?,
            None => items.clone(),
        };

        let matrix = self.builder.build_from_table(&table, &items);
        let best = optimizer.optimize_matrix(&matrix, &items)?;

        let baseline_cost = matrix.path_cost(&matrix_indices(&items, &baseline)?);

        let mut saved = baseline_cost - best.cost;
        if saved < 0.0 {
            error!(
                line = %request.line,
                total_cost = best.cost,
                baseline_cost,
                "optimal order costs more than baseline"
            );
            saved = 0.0;
        }

        let transitions = self.transitions(&table, &best.order);
        info!(
            line = %request.line,
            items = items.len(),
            total_cost = best.cost,
            baseline_cost,
            saved,
            "changeover sequence optimized"
        );

        Ok(OptimizationReport {
            line: request.line,
            order: best.order,
            total_cost: best.cost,
            baseline_cost,
            saved,
            transitions,
        })
    }

    fn transitions(&self, table: &TransitionTable, order: &[String]) -> Vec<Transition> {
        order
            .windows(2)
            .map(|pair| {
                let (cost, process) = self.builder.transition(table, &pair[0], &pair[1]);
                Transition {
                    from: pair[0].clone(),
                    to: pair[1].clone(),
                    process,
                    cost,
                }
            })
            .collect()
    }
}

/// Maps `order` to matrix positions, where row `i` belongs to `items[i]`.
fn matrix_indices(items: &[String], order: &[String]) -> Result<Vec<usize>> {
    let index: HashMap<&str, usize> = items
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();
    order
        .iter()
        .map(|name| {
            index
                .get(name.as_str())
                .copied()
                .ok_or_else(|| ChangeoverError::InvalidBaseline {
                    reason: format!("item '{name}' was not requested"),
                })
        })
        .collect()
}
