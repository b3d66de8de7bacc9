//! Optimizer configuration.
//!
//! All fields have defaults; a JSON file may override any subset of them.
//!
//! ```
//! use u_changeover::config::OptimizerConfig;
//!
//! let config = OptimizerConfig::default()
//!     .with_max_items(12)
//!     .with_fallback_cost(10_000.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ChangeoverError, Result};
use crate::models::is_valid_cost;
use crate::optimizer::MAX_EXACT_ITEMS;

/// Default upper bound on items per optimization request.
pub const DEFAULT_MAX_ITEMS: usize = 18;

/// Default cost for transitions with no usable data (gallons).
pub const DEFAULT_FALLBACK_COST: f64 = 8000.0;

/// Default header of the column holding item names.
pub const DEFAULT_ITEM_COLUMN: &str = "Drinks";

/// Smallest request the optimizer accepts.
pub const MIN_ITEMS: usize = 2;

/// Optimizer and matrix-builder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Largest accepted item count (exact search is exponential).
    pub max_items: usize,
    /// Cost substituted for missing or unparseable transitions.
    pub fallback_cost: f64,
    /// Header of the workbook column holding item names.
    pub item_column: String,
    /// Match requested items against the catalog ignoring ASCII case.
    pub case_insensitive_items: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            fallback_cost: DEFAULT_FALLBACK_COST,
            item_column: DEFAULT_ITEM_COLUMN.to_string(),
            case_insensitive_items: false,
        }
    }
}

impl OptimizerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item-count bound.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Sets the fallback cost.
    pub fn with_fallback_cost(mut self, cost: f64) -> Self {
        self.fallback_cost = cost;
        self
    }

    /// Sets the item column header.
    pub fn with_item_column(mut self, column: impl Into<String>) -> Self {
        self.item_column = column.into();
        self
    }

    /// Enables or disables case-insensitive item matching.
    pub fn with_case_insensitive_items(mut self, enabled: bool) -> Self {
        self.case_insensitive_items = enabled;
        self
    }

    /// Loads a configuration from a JSON file. Missing fields keep defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_items < MIN_ITEMS || self.max_items > MAX_EXACT_ITEMS {
            return Err(ChangeoverError::InvalidConfig {
                field: "max_items".into(),
                value: self.max_items.to_string(),
            });
        }
        if !is_valid_cost(self.fallback_cost) {
            return Err(ChangeoverError::InvalidConfig {
                field: "fallback_cost".into(),
                value: self.fallback_cost.to_string(),
            });
        }
        if self.item_column.trim().is_empty() {
            return Err(ChangeoverError::InvalidConfig {
                field: "item_column".into(),
                value: self.item_column.clone(),
            });
        }
        Ok(())
    }
}
