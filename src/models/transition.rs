//! Per-line transition tables.
//!
//! A transition table records, for one production line, what it costs to
//! switch from one product to another. Cells hold either a number or a
//! cleaning-process label; malformed cells are kept as `Invalid` so the
//! matrix builder can apply its fallback policy.
//!
//! # Reference
//! Allahverdi et al. (2008), "A survey of scheduling problems with
//! setup times or costs"

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::{is_valid_cost, CleaningProcess, LineId};

/// One cell of a transition table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransitionCell {
    /// Explicit cost (gallons).
    Cost(f64),
    /// Cleaning procedure with a fixed cost.
    Process(CleaningProcess),
    /// Present but unusable (empty, negative, too large, unknown label).
    Invalid,
}

impl TransitionCell {
    /// Interprets a raw workbook cell.
    ///
    /// Numbers must be non-negative and at most `MAX_COST`. Strings are trimmed, then
    /// matched against cleaning-process labels, then parsed as numbers.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(Self::Invalid, Self::from_number),
            Value::String(s) => Self::from_text(s),
            _ => Self::Invalid,
        }
    }

    /// Interprets a text cell.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if let Some(process) = CleaningProcess::from_label(text) {
            return Self::Process(process);
        }
        text.parse::<f64>()
            .map_or(Self::Invalid, Self::from_number)
    }

    fn from_number(n: f64) -> Self {
        if is_valid_cost(n) {
            Self::Cost(n)
        } else {
            Self::Invalid
        }
    }

    /// Numeric cost of this cell, if it has one.
    pub fn cost(&self) -> Option<f64> {
        match self {
            Self::Cost(c) => Some(*c),
            Self::Process(p) => Some(p.cost()),
            Self::Invalid => None,
        }
    }

    /// Cleaning process, when the cell was recorded as a label.
    pub fn process(&self) -> Option<CleaningProcess> {
        match self {
            Self::Process(p) => Some(*p),
            _ => None,
        }
    }
}

/// Sequence-dependent changeover costs for one production line.
///
/// Maps (from_item, to_item) → cell. Items are kept in the order they
/// were first added, which is the order `list_items` reports.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    /// Line this table belongs to.
    pub line: LineId,
    items: Vec<String>,
    transitions: HashMap<(String, String), TransitionCell>,
}

impl TransitionTable {
    /// Creates an empty table for a line.
    pub fn new(line: LineId) -> Self {
        Self {
            line,
            items: Vec::new(),
            transitions: HashMap::new(),
        }
    }

    /// Registers an item. Returns `false` if it was already present.
    pub fn add_item(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains_item(&name) {
            return false;
        }
        self.items.push(name);
        true
    }

    /// Builder: registers an item and returns self.
    pub fn with_item(mut self, name: impl Into<String>) -> Self {
        self.add_item(name);
        self
    }

    /// Defines the cell for a transition, overwriting any earlier value.
    pub fn set_transition(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        cell: TransitionCell,
    ) {
        self.transitions.insert((from.into(), to.into()), cell);
    }

    /// Removes every recorded transition leaving `from`.
    pub fn clear_transitions_from(&mut self, from: &str) {
        self.transitions.retain(|(source, _), _| source != from);
    }

    /// Builder: defines a numeric transition cost.
    pub fn with_cost(mut self, from: impl Into<String>, to: impl Into<String>, cost: f64) -> Self {
        self.set_transition(from, to, TransitionCell::from_number(cost));
        self
    }

    /// Gets the cell for a transition, if one was recorded.
    pub fn get_transition(&self, from: &str, to: &str) -> Option<&TransitionCell> {
        self.transitions.get(&(from.to_string(), to.to_string()))
    }

    /// Items in first-appearance order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Whether the item is known on this line (exact match).
    pub fn contains_item(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name)
    }

    /// Resolves a requested name to the table's spelling.
    ///
    /// Exact matches win; with `ignore_case`, an ASCII case-insensitive
    /// match is accepted next.
    pub fn resolve_item(&self, name: &str, ignore_case: bool) -> Option<&str> {
        if let Some(item) = self.items.iter().find(|i| *i == name) {
            return Some(item.as_str());
        }
        if ignore_case {
            return self
                .items
                .iter()
                .find(|i| i.eq_ignore_ascii_case(name))
                .map(String::as_str);
        }
        None
    }

    /// Number of recorded cells.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}
