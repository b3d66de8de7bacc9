//! Error types for changeover optimization.
//!
//! Structural and input errors (unknown line, bad item count) surface
//! directly to the caller. Data gaps inside a line's transition table are
//! never errors: the matrix builder substitutes the fallback cost instead.

use thiserror::Error;

use crate::models::LineId;

/// Errors raised by the changeover core.
#[derive(Error, Debug)]
pub enum ChangeoverError {
    #[error("Production line {line} not found")]
    LineNotFound { line: LineId },

    #[error("Invalid item count: {count} (expected {min}..={max})")]
    InvalidItemCount { count: usize, min: usize, max: usize },

    #[error("Unknown items on line {line}: {}", .items.join(", "))]
    UnknownItem { line: LineId, items: Vec<String> },

    #[error("Duplicate item: {item}")]
    DuplicateItem { item: String },

    #[error("Invalid baseline order: {reason}")]
    InvalidBaseline { reason: String },

    #[error("Invalid cost matrix: {reason}")]
    InvalidMatrix { reason: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Sheet '{sheet}' has no '{column}' column")]
    MissingItemColumn { sheet: String, column: String },

    #[error("Optimization cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChangeoverError {
    /// Whether the error was caused by the caller's input rather than
    /// by the environment (I/O, malformed workbook).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::LineNotFound { .. }
                | Self::InvalidItemCount { .. }
                | Self::UnknownItem { .. }
                | Self::DuplicateItem { .. }
                | Self::InvalidBaseline { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ChangeoverError>;
