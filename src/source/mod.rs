//! Transition-cost data sources.
//!
//! The optimizer never reads files itself. It asks a [`TransitionSource`]
//! for the lines it knows and for one line's [`TransitionTable`].
//!
//! - [`LineCatalog`]: in-memory tables, parsed from a [`Workbook`]
//! - [`WorkbookCache`]: parses a workbook on first access and keeps it for
//!   the process lifetime

mod cache;
mod workbook;

pub use cache::{JsonFileLoader, WorkbookCache, WorkbookLoader};
pub use workbook::{parse_sheet, LineCatalog, SheetRow, Workbook};

use std::sync::Arc;

use crate::error::Result;
use crate::models::{LineId, TransitionTable};

/// Read-only provider of per-line transition tables.
pub trait TransitionSource: Send + Sync {
    /// Lines with a transition table, ascending.
    fn lines(&self) -> Result<Vec<LineId>>;

    /// The transition table of a line.
    ///
    /// Fails with `LineNotFound` when the line has no table.
    fn table(&self, line: LineId) -> Result<Arc<TransitionTable>>;
}

impl<S: TransitionSource + ?Sized> TransitionSource for Arc<S> {
    fn lines(&self) -> Result<Vec<LineId>> {
        (**self).lines()
    }

    fn table(&self, line: LineId) -> Result<Arc<TransitionTable>> {
        (**self).table(line)
    }
}
