//! Load-once cache for the transition workbook.
//!
//! The workbook changes rarely, so it is read and parsed once per process
//! and shared read-only afterwards. Concurrent first callers serialize on
//! an init lock; exactly one of them performs the load. A failed load
//! stores nothing, so a later call retries.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, info};

use super::workbook::{LineCatalog, Workbook};
use super::TransitionSource;
use crate::error::Result;
use crate::models::{LineId, TransitionTable};

/// Produces a workbook on demand.
pub trait WorkbookLoader: Send + Sync {
    /// Reads the workbook.
    fn load(&self) -> Result<Workbook>;
}

/// Loads a JSON workbook from a file.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    /// Creates a loader for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The workbook path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkbookLoader for JsonFileLoader {
    fn load(&self) -> Result<Workbook> {
        let file = File::open(&self.path)?;
        Workbook::from_reader(BufReader::new(file))
    }
}

impl WorkbookLoader for Workbook {
    fn load(&self) -> Result<Workbook> {
        Ok(self.clone())
    }
}

/// A [`TransitionSource`] that parses its workbook on first access.
#[derive(Debug)]
pub struct WorkbookCache<L> {
    loader: L,
    item_column: String,
    catalog: OnceLock<Arc<LineCatalog>>,
    init: Mutex<()>,
}

impl<L: WorkbookLoader> WorkbookCache<L> {
    /// Creates an empty cache. Nothing is loaded until first use.
    pub fn new(loader: L, item_column: impl Into<String>) -> Self {
        Self {
            loader,
            item_column: item_column.into(),
            catalog: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Whether the workbook has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// Returns the parsed catalog, loading it if needed.
    pub fn catalog(&self) -> Result<Arc<LineCatalog>> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(Arc::clone(catalog));
        }

        // The lock only guards the load; the catalog itself is never mutated.
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(catalog) = self.catalog.get() {
            return Ok(Arc::clone(catalog));
        }

        debug!(item_column = %self.item_column, "loading transition workbook");
        let workbook = self.loader.load()?;
        let catalog = Arc::new(LineCatalog::from_workbook(&workbook, &self.item_column)?);
        info!(
            lines = catalog.len(),
            sheets = workbook.sheets.len(),
            "transition workbook loaded"
        );
        Ok(Arc::clone(self.catalog.get_or_init(|| catalog)))
    }
}

impl<L: WorkbookLoader> TransitionSource for WorkbookCache<L> {
    fn lines(&self) -> Result<Vec<LineId>> {
        self.catalog()?.lines()
    }

    fn table(&self, line: LineId) -> Result<Arc<TransitionTable>> {
        self.catalog()?.table(line)
    }
}
