//! Transition-cost workbook and its parsed per-line catalog.
//!
//! A workbook is a set of named sheets; each sheet is a list of row
//! records (column header → cell). On disk it is JSON:
//!
//! ```json
//! { "sheets": { "Line 3": [ { "Drinks": "Cola", "Lemonade": 50, "Water": "CIP 3" } ] } }
//! ```
//!
//! Sheets named `Line <n>` become transition tables; other sheets are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

use super::TransitionSource;
use crate::error::{ChangeoverError, Result};
use crate::models::{LineId, TransitionCell, TransitionTable};

/// One row of a sheet: column header → raw cell.
pub type SheetRow = Map<String, Value>;

/// Raw workbook contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets by name.
    pub sheets: BTreeMap<String, Vec<SheetRow>>,
}

impl Workbook {
    /// Creates an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: adds a sheet.
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<SheetRow>) -> Self {
        self.sheets.insert(name.into(), rows);
        self
    }

    /// Parses a workbook from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a workbook from a JSON reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Line numbers with a sheet, ascending.
    pub fn lines(&self) -> Vec<LineId> {
        let mut lines: Vec<LineId> = self
            .sheets
            .keys()
            .filter_map(|name| LineId::from_sheet_name(name))
            .collect();
        lines.sort();
        lines.dedup();
        lines
    }

    /// Finds the sheet name for a line.
    pub fn sheet_for(&self, line: LineId) -> Option<&str> {
        self.sheets
            .keys()
            .find(|name| LineId::from_sheet_name(name) == Some(line))
            .map(String::as_str)
    }
}

/// Parses one sheet into a transition table.
///
/// Header names and string cells are trimmed. Rows with an empty item name
/// are skipped. When an item appears twice it keeps its first position in
/// the item list, but the later row replaces all of its transition cells.
/// A non-empty sheet with no item column at all is rejected.
pub fn parse_sheet(
    line: LineId,
    sheet_name: &str,
    rows: &[SheetRow],
    item_column: &str,
) -> Result<TransitionTable> {
    let item_column = item_column.trim();
    let mut table = TransitionTable::new(line);
    let mut saw_column = false;

    for row in rows {
        let mut name = None;
        let mut cells = Vec::with_capacity(row.len());
        for (header, value) in row {
            let header = header.trim();
            if header == item_column {
                saw_column = true;
                name = item_name(value);
            } else if !header.is_empty() {
                cells.push((header, value));
            }
        }

        let Some(name) = name else {
            continue;
        };
        if !table.add_item(name.clone()) {
            debug!(line = %line, item = %name, "duplicate row replaces earlier cells");
            table.clear_transitions_from(&name);
        }
        for (to, value) in cells {
            table.set_transition(name.clone(), to, TransitionCell::from_value(value));
        }
    }

    if !rows.is_empty() && !saw_column {
        return Err(ChangeoverError::MissingItemColumn {
            sheet: sheet_name.to_string(),
            column: item_column.to_string(),
        });
    }
    Ok(table)
}

fn item_name(value: &Value) -> Option<String> {
    let name = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}

/// Parsed transition tables for every line of a workbook.
///
/// Immutable once built; tables are shared through `Arc`.
#[derive(Debug, Clone, Default)]
pub struct LineCatalog {
    tables: BTreeMap<LineId, Arc<TransitionTable>>,
}

impl LineCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: adds (or replaces) a line's table.
    pub fn with_table(mut self, table: TransitionTable) -> Self {
        self.tables.insert(table.line, Arc::new(table));
        self
    }

    /// Parses every line sheet of a workbook.
    ///
    /// When two sheets name the same line, the first in name order wins.
    pub fn from_workbook(workbook: &Workbook, item_column: &str) -> Result<Self> {
        let mut tables = BTreeMap::new();
        for (sheet_name, rows) in &workbook.sheets {
            let Some(line) = LineId::from_sheet_name(sheet_name) else {
                continue;
            };
            if tables.contains_key(&line) {
                continue;
            }
            let table = parse_sheet(line, sheet_name, rows, item_column)?;
            tables.insert(line, Arc::new(table));
        }
        Ok(Self { tables })
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the catalog has no lines.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TransitionSource for LineCatalog {
    fn lines(&self) -> Result<Vec<LineId>> {
        Ok(self.tables.keys().copied().collect())
    }

    fn table(&self, line: LineId) -> Result<Arc<TransitionTable>> {
        self.tables
            .get(&line)
            .cloned()
            .ok_or(ChangeoverError::LineNotFound { line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CleaningProcess;
    use serde_json::json;

    fn row(value: Value) -> SheetRow {
        match value {
            Value::Object(map) => map,
            _ => panic!("row must be an object"),
        }
    }

    fn sample_workbook() -> Workbook {
        Workbook::new()
            .with_sheet(
                "Line 3",
                vec![
                    row(json!({"Drinks": " Cola ", " Lemonade ": 50, "Water": 10})),
                    row(json!({"Drinks": "Lemonade", "Cola": 50, "Water": "CIP 3"})),
                    row(json!({"Drinks": "Water", "Cola": 10, "Lemonade": "bogus"})),
                ],
            )
            .with_sheet("Line 1", vec![row(json!({"Drinks": "Tea"}))])
            .with_sheet("Notes", vec![])
    }

    #[test]
    fn test_lines_sorted() {
        assert_eq!(sample_workbook().lines(), vec![LineId(1), LineId(3)]);
    }

    #[test]
    fn test_sheet_for() {
        let wb = sample_workbook();
        assert_eq!(wb.sheet_for(LineId(3)), Some("Line 3"));
        assert_eq!(wb.sheet_for(LineId(9)), None);
    }

    #[test]
    fn test_parse_sheet_trims_and_maps() {
        let wb = sample_workbook();
        let table = parse_sheet(LineId(3), "Line 3", &wb.sheets["Line 3"], "Drinks").unwrap();

        assert_eq!(
            table.items(),
            &["Cola".to_string(), "Lemonade".to_string(), "Water".to_string()]
        );
        assert_eq!(
            table.get_transition("Cola", "Lemonade"),
            Some(&TransitionCell::Cost(50.0))
        );
        assert_eq!(
            table.get_transition("Lemonade", "Water"),
            Some(&TransitionCell::Process(CleaningProcess::Cip3))
        );
        assert_eq!(
            table.get_transition("Water", "Lemonade"),
            Some(&TransitionCell::Invalid)
        );
    }

    #[test]
    fn test_parse_sheet_last_row_wins() {
        let rows = vec![
            row(json!({"Drinks": "Cola", "Water": 1, "Lemonade": 5})),
            row(json!({"Drinks": "Water", "Cola": 4})),
            row(json!({"Drinks": "Cola", "Water": 2})),
            row(json!({"Drinks": "", "Water": 3})),
        ];
        let table = parse_sheet(LineId(1), "Line 1", &rows, "Drinks").unwrap();
        // First appearance fixes the order; the later row supplies the cells.
        assert_eq!(table.items(), &["Cola".to_string(), "Water".to_string()]);
        assert_eq!(
            table.get_transition("Cola", "Water"),
            Some(&TransitionCell::Cost(2.0))
        );
        assert_eq!(table.get_transition("Cola", "Lemonade"), None);
        assert_eq!(
            table.get_transition("Water", "Cola"),
            Some(&TransitionCell::Cost(4.0))
        );
    }

    #[test]
    fn test_parse_sheet_missing_column() {
        let rows = vec![row(json!({"Product": "Cola"}))];
        let err = parse_sheet(LineId(1), "Line 1", &rows, "Drinks").unwrap_err();
        assert!(matches!(err, ChangeoverError::MissingItemColumn { .. }));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = LineCatalog::from_workbook(&sample_workbook(), "Drinks").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lines().unwrap(), vec![LineId(1), LineId(3)]);
        assert_eq!(catalog.table(LineId(1)).unwrap().items(), &["Tea".to_string()]);
        assert!(matches!(
            catalog.table(LineId(2)),
            Err(ChangeoverError::LineNotFound { line: LineId(2) })
        ));
    }

    #[test]
    fn test_workbook_from_json() {
        let wb = Workbook::from_json_str(
            r#"{"sheets": {"Line 2": [{"Drinks": "A", "B": 1}], "Cover": []}}"#,
        )
        .unwrap();
        assert_eq!(wb.lines(), vec![LineId(2)]);
        assert!(Workbook::from_json_str("{not json").is_err());
    }
}
