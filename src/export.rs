//! Flat CSV export of optimization reports.
//!
//! Two layouts are provided:
//! - [`to_csv`]: key/value summary rows (line, schedule, totals)
//! - [`transitions_csv`]: one row per changeover step
//!
//! Every field is double-quoted and embedded quotes are doubled.

use std::fs;
use std::path::Path;

use crate::service::OptimizationReport;

/// Separator used to render an order on one line.
pub const ORDER_SEPARATOR: &str = " -> ";

/// Suggested download name for a line's export.
pub fn file_name(report: &OptimizationReport) -> String {
    format!("optimized_schedule_line_{}.csv", report.line)
}

/// Renders the summary rows.
pub fn to_csv(report: &OptimizationReport) -> String {
    let rows = [
        ["Line".to_string(), report.line.to_string()],
        ["Optimal Schedule".to_string(), report.order.join(ORDER_SEPARATOR)],
        [
            "Total Water (gallons)".to_string(),
            format!("{:.2}", report.total_cost),
        ],
        [
            "Saved Water vs Baseline (gallons)".to_string(),
            format!("{:.2}", report.saved),
        ],
    ];
    rows.iter()
        .map(|row| join_row(row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a header plus one row per transition.
pub fn transitions_csv(report: &OptimizationReport) -> String {
    let mut lines = vec![join_row(&["Step", "From", "To", "Cleaning Process", "Water (gallons)"])];
    for (step, t) in report.transitions.iter().enumerate() {
        let process = t.process.map(|p| p.label().to_string()).unwrap_or_default();
        lines.push(join_row(&[
            (step + 1).to_string(),
            t.from.clone(),
            t.to.clone(),
            process,
            format!("{:.2}", t.cost),
        ]));
    }
    lines.join("\n")
}

/// Writes the summary CSV to `path`.
pub fn save_csv(report: &OptimizationReport, path: impl AsRef<Path>) -> std::io::Result<()> {
    fs::write(path, to_csv(report))
}

fn join_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| quote(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
