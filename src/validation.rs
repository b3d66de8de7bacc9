//! Request validation for changeover optimization.
//!
//! Checks an optimization request against a line's catalog before any
//! matrix is built. Detects:
//! - Item counts outside the exact-search bound
//! - Items unknown on the line
//! - Duplicate items
//! - Baseline orders that are not a permutation of the requested items
//!
//! Structural errors are returned immediately; nothing is truncated or
//! silently dropped.

use std::collections::HashSet;

use crate::config::MIN_ITEMS;
use crate::error::{ChangeoverError, Result};
use crate::models::TransitionTable;

/// Rejects item counts below two or above `max_items`.
pub fn check_item_count(count: usize, max_items: usize) -> Result<()> {
    if count < MIN_ITEMS || count > max_items {
        return Err(ChangeoverError::InvalidItemCount {
            count,
            min: MIN_ITEMS,
            max: max_items,
        });
    }
    Ok(())
}

/// Resolves requested names to the table's spelling.
///
/// Names are trimmed first. Unknown names are all reported together, in
/// request order; otherwise the first repeated item is reported.
pub fn resolve_items(
    table: &TransitionTable,
    items: &[String],
    ignore_case: bool,
) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(items.len());
    let mut unknown = Vec::new();
    let mut duplicate = None;

    for raw in items {
        let name = raw.trim();
        let Some(canonical) = table.resolve_item(name, ignore_case) else {
            unknown.push(name.to_string());
            continue;
        };
        if !seen.insert(canonical) && duplicate.is_none() {
            duplicate = Some(canonical.to_string());
        }
        resolved.push(canonical.to_string());
    }

    if !unknown.is_empty() {
        return Err(ChangeoverError::UnknownItem {
            line: table.line,
            items: unknown,
        });
    }
    if let Some(item) = duplicate {
        return Err(ChangeoverError::DuplicateItem { item });
    }
    Ok(resolved)
}

/// Resolves a baseline order and checks it covers exactly `items`.
pub fn resolve_baseline(
    table: &TransitionTable,
    baseline: &[String],
    items: &[String],
    ignore_case: bool,
) -> Result<Vec<String>> {
    let resolved = resolve_items(table, baseline, ignore_case).map_err(|e| match e {
        ChangeoverError::UnknownItem { items, .. } => ChangeoverError::InvalidBaseline {
            reason: format!("unknown items: {}", items.join(", ")),
        },
        ChangeoverError::DuplicateItem { item } => ChangeoverError::InvalidBaseline {
            reason: format!("item '{item}' appears twice"),
        },
        other => other,
    })?;

    if resolved.len() != items.len() {
        return Err(ChangeoverError::InvalidBaseline {
            reason: format!("{} items, expected {}", resolved.len(), items.len()),
        });
    }
    let requested: HashSet<&str> = items.iter().map(String::as_str).collect();
    if let Some(extra) = resolved.iter().find(|b| !requested.contains(b.as_str())) {
        return Err(ChangeoverError::InvalidBaseline {
            reason: format!("item '{extra}' was not requested"),
        });
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineId;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_table() -> TransitionTable {
        TransitionTable::new(LineId(3))
            .with_item("Cola")
            .with_item("Lemonade")
            .with_item("Water")
    }

    #[test]
    fn test_item_count_bounds() {
        assert!(check_item_count(2, 18).is_ok());
        assert!(check_item_count(18, 18).is_ok());
        assert!(matches!(
            check_item_count(1, 18),
            Err(ChangeoverError::InvalidItemCount { count: 1, min: 2, max: 18 })
        ));
        assert!(matches!(
            check_item_count(19, 18),
            Err(ChangeoverError::InvalidItemCount { count: 19, .. })
        ));
        assert!(check_item_count(0, 18).is_err());
    }

    #[test]
    fn test_resolve_valid_items() {
        let resolved = resolve_items(&sample_table(), &names(&[" Water ", "Cola"]), false).unwrap();
        assert_eq!(resolved, vec!["Water", "Cola"]);
    }

    #[test]
    fn test_unknown_item() {
        let err = resolve_items(&sample_table(), &names(&["Cola", "Fanta"]), false).unwrap_err();
        match err {
            ChangeoverError::UnknownItem { line, items } => {
                assert_eq!(line, LineId(3));
                assert_eq!(items, vec!["Fanta"]);
            }
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn test_all_unknown_items_reported() {
        let items = names(&["Fanta", "Cola", " Sprite ", "Cola"]);
        let err = resolve_items(&sample_table(), &items, false).unwrap_err();
        assert_eq!(err.to_string(), "Unknown items on line 3: Fanta, Sprite");
        match err {
            ChangeoverError::UnknownItem { items, .. } => assert_eq!(items, vec!["Fanta", "Sprite"]),
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_item() {
        let err = resolve_items(&sample_table(), &names(&["Cola", "Cola "]), false).unwrap_err();
        assert!(matches!(err, ChangeoverError::DuplicateItem { .. }));
    }

    #[test]
    fn test_case_insensitive_resolution() {
        let table = sample_table();
        assert!(resolve_items(&table, &names(&["cola"]), false).is_err());
        let resolved = resolve_items(&table, &names(&["cola", "WATER"]), true).unwrap();
        assert_eq!(resolved, vec!["Cola", "Water"]);
        // Case variants of the same item are duplicates.
        assert!(matches!(
            resolve_items(&table, &names(&["cola", "COLA"]), true),
            Err(ChangeoverError::DuplicateItem { .. })
        ));
    }

    #[test]
    fn test_baseline_permutation() {
        let table = sample_table();
        let items = names(&["Cola", "Water"]);
        let baseline = resolve_baseline(&table, &names(&["Water", "Cola"]), &items, false).unwrap();
        assert_eq!(baseline, vec!["Water", "Cola"]);
    }

    #[test]
    fn test_baseline_rejections() {
        let table = sample_table();
        let items = names(&["Cola", "Water"]);
        for bad in [
            names(&["Cola"]),
            names(&["Cola", "Lemonade"]),
            names(&["Cola", "Cola"]),
            names(&["Cola", "Fanta"]),
        ] {
            assert!(matches!(
                resolve_baseline(&table, &bad, &items, false),
                Err(ChangeoverError::InvalidBaseline { .. })
            ));
        }
    }
}
