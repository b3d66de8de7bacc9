//! Production line identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a production line (and therefore its transition table).
///
/// Lines are numbered. A workbook sheet named `Line 3` belongs to
/// `LineId(3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

impl LineId {
    /// Parses a sheet name of the form `Line <digits>`.
    ///
    /// Matching is case-insensitive and tolerates surrounding whitespace
    /// and any run of whitespace between the word and the number.
    /// Returns `None` for sheets that do not describe a line.
    pub fn from_sheet_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        let prefix = trimmed.get(..4)?;
        if !prefix.eq_ignore_ascii_case("line") {
            return None;
        }
        let rest = &trimmed[4..];
        let digits = rest.trim_start();
        if digits.len() == rest.len() || digits.is_empty() {
            // "Line3" or "Line" alone
            return None;
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(LineId)
    }

    /// Canonical sheet name for this line.
    pub fn sheet_name(&self) -> String {
        format!("Line {}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LineId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(LineId)
    }
}

impl From<u32> for LineId {
    fn from(value: u32) -> Self {
        LineId(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name_parsing() {
        assert_eq!(LineId::from_sheet_name("Line 3"), Some(LineId(3)));
        assert_eq!(LineId::from_sheet_name("  line   12 "), Some(LineId(12)));
        assert_eq!(LineId::from_sheet_name("LINE 1"), Some(LineId(1)));
    }

    #[test]
    fn test_sheet_name_rejects_other_sheets() {
        assert_eq!(LineId::from_sheet_name("Summary"), None);
        assert_eq!(LineId::from_sheet_name("Line"), None);
        assert_eq!(LineId::from_sheet_name("Line3"), None);
        assert_eq!(LineId::from_sheet_name("Line 3b"), None);
        assert_eq!(LineId::from_sheet_name("Lines 3"), None);
        assert_eq!(LineId::from_sheet_name("Lí"), None);
    }

    #[test]
    fn test_round_trip_sheet_name() {
        let line = LineId(42);
        assert_eq!(LineId::from_sheet_name(&line.sheet_name()), Some(line));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(" 5 ".parse::<LineId>().unwrap(), LineId(5));
        assert!("x".parse::<LineId>().is_err());
    }
}
