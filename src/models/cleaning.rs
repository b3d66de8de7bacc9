//! Cleaning processes and their water cost.
//!
//! Transition tables may record the cleaning procedure required between
//! two products instead of a number. Each procedure has a fixed water
//! usage in gallons.
//!
//! | Label | Gallons |
//! |-------|---------|
//! | `A` | 0 |
//! | `A/VR` | 1002.32 |
//! | `VR` | 1002.32 |
//! | `CIP 3` | 2860.15 |
//! | `CIP 5` | 7500 |
//! | `H` | 5 |
//! | `K` | 6 |

use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbolic cleaning procedure found in a transition table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CleaningProcess {
    /// `A`: no water used.
    A,
    /// `A/VR`: combined A and VR flush.
    AVr,
    /// `VR`: VR flush.
    Vr,
    /// `CIP 3`: three-step clean-in-place.
    Cip3,
    /// `CIP 5`: five-step clean-in-place.
    Cip5,
    /// `H`: short rinse.
    H,
    /// `K`: short rinse, slightly longer than `H`.
    K,
}

impl CleaningProcess {
    /// All known procedures.
    pub const ALL: [CleaningProcess; 7] = [
        Self::A,
        Self::AVr,
        Self::Vr,
        Self::Cip3,
        Self::Cip5,
        Self::H,
        Self::K,
    ];

    /// Looks up a procedure by its table label (whitespace-trimmed, exact case).
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    /// Label as written in transition tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AVr => "A/VR",
            Self::Vr => "VR",
            Self::Cip3 => "CIP 3",
            Self::Cip5 => "CIP 5",
            Self::H => "H",
            Self::K => "K",
        }
    }

    /// Water used by this procedure (gallons).
    pub fn cost(&self) -> f64 {
        match self {
            Self::A => 0.0,
            Self::AVr | Self::Vr => 1002.32,
            Self::Cip3 => 2860.15,
            Self::Cip5 => 7500.0,
            Self::H => 5.0,
            Self::K => 6.0,
        }
    }
}

impl fmt::Display for CleaningProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
