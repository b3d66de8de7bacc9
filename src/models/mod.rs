//! Changeover domain models.
//!
//! Plain data types shared by the matrix builder, the optimizer and the
//! service layer.
//!
//! # Domain Mappings
//!
//! | u-changeover | Beverage plant | Paint shop | Pharma |
//! |--------------|----------------|------------|--------|
//! | Item | Drink | Color | Batch recipe |
//! | Line | Filling line | Spray booth | Reactor train |
//! | Transition cost | Cleaning water | Solvent flush | Validation clean |

mod cleaning;
mod line;
mod matrix;
mod result;
mod transition;

pub use cleaning::CleaningProcess;
pub use line::LineId;
pub use matrix::{is_valid_cost, CostMatrix, MAX_COST};
pub use result::{OptimizationResult, Transition};
pub use transition::{TransitionCell, TransitionTable};
