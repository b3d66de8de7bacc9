//! Exact changeover sequencing.
//!
//! Finds the production order that minimizes total changeover cost over
//! an open Hamiltonian path (the line does not return to its first item).
//!
//! # Algorithm
//!
//! - [`solve_from_start`]: Held–Karp subset DP with the start fixed at
//!   index 0, dense `2^(n-1) × (n-1)` table
//! - [`MultiStartOptimizer`]: runs the DP once per rotation of the item
//!   list and keeps the cheapest, making the result start-optimal
//!
//! Exact search is exponential; requests above [`MAX_EXACT_ITEMS`] are
//! rejected, never approximated.
//!
//! # Usage
//!
//! ```
//! use u_changeover::models::CostMatrix;
//! use u_changeover::optimizer::MultiStartOptimizer;
//!
//! let matrix = CostMatrix::from_rows(vec![
//!     vec![0.0, 50.0, 10.0],
//!     vec![50.0, 0.0, 200.0],
//!     vec![10.0, 200.0, 0.0],
//! ]).unwrap();
//! let items = vec!["Cola".to_string(), "Lemonade".to_string(), "Water".to_string()];
//!
//! let best = MultiStartOptimizer::new().optimize_matrix(&matrix, &items).unwrap();
//! assert_eq!(best.order, vec!["Lemonade", "Cola", "Water"]);
//! assert_eq!(best.cost, 60.0);
//! ```
//!
//! # References
//!
//! - Held & Karp (1962), "A Dynamic Programming Approach to Sequencing Problems"
//! - Bellman (1962), "Dynamic Programming Treatment of the Travelling Salesman Problem"

mod held_karp;
mod multi_start;
mod subsets;

pub use held_karp::{solve_from_start, solve_indices};
pub use multi_start::{CancellationToken, MultiStartOptimizer};
pub use subsets::{bits, Combinations};

/// Hard ceiling on items for the exact solver.
///
/// The DP table holds `2^(n-1) × (n-1)` cells; at 20 items that is
/// roughly ten million.
pub const MAX_EXACT_ITEMS: usize = 20;
