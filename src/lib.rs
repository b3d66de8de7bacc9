//! Changeover sequencing for the U-Engine ecosystem.
//!
//! Given products sharing a production line and the cost of switching
//! between each pair (cleaning water, setup time), finds the production
//! order with the lowest total changeover cost. The line does not return
//! to its first product, so the problem is an open-path TSP, solved
//! exactly for small item counts.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `LineId`, `CleaningProcess`,
//!   `TransitionTable`, `CostMatrix`, `OptimizationResult`
//! - **`source`**: Transition workbooks, per-line catalogs, load-once cache
//! - **`builder`**: Cost matrix construction with fallback for data gaps
//! - **`optimizer`**: Held–Karp DP and multi-start search
//! - **`validation`**: Request checks (item bound, unknown/duplicate items)
//! - **`service`**: Caller API: list lines, list items, optimize
//! - **`export`**: CSV rendering of reports
//! - **`config`**: `OptimizerConfig`
//!
//! # References
//!
//! - Held & Karp (1962), "A Dynamic Programming Approach to Sequencing Problems"
//! - Allahverdi et al. (2008), "A survey of scheduling problems with
//!   setup times or costs"

pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod optimizer;
pub mod service;
pub mod source;
pub mod validation;

pub use builder::MatrixBuilder;
pub use config::OptimizerConfig;
pub use error::{ChangeoverError, Result};
pub use optimizer::{CancellationToken, MultiStartOptimizer};
pub use service::{ChangeoverService, OptimizationReport, OptimizationRequest};
