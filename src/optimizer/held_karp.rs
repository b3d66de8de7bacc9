//! Held–Karp dynamic programming for the open-path variant, fixed start.
//!
//! # Algorithm
//! Node 0 is the fixed start. The remaining `m = n - 1` nodes are mapped to
//! bits `0..m`. `C[S][k]` is the cheapest cost of leaving node 0, visiting
//! exactly the nodes in `S`, and ending at `k ∈ S`:
//!
//! - `C[{k}][k] = d(0, k)`
//! - `C[S][k] = min_{j ∈ S \ {k}} C[S \ {k}][j] + d(j, k)`
//!
//! The optimum is `min_k C[full][k]`: no edge back to the start, because a
//! production line does not return to its first product.
//!
//! The table is dense (`2^m × m`), indexed by bitmask and node. Subsets are
//! processed by increasing size so every `C[S \ {k}]` is final before use.
//!
//! # Complexity
//! O(n² · 2ⁿ) time, O(n · 2ⁿ) space.
//!
//! # Reference
//! Held & Karp (1962), "A Dynamic Programming Approach to Sequencing Problems"

use tracing::debug;

use super::subsets::{bits, Combinations};
use super::MAX_EXACT_ITEMS;
use crate::error::{ChangeoverError, Result};
use crate::models::{CostMatrix, OptimizationResult};

/// Predecessor marker for the fixed start node.
const FROM_START: u8 = u8::MAX;

/// Minimum-cost open path starting at index 0, as matrix indices.
///
/// Ties resolve to the lowest predecessor index and the lowest end node.
pub fn solve_indices(matrix: &CostMatrix) -> Result<Vec<usize>> {
    let n = matrix.size();
    if n == 0 || n > MAX_EXACT_ITEMS {
        return Err(ChangeoverError::InvalidItemCount {
            count: n,
            min: 1,
            max: MAX_EXACT_ITEMS,
        });
    }
    if n == 1 {
        return Ok(vec![0]);
    }

    let m = n - 1;
    let subsets = 1usize << m;
    let mut cost = vec![f64::INFINITY; subsets * m];
    let mut parent = vec![FROM_START; subsets * m];
    let cell = |mask: u32, node: usize| mask as usize * m + node;

    // Node k of the table is matrix index k + 1.
    for k in 0..m {
        cost[cell(1 << k, k)] = matrix.get(0, k + 1);
    }

    for size in 2..=m {
        for subset in Combinations::new(m, size) {
            for k in bits(subset) {
                let prev = subset & !(1 << k);
                // `prev` is never empty here; the first predecessor is always
                // recorded, even when every candidate sum is infinite.
                let mut best: Option<(f64, u8)> = None;
                for j in bits(prev) {
                    let candidate = cost[cell(prev, j)] + matrix.get(j + 1, k + 1);
                    match best {
                        Some((current, _)) if candidate >= current => {}
                        _ => best = Some((candidate, j as u8)),
                    }
                }
                if let Some((value, from)) = best {
                    cost[cell(subset, k)] = value;
                    parent[cell(subset, k)] = from;
                }
            }
        }
    }

    let full = (subsets - 1) as u32;
    let mut end = 0;
    for k in 1..m {
        if cost[cell(full, k)] < cost[cell(full, end)] {
            end = k;
        }
    }
    debug!(items = n, states = subsets * m, best = cost[cell(full, end)], "held-karp solved");

    let mut reversed = Vec::with_capacity(n);
    let mut mask = full;
    let mut node = end;
    loop {
        reversed.push(node + 1);
        let from = parent[cell(mask, node)];
        mask &= !(1 << node);
        if from == FROM_START {
            break;
        }
        node = from as usize;
    }
    reversed.push(0);
    reversed.reverse();
    debug_assert_eq!(reversed.len(), n);
    Ok(reversed)
}

/// Solves the fixed-start problem and labels the path with `names`.
///
/// `names[i]` names row/column `i` of `matrix`. The returned cost is the
/// left-to-right sum of the matrix along the returned order.
pub fn solve_from_start(matrix: &CostMatrix, names: &[String]) -> Result<OptimizationResult> {
    if names.len() != matrix.size() {
        return Err(ChangeoverError::InvalidMatrix {
            reason: format!(
                "{} names for a {}x{} matrix",
                names.len(),
                matrix.size(),
                matrix.size()
            ),
        });
    }
    let indices = solve_indices(matrix)?;
    let cost = matrix.path_cost(&indices);
    let order = indices.iter().map(|&i| names[i].clone()).collect();
    Ok(OptimizationResult::new(order, cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{i}")).collect()
    }

    /// Exhaustive search over permutations with index 0 fixed first.
    fn brute_force_from_start(matrix: &CostMatrix) -> f64 {
        fn permute(rest: &mut Vec<usize>, k: usize, prefix: &mut Vec<usize>, m: &CostMatrix, best: &mut f64) {
            if k == rest.len() {
                *best = best.min(m.path_cost(prefix));
                return;
            }
            for i in k..rest.len() {
                rest.swap(k, i);
                prefix.push(rest[k]);
                permute(rest, k + 1, prefix, m, best);
                prefix.pop();
                rest.swap(k, i);
            }
        }
        let mut rest: Vec<usize> = (1..matrix.size()).collect();
        let mut prefix = vec![0];
        let mut best = f64::INFINITY;
        permute(&mut rest, 0, &mut prefix, matrix, &mut best);
        best
    }

    #[test]
    fn test_three_items_fixed_start() {
        // Cola, Lemonade, Water
        let m = CostMatrix::from_rows(vec![
            vec![0.0, 50.0, 10.0],
            vec![50.0, 0.0, 200.0],
            vec![10.0, 200.0, 0.0],
        ])
        .unwrap();
        let result = solve_from_start(&m, &["Cola".to_string(), "Lemonade".to_string(), "Water".to_string()])
            .unwrap();
        assert_eq!(result.order, vec!["Cola", "Water", "Lemonade"]);
        assert_eq!(result.cost, 210.0);
    }

    #[test]
    fn test_two_items() {
        let m = CostMatrix::from_rows(vec![vec![0.0, 7.0], vec![3.0, 0.0]]).unwrap();
        let result = solve_from_start(&m, &names(2)).unwrap();
        assert_eq!(result.order, vec!["P0", "P1"]);
        assert_eq!(result.cost, 7.0);
    }

    #[test]
    fn test_single_item() {
        let result = solve_from_start(&CostMatrix::zeros(1), &names(1)).unwrap();
        assert_eq!(result.order, vec!["P0"]);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_empty_and_oversized_rejected() {
        assert!(matches!(
            solve_indices(&CostMatrix::zeros(0)),
            Err(ChangeoverError::InvalidItemCount { count: 0, .. })
        ));
        assert!(matches!(
            solve_indices(&CostMatrix::zeros(MAX_EXACT_ITEMS + 1)),
            Err(ChangeoverError::InvalidItemCount { .. })
        ));
    }

    #[test]
    fn test_name_count_mismatch() {
        let err = solve_from_start(&CostMatrix::zeros(3), &names(2)).unwrap_err();
        assert!(matches!(err, ChangeoverError::InvalidMatrix { .. }));
    }

    #[test]
    fn test_uniform_ties_are_deterministic() {
        // Lowest end node wins, each step back takes the lowest predecessor.
        let m = CostMatrix::uniform(5, 100.0);
        assert_eq!(solve_indices(&m).unwrap(), vec![0, 4, 3, 2, 1]);
        assert_eq!(solve_indices(&m).unwrap(), solve_indices(&m).unwrap());
    }

    #[test]
    fn test_open_path_ignores_return_edge() {
        // As a closed tour 0→2→1→0 (cost 4) beats 0→1→2→0 (cost 102).
        let m = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![0.0, 0.0, 1.0],
            vec![100.0, 2.0, 0.0],
        ])
        .unwrap();
        assert_eq!(solve_indices(&m).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_matches_brute_force() {
        // Deterministic pseudo-random asymmetric costs.
        let mut seed = 0x2545_f491_u64;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % 997) as f64
        };
        for n in 2..=7 {
            let rows: Vec<Vec<f64>> = (0..n)
                .map(|i| (0..n).map(|j| if i == j { 0.0 } else { next() }).collect())
                .collect();
            let m = CostMatrix::from_rows(rows).unwrap();
            let path = solve_indices(&m).unwrap();
            assert_eq!(path[0], 0);
            assert_eq!(m.path_cost(&path), brute_force_from_start(&m), "n = {n}");
        }
    }

    #[test]
    fn test_overflowing_costs_still_visit_every_item() {
        let mut m = CostMatrix::zeros(4);
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    m.set(i, j, f64::MAX);
                }
            }
        }
        let mut path = solve_indices(&m).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], 0);
        path.sort();
        assert_eq!(path, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_largest_costs_stay_finite() {
        let m = CostMatrix::uniform(6, crate::models::MAX_COST);
        let result = solve_from_start(&m, &names(6)).unwrap();
        assert_eq!(result.len(), 6);
        assert!(result.cost.is_finite());
    }

    #[test]
    fn test_path_is_permutation() {
        let n = 9;
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 0.0 } else { ((i * 7 + j * 13) % 23) as f64 })
                    .collect()
            })
            .collect();
        let m = CostMatrix::from_rows(rows).unwrap();
        let mut path = solve_indices(&m).unwrap();
        path.sort();
        assert_eq!(path, (0..n).collect::<Vec<_>>());
    }
}
