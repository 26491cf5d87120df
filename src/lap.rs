//! Primal-dual LAP solver (shortest augmenting path).
//!
//! Classical Kuhn-Munkres-family method: row and column dual
//! potentials are maintained so reduced costs stay non-negative, and
//! one minimum-reduced-cost augmenting path is grown per row with a
//! Dijkstra-like relaxation. Exactly n augmentations for an n x n
//! matrix.

use nalgebra::{Dim, RawStorage, SquareMatrix};

use crate::assignment::Assignment;
use crate::matrix::{validate, FORBIDDEN};
use crate::Result;

/// Solves the linear assignment problem, minimizing total cost.
///
/// When several columns offer the same minimum reduced cost the lowest
/// column index wins, so the result is deterministic even on the
/// duplicate-heavy matrices tracking filters produce. Rows whose
/// optimal pick is a [`FORBIDDEN`] entry come back unassigned, with
/// that entry excluded from the total.
pub fn lap<D, S>(costs: &SquareMatrix<f64, D, S>) -> Result<Assignment>
where
    D: Dim,
    S: RawStorage<f64, D, D>,
{
    validate(costs)?;
    let n = costs.nrows();

    // Dual potentials.
    let mut u = vec![0.0_f64; n];
    let mut v = vec![0.0_f64; n];
    // col2row[j]: row currently matched to column j.
    let mut col2row: Vec<Option<usize>> = vec![None; n];

    for start in 0..n {
        // Shortest augmenting path from the unassigned row `start`.
        let mut min_to = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        let mut in_tree = vec![false; n];

        let mut cur_row = start;
        let mut cur_col: Option<usize> = None;

        let last_col = loop {
            let mut delta = f64::INFINITY;
            let mut next_col = 0;

            // Relax all columns outside the alternating tree. Scanning
            // in ascending order with a strict comparison keeps the
            // lowest index on ties.
            for col in 0..n {
                if in_tree[col] {
                    continue;
                }
                let reduced = costs[(cur_row, col)] - u[cur_row] - v[col];
                if reduced < min_to[col] {
                    min_to[col] = reduced;
                    prev[col] = cur_col;
                }
                if min_to[col] < delta {
                    delta = min_to[col];
                    next_col = col;
                }
            }

            // Shift potentials so reduced costs stay non-negative.
            for col in 0..n {
                if in_tree[col] {
                    if let Some(row) = col2row[col] {
                        u[row] += delta;
                    }
                    v[col] -= delta;
                } else {
                    min_to[col] -= delta;
                }
            }
            u[start] += delta;

            in_tree[next_col] = true;
            cur_col = Some(next_col);
            match col2row[next_col] {
                None => break next_col,
                Some(row) => cur_row = row,
            }
        };

        // Flip the matching along the augmenting path.
        let mut col = last_col;
        loop {
            match prev[col] {
                Some(prev_col) => {
                    col2row[col] = col2row[prev_col];
                    col = prev_col;
                }
                None => {
                    col2row[col] = Some(start);
                    break;
                }
            }
        }
    }

    let mut mapping = vec![None; n];
    let mut total = 0.0;
    for (col, assigned) in col2row.iter().enumerate() {
        if let Some(row) = assigned {
            let entry = costs[(*row, col)];
            if entry < FORBIDDEN {
                mapping[*row] = Some(col);
                total += entry;
            }
        }
    }
    Ok(Assignment::new(mapping, total))
}
