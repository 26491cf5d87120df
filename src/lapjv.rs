//! Jonker-Volgenant LAP solver.
//!
//! Same contract as [`crate::lap`], different strategy: a greedy
//! column-reduction / reduction-transfer pass seeds the column
//! potentials, two augmenting-row-reduction sweeps assign most rows
//! cheaply, and only the leftover rows pay for a full shortest-path
//! augmentation. On the sparse-zero-heavy cost structures produced by
//! gating this resolves most rows without ever building a path tree.

use nalgebra::{Dim, RawStorage, SquareMatrix};

use crate::assignment::Assignment;
use crate::matrix::{validate, FORBIDDEN};
use crate::Result;

const UNASSIGNED: usize = usize::MAX;

/// Solves the linear assignment problem with the Jonker-Volgenant
/// algorithm.
///
/// Produces the same optimal total cost as [`crate::lap`] for any
/// valid input; among equal-cost optima the chosen assignment may
/// differ. Rows whose optimal pick is a [`FORBIDDEN`] entry come back
/// unassigned, with that entry excluded from the total.
pub fn lapjv<D, S>(costs: &SquareMatrix<f64, D, S>) -> Result<Assignment>
where
    D: Dim,
    S: RawStorage<f64, D, D>,
{
    validate(costs)?;
    let n = costs.nrows();

    let mut row2col = vec![UNASSIGNED; n];
    let mut col2row = vec![UNASSIGNED; n];
    let mut v = vec![0.0_f64; n];

    // Column reduction, scanning columns in reverse so low columns get
    // the final say on contested rows.
    let mut matches = vec![0_usize; n];
    for col in (0..n).rev() {
        let mut min = costs[(0, col)];
        let mut imin = 0;
        for row in 1..n {
            if costs[(row, col)] < min {
                min = costs[(row, col)];
                imin = row;
            }
        }
        v[col] = min;
        matches[imin] += 1;
        if matches[imin] == 1 {
            row2col[imin] = col;
            col2row[col] = imin;
        } else {
            col2row[col] = UNASSIGNED;
        }
    }

    // Reduction transfer: rows assigned exactly once hand slack back to
    // their column potential; unassigned rows queue for augmentation.
    let mut free: Vec<usize> = Vec::with_capacity(n);
    for row in 0..n {
        match matches[row] {
            0 => free.push(row),
            1 => {
                let j1 = row2col[row];
                let mut min = f64::INFINITY;
                for col in 0..n {
                    if col != j1 && costs[(row, col)] - v[col] < min {
                        min = costs[(row, col)] - v[col];
                    }
                }
                v[j1] -= min;
            }
            _ => {}
        }
    }

    // Augmenting row reduction, two sweeps: assign each free row to its
    // best column, displacing the current holder when the second-best
    // alternative leaves slack to absorb.
    for _ in 0..2 {
        let mut current = core::mem::take(&mut free);
        let mut k = 0;
        while k < current.len() {
            let row = current[k];
            k += 1;

            // Cheapest and second-cheapest reduced costs for this row.
            let mut umin = costs[(row, 0)] - v[0];
            let mut j1 = 0;
            let mut usubmin = f64::INFINITY;
            let mut j2 = UNASSIGNED;
            for col in 1..n {
                let h = costs[(row, col)] - v[col];
                if h < usubmin {
                    if h >= umin {
                        usubmin = h;
                        j2 = col;
                    } else {
                        usubmin = umin;
                        j2 = j1;
                        umin = h;
                        j1 = col;
                    }
                }
            }

            let mut displaced = col2row[j1];
            if umin < usubmin {
                v[j1] -= usubmin - umin;
            } else if displaced != UNASSIGNED {
                // No slack: take the runner-up column instead.
                j1 = j2;
                displaced = col2row[j1];
            }

            row2col[row] = j1;
            col2row[j1] = row;

            if displaced != UNASSIGNED {
                row2col[displaced] = UNASSIGNED;
                if umin < usubmin {
                    // Re-examine the displaced row immediately.
                    k -= 1;
                    current[k] = displaced;
                } else {
                    free.push(displaced);
                }
            }
        }
    }

    // Shortest augmenting path for each remaining free row.
    let mut d = vec![0.0_f64; n];
    let mut pred = vec![0_usize; n];
    let mut collist: Vec<usize> = (0..n).collect();
    for &freerow in &free {
        for col in 0..n {
            d[col] = costs[(freerow, col)] - v[col];
            pred[col] = freerow;
        }
        for (idx, slot) in collist.iter_mut().enumerate() {
            *slot = idx;
        }

        // collist is split into [0, low) settled, [low, up) to scan at
        // the current minimum, [up, n) untouched.
        let mut low = 0;
        let mut up = 0;
        let mut last = 0;
        let mut min = 0.0;

        let endofpath = 'aug: loop {
            if up == low {
                last = low;
                min = d[collist[up]];
                up += 1;
                for k in up..n {
                    let col = collist[k];
                    let h = d[col];
                    if h <= min {
                        if h < min {
                            up = low;
                            min = h;
                        }
                        collist[k] = collist[up];
                        collist[up] = col;
                        up += 1;
                    }
                }
                for k in low..up {
                    let col = collist[k];
                    if col2row[col] == UNASSIGNED {
                        break 'aug col;
                    }
                }
            }

            let j1 = collist[low];
            low += 1;
            let row = col2row[j1];
            let h = costs[(row, j1)] - v[j1] - min;
            for k in up..n {
                let col = collist[k];
                let reduced = costs[(row, col)] - v[col] - h;
                if reduced < d[col] {
                    pred[col] = row;
                    if reduced == min {
                        if col2row[col] == UNASSIGNED {
                            break 'aug col;
                        }
                        collist[k] = collist[up];
                        collist[up] = col;
                        up += 1;
                    }
                    d[col] = reduced;
                }
            }
        };

        // Column potentials of settled columns absorb the path length.
        for &col in collist.iter().take(last) {
            v[col] += d[col] - min;
        }

        // Flip the matching along the alternating path.
        let mut col = endofpath;
        loop {
            let row = pred[col];
            col2row[col] = row;
            let next = row2col[row];
            row2col[row] = col;
            if row == freerow {
                break;
            }
            col = next;
        }
    }

    let mut mapping = vec![None; n];
    let mut total = 0.0;
    for (row, &col) in row2col.iter().enumerate() {
        let entry = costs[(row, col)];
        if entry < FORBIDDEN {
            mapping[row] = Some(col);
            total += entry;
        }
    }
    Ok(Assignment::new(mapping, total))
}
