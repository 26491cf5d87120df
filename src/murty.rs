//! Murty k-best assignment enumeration.
//!
//! Murty's method keeps a frontier of search-space partitions, each a
//! constrained assignment problem: a set of forced (row, col) pairs, a
//! set of excluded pairs, and a free sub-block of the cost matrix.
//! The frontier is ordered by each partition's optimal constrained
//! cost; popping the minimum emits the next hypothesis and splits that
//! partition into disjoint children, one per assigned position. Every
//! feasible assignment lives in exactly one live partition, so each of
//! the k best is emitted exactly once and in non-decreasing cost
//! order.
//!
//! The child solves of one expansion are independent and are
//! dispatched through the [`Executor`]'s parallel-for; the frontier is
//! the only shared mutable state and sits behind a single mutex.
//! Emission order is decided purely by frontier pops, never by solve
//! completion order, so sequential and parallel runs produce identical
//! output.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Mutex;

use nalgebra::{DMatrix, Dim, RawStorage, SquareMatrix};
use tracing::{debug, trace};

use crate::assignment::Assignment;
use crate::exec::{Executor, Sequential};
use crate::matrix::{validate, FORBIDDEN};
use crate::solver::Solver;
use crate::Result;

/// Configuration for the Murty enumeration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MurtyConfig {
    /// LAP strategy used for the root and every partition solve.
    pub solver: Solver,
    /// Cap on the number of partitions expanded, as a termination
    /// guard besides natural exhaustion. `None` means unbounded.
    pub max_expansions: Option<usize>,
}

/// One live partition of the remaining search space.
struct Node {
    /// Optimal assignment within this partition, over full-matrix
    /// indices.
    solution: Assignment,
    /// Pairs forced into every assignment of this partition.
    fixed: Vec<(usize, usize)>,
    /// Pairs forbidden in this partition.
    excluded: Vec<(usize, usize)>,
    /// Row index at which further partitioning resumes. Rows before it
    /// are already pinned down by `fixed` and the sibling structure.
    partition_from: usize,
    /// Creation order, the deterministic tie-break among equal costs.
    seq: u64,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverted so the max-heap pops lowest cost, then lowest seq.
        other
            .solution
            .cost
            .total_cmp(&self.solution.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Constraint set of a child partition, solved after creation.
struct ChildSpec {
    fixed: Vec<(usize, usize)>,
    excluded: Vec<(usize, usize)>,
    partition_from: usize,
    seq: u64,
}

/// Enumerates the k best assignments of `costs` in non-decreasing cost
/// order, single-threaded with the default solver.
pub fn murty<D, S>(costs: &SquareMatrix<f64, D, S>, k: usize) -> Result<Vec<Assignment>>
where
    D: Dim,
    S: RawStorage<f64, D, D>,
{
    murty_with(costs, k, &MurtyConfig::default(), &Sequential)
}

/// Enumerates the k best assignments with explicit configuration and
/// execution context.
///
/// Returns fewer than `k` hypotheses when the feasible space is
/// smaller or the expansion cap is reached; that is a normal return,
/// not an error. An infeasible root problem (no complete finite-cost
/// assignment at all) is [`HypgenError::Infeasible`].
pub fn murty_with<D, S, E>(
    costs: &SquareMatrix<f64, D, S>,
    k: usize,
    config: &MurtyConfig,
    executor: &E,
) -> Result<Vec<Assignment>>
where
    D: Dim,
    S: RawStorage<f64, D, D>,
    E: Executor,
{
    validate(costs)?;
    if k == 0 {
        return Ok(Vec::new());
    }

    let n = costs.nrows();
    // Owned working copy; the caller's matrix is only read.
    let costs = DMatrix::from_fn(n, n, |row, col| costs[(row, col)]);

    let root = config.solver.solve_complete(&costs)?;
    let mut seq: u64 = 0;
    let frontier = Mutex::new(BinaryHeap::new());
    frontier.lock().expect("frontier lock poisoned").push(Node {
        solution: root,
        fixed: Vec::new(),
        excluded: Vec::new(),
        partition_from: 0,
        seq,
    });

    let mut hypotheses = Vec::with_capacity(k);
    let mut expansions = 0_usize;

    loop {
        let node = match frontier.lock().expect("frontier lock poisoned").pop() {
            Some(node) => node,
            None => break,
        };

        trace!(
            cost = node.solution.cost,
            seq = node.seq,
            "emitting hypothesis"
        );
        hypotheses.push(node.solution.clone());
        if hypotheses.len() == k {
            break;
        }
        if let Some(cap) = config.max_expansions {
            if expansions >= cap {
                debug!(cap, "expansion cap reached, stopping enumeration");
                break;
            }
        }
        expansions += 1;

        // Children partition this node's remaining space: child r keeps
        // rows [partition_from, r) exactly as the node's solution,
        // forbids the pair the solution used at row r and leaves the
        // rest free. Disjoint by construction, and together they cover
        // everything in the node except the solution just emitted.
        let mut children = Vec::with_capacity(n - node.partition_from);
        for row in node.partition_from..n {
            if let Some(col) = node.solution.mapping[row] {
                let mut fixed = node.fixed.clone();
                for prev in node.partition_from..row {
                    if let Some(prev_col) = node.solution.mapping[prev] {
                        fixed.push((prev, prev_col));
                    }
                }
                let mut excluded = node.excluded.clone();
                excluded.push((row, col));
                seq += 1;
                children.push(ChildSpec {
                    fixed,
                    excluded,
                    partition_from: row,
                    seq,
                });
            }
        }

        // Independent constrained solves; only the frontier push is a
        // critical section.
        executor.for_each(children.len(), &|idx| {
            let spec = &children[idx];
            match solve_partition(&costs, &spec.fixed, &spec.excluded, config.solver) {
                Some(solution) => {
                    frontier.lock().expect("frontier lock poisoned").push(Node {
                        solution,
                        fixed: spec.fixed.clone(),
                        excluded: spec.excluded.clone(),
                        partition_from: spec.partition_from,
                        seq: spec.seq,
                    });
                }
                None => {
                    trace!(seq = spec.seq, "pruned infeasible partition");
                }
            }
        });
    }

    Ok(hypotheses)
}

/// Solves one partition's constrained problem: forced pairs leave the
/// free sub-block and contribute a fixed cost offset, excluded pairs
/// become forbidden in the sub-block. `None` means the partition holds
/// no complete finite-cost assignment and is pruned.
fn solve_partition(
    costs: &DMatrix<f64>,
    fixed: &[(usize, usize)],
    excluded: &[(usize, usize)],
    solver: Solver,
) -> Option<Assignment> {
    let n = costs.nrows();

    let mut row_fixed = vec![false; n];
    let mut col_fixed = vec![false; n];
    let mut offset = 0.0;
    for &(row, col) in fixed {
        if row_fixed[row] || col_fixed[col] || costs[(row, col)] >= FORBIDDEN {
            return None;
        }
        row_fixed[row] = true;
        col_fixed[col] = true;
        offset += costs[(row, col)];
    }

    let free_rows: Vec<usize> = (0..n).filter(|&row| !row_fixed[row]).collect();
    let free_cols: Vec<usize> = (0..n).filter(|&col| !col_fixed[col]).collect();
    debug_assert_eq!(free_rows.len(), free_cols.len());

    let mut mapping = vec![None; n];
    for &(row, col) in fixed {
        mapping[row] = Some(col);
    }
    if free_rows.is_empty() {
        return Some(Assignment::new(mapping, offset));
    }

    let sub = DMatrix::from_fn(free_rows.len(), free_cols.len(), |a, b| {
        let pair = (free_rows[a], free_cols[b]);
        if excluded.contains(&pair) {
            FORBIDDEN
        } else {
            costs[pair]
        }
    });

    // The sub-matrix is valid by construction, so the only possible
    // failure is infeasibility.
    let solution = solver.solve_complete(&sub).ok()?;
    for (a, col) in solution.mapping.iter().enumerate() {
        if let Some(b) = col {
            mapping[free_rows[a]] = Some(free_cols[*b]);
        }
    }
    Some(Assignment::new(mapping, offset + solution.cost))
}
