//! Assignment-based hypothesis generation for multi-object tracking.
//!
//! Given a square cost matrix describing the affinity between tracked
//! objects and observations, this crate computes the globally optimal
//! one-to-one assignment (the linear assignment problem) and enumerates
//! the k best distinct assignments in increasing cost order (Murty's
//! method), which tracking filters propagate forward as hypotheses.
//!
//! Two interchangeable LAP solvers are provided: a primal-dual shortest
//! augmenting path method ([`lap`]) and a Jonker-Volgenant variant
//! ([`lapjv`]). Both return the same optimal total cost for the same
//! input and can be selected per call through [`Solver`].
//!
//! ```
//! let costs = nalgebra::Matrix3::from_row_slice(&[
//!     1., 10., 10.,
//!     10., 2., 10.,
//!     10., 10., 3.,
//! ]);
//!
//! let best = hypgen::lap(&costs).unwrap();
//! assert_eq!(best.cost, 6.0);
//!
//! let ranked = hypgen::murty(&costs, 3).unwrap();
//! assert_eq!(ranked[0], best);
//! assert!(ranked[1].cost <= ranked[2].cost);
//! ```
//!
//! Enumerating hypotheses solves many independent constrained
//! sub-problems; those solves can be dispatched across an execution
//! context ([`Executor`]). [`Sequential`] always works; with the
//! `parallel` feature, [`exec::Parallel`] runs them on rayon.

pub mod assignment;
pub mod exec;
pub mod lap;
pub mod lapjv;
pub mod matrix;
pub mod murty;
pub mod solver;

pub use assignment::Assignment;
#[cfg(feature = "parallel")]
pub use exec::Parallel;
pub use exec::{Executor, Sequential};
pub use lap::lap;
pub use lapjv::lapjv;
pub use matrix::{pad_to_square, FORBIDDEN};
pub use murty::{murty, murty_with, MurtyConfig};
pub use solver::{cross_check, solve_batch, Solver};

/// Error type for assignment solving and hypothesis enumeration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HypgenError {
    /// The cost matrix has no entries.
    #[error("cost matrix is empty")]
    EmptyMatrix,
    /// The cost matrix is rectangular; pad it before solving.
    #[error("cost matrix is {rows}x{cols}, expected square")]
    NotSquare { rows: usize, cols: usize },
    /// An entry is negative, NaN or infinite.
    #[error("cost at ({row}, {col}) is {value}: entries must be finite and non-negative")]
    InvalidCost { row: usize, col: usize, value: f64 },
    /// A row has no allowed finite-cost column under the current
    /// constraints. Inside the Murty enumeration this prunes the
    /// offending partition; from the unconstrained root solve it means
    /// the matrix admits no complete assignment.
    #[error("row {row} cannot be assigned under the current constraints")]
    Infeasible { row: usize },
}

pub type Result<T> = core::result::Result<T, HypgenError>;

#[cfg(test)]
pub(crate) mod testutil {
    use nalgebra::DMatrix;

    /// 10x10 cost matrix from the tracking filter's regression data.
    /// Duplicate-heavy (many zeros), which exercises tie-breaking.
    pub fn sample_cost_matrix() -> DMatrix<f64> {
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(10, 10, &[
             7., 51., 52., 87., 38., 60., 74., 66.,  0., 20.,
            50., 12.,  0., 64.,  8., 53.,  0., 46., 76., 42.,
            27., 77.,  0., 18., 22., 48., 44., 13.,  0., 57.,
            62.,  0.,  3.,  8.,  5.,  6., 14.,  0., 26., 39.,
             0., 97.,  0.,  5., 13.,  0., 41., 31., 62., 48.,
            79., 68.,  0.,  0., 15., 12., 17., 47., 35., 43.,
            76., 99., 48., 27., 34.,  0.,  0.,  0., 28.,  0.,
             0., 20.,  9., 27., 46., 15., 84., 19.,  3., 24.,
            56., 10., 45., 39.,  0., 93., 67., 79., 19., 38.,
            27.,  0., 39., 53., 46., 24., 69., 46., 23.,  1.,
        ]);
        costs
    }

    /// Minimum assignment cost over all permutations, by exhaustion.
    /// Only usable for small n.
    pub fn brute_force_min(costs: &DMatrix<f64>) -> f64 {
        fn recurse(costs: &DMatrix<f64>, row: usize, used: &mut [bool], acc: f64, best: &mut f64) {
            if row == costs.nrows() {
                if acc < *best {
                    *best = acc;
                }
                return;
            }
            for col in 0..costs.ncols() {
                if !used[col] {
                    used[col] = true;
                    recurse(costs, row + 1, used, acc + costs[(row, col)], best);
                    used[col] = false;
                }
            }
        }

        let mut best = f64::INFINITY;
        let mut used = vec![false; costs.ncols()];
        recurse(costs, 0, &mut used, 0.0, &mut best);
        best
    }
}
