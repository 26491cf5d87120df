//! Solver selection and cross-validation.
//!
//! Both LAP solvers share one contract, so callers (including the
//! Murty enumerator) pick a strategy through [`Solver`] instead of
//! naming a function. Jonker-Volgenant is the default; the primal-dual
//! method doubles as a cross-check.

use std::sync::Mutex;

use nalgebra::{Dim, RawStorage, SquareMatrix};

use crate::assignment::Assignment;
use crate::exec::Executor;
use crate::lap::lap;
use crate::lapjv::lapjv;
use crate::{HypgenError, Result};

/// LAP solving strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Solver {
    /// Jonker-Volgenant, typically faster on gated cost structures.
    #[default]
    JonkerVolgenant,
    /// Primal-dual shortest augmenting path with lowest-index
    /// tie-breaking.
    PrimalDual,
}

impl Solver {
    /// Solves the assignment problem with the selected strategy.
    pub fn solve<D, S>(self, costs: &SquareMatrix<f64, D, S>) -> Result<Assignment>
    where
        D: Dim,
        S: RawStorage<f64, D, D>,
    {
        match self {
            Solver::JonkerVolgenant => lapjv(costs),
            Solver::PrimalDual => lap(costs),
        }
    }

    /// Like [`Solver::solve`], but demands a complete assignment:
    /// a row left unassigned (every allowed column forbidden) is an
    /// [`HypgenError::Infeasible`] error instead of a partial result.
    pub(crate) fn solve_complete<D, S>(self, costs: &SquareMatrix<f64, D, S>) -> Result<Assignment>
    where
        D: Dim,
        S: RawStorage<f64, D, D>,
    {
        let assignment = self.solve(costs)?;
        match assignment.mapping.iter().position(|col| col.is_none()) {
            Some(row) => Err(HypgenError::Infeasible { row }),
            None => Ok(assignment),
        }
    }
}

/// Solves the same problem with both strategies as independent
/// parallel sections and returns `(jonker_volgenant, primal_dual)`.
///
/// The two assignments are guaranteed to have equal total cost; the
/// mappings may differ among equal-cost optima. Useful as an online
/// sanity check when validating a new cost model.
pub fn cross_check<D, S, E>(
    costs: &SquareMatrix<f64, D, S>,
    executor: &E,
) -> Result<(Assignment, Assignment)>
where
    D: Dim,
    S: RawStorage<f64, D, D> + Sync,
    E: Executor,
{
    let mut jv: Option<Result<Assignment>> = None;
    let mut pd: Option<Result<Assignment>> = None;
    executor.sections(vec![
        Box::new(|| jv = Some(lapjv(costs))),
        Box::new(|| pd = Some(lap(costs))),
    ]);
    Ok((jv.expect("section ran")?, pd.expect("section ran")?))
}

/// Solves a batch of independent assignment problems, dispatching the
/// solves across the execution context's parallel-for.
///
/// Results come back in input order regardless of completion order.
pub fn solve_batch<D, S, E>(
    problems: &[SquareMatrix<f64, D, S>],
    solver: Solver,
    executor: &E,
) -> Vec<Result<Assignment>>
where
    D: Dim,
    S: RawStorage<f64, D, D> + Sync,
    E: Executor,
{
    let results = Mutex::new(vec![None; problems.len()]);
    executor.for_each(problems.len(), &|idx| {
        let result = solver.solve(&problems[idx]);
        results.lock().expect("results lock poisoned")[idx] = Some(result);
    });
    results
        .into_inner()
        .expect("results lock poisoned")
        .into_iter()
        .map(|slot| slot.expect("every index visited"))
        .collect()
}
