//! Execution contexts for independent units of work.
//!
//! The enumerator only needs two primitives: a parallel-for over an
//! index range and a set of independent sections. Each unit runs to
//! completion without yielding, so the whole interface is fork-join.
//! [`Sequential`] satisfies it with plain loops, keeping the crate
//! usable without any parallel runtime; [`Parallel`] (behind the
//! `parallel` feature) dispatches on rayon.

/// Fork-join execution of independent work items.
pub trait Executor {
    /// Runs `body(i)` for every `i` in `0..len`. Invocations are
    /// independent and may run concurrently; all have completed when
    /// this returns.
    fn for_each(&self, len: usize, body: &(dyn Fn(usize) + Sync));

    /// Runs each body once. Bodies are independent and may run
    /// concurrently; all have completed when this returns.
    fn sections<'a>(&self, bodies: Vec<Box<dyn FnOnce() + Send + 'a>>);
}

/// Single-threaded execution context; runs everything in order on the
/// calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Executor for Sequential {
    fn for_each(&self, len: usize, body: &(dyn Fn(usize) + Sync)) {
        for i in 0..len {
            body(i);
        }
    }

    fn sections<'a>(&self, bodies: Vec<Box<dyn FnOnce() + Send + 'a>>) {
        for body in bodies {
            body();
        }
    }
}

/// Rayon-backed execution context.
#[cfg(feature = "parallel")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

#[cfg(feature = "parallel")]
impl Executor for Parallel {
    fn for_each(&self, len: usize, body: &(dyn Fn(usize) + Sync)) {
        use rayon::prelude::*;
        (0..len).into_par_iter().for_each(|i| body(i));
    }

    fn sections<'a>(&self, bodies: Vec<Box<dyn FnOnce() + Send + 'a>>) {
        rayon::scope(|scope| {
            for body in bodies {
                scope.spawn(move |_| body());
            }
        });
    }
}
