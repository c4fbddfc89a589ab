//! Problem-formulation capability traits.
//!
//! Two roles, two traits:
//!
//! - [`MultiObjectiveProblem`] is what the user implements: dimension
//!   counts, box and constraint bounds, and evaluators for objectives,
//!   constraints, and their derivatives. Derivatives are consumed only by
//!   step providers, never by the front or the orchestration core.
//! - [`Nlp`] is the single-objective scalar view a step provider solves.
//!   The views in [`scalarize`](crate::scalarize) wrap a
//!   `MultiObjectiveProblem` into `Nlp` implementations — selecting one
//!   objective, or combining all of them into a targeted sum.
//!
//! [`CountingProblem`] wraps any problem and counts evaluator calls, for
//! diagnostics like "objective evaluations per solve".

use core::sync::atomic::{AtomicUsize, Ordering};

/// A constrained multi-objective nonlinear program.
///
/// `num_constraints`, the constraint evaluators, and the constraint bounds
/// default to an unconstrained problem, so box-only problems implement six
/// methods (see the crate-level example).
///
/// All slices handed to the evaluators are sized by the corresponding
/// dimension count; implementations may index them freely.
pub trait MultiObjectiveProblem: Send + Sync {
    /// Number of decision variables.
    fn num_variables(&self) -> usize;

    /// Number of objectives.
    fn num_objectives(&self) -> usize;

    /// Number of general (non-box) constraints.
    fn num_constraints(&self) -> usize {
        0
    }

    /// Lower box bounds, one per variable. May contain `-inf`.
    fn x_lower(&self) -> &[f64];

    /// Upper box bounds, one per variable. May contain `+inf`.
    fn x_upper(&self) -> &[f64];

    /// Lower constraint bounds, one per constraint. May contain `-inf`.
    fn g_lower(&self) -> &[f64] {
        &[]
    }

    /// Upper constraint bounds, one per constraint. May contain `+inf`.
    fn g_upper(&self) -> &[f64] {
        &[]
    }

    /// Evaluates one objective at `x`.
    fn objective(&self, x: &[f64], objective: usize) -> f64;

    /// Evaluates all objectives at `x` into `f`.
    fn objectives(&self, x: &[f64], f: &mut [f64]) {
        for (objective, value) in f.iter_mut().enumerate() {
            *value = self.objective(x, objective);
        }
    }

    /// Evaluates all constraints at `x` into `g`.
    fn constraints(&self, x: &[f64], g: &mut [f64]) {
        let _ = x;
        debug_assert!(g.is_empty(), "constrained problems must evaluate constraints");
    }

    /// Evaluates the gradient of one objective at `x` into `df`
    /// (one entry per variable).
    fn objective_gradient(&self, x: &[f64], objective: usize, df: &mut [f64]);

    /// Evaluates the dense constraint Jacobian at `x` into `dg`, row-major
    /// with one row of `num_variables` entries per constraint.
    fn constraint_jacobian(&self, x: &[f64], dg: &mut [f64]) {
        let _ = x;
        debug_assert!(dg.is_empty(), "constrained problems must provide a Jacobian");
    }
}

/// The single-objective constrained NLP view consumed by a step provider.
///
/// Implemented by the wrapping views in [`scalarize`](crate::scalarize);
/// step providers should depend on this trait only, never on the
/// multi-objective formulation behind it.
pub trait Nlp: Send + Sync {
    /// Number of decision variables.
    fn num_variables(&self) -> usize;

    /// Number of general constraints in this view (may exceed the wrapped
    /// problem's count, e.g. for targeted scalarizations).
    fn num_constraints(&self) -> usize;

    /// Lower box bounds.
    fn x_lower(&self) -> &[f64];

    /// Upper box bounds.
    fn x_upper(&self) -> &[f64];

    /// Lower constraint bounds.
    fn g_lower(&self) -> &[f64];

    /// Upper constraint bounds.
    fn g_upper(&self) -> &[f64];

    /// Evaluates the scalar objective at `x`.
    fn objective(&self, x: &[f64]) -> f64;

    /// Evaluates the objective gradient at `x` into `df`.
    fn gradient(&self, x: &[f64], df: &mut [f64]);

    /// Evaluates all constraints at `x` into `g`.
    fn constraints(&self, x: &[f64], g: &mut [f64]);

    /// Evaluates the dense constraint Jacobian at `x` into `dg`, row-major.
    fn constraint_jacobian(&self, x: &[f64], dg: &mut [f64]);
}

// ---------------------------------------------------------------------------
// Evaluation bookkeeping
// ---------------------------------------------------------------------------

/// Evaluator call counters, updated by [`CountingProblem`].
#[derive(Debug, Default)]
pub struct EvalCounts {
    objectives: AtomicUsize,
    objective_gradients: AtomicUsize,
    constraints: AtomicUsize,
    constraint_jacobians: AtomicUsize,
}

impl EvalCounts {
    /// Number of single-objective evaluations.
    #[must_use]
    pub fn objectives(&self) -> usize {
        self.objectives.load(Ordering::Relaxed)
    }

    /// Number of objective-gradient evaluations.
    #[must_use]
    pub fn objective_gradients(&self) -> usize {
        self.objective_gradients.load(Ordering::Relaxed)
    }

    /// Number of constraint evaluations.
    #[must_use]
    pub fn constraints(&self) -> usize {
        self.constraints.load(Ordering::Relaxed)
    }

    /// Number of constraint-Jacobian evaluations.
    #[must_use]
    pub fn constraint_jacobians(&self) -> usize {
        self.constraint_jacobians.load(Ordering::Relaxed)
    }

    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Wraps a [`MultiObjectiveProblem`] and counts evaluator calls.
///
/// Diagnostic only — the orchestration never inspects the counters.
///
/// ```
/// # use mosqp::problem::{CountingProblem, MultiObjectiveProblem};
/// # struct P;
/// # impl MultiObjectiveProblem for P {
/// #     fn num_variables(&self) -> usize { 1 }
/// #     fn num_objectives(&self) -> usize { 1 }
/// #     fn x_lower(&self) -> &[f64] { &[0.0] }
/// #     fn x_upper(&self) -> &[f64] { &[1.0] }
/// #     fn objective(&self, x: &[f64], _objective: usize) -> f64 { x[0] }
/// #     fn objective_gradient(&self, _x: &[f64], _objective: usize, df: &mut [f64]) { df[0] = 1.0; }
/// # }
/// let problem = CountingProblem::new(P);
/// let _ = problem.objective(&[0.5], 0);
/// assert_eq!(problem.counts().objectives(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CountingProblem<P> {
    inner: P,
    counts: EvalCounts,
}

impl<P> CountingProblem<P> {
    /// Wraps `inner` with fresh counters.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            counts: EvalCounts::default(),
        }
    }

    /// The accumulated counters.
    #[must_use]
    pub fn counts(&self) -> &EvalCounts {
        &self.counts
    }

    /// Unwraps the inner problem, discarding the counters.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: MultiObjectiveProblem> MultiObjectiveProblem for CountingProblem<P> {
    fn num_variables(&self) -> usize {
        self.inner.num_variables()
    }

    fn num_objectives(&self) -> usize {
        self.inner.num_objectives()
    }

    fn num_constraints(&self) -> usize {
        self.inner.num_constraints()
    }

    fn x_lower(&self) -> &[f64] {
        self.inner.x_lower()
    }

    fn x_upper(&self) -> &[f64] {
        self.inner.x_upper()
    }

    fn g_lower(&self) -> &[f64] {
        self.inner.g_lower()
    }

    fn g_upper(&self) -> &[f64] {
        self.inner.g_upper()
    }

    fn objective(&self, x: &[f64], objective: usize) -> f64 {
        EvalCounts::bump(&self.counts.objectives);
        self.inner.objective(x, objective)
    }

    fn constraints(&self, x: &[f64], g: &mut [f64]) {
        EvalCounts::bump(&self.counts.constraints);
        self.inner.constraints(x, g);
    }

    fn objective_gradient(&self, x: &[f64], objective: usize, df: &mut [f64]) {
        EvalCounts::bump(&self.counts.objective_gradients);
        self.inner.objective_gradient(x, objective, df);
    }

    fn constraint_jacobian(&self, x: &[f64], dg: &mut [f64]) {
        EvalCounts::bump(&self.counts.constraint_jacobians);
        self.inner.constraint_jacobian(x, dg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line;

    impl MultiObjectiveProblem for Line {
        fn num_variables(&self) -> usize {
            1
        }

        fn num_objectives(&self) -> usize {
            2
        }

        fn x_lower(&self) -> &[f64] {
            &[-1.0]
        }

        fn x_upper(&self) -> &[f64] {
            &[1.0]
        }

        fn objective(&self, x: &[f64], objective: usize) -> f64 {
            if objective == 0 { x[0] } else { -x[0] }
        }

        fn objective_gradient(&self, _x: &[f64], objective: usize, df: &mut [f64]) {
            df[0] = if objective == 0 { 1.0 } else { -1.0 };
        }
    }

    #[test]
    fn objectives_default_delegates_per_index() {
        let mut f = [0.0; 2];
        Line.objectives(&[0.25], &mut f);
        assert_eq!(f, [0.25, -0.25]);
    }

    #[test]
    fn counting_problem_tracks_calls() {
        let problem = CountingProblem::new(Line);
        let mut f = [0.0; 2];
        problem.objectives(&[0.5], &mut f);
        let mut df = [0.0; 1];
        problem.objective_gradient(&[0.5], 1, &mut df);

        // The vector evaluation goes through the per-index evaluator twice.
        assert_eq!(problem.counts().objectives(), 2);
        assert_eq!(problem.counts().objective_gradients(), 1);
        assert_eq!(problem.counts().constraints(), 0);
    }
}
