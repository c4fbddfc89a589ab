//! Single-objective views over a multi-objective problem.
//!
//! Step providers solve one scalar NLP at a time. The two views here turn a
//! [`MultiObjectiveProblem`] into [`Nlp`] implementations without any
//! subclassing:
//!
//! - [`SingleObjective`] selects one objective and forwards everything
//!   else. The spread and extreme-points stages solve one of these per
//!   objective.
//! - [`CombinedObjective`] minimizes the sum of all objectives, each
//!   divided by its scaling factor, and extends the constraint vector by
//!   one `f_i(x) - target_i <= 0` row per objective. The refine stage
//!   re-anchors the targets to each point's own objective values before
//!   stepping from it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::problem::{MultiObjectiveProblem, Nlp};

/// A view selecting one objective of a multi-objective problem.
pub struct SingleObjective<P> {
    problem: Arc<P>,
    objective: usize,
}

impl<P: MultiObjectiveProblem> SingleObjective<P> {
    /// Creates the view for the given objective index.
    #[must_use]
    pub fn new(problem: Arc<P>, objective: usize) -> Self {
        debug_assert!(objective < problem.num_objectives());
        Self { problem, objective }
    }
}

impl<P: MultiObjectiveProblem> Nlp for SingleObjective<P> {
    fn num_variables(&self) -> usize {
        self.problem.num_variables()
    }

    fn num_constraints(&self) -> usize {
        self.problem.num_constraints()
    }

    fn x_lower(&self) -> &[f64] {
        self.problem.x_lower()
    }

    fn x_upper(&self) -> &[f64] {
        self.problem.x_upper()
    }

    fn g_lower(&self) -> &[f64] {
        self.problem.g_lower()
    }

    fn g_upper(&self) -> &[f64] {
        self.problem.g_upper()
    }

    fn objective(&self, x: &[f64]) -> f64 {
        self.problem.objective(x, self.objective)
    }

    fn gradient(&self, x: &[f64], df: &mut [f64]) {
        self.problem.objective_gradient(x, self.objective, df);
    }

    fn constraints(&self, x: &[f64], g: &mut [f64]) {
        self.problem.constraints(x, g);
    }

    fn constraint_jacobian(&self, x: &[f64], dg: &mut [f64]) {
        self.problem.constraint_jacobian(x, dg);
    }
}

/// A targeted scalarization of all objectives.
///
/// The objective is `sum_i f_i(x) / scaling_i`; the constraint vector is
/// the wrapped problem's constraints followed by one
/// `f_i(x) - target_i <= 0` row per objective (lower bound `-inf`, upper
/// bound `0`). Targets are shared state behind the `Arc`: the orchestrator
/// re-anchors them per point via [`set_targets`](Self::set_targets) while
/// the step provider holds the same view.
pub struct CombinedObjective<P> {
    problem: Arc<P>,
    scalings: Vec<f64>,
    g_lower: Vec<f64>,
    g_upper: Vec<f64>,
    targets: RwLock<Vec<f64>>,
}

impl<P: MultiObjectiveProblem> CombinedObjective<P> {
    /// Creates the combined view with one scaling factor per objective.
    #[must_use]
    pub fn new(problem: Arc<P>, scalings: Vec<f64>) -> Self {
        debug_assert_eq!(scalings.len(), problem.num_objectives());

        let num_objectives = problem.num_objectives();
        let mut g_lower = problem.g_lower().to_vec();
        let mut g_upper = problem.g_upper().to_vec();
        g_lower.extend(core::iter::repeat_n(f64::NEG_INFINITY, num_objectives));
        g_upper.extend(core::iter::repeat_n(0.0, num_objectives));

        Self {
            problem,
            scalings,
            g_lower,
            g_upper,
            targets: RwLock::new(vec![0.0; num_objectives]),
        }
    }

    /// Re-anchors the per-objective targets.
    pub fn set_targets(&self, targets: &[f64]) {
        let mut guard = self.targets.write();
        debug_assert_eq!(guard.len(), targets.len());
        guard.copy_from_slice(targets);
    }
}

impl<P: MultiObjectiveProblem> Nlp for CombinedObjective<P> {
    fn num_variables(&self) -> usize {
        self.problem.num_variables()
    }

    fn num_constraints(&self) -> usize {
        self.problem.num_constraints() + self.problem.num_objectives()
    }

    fn x_lower(&self) -> &[f64] {
        self.problem.x_lower()
    }

    fn x_upper(&self) -> &[f64] {
        self.problem.x_upper()
    }

    fn g_lower(&self) -> &[f64] {
        &self.g_lower
    }

    fn g_upper(&self) -> &[f64] {
        &self.g_upper
    }

    fn objective(&self, x: &[f64]) -> f64 {
        self.scalings
            .iter()
            .enumerate()
            .map(|(objective, scaling)| self.problem.objective(x, objective) / scaling)
            .sum()
    }

    fn gradient(&self, x: &[f64], df: &mut [f64]) {
        df.fill(0.0);
        let mut buffer = vec![0.0; self.problem.num_variables()];
        for (objective, scaling) in self.scalings.iter().enumerate() {
            self.problem.objective_gradient(x, objective, &mut buffer);
            for (total, partial) in df.iter_mut().zip(&buffer) {
                *total += partial / scaling;
            }
        }
    }

    fn constraints(&self, x: &[f64], g: &mut [f64]) {
        let num_constraints = self.problem.num_constraints();
        self.problem.constraints(x, &mut g[..num_constraints]);

        let targets = self.targets.read();
        for (objective, target) in targets.iter().enumerate() {
            g[num_constraints + objective] = self.problem.objective(x, objective) - target;
        }
    }

    fn constraint_jacobian(&self, x: &[f64], dg: &mut [f64]) {
        let num_variables = self.problem.num_variables();
        let split = self.problem.num_constraints() * num_variables;
        self.problem.constraint_jacobian(x, &mut dg[..split]);

        // One gradient row per objective target constraint.
        for objective in 0..self.problem.num_objectives() {
            let row = &mut dg[split + objective * num_variables..][..num_variables];
            self.problem.objective_gradient(x, objective, row);
        }
    }
}
