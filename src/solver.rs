//! The injected step-wise NLP solver interface.
//!
//! The crate never solves a nonlinear program itself. It drives an external
//! iterative solver — anything that can take a warm-started guess for an
//! [`Nlp`](crate::problem::Nlp) and perform one major iteration at a time,
//! reporting whether it converged, made progress, or failed.
//!
//! The orchestrator asks a [`SolverFactory`] for one [`StepSolver`] per
//! formulation: one per objective in the spread and extreme-points stages,
//! and one over the combined scalarization in the refine stage.

use std::sync::Arc;

use crate::error::Result;
use crate::point::WarmStart;
use crate::problem::Nlp;
use crate::types::StepStatus;

/// Line-search floor forwarded to step providers.
///
/// Solvers with an Armijo-style backtracking line search should stop
/// shrinking the step once the factor drops below `min_alpha`, shrinking by
/// `beta` each trial.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchParams {
    /// Smallest admissible line-search factor.
    pub min_alpha: f64,
    /// Backtracking shrink factor per line-search trial.
    pub beta: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            min_alpha: 1e-5,
            beta: 0.5,
        }
    }
}

/// Result of one successful major iteration.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// Whether the solver converged at `x` or is still progressing.
    pub status: StepStatus,
    /// The stepped coordinates.
    pub x: Vec<f64>,
    /// Multiplier/penalty/merit state for warm-starting the next step.
    pub warm: WarmStart,
}

/// One configured solver instance over one formulation.
///
/// Stateful by design: [`initialize`](Self::initialize) primes the guess,
/// then each [`step`](Self::step) advances one major iteration from it.
pub trait StepSolver {
    /// Primes the solver with an initial guess and, when stepping from a
    /// point that came out of an earlier step, its warm-start payload.
    fn initialize(&mut self, x: &[f64], warm: Option<&WarmStart>);

    /// Performs one major iteration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Step`](crate::Error::Step) if the solver failed
    /// internally; the caller discards the candidate and continues.
    fn step(&mut self) -> Result<StepOutcome>;

    /// Iterates until convergence (or the solver's own budget runs out, in
    /// which case the final outcome reports [`StepStatus::Progressing`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Step`](crate::Error::Step) if the solver failed
    /// internally.
    fn solve(&mut self) -> Result<StepOutcome>;
}

/// Creates [`StepSolver`] instances over the formulations the orchestrator
/// derives from the user's problem.
pub trait SolverFactory {
    /// Instantiates a solver for `nlp`, configured with the given
    /// line-search floor.
    fn create(&self, nlp: Arc<dyn Nlp>, search: &SearchParams) -> Box<dyn StepSolver>;
}
