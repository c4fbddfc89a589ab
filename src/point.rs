//! Candidate solutions and their warm-start payload.

use core::cell::Cell;

use crate::error::{Error, Result};
use crate::problem::MultiObjectiveProblem;
use crate::rng_util;
use crate::types::Tolerances;

/// Solver state carried between warm-started major iterations.
///
/// Produced by a step provider alongside the stepped coordinates and fed
/// back into [`StepSolver::initialize`](crate::solver::StepSolver::initialize)
/// on the next step from the same point. The payload is opaque to the
/// orchestration core: vector lengths follow whatever formulation the
/// producing solver was configured with.
#[derive(Clone, Debug, PartialEq)]
pub struct WarmStart {
    /// Multiplier estimates for the box bounds, one per variable.
    pub lambda: Vec<f64>,
    /// Multiplier estimates for the general constraints.
    pub mu: Vec<f64>,
    /// Constraint penalty state.
    pub penalties: Vec<f64>,
    /// Merit-function value at the stepped coordinates.
    pub merit: f64,
}

/// One candidate solution.
///
/// A point is read-only once created — coordinates, objective values,
/// constraint values, and the derived violation vector never change. The
/// single exception is the `stopped` flag, which the solving stages flip
/// while the point sits inside a front (hence the `Cell`).
///
/// The violation vector holds one non-negative entry per bound: lower and
/// upper excess for every variable, then lower and upper excess for every
/// constraint, giving `2 * (num_variables + num_constraints)` entries.
#[derive(Clone, Debug)]
pub struct Point {
    x: Vec<f64>,
    f: Vec<f64>,
    g: Vec<f64>,
    cv: Vec<f64>,
    warm: Option<WarmStart>,
    stopped: Cell<bool>,
}

impl Point {
    /// Creates a point by evaluating `x` against the problem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `x` does not have one entry
    /// per problem variable.
    pub fn new(x: Vec<f64>, problem: &dyn MultiObjectiveProblem) -> Result<Self> {
        Self::build(x, None, problem)
    }

    /// Creates a point from a solver step's output, keeping the warm-start
    /// payload for future steps from this point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `x` does not have one entry
    /// per problem variable.
    pub fn with_warm_start(
        x: Vec<f64>,
        warm: WarmStart,
        problem: &dyn MultiObjectiveProblem,
    ) -> Result<Self> {
        Self::build(x, Some(warm), problem)
    }

    /// Creates a random point within the problem's box bounds.
    ///
    /// Coordinates are drawn uniformly on axes with two finite bounds and
    /// from a normal distribution (mean 0, sigma 5) on axes with an
    /// infinite bound. Used for bootstrap seeding only.
    #[must_use]
    pub fn random(rng: &mut fastrand::Rng, problem: &dyn MultiObjectiveProblem) -> Self {
        let x_lower = problem.x_lower();
        let x_upper = problem.x_upper();
        let x = x_lower
            .iter()
            .zip(x_upper)
            .map(|(&low, &high)| {
                if low.is_finite() && high.is_finite() {
                    rng_util::f64_range(rng, low, high)
                } else {
                    rng_util::normal(rng, 5.0)
                }
            })
            .collect();

        match Self::build(x, None, problem) {
            Ok(point) => point,
            // The coordinate vector is sized off the bounds above.
            Err(_) => unreachable!("random coordinates match the problem dimension"),
        }
    }

    fn build(
        x: Vec<f64>,
        warm: Option<WarmStart>,
        problem: &dyn MultiObjectiveProblem,
    ) -> Result<Self> {
        let num_variables = problem.num_variables();
        if x.len() != num_variables {
            return Err(Error::DimensionMismatch {
                expected: num_variables,
                got: x.len(),
            });
        }

        let num_constraints = problem.num_constraints();
        let mut f = vec![0.0; problem.num_objectives()];
        problem.objectives(&x, &mut f);
        let mut g = vec![0.0; num_constraints];
        problem.constraints(&x, &mut g);

        let mut cv = Vec::with_capacity(2 * (num_variables + num_constraints));
        for ((&value, &low), &high) in x.iter().zip(problem.x_lower()).zip(problem.x_upper()) {
            cv.push((low - value).max(0.0));
            cv.push((value - high).max(0.0));
        }
        for ((&value, &low), &high) in g.iter().zip(problem.g_lower()).zip(problem.g_upper()) {
            cv.push((low - value).max(0.0));
            cv.push((value - high).max(0.0));
        }

        Ok(Self {
            x,
            f,
            g,
            cv,
            warm,
            stopped: Cell::new(false),
        })
    }

    /// The coordinate vector.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// All objective values.
    #[must_use]
    pub fn objectives(&self) -> &[f64] {
        &self.f
    }

    /// One objective value.
    #[must_use]
    pub fn objective(&self, objective: usize) -> f64 {
        self.f[objective]
    }

    /// All constraint values.
    #[must_use]
    pub fn constraints(&self) -> &[f64] {
        &self.g
    }

    /// The constraint-violation vector (all entries non-negative).
    #[must_use]
    pub fn violations(&self) -> &[f64] {
        &self.cv
    }

    /// The warm-start payload, if this point came out of a solver step.
    #[must_use]
    pub fn warm_start(&self) -> Option<&WarmStart> {
        self.warm.as_ref()
    }

    /// Marks or unmarks this point as stopped.
    pub fn set_stopped(&self, stopped: bool) {
        self.stopped.set(stopped);
    }

    /// Whether this point is marked stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// The worst single constraint violation.
    #[must_use]
    pub fn max_violation(&self) -> f64 {
        self.cv.iter().copied().fold(0.0, f64::max)
    }

    /// Whether the worst violation is within the feasibility tolerance.
    #[must_use]
    pub fn is_feasible(&self, tolerances: &Tolerances) -> bool {
        self.max_violation() <= tolerances.feasibility
    }

    /// Whether `other`'s value of the given objective is strictly smaller
    /// than this point's. Used to locate insertion slots in the front's
    /// per-objective sorted index lists.
    #[must_use]
    pub fn is_smaller(&self, other: &Self, objective: usize) -> bool {
        self.f[objective] < other.f[objective]
    }

    /// Whether this point is weakly dominated by `other`.
    ///
    /// Returns `false` if this point is strictly better in any objective,
    /// or if its worst constraint violation beats `other`'s by more than
    /// the domination tolerance. Otherwise `true` — note that under this
    /// weak relation a point is dominated by an identical copy of itself,
    /// which is what makes fronts reject duplicates. See
    /// [`dominates`](Self::dominates) for the strict relation.
    #[must_use]
    pub fn is_dominated(&self, other: &Self, tolerances: &Tolerances) -> bool {
        debug_assert_eq!(self.f.len(), other.f.len());

        for (own, theirs) in self.f.iter().zip(&other.f) {
            if own < theirs {
                return false;
            }
        }

        if self.max_violation() < other.max_violation() - tolerances.domination {
            return false;
        }

        true
    }

    /// Whether this point strictly dominates `other`: `other` is weakly
    /// dominated by this point and not vice versa. No point strictly
    /// dominates itself.
    #[must_use]
    pub fn dominates(&self, other: &Self, tolerances: &Tolerances) -> bool {
        other.is_dominated(self, tolerances) && !self.is_dominated(other, tolerances)
    }

    /// Euclidean distance between this point's coordinates and a foreign
    /// coordinate buffer. Used to detect stalled solver steps.
    #[must_use]
    pub fn distance(&self, other_x: &[f64]) -> f64 {
        debug_assert_eq!(self.x.len(), other_x.len());
        self.x
            .iter()
            .zip(other_x)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}
