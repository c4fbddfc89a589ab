//! The three-stage solving loop.
//!
//! [`Mosqp`] owns the front and drives the injected step providers:
//!
//! - **Stage 0, bootstrap** (at construction): random seeding within the
//!   box bounds until the front is full, feasible, and pairwise
//!   non-dominated, or the try budget runs out.
//! - **Stage 1, spread**: every not-stopped point takes one warm-started
//!   step per objective; admissible results are bulk-inserted after each
//!   sweep. A point is stopped once all its objectives were tried and
//!   removed right away if infeasible.
//! - **Stage 1.5, extreme points** (optional): each objective is minimized
//!   to convergence from a bounds-derived guess; the resulting value sets
//!   that objective's scaling factor for the refine scalarization.
//! - **Stage 2, refine**: a combined formulation (sum of scaled objectives,
//!   each objective constrained to not exceed the anchor point's value)
//!   drives every point toward local Pareto optimality.
//!
//! A solver-step error or a stalled step is never fatal — the candidate is
//! discarded and the stage continues. Each stage simply ends at its
//! iteration budget, returning a best-effort front.

use std::sync::Arc;

use crate::config::Parameters;
use crate::front::ParetoFront;
use crate::point::Point;
use crate::problem::{MultiObjectiveProblem, Nlp};
use crate::scalarize::{CombinedObjective, SingleObjective};
use crate::solver::{SearchParams, SolverFactory, StepSolver};
use crate::types::StepStatus;

/// The solving loop around one problem, one solver factory, and one front.
///
/// Construction runs the bootstrap stage; [`solve`](Self::solve) runs the
/// remaining stages and returns the front, which is guaranteed fully
/// feasible and pairwise non-dominated. See the crate-level example.
pub struct Mosqp<P> {
    problem: Arc<P>,
    factory: Box<dyn SolverFactory>,
    params: Parameters,
    front: ParetoFront,
    /// Per-objective scaling factors for the combined formulation,
    /// determined by the extreme-points stage (all 1 when it is skipped).
    scalings: Vec<f64>,
    rng: fastrand::Rng,
}

impl<P: MultiObjectiveProblem + 'static> Mosqp<P> {
    /// Creates the solver and runs the bootstrap stage on top of the given
    /// initial points (which are kept even if dominated or infeasible).
    #[must_use]
    pub fn new(
        problem: Arc<P>,
        factory: Box<dyn SolverFactory>,
        initial_points: Vec<Point>,
        params: Parameters,
    ) -> Self {
        Self::with_rng(problem, factory, initial_points, params, fastrand::Rng::new())
    }

    /// Like [`new`](Self::new) with a fixed seed for the bootstrap stage's
    /// random seeding.
    #[must_use]
    pub fn with_seed(
        problem: Arc<P>,
        factory: Box<dyn SolverFactory>,
        initial_points: Vec<Point>,
        params: Parameters,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            problem,
            factory,
            initial_points,
            params,
            fastrand::Rng::with_seed(seed),
        )
    }

    fn with_rng(
        problem: Arc<P>,
        factory: Box<dyn SolverFactory>,
        initial_points: Vec<Point>,
        params: Parameters,
        rng: fastrand::Rng,
    ) -> Self {
        let front = ParetoFront::new(
            params.max_points,
            problem.num_objectives(),
            params.tolerances,
            initial_points,
        );
        let mut solver = Self {
            problem,
            factory,
            params,
            front,
            scalings: Vec::new(),
            rng,
        };
        solver.bootstrap();
        solver
    }

    /// The current front (bootstrap result before [`solve`](Self::solve)).
    #[must_use]
    pub fn front(&self) -> &ParetoFront {
        &self.front
    }

    /// Runs spread, optionally extreme points, and refine, then returns
    /// the front: an ordered sequence of feasible, pairwise non-dominated
    /// points.
    #[must_use]
    pub fn solve(mut self) -> ParetoFront {
        trace_info!("spread stage");
        self.spread();

        if self.params.find_extreme_points {
            trace_info!("extreme points stage");
            self.extreme_points();
        } else {
            self.scalings = vec![1.0; self.problem.num_objectives()];
        }

        trace_info!("refine stage");
        self.refine();

        debug_assert!(self.front.all_feasible());
        debug_assert!(self.front.all_non_dominated());
        self.front
    }

    /// Stage 0: random seeding until the front is simultaneously full,
    /// fully feasible, and pairwise non-dominated.
    fn bootstrap(&mut self) {
        let mut tries = 0;
        while tries < self.params.num_completion_tries {
            let point = Point::random(&mut self.rng, self.problem.as_ref());
            self.front.add_point(point);
            tries += 1;
            if self.front.is_full() && self.front.all_feasible() && self.front.all_non_dominated()
            {
                break;
            }
        }
        trace_info!(points = self.front.len(), tries, "bootstrap complete");
    }

    /// Stage 1: one warm-started step per objective for every not-stopped
    /// point, sweeping until everything is stopped or the budget runs out.
    fn spread(&mut self) {
        self.front.unstop_all();

        let num_objectives = self.problem.num_objectives();
        let mut solvers: Vec<Box<dyn StepSolver>> = (0..num_objectives)
            .map(|objective| {
                let nlp: Arc<dyn Nlp> =
                    Arc::new(SingleObjective::new(Arc::clone(&self.problem), objective));
                self.factory.create(nlp, &self.params.spread_search)
            })
            .collect();

        for _round in 0..self.params.spread_max_steps {
            let mut candidates = Vec::new();
            let mut pos = 0;
            while pos < self.front.len() {
                let point = &self.front[pos];
                if point.is_stopped() {
                    pos += 1;
                    continue;
                }

                for solver in &mut solvers {
                    solver.initialize(point.x(), point.warm_start());
                    match solver.step() {
                        Err(_error) => {
                            // No usable step for this objective.
                            trace_debug!(error = %_error, "spread step failed");
                        }
                        Ok(outcome) => {
                            if point.distance(&outcome.x) < self.params.spread_min_search_length {
                                trace_debug!("spread step stalled");
                            } else {
                                match Point::with_warm_start(
                                    outcome.x,
                                    outcome.warm,
                                    self.problem.as_ref(),
                                ) {
                                    Ok(candidate) => candidates.push(candidate),
                                    Err(_error) => {
                                        trace_debug!(error = %_error, "malformed spread candidate");
                                    }
                                }
                            }
                        }
                    }
                }

                point.set_stopped(true);
                // Its candidates are harvested; an infeasible point has no
                // further use in the front.
                let feasible = point.is_feasible(&self.params.tolerances);
                if feasible {
                    pos += 1;
                } else {
                    pos = self.front.remove_point(pos);
                }
            }

            let _added = self.front.add_points(candidates);
            trace_info!(round = _round, added = _added, "spread round complete");
            if self.front.all_stopped() {
                break;
            }
        }
    }

    /// Stage 1.5: minimize each objective on its own to convergence; a
    /// success records the scaling factor `1 + |f|` and inserts the point,
    /// a failure defaults the factor to 1.
    fn extreme_points(&mut self) {
        let guess = extreme_guess(self.problem.x_lower(), self.problem.x_upper());

        for objective in 0..self.problem.num_objectives() {
            let nlp: Arc<dyn Nlp> =
                Arc::new(SingleObjective::new(Arc::clone(&self.problem), objective));
            let mut solver = self.factory.create(nlp, &SearchParams::default());
            solver.initialize(&guess, None);

            let scaling = match solver.solve() {
                Ok(outcome) if outcome.status == StepStatus::Converged => {
                    match Point::new(outcome.x, self.problem.as_ref()) {
                        Ok(extreme) => {
                            let scaling = 1.0 + extreme.objective(objective).abs();
                            self.front.add_point(extreme);
                            scaling
                        }
                        Err(_error) => {
                            trace_debug!(error = %_error, "malformed extreme point");
                            1.0
                        }
                    }
                }
                Ok(_) => 1.0,
                Err(_error) => {
                    trace_debug!(error = %_error, objective, "extreme point solve failed");
                    1.0
                }
            };
            self.scalings.push(scaling);
        }
    }

    /// Stage 2: warm-started steps on the combined formulation, anchored at
    /// each point's own objective values, until everything is stopped or
    /// the budget runs out. Ends with a sweep removing infeasible points.
    fn refine(&mut self) {
        self.front.unstop_all();

        let combined = Arc::new(CombinedObjective::new(
            Arc::clone(&self.problem),
            self.scalings.clone(),
        ));
        let nlp: Arc<dyn Nlp> = Arc::clone(&combined) as Arc<dyn Nlp>;
        let mut solver = self.factory.create(nlp, &self.params.refine_search);

        for _round in 0..self.params.refine_max_steps {
            let mut candidates = Vec::new();
            let mut pos = 0;
            while pos < self.front.len() {
                let point = &self.front[pos];
                if point.is_stopped() {
                    pos += 1;
                    continue;
                }

                combined.set_targets(point.objectives());
                solver.initialize(point.x(), point.warm_start());
                match solver.step() {
                    Err(_error) => {
                        trace_debug!(error = %_error, "refine step failed");
                    }
                    Ok(outcome) => {
                        let displacement = point.distance(&outcome.x);
                        let status = outcome.status;
                        match Point::with_warm_start(
                            outcome.x,
                            outcome.warm,
                            self.problem.as_ref(),
                        ) {
                            Err(_error) => {
                                trace_debug!(error = %_error, "malformed refine candidate");
                            }
                            Ok(candidate) => {
                                let keep = match status {
                                    StepStatus::Converged => {
                                        candidate.set_stopped(true);
                                        true
                                    }
                                    StepStatus::Progressing
                                        if displacement < self.params.refine_min_search_length =>
                                    {
                                        // Stalled: only worth keeping if it
                                        // is already feasible.
                                        if candidate.is_feasible(&self.params.tolerances) {
                                            candidate.set_stopped(true);
                                            true
                                        } else {
                                            false
                                        }
                                    }
                                    StepStatus::Progressing => true,
                                };
                                if keep {
                                    candidates.push(candidate);
                                }
                            }
                        }
                    }
                }

                // The point's one useful descent direction has been used.
                let feasible = point.is_feasible(&self.params.tolerances);
                if feasible {
                    point.set_stopped(true);
                    pos += 1;
                } else {
                    pos = self.front.remove_point(pos);
                }
            }

            let _added = self.front.add_points(candidates);
            trace_info!(round = _round, added = _added, "refine round complete");
            if self.front.all_stopped() {
                break;
            }
        }

        // Only feasible points may survive into the returned front.
        let mut pos = 0;
        while pos < self.front.len() {
            if self.front[pos].is_feasible(&self.params.tolerances) {
                pos += 1;
            } else {
                pos = self.front.remove_point(pos);
            }
        }
    }
}

/// Per-axis initial guess for the extreme-points stage: the midpoint when
/// both bounds are finite, the finite bound when only one is, zero when
/// neither is.
fn extreme_guess(x_lower: &[f64], x_upper: &[f64]) -> Vec<f64> {
    x_lower
        .iter()
        .zip(x_upper)
        .map(|(&low, &high)| match (low.is_finite(), high.is_finite()) {
            (true, true) => (low + high) / 2.0,
            (true, false) => low,
            (false, true) => high,
            (false, false) => 0.0,
        })
        .collect()
}
