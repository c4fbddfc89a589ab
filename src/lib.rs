#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Pareto-front approximation for constrained multi-objective nonlinear
//! programs. The crate does not solve the nonlinear subproblems itself —
//! it orchestrates an injected step-wise NLP solver (one "major iteration"
//! at a time, SQP-style) and maintains a bounded population of mutually
//! non-dominated candidate solutions.
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Point`] | One candidate solution: coordinates, objective values, constraint violations, optional warm-start state. |
//! | [`ParetoFront`] | Bounded set of pairwise non-dominated points with per-objective sorted indices and crowding-distance eviction. |
//! | [`Mosqp`] | Drives the three solving stages (bootstrap, spread, refine) and returns the final front. |
//! | [`MultiObjectiveProblem`](problem::MultiObjectiveProblem) | Your problem: dimensions, bounds, objective/constraint evaluators. |
//! | [`StepSolver`](solver::StepSolver) / [`SolverFactory`](solver::SolverFactory) | The injected iterative NLP solver, stepped one major iteration at a time. |
//!
//! # Algorithm
//!
//! 1. **Bootstrap** — random seeding within the box bounds until the front
//!    is full, feasible, and pairwise non-dominated (or the try budget runs
//!    out).
//! 2. **Spread** — every front member takes one warm-started solver step per
//!    objective, pushing the population apart along each objective.
//! 3. **Refine** — a scalarized descent (sum of scaled objectives, each
//!    objective constrained to not exceed the anchor point's value) drives
//!    every member toward local Pareto optimality.
//!
//! The returned front is fully feasible and pairwise non-dominated; under
//! tight iteration budgets quality degrades gracefully instead of failing.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mosqp::prelude::*;
//!
//! // Two paraboloids pulling toward (0, 0) and (5, 5).
//! struct TwoParaboloids;
//!
//! impl MultiObjectiveProblem for TwoParaboloids {
//!     fn num_variables(&self) -> usize {
//!         2
//!     }
//!     fn num_objectives(&self) -> usize {
//!         2
//!     }
//!     fn x_lower(&self) -> &[f64] {
//!         &[-5.0, -5.0]
//!     }
//!     fn x_upper(&self) -> &[f64] {
//!         &[10.0, 10.0]
//!     }
//!     fn objective(&self, x: &[f64], objective: usize) -> f64 {
//!         match objective {
//!             0 => x[0] * x[0] + x[1] * x[1],
//!             _ => (x[0] - 5.0).powi(2) + (x[1] - 5.0).powi(2),
//!         }
//!     }
//!     fn objective_gradient(&self, x: &[f64], objective: usize, df: &mut [f64]) {
//!         match objective {
//!             0 => {
//!                 df[0] = 2.0 * x[0];
//!                 df[1] = 2.0 * x[1];
//!             }
//!             _ => {
//!                 df[0] = 2.0 * (x[0] - 5.0);
//!                 df[1] = 2.0 * (x[1] - 5.0);
//!             }
//!         }
//!     }
//! }
//!
//! // A do-nothing step provider: reports convergence at the warm-started
//! // coordinates. Plug a real SQP stepper in here.
//! struct IdleSolver {
//!     x: Vec<f64>,
//!     constraints: usize,
//! }
//!
//! impl StepSolver for IdleSolver {
//!     fn initialize(&mut self, x: &[f64], _warm: Option<&WarmStart>) {
//!         self.x = x.to_vec();
//!     }
//!     fn step(&mut self) -> mosqp::Result<StepOutcome> {
//!         Ok(StepOutcome {
//!             status: StepStatus::Converged,
//!             x: self.x.clone(),
//!             warm: WarmStart {
//!                 lambda: vec![0.0; self.x.len()],
//!                 mu: vec![0.0; self.constraints],
//!                 penalties: vec![0.0; self.constraints],
//!                 merit: 0.0,
//!             },
//!         })
//!     }
//!     fn solve(&mut self) -> mosqp::Result<StepOutcome> {
//!         self.step()
//!     }
//! }
//!
//! struct IdleFactory;
//!
//! impl SolverFactory for IdleFactory {
//!     fn create(&self, nlp: Arc<dyn Nlp>, _search: &SearchParams) -> Box<dyn StepSolver> {
//!         Box::new(IdleSolver {
//!             x: vec![0.0; nlp.num_variables()],
//!             constraints: nlp.num_constraints(),
//!         })
//!     }
//! }
//!
//! let params = Parameters::default()
//!     .max_points(16)
//!     .num_completion_tries(64);
//! let solver = Mosqp::with_seed(
//!     Arc::new(TwoParaboloids),
//!     Box::new(IdleFactory),
//!     Vec::new(),
//!     params,
//!     7,
//! );
//! let front = solver.solve();
//!
//! assert!(!front.is_empty());
//! assert!(front.all_feasible());
//! assert!(front.all_non_dominated());
//! ```
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on configuration and status types | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at stage boundaries and candidate discards | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod config;
mod error;
pub mod front;
pub mod point;
pub mod problem;
mod rng_util;
pub mod scalarize;
pub mod solver;
mod solve;
mod types;

pub use config::Parameters;
pub use error::{Error, Result};
pub use front::ParetoFront;
pub use point::{Point, WarmStart};
pub use solve::Mosqp;
pub use types::{StepStatus, Tolerances};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use mosqp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Parameters;
    pub use crate::error::{Error, Result};
    pub use crate::front::ParetoFront;
    pub use crate::point::{Point, WarmStart};
    pub use crate::problem::{CountingProblem, EvalCounts, MultiObjectiveProblem, Nlp};
    pub use crate::scalarize::{CombinedObjective, SingleObjective};
    pub use crate::solve::Mosqp;
    pub use crate::solver::{SearchParams, SolverFactory, StepOutcome, StepSolver};
    pub use crate::types::{StepStatus, Tolerances};
}
