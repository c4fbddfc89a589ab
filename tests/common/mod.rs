//! Shared fixtures: a projected-gradient reference step solver and a few
//! small problems with analytic derivatives.

use std::sync::Arc;

use mosqp::prelude::*;

// ---------------------------------------------------------------------------
// Reference step solver
// ---------------------------------------------------------------------------

/// A deliberately simple step provider: one projected-gradient step on a
/// quadratic-penalty merit function per major iteration, with backtracking
/// controlled by the forwarded [`SearchParams`].
pub struct GradientStepSolver {
    nlp: Arc<dyn Nlp>,
    search: SearchParams,
    x: Vec<f64>,
    penalty_weight: f64,
    gradient_tolerance: f64,
    max_solve_iters: usize,
}

impl GradientStepSolver {
    fn merit(&self, x: &[f64]) -> f64 {
        let m = self.nlp.num_constraints();
        let mut value = self.nlp.objective(x);
        if m > 0 {
            let mut g = vec![0.0; m];
            self.nlp.constraints(x, &mut g);
            let g_lower = self.nlp.g_lower();
            let g_upper = self.nlp.g_upper();
            for i in 0..m {
                let upper_excess = (g[i] - g_upper[i]).max(0.0);
                let lower_excess = (g_lower[i] - g[i]).max(0.0);
                value += self.penalty_weight * (upper_excess * upper_excess + lower_excess * lower_excess);
            }
        }
        value
    }

    fn merit_gradient(&self, x: &[f64]) -> Vec<f64> {
        let n = self.nlp.num_variables();
        let m = self.nlp.num_constraints();
        let mut grad = vec![0.0; n];
        self.nlp.gradient(x, &mut grad);
        if m > 0 {
            let mut g = vec![0.0; m];
            self.nlp.constraints(x, &mut g);
            let mut jacobian = vec![0.0; m * n];
            self.nlp.constraint_jacobian(x, &mut jacobian);
            let g_lower = self.nlp.g_lower();
            let g_upper = self.nlp.g_upper();
            for i in 0..m {
                let upper_excess = (g[i] - g_upper[i]).max(0.0);
                let lower_excess = (g_lower[i] - g[i]).max(0.0);
                let coefficient = 2.0 * self.penalty_weight * (upper_excess - lower_excess);
                if coefficient != 0.0 {
                    for (total, &entry) in grad.iter_mut().zip(&jacobian[i * n..(i + 1) * n]) {
                        *total += coefficient * entry;
                    }
                }
            }
        }
        grad
    }

    fn project(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.nlp.x_lower())
            .zip(self.nlp.x_upper())
            .map(|((&value, &low), &high)| value.clamp(low, high))
            .collect()
    }

    fn warm(&self, merit: f64) -> WarmStart {
        WarmStart {
            lambda: vec![0.0; self.nlp.num_variables()],
            mu: vec![0.0; self.nlp.num_constraints()],
            penalties: vec![self.penalty_weight; self.nlp.num_constraints()],
            merit,
        }
    }

    fn outcome(&self, status: StepStatus) -> StepOutcome {
        StepOutcome {
            status,
            x: self.x.clone(),
            warm: self.warm(self.merit(&self.x)),
        }
    }
}

impl StepSolver for GradientStepSolver {
    fn initialize(&mut self, x: &[f64], _warm: Option<&WarmStart>) {
        self.x = x.to_vec();
    }

    fn step(&mut self) -> mosqp::Result<StepOutcome> {
        let grad = self.merit_gradient(&self.x);
        if grad.iter().any(|value| !value.is_finite()) {
            return Err(Error::Step("non-finite merit gradient".into()));
        }

        // Stationarity: the projected gradient vanishes.
        let full_step: Vec<f64> = self.x.iter().zip(&grad).map(|(x, g)| x - g).collect();
        let projected = self.project(&full_step);
        let projected_gradient_norm = self
            .x
            .iter()
            .zip(&projected)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt();
        if projected_gradient_norm <= self.gradient_tolerance {
            return Ok(self.outcome(StepStatus::Converged));
        }

        let current = self.merit(&self.x);
        let mut alpha = 1.0;
        while alpha >= self.search.min_alpha {
            let trial: Vec<f64> = self.x.iter().zip(&grad).map(|(x, g)| x - alpha * g).collect();
            let trial = self.project(&trial);
            if self.merit(&trial) < current {
                self.x = trial;
                return Ok(self.outcome(StepStatus::Progressing));
            }
            alpha *= self.search.beta;
        }

        // No admissible decrease left at this point.
        Ok(self.outcome(StepStatus::Converged))
    }

    fn solve(&mut self) -> mosqp::Result<StepOutcome> {
        let mut last = self.step()?;
        for _ in 0..self.max_solve_iters {
            if last.status == StepStatus::Converged {
                return Ok(last);
            }
            last = self.step()?;
        }
        Ok(last)
    }
}

/// Factory producing [`GradientStepSolver`]s.
pub struct GradientSolverFactory {
    pub penalty_weight: f64,
    pub gradient_tolerance: f64,
}

impl Default for GradientSolverFactory {
    fn default() -> Self {
        Self {
            penalty_weight: 100.0,
            gradient_tolerance: 1e-6,
        }
    }
}

impl SolverFactory for GradientSolverFactory {
    fn create(&self, nlp: Arc<dyn Nlp>, search: &SearchParams) -> Box<dyn StepSolver> {
        Box::new(GradientStepSolver {
            x: vec![0.0; nlp.num_variables()],
            nlp,
            search: *search,
            penalty_weight: self.penalty_weight,
            gradient_tolerance: self.gradient_tolerance,
            max_solve_iters: 500,
        })
    }
}

// ---------------------------------------------------------------------------
// Problems
// ---------------------------------------------------------------------------

/// Unconstrained bi-objective: minimize `|x|^2` and `|x - (5, 5)|^2` over
/// the box `[-5, 10]^2`. The Pareto set is the segment between the two
/// single-objective minima, with objective pairs running from (0, 50) to
/// (50, 0).
pub struct TwinParaboloids;

impl MultiObjectiveProblem for TwinParaboloids {
    fn num_variables(&self) -> usize {
        2
    }

    fn num_objectives(&self) -> usize {
        2
    }

    fn x_lower(&self) -> &[f64] {
        &[-5.0, -5.0]
    }

    fn x_upper(&self) -> &[f64] {
        &[10.0, 10.0]
    }

    fn objective(&self, x: &[f64], objective: usize) -> f64 {
        match objective {
            0 => x[0] * x[0] + x[1] * x[1],
            _ => (x[0] - 5.0).powi(2) + (x[1] - 5.0).powi(2),
        }
    }

    fn objective_gradient(&self, x: &[f64], objective: usize, df: &mut [f64]) {
        match objective {
            0 => {
                df[0] = 2.0 * x[0];
                df[1] = 2.0 * x[1];
            }
            _ => {
                df[0] = 2.0 * (x[0] - 5.0);
                df[1] = 2.0 * (x[1] - 5.0);
            }
        }
    }
}

/// The classic constrained bi-objective benchmark of Binh and Korn:
/// minimize `4 x0^2 + 4 x1^2` and `(x0 - 5)^2 + (x1 - 5)^2` over
/// `[0, 5] x [0, 3]` subject to `(x0 - 5)^2 + x1^2 <= 25` and
/// `(x0 - 8)^2 + (x1 + 3)^2 >= 7.7`.
pub struct BinhKorn;

impl MultiObjectiveProblem for BinhKorn {
    fn num_variables(&self) -> usize {
        2
    }

    fn num_objectives(&self) -> usize {
        2
    }

    fn num_constraints(&self) -> usize {
        2
    }

    fn x_lower(&self) -> &[f64] {
        &[0.0, 0.0]
    }

    fn x_upper(&self) -> &[f64] {
        &[5.0, 3.0]
    }

    fn g_lower(&self) -> &[f64] {
        &[f64::NEG_INFINITY, 7.7]
    }

    fn g_upper(&self) -> &[f64] {
        &[25.0, f64::INFINITY]
    }

    fn objective(&self, x: &[f64], objective: usize) -> f64 {
        match objective {
            0 => 4.0 * x[0] * x[0] + 4.0 * x[1] * x[1],
            _ => (x[0] - 5.0).powi(2) + (x[1] - 5.0).powi(2),
        }
    }

    fn constraints(&self, x: &[f64], g: &mut [f64]) {
        g[0] = (x[0] - 5.0).powi(2) + x[1] * x[1];
        g[1] = (x[0] - 8.0).powi(2) + (x[1] + 3.0).powi(2);
    }

    fn objective_gradient(&self, x: &[f64], objective: usize, df: &mut [f64]) {
        match objective {
            0 => {
                df[0] = 8.0 * x[0];
                df[1] = 8.0 * x[1];
            }
            _ => {
                df[0] = 2.0 * (x[0] - 5.0);
                df[1] = 2.0 * (x[1] - 5.0);
            }
        }
    }

    fn constraint_jacobian(&self, x: &[f64], dg: &mut [f64]) {
        dg[0] = 2.0 * (x[0] - 5.0);
        dg[1] = 2.0 * x[1];
        dg[2] = 2.0 * (x[0] - 8.0);
        dg[3] = 2.0 * (x[1] + 3.0);
    }
}

/// Unconstrained fixture whose objectives are the coordinates themselves,
/// so a point at objective pair (a, b) has coordinates (a, b).
pub struct Identity;

impl MultiObjectiveProblem for Identity {
    fn num_variables(&self) -> usize {
        2
    }

    fn num_objectives(&self) -> usize {
        2
    }

    fn x_lower(&self) -> &[f64] {
        &[-100.0, -100.0]
    }

    fn x_upper(&self) -> &[f64] {
        &[100.0, 100.0]
    }

    fn objective(&self, x: &[f64], objective: usize) -> f64 {
        x[objective]
    }

    fn objective_gradient(&self, _x: &[f64], objective: usize, df: &mut [f64]) {
        df.fill(0.0);
        df[objective] = 1.0;
    }
}
