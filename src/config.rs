//! Read-only solver configuration.

use crate::solver::SearchParams;
use crate::types::Tolerances;

/// Configuration for a [`Mosqp`](crate::Mosqp) run, supplied once at
/// construction.
///
/// The defaults reproduce the reference behavior; use the consuming
/// setters to adjust individual knobs:
///
/// ```
/// use mosqp::Parameters;
///
/// let params = Parameters::default().max_points(50).find_extreme_points(true);
/// assert_eq!(params.max_points, 50);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    /// Soft capacity of the Pareto front. Insertion may transiently exceed
    /// it until crowding-distance cleanup restores it.
    pub max_points: usize,
    /// Bootstrap budget: how many random seed points to try before giving
    /// up on filling the front.
    pub num_completion_tries: usize,
    /// Feasibility and domination tolerances shared by all points of the
    /// run.
    pub tolerances: Tolerances,
    /// Round budget for the spread stage.
    pub spread_max_steps: usize,
    /// Line-search floor forwarded to the per-objective step providers of
    /// the spread stage.
    pub spread_search: SearchParams,
    /// A spread step moving the coordinates by less than this is discarded
    /// as stalled.
    pub spread_min_search_length: f64,
    /// Round budget for the refine stage.
    pub refine_max_steps: usize,
    /// Line-search floor forwarded to the combined-formulation step
    /// provider of the refine stage.
    pub refine_search: SearchParams,
    /// A refine step moving the coordinates by less than this is accepted
    /// only if feasible (and marked stopped), otherwise discarded.
    pub refine_min_search_length: f64,
    /// Whether to run the extreme-points stage between spread and refine.
    ///
    /// When enabled, each objective is minimized on its own to convergence
    /// and the resulting value sets that objective's scaling factor in the
    /// refine stage's combined formulation. When disabled (the default,
    /// matching the reference behavior) all scaling factors are 1.
    pub find_extreme_points: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            max_points: 100,
            num_completion_tries: 200,
            tolerances: Tolerances::default(),
            spread_max_steps: 20,
            spread_search: SearchParams::default(),
            spread_min_search_length: 1e-5,
            refine_max_steps: 200,
            refine_search: SearchParams::default(),
            refine_min_search_length: 5e-5,
            find_extreme_points: false,
        }
    }
}

impl Parameters {
    /// Sets the soft front capacity.
    #[must_use]
    pub fn max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Sets the bootstrap seeding budget.
    #[must_use]
    pub fn num_completion_tries(mut self, tries: usize) -> Self {
        self.num_completion_tries = tries;
        self
    }

    /// Sets the feasibility/domination tolerances.
    #[must_use]
    pub fn tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Sets the spread-stage round budget.
    #[must_use]
    pub fn spread_max_steps(mut self, steps: usize) -> Self {
        self.spread_max_steps = steps;
        self
    }

    /// Sets the refine-stage round budget.
    #[must_use]
    pub fn refine_max_steps(mut self, steps: usize) -> Self {
        self.refine_max_steps = steps;
        self
    }

    /// Enables or disables the extreme-points stage.
    #[must_use]
    pub fn find_extreme_points(mut self, enabled: bool) -> Self {
        self.find_extreme_points = enabled;
        self
    }
}
