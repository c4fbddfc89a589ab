//! Core types shared across the crate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a single solver major iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StepStatus {
    /// The solver reports full convergence at the returned coordinates.
    Converged,
    /// The solver made progress but has not converged yet.
    Progressing,
}

/// Tolerances threaded through front and point predicates.
///
/// These are explicit values passed at construction time, never global
/// state: two fronts with different tolerances can coexist.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerances {
    /// A point is feasible iff its worst constraint violation does not
    /// exceed this value.
    pub feasibility: f64,
    /// Slack applied when comparing worst constraint violations in the
    /// domination predicate: a point escapes domination on violations only
    /// when its worst violation beats the other's by more than this.
    pub domination: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            feasibility: 1e-3,
            domination: 1e-5,
        }
    }
}
