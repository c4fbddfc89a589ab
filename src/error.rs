#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a step provider fails internally during a major
    /// iteration. The orchestration stages recover by discarding the
    /// affected candidate and continuing.
    #[error("solver step failed: {0}")]
    Step(String),

    /// Returned when an input vector has the wrong length (e.g. a candidate
    /// coordinate vector that does not match the problem dimension).
    #[error("dimension mismatch: expected {expected} values, got {got}")]
    DimensionMismatch {
        /// The expected number of values.
        expected: usize,
        /// The actual number of values provided.
        got: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
