use thiserror::Error;

/// Result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by metrics, search structures, and classifiers.
///
/// Every failure is surfaced to the caller as a distinguishable condition;
/// nothing is silently recovered into a degraded or partial prediction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two points of differing dimensionality were compared.
    #[error("dimension mismatch: expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A prediction was requested before any training data was supplied.
    #[error("classifier has no training data")]
    EmptyTrainingSet,

    /// The requested neighbor count cannot be satisfied by the training set.
    #[error("invalid neighbor count k = {k} for training set of size {len}")]
    InvalidK { k: usize, len: usize },
}
