use thiserror::Error;

/// Errors surfaced by the network, its configuration and the training helpers.
///
/// Numeric instability (weights drifting to NaN/Inf under a learning rate that
/// is too large or unbounded inputs) is not detected and has no variant here.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// A slice or matrix disagrees with the width it is paired with.
    #[error("{what}: expected {expected} values, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid network configuration: {0}")]
    InvalidConfig(String),

    #[error("matrix must have at least one row and one column")]
    EmptyMatrix,

    #[error("invalid weight distribution: {0}")]
    InvalidDistribution(String),

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("dataset has {inputs} inputs but {targets} targets")]
    DatasetLength { inputs: usize, targets: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Fails with `ShapeMismatch` unless `actual == expected`.
pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(NetworkError::ShapeMismatch { what, expected, actual })
    }
}
