use thiserror::Error;

/// An argument passed to the clustering API was rejected before any work started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("dataset contains no samples")]
    EmptyDataset,
    #[error("samples must have at least one dimension")]
    ZeroDimensions,
    #[error("sample buffer holds {len} values, expected {sample_cnt} samples x {sample_dims} dimensions")]
    ShapeMismatch { len: usize, sample_cnt: usize, sample_dims: usize },
    #[error("sample {index} has {found} dimensions, expected {expected}")]
    RaggedSample { index: usize, found: usize, expected: usize },
    #[error("k must lie in 1..={sample_cnt}, got {k}")]
    ClusterCount { k: usize, sample_cnt: usize },
    #[error("cluster range {min_k}..={max_k} is invalid for {sample_cnt} samples")]
    ClusterRange { min_k: usize, max_k: usize, sample_cnt: usize },
    #[error("attempts cannot be 0")]
    NoAttempts,
    #[error("batch_size cannot be 0")]
    ZeroBatchSize,
    #[error("centroid list is empty")]
    NoCentroids,
    #[error("centroid list holds {len} values, which is not a multiple of {sample_dims} dimensions")]
    CentroidShape { len: usize, sample_dims: usize },
    #[error("expected {expected} dimensions, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// An error when clustering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KMeansError {
    /// Empty dataset, k outside `1..=n`, bad option values or mismatching dimensions
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),
}

pub type Result<T> = std::result::Result<T, KMeansError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err: KMeansError = ArgumentError::ClusterCount { k: 7, sample_cnt: 3 }.into();
        assert_eq!(err.to_string(), "Invalid argument: k must lie in 1..=3, got 7");
        let err: KMeansError = ArgumentError::RaggedSample { index: 2, found: 1, expected: 3 }.into();
        assert_eq!(err.to_string(), "Invalid argument: sample 2 has 1 dimensions, expected 3");
    }
}
