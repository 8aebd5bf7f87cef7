use thiserror::Error;

/// Errors produced while setting up or running a k-means calculation.
#[derive(Debug, Error)]
pub enum KMeansError {
    /// No samples were given.
    #[error("no samples given")]
    EmptyInput,

    /// A vector's length differs from the dimensionality shared by the rest of the input.
    /// ## Fields
    /// - **index**: Position of the offending vector
    /// - **expected**: Dimensionality of the first vector
    /// - **actual**: Dimensionality of the offending vector
    #[error("vector {index} has {actual} dimensions, expected {expected}")]
    InvalidDimensionality { index: usize, expected: usize, actual: usize },

    /// At least one cluster has to be requested.
    #[error("invalid cluster count k = {k}")]
    InvalidClusterCount { k: usize },

    /// There are fewer sample positions than requested clusters, so no k distinct seeds exist.
    #[error("cannot select {k} distinct seeds from {available} samples")]
    InsufficientDistinctSeeds { k: usize, available: usize },

    /// The initialization produced a different amount of seeds than clusters were requested.
    #[error("initialization produced {actual} seeds, expected {expected}")]
    SeedCount { expected: usize, actual: usize },

    /// An assignment was calculated on a different sample set than the one it is applied to.
    /// ## Fields
    /// - **expected**: Amount of samples of the [`crate::KMeans`] instance
    /// - **actual**: Amount of samples covered by the assignment
    #[error("assignment covers {actual} samples, expected {expected}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// The centroid of a group without members is undefined.
    #[error("cannot calculate the centroid of an empty group")]
    EmptyGroup,

    /// Convergence thresholds have to be finite and non-negative.
    #[error("invalid convergence threshold {threshold}")]
    InvalidThreshold { threshold: f64 },

    /// A run needs at least one iteration to produce trustworthy centers.
    #[error("the iteration limit must be at least 1")]
    InvalidIterationLimit,

    /// The run hit its iteration limit before the abort-strategy signalled convergence.
    #[error("did not converge within {iterations} iterations (last max movement: {max_movement})")]
    NonConvergence { iterations: usize, max_movement: f64 },

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
