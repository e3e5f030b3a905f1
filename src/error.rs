//! Error types for boson-sampling computations.

/// Failures raised by the enumeration, submatrix and probability operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BosonError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("particle number mismatch: {input} photons in, {output} photons out")]
    ParticleNumberMismatch { input: usize, output: usize },

    #[error(transparent)]
    Permanent(#[from] PermanentError),
}

/// Failures raised by a permanent implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PermanentError {
    #[error("permanent requires a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix dimension {dimension} exceeds the supported limit of {limit}")]
    TooLarge { dimension: usize, limit: usize },

    #[error("permanent evaluation produced a non-finite value")]
    NonFinite,
}

/// Failures raised while loading, saving or running an experiment.
#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed experiment config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Boson(#[from] BosonError),
}

pub type Result<T, E = BosonError> = std::result::Result<T, E>;

impl BosonError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
