use thiserror::Error;

/// Errors reported by the clustering session and the driver around it.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Requested cluster count must be at least one.
    #[error("invalid cluster count: k must be at least 1")]
    InvalidK,

    /// Requested cluster count exceeds the number of points.
    #[error("not enough points: requested {requested} clusters but only {available} points")]
    InsufficientPoints { requested: usize, available: usize },

    /// Operation is not valid in the session's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Malformed line in a points file.
    #[error("malformed points line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClusterError>;
