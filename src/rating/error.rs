use thiserror::Error;

/// Failure reading or writing stored ratings.
#[derive(Error, Debug)]
pub enum RatingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl RatingError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            RatingError::Io(_) => true,
            RatingError::Unavailable { .. } => true,
            RatingError::Serialization(_) => false,
        }
    }
}
