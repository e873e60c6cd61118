// Domain error taxonomy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("event '{event_id}' is full ({capacity} of {capacity} spots taken)")]
    Capacity { event_id: String, capacity: u32 },
    #[error("{0}")]
    Conflict(String),
    /// Attendance invariant violated; a programming fault, never clamped.
    #[error("consistency check failed: {0}")]
    Consistency(String),
    #[error("external catalog unavailable: {0}")]
    Upstream(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn event_not_found(id: &str) -> Self {
        DomainError::NotFound(format!("event '{}'", id))
    }

    pub fn booking_not_found(id: &str) -> Self {
        DomainError::NotFound(format!("booking '{}'", id))
    }
}
