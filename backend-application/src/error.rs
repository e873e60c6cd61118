use thiserror::Error;

use backend_domain::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("{0}")]
    Capacity(String),
    #[error("consistency check failed: {0}")]
    Consistency(String),
    #[error("upstream: {0}")]
    Upstream(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message safe to show a client. Internal failures stay generic.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Unauthorized => "authentication required".to_string(),
            AppError::Forbidden(message)
            | AppError::NotFound(message)
            | AppError::BadRequest(message)
            | AppError::Conflict(message)
            | AppError::Capacity(message)
            | AppError::Upstream(message) => message.clone(),
            AppError::Consistency(_) => {
                "booking state is inconsistent; the operation was not applied".to_string()
            }
            AppError::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) => AppError::BadRequest(message),
            err @ DomainError::NotFound(_) => AppError::NotFound(err.to_string()),
            DomainError::Forbidden(message) => AppError::Forbidden(message),
            err @ DomainError::Capacity { .. } => AppError::Capacity(err.to_string()),
            DomainError::Conflict(message) => AppError::Conflict(message),
            DomainError::Consistency(message) => AppError::Consistency(message),
            err @ DomainError::Upstream(_) => AppError::Upstream(err.to_string()),
            DomainError::Storage(err) => AppError::Internal(err),
        }
    }
}
