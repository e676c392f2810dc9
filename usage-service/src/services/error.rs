//! Error types for raw usage window computation.

use service_core::error::AppError;
use thiserror::Error;

/// Failures reported by a raw usage provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Raw usage store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid raw usage range: start {start} is after end {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

#[derive(Debug, Error)]
pub enum UsageWindowError {
    /// An invoiced usage charge names a usage the catalog does not know.
    /// Points at stale or inconsistent catalog state, never skipped.
    #[error("Usage '{usage_name}' of invoiced charge is not in the usage catalog")]
    UnknownUsage { usage_name: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl UsageWindowError {
    pub fn error_type(&self) -> &'static str {
        match self {
            UsageWindowError::UnknownUsage { .. } => "unknown_usage",
            UsageWindowError::Provider(_) => "provider",
        }
    }
}

impl From<UsageWindowError> for AppError {
    fn from(err: UsageWindowError) -> Self {
        match err {
            UsageWindowError::UnknownUsage { .. } => AppError::BadRequest(anyhow::Error::new(err)),
            UsageWindowError::Provider(inner) => AppError::BadGateway(inner.to_string()),
        }
    }
}
