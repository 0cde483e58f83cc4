//! Scheduler error types

use registrar_domain::RegistrarError;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::InfraError;

/// Scheduler-specific errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Scheduler is already running
    #[error("Scheduler already running")]
    AlreadyRunning,

    /// Scheduler is not running
    #[error("Scheduler not running")]
    NotRunning,

    /// Cron expression was rejected before or by the job scheduler
    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },

    /// Failed to create scheduler
    #[error("Failed to create scheduler: {0}")]
    CreationFailed(String),

    /// Failed to start scheduler
    #[error("Failed to start scheduler: {0}")]
    StartFailed(String),

    /// Failed to stop scheduler
    #[error("Failed to stop scheduler: {0}")]
    StopFailed(String),

    /// Failed to register job
    #[error("Failed to register job: {0}")]
    JobRegistrationFailed(String),

    /// No job with the given id is scheduled
    #[error("No scheduled job with id {0}")]
    UnknownJob(Uuid),

    /// Failed to remove job
    #[error("Failed to unschedule job: {0}")]
    UnscheduleFailed(String),

    /// Operation timed out
    #[error("Operation timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl From<SchedulerError> for InfraError {
    fn from(err: SchedulerError) -> Self {
        let registrar_err = match err {
            SchedulerError::AlreadyRunning
            | SchedulerError::NotRunning
            | SchedulerError::UnknownJob(_) => RegistrarError::InvalidInput(err.to_string()),
            _ => RegistrarError::Schedule(err.to_string()),
        };
        InfraError(registrar_err)
    }
}

impl From<SchedulerError> for RegistrarError {
    fn from(err: SchedulerError) -> Self {
        InfraError::from(err).into()
    }
}

/// Convenience type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_errors_map_to_invalid_input() {
        let err: RegistrarError = SchedulerError::AlreadyRunning.into();
        assert_eq!(err, RegistrarError::InvalidInput("Scheduler already running".into()));
    }

    #[test]
    fn expression_errors_map_to_schedule() {
        let err: RegistrarError = SchedulerError::InvalidExpression {
            expression: "61 * * * * *".into(),
            reason: "seconds out of range".into(),
        }
        .into();
        assert!(matches!(err, RegistrarError::Schedule(msg) if msg.contains("61 * * * * *")));
    }
}
