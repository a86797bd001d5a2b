use std::fmt;
use thiserror::Error;

/// Top-level infrastructure error type for UniFlow.
#[derive(Debug, Error)]
pub enum UniflowError {
    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Persistence error.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Broad classification of a use-case failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input or failed validation.
    InvalidData,
    /// Entity absent.
    NotFound,
    /// Persistence or infrastructure failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidData => "invalid data",
            Self::NotFound => "not found",
            Self::Internal => "internal error",
        })
    }
}

type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Error returned by the use-case layer.
///
/// Carries the kind, the operation that failed, and the underlying cause.
/// Callers branch on [`ServiceError::kind`], never on the message text.
#[derive(Debug, Error)]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub op: &'static str,
    #[source]
    pub source: Option<Cause>,
}

impl ServiceError {
    pub fn new(kind: ErrorKind, op: &'static str) -> Self {
        Self {
            kind,
            op,
            source: None,
        }
    }

    pub fn invalid(op: &'static str, cause: impl Into<Cause>) -> Self {
        Self::new(ErrorKind::InvalidData, op).with_cause(cause)
    }

    pub fn not_found(op: &'static str) -> Self {
        Self::new(ErrorKind::NotFound, op)
    }

    pub fn internal(op: &'static str, cause: impl Into<Cause>) -> Self {
        Self::new(ErrorKind::Internal, op).with_cause(cause)
    }

    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.source = Some(cause.into());
        self
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(cause) => write!(f, "{}: {}: {cause}", self.op, self.kind),
            None => write!(f, "{}: {}", self.op, self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display_includes_op_and_cause() {
        let err = ServiceError::internal(
            "service.create_task",
            UniflowError::Storage("disk full".into()),
        );
        assert_eq!(
            err.to_string(),
            "service.create_task: internal error: storage error: disk full"
        );
        assert!(err.is(ErrorKind::Internal));
    }

    #[test]
    fn test_service_error_without_cause() {
        let err = ServiceError::not_found("service.get_task");
        assert_eq!(err.to_string(), "service.get_task: not found");
        assert!(std::error::Error::source(&err).is_none());
    }
}
