//! Single-attempt failures and their classification.

use registrar_domain::{FailurePolicy, RegistrarError, TransportResponse};
use serde_json::Value;
use thiserror::Error;

const MAX_BODY_CHARS: usize = 256;

/// Why one attempt failed.
///
/// Never escapes the executor: it is logged and folded into the next attempt
/// or into `RegistrarError::ExhaustedRetries`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttemptFailure {
    /// No response was received.
    #[error("{0}")]
    Transport(String),

    /// The registry answered with a non-2xx status.
    #[error("HTTP {status}: {}", summarize_body(.body))]
    Status { status: u16, body: Value },
}

impl AttemptFailure {
    pub fn from_response(response: TransportResponse) -> Self {
        Self::Status { status: response.status, body: response.body }
    }

    /// Client errors other than request-timeout and rate-limit cannot succeed
    /// on a plain retry.
    pub fn is_permanent(&self) -> bool {
        match self {
            Self::Transport(_) => false,
            Self::Status { status, .. } => (400..500).contains(status) && !matches!(status, 408 | 429),
        }
    }

    /// Whether the executor should stop retrying after this failure.
    pub fn stops_retries(&self, policy: FailurePolicy) -> bool {
        match policy {
            FailurePolicy::RetryAll => false,
            FailurePolicy::StopOnPermanent => self.is_permanent(),
        }
    }
}

impl From<RegistrarError> for AttemptFailure {
    fn from(err: RegistrarError) -> Self {
        match err {
            RegistrarError::Network(message) => Self::Transport(message),
            other => Self::Transport(other.to_string()),
        }
    }
}

fn summarize_body(body: &Value) -> String {
    let rendered = match body {
        Value::String(text) => text.clone(),
        Value::Null => "<empty body>".to_string(),
        other => other.to_string(),
    };

    if rendered.chars().count() <= MAX_BODY_CHARS {
        return rendered;
    }

    let mut truncated: String = rendered.chars().take(MAX_BODY_CHARS).collect();
    truncated.push_str("...");
    truncated
}
