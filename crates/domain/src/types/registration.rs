//! Registration requests, outcomes, and batch reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{ERROR_FIELD, SUCCESS_FIELD};
use crate::errors::{RegistrarError, Result};
use crate::types::availability::AvailabilityStatus;

/// Caller-supplied registration fields (contacts, period, nameservers, ...).
///
/// The contents are opaque to the client and forwarded to the registry as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationDetail(Map<String, Value>);

impl RegistrationDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any previous value for the key.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RegistrationDetail {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for RegistrationDetail {
    type Error = RegistrarError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            Value::Null => Ok(Self::default()),
            other => Err(RegistrarError::InvalidInput(format!(
                "registration detail must be a JSON object, got {other}"
            ))),
        }
    }
}

/// Result of submitting one registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    pub domain: String,
    pub succeeded: bool,
    pub response: Value,
}

impl RegistrationOutcome {
    /// Interpret an accepted (2xx) registration response.
    ///
    /// The registration only counts as failed when the body says so with
    /// `"success": false` or a non-null `"error"`.
    pub fn from_response(domain: impl Into<String>, response: Value) -> Self {
        let explicit_failure = matches!(response.get(SUCCESS_FIELD), Some(Value::Bool(false)))
            || response.get(ERROR_FIELD).is_some_and(|err| !err.is_null());
        Self { domain: domain.into(), succeeded: !explicit_failure, response }
    }
}

/// What happened to one domain in a check-then-register pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "disposition", rename_all = "snake_case")]
pub enum DomainDisposition {
    /// Domain was available and a registration was submitted.
    Registered { outcome: RegistrationOutcome },
    /// Domain was not available; no registration was attempted.
    Skipped { status: AvailabilityStatus },
    /// The check or the registration exhausted its retries.
    Failed { error: String },
}

impl DomainDisposition {
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { outcome } if outcome.succeeded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Per-domain result of a batch, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainReport {
    pub domain: String,
    pub disposition: DomainDisposition,
}

/// Report returned by a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub domains: Vec<DomainReport>,
}

/// Aggregate counters for a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub registered: usize,
    pub rejected: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn summary(&self) -> BatchSummary {
        self.domains.iter().fold(
            BatchSummary { total: self.domains.len(), ..BatchSummary::default() },
            |mut acc, report| {
                match &report.disposition {
                    DomainDisposition::Registered { outcome } if outcome.succeeded => {
                        acc.registered += 1;
                    }
                    DomainDisposition::Registered { .. } => acc.rejected += 1,
                    DomainDisposition::Skipped { .. } => acc.skipped += 1,
                    DomainDisposition::Failed { .. } => acc.failed += 1,
                }
                acc
            },
        )
    }

    /// Look up the disposition recorded for a domain.
    pub fn disposition(&self, domain: &str) -> Option<&DomainDisposition> {
        self.domains.iter().find(|report| report.domain == domain).map(|r| &r.disposition)
    }
}
