//! Availability lookup results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::STATUS_FIELD;
use crate::impl_domain_status_conversions;

/// Availability of a single domain as reported by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
    /// The response had no recognizable status. Never treated as available.
    Unknown,
}

impl_domain_status_conversions!(AvailabilityStatus {
    Available => "available",
    Unavailable => "unavailable",
    Unknown => "unknown",
});

impl AvailabilityStatus {
    /// Interpret the `status` field of a check response.
    ///
    /// Strings `available`/`unavailable` and booleans map directly; anything
    /// else, including a missing field, is `Unknown`.
    pub fn from_response(body: &Value) -> Self {
        match body.get(STATUS_FIELD) {
            Some(Value::Bool(true)) => Self::Available,
            Some(Value::Bool(false)) => Self::Unavailable,
            Some(Value::String(raw)) => match raw.parse::<Self>() {
                Ok(Self::Unknown) | Err(_) => Self::Unknown,
                Ok(status) => status,
            },
            _ => Self::Unknown,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Outcome of checking one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub domain: String,
    pub status: AvailabilityStatus,
    /// Full response body, passed through unexamined.
    pub raw: Value,
}

impl AvailabilityResult {
    pub fn from_response(domain: impl Into<String>, body: Value) -> Self {
        let status = AvailabilityStatus::from_response(&body);
        Self { domain: domain.into(), status, raw: body }
    }
}
