//! Recurring registration bindings.

use serde::{Deserialize, Serialize};

use crate::errors::{RegistrarError, Result};
use crate::types::registration::RegistrationDetail;

/// Binds a cron expression to a fixed domain set and registration detail.
///
/// Immutable after construction; re-scheduling means building a new binding
/// and discarding the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleBinding {
    cron_expression: String,
    domains: Vec<String>,
    detail: RegistrationDetail,
}

impl ScheduleBinding {
    /// Create a binding after normalising the expression to six or seven
    /// fields.
    ///
    /// # Errors
    /// Returns `RegistrarError::Schedule` when the expression does not have
    /// five, six, or seven fields, and `RegistrarError::InvalidInput` when no
    /// domains are given.
    pub fn new(
        cron_expression: &str,
        domains: Vec<String>,
        detail: RegistrationDetail,
    ) -> Result<Self> {
        let cron_expression = normalize_cron_expression(cron_expression)?;
        let domains: Vec<String> = domains
            .into_iter()
            .map(|domain| domain.trim().to_string())
            .filter(|domain| !domain.is_empty())
            .collect();

        if domains.is_empty() {
            return Err(RegistrarError::InvalidInput(
                "schedule binding requires at least one domain".into(),
            ));
        }

        Ok(Self { cron_expression, domains, detail })
    }

    /// Convenience constructor for a single-domain binding.
    pub fn single(
        cron_expression: &str,
        domain: impl Into<String>,
        detail: RegistrationDetail,
    ) -> Result<Self> {
        Self::new(cron_expression, vec![domain.into()], detail)
    }

    pub fn cron_expression(&self) -> &str {
        &self.cron_expression
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn detail(&self) -> &RegistrationDetail {
        &self.detail
    }
}

/// Serializable form of a binding as it appears in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub cron: String,
    pub domains: Vec<String>,
    #[serde(default)]
    pub registration: RegistrationDetail,
}

impl TryFrom<&ScheduleConfig> for ScheduleBinding {
    type Error = RegistrarError;

    fn try_from(entry: &ScheduleConfig) -> Result<Self> {
        Self::new(&entry.cron, entry.domains.clone(), entry.registration.clone())
    }
}

/// Normalise a cron expression so the seconds field is always present.
///
/// Five-field expressions get a leading `0` seconds field. Six- and
/// seven-field (with year) expressions are returned with whitespace
/// collapsed.
pub fn normalize_cron_expression(expression: &str) -> Result<String> {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    match fields.len() {
        5 => Ok(format!("0 {}", fields.join(" "))),
        6 | 7 => Ok(fields.join(" ")),
        count => Err(RegistrarError::Schedule(format!(
            "expected 5 to 7 cron fields, got {count} in '{}'",
            expression.trim()
        ))),
    }
}
