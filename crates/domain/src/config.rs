//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHECK_PATH, DEFAULT_MAX_RETRIES, DEFAULT_REGISTER_PATH, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_DELAY_MS,
};
use crate::impl_domain_status_conversions;
use crate::types::{Credentials, ScheduleConfig};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub registry: RegistryConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub schedules: Vec<ScheduleConfig>,
}

/// Remote registry connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub base_url: String,
    #[serde(default = "default_check_path")]
    pub check_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    pub api_user: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl RegistryConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_user: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            check_path: default_check_path(),
            register_path: default_register_path(),
            api_user: api_user.into(),
            api_key: api_key.into(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: None,
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_user.clone(), self.api_key.clone())
    }

    pub fn endpoints(&self) -> RegistryEndpoints {
        RegistryEndpoints {
            check_path: self.check_path.clone(),
            register_path: self.register_path.clone(),
            credentials: self.credentials(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Endpoint paths and credentials used to build registry requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoints {
    pub check_path: String,
    pub register_path: String,
    pub credentials: Credentials,
}

impl RegistryEndpoints {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            check_path: default_check_path(),
            register_path: default_register_path(),
            credentials,
        }
    }
}

/// How attempt failures are classified before retrying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Every failure is retried identically up to the attempt limit.
    #[default]
    RetryAll,
    /// Client errors other than 408 and 429 stop the retry loop immediately.
    StopOnPermanent,
}

impl_domain_status_conversions!(FailurePolicy {
    RetryAll => "retry_all",
    StopOnPermanent => "stop_on_permanent",
});

/// Retry settings for the request executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Fixed wait between attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Total attempts per call, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl RetryConfig {
    pub fn new(retry_delay_ms: u64, max_retries: u32) -> Self {
        Self { retry_delay_ms, max_retries, failure_policy: FailurePolicy::RetryAll }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Attempt limit, never less than one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_DELAY_MS, DEFAULT_MAX_RETRIES)
    }
}

fn default_check_path() -> String {
    DEFAULT_CHECK_PATH.to_string()
}

fn default_register_path() -> String {
    DEFAULT_REGISTER_PATH.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}
