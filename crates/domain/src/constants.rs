//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Retry defaults
pub const DEFAULT_RETRY_DELAY_MS: u64 = 200;
pub const DEFAULT_MAX_RETRIES: u32 = 5;

// Registry endpoints
pub const DEFAULT_CHECK_PATH: &str = "/domains/check";
pub const DEFAULT_REGISTER_PATH: &str = "/domains/register";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Response fields interpreted by the client
pub const STATUS_FIELD: &str = "status";
pub const SUCCESS_FIELD: &str = "success";
pub const ERROR_FIELD: &str = "error";
pub const DOMAIN_FIELD: &str = "domain";

// Log sink target used by the tracing-backed event sink
pub const EVENT_TARGET: &str = "registrar::events";
