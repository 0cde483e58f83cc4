//! # Registrar Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The reqwest-backed registry transport
//! - Configuration loading (environment and TOML/JSON files)
//! - Cron scheduling of recurring registrations
//!
//! ## Architecture
//! - Implements traits defined in `registrar-core`
//! - Converts third-party errors into `RegistrarError`
//! - Contains all "impure" code (network, filesystem, timers)

pub mod config;
pub mod errors;
pub mod http;
pub mod scheduling;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpTransport, HttpTransportBuilder};
pub use scheduling::{
    RegistrationScheduler, RegistrationSchedulerConfig, SchedulerError, SchedulerResult,
};
