//! # Registrar API
//!
//! Application layer for the `registrar` binary.
//!
//! This crate contains:
//! - Command-line parsing
//! - Application context (dependency injection)
//! - Command handlers for one-shot checks, one-shot registrations, and the
//!   long-running scheduler
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the HTTP transport, event sink, and retrying executor together

pub mod cli;
pub mod commands;
pub mod context;
pub mod logging;

// Re-export for convenience
pub use cli::{Cli, Command};
pub use context::AppContext;
