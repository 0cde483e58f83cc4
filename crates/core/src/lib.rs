//! # Registrar Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for the transport and the event sink
//! - The retrying request executor
//! - Availability and registration operations
//! - The batch orchestrator
//!
//! ## Architecture Principles
//! - Only depends on `registrar-domain`
//! - No HTTP or scheduler code
//! - All external dependencies via traits
//! - Configuration is passed in explicitly, never read from the environment

pub mod batch;
pub mod events;
pub mod ports;
pub mod registry;
pub mod retry;

pub use batch::BatchOrchestrator;
pub use events::TracingEventSink;
pub use ports::{EventLevel, EventSink, Transport};
pub use registry::{AvailabilityProber, RegistrationSubmitter};
pub use retry::{AttemptFailure, RetryingExecutor};
