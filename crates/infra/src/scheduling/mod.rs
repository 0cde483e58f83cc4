//! Cron-based scheduling of recurring registrations
//!
//! The scheduler follows the runtime rules used across this crate:
//! - Explicit lifecycle management (start/stop)
//! - Cancellation token support
//! - Timeout wrapping on scheduler operations
//! - Structured tracing

pub mod error;
pub mod registration_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use registration_scheduler::{RegistrationScheduler, RegistrationSchedulerConfig};
