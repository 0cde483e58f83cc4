//! Resilient request execution
//!
//! Every registry call goes through [`RetryingExecutor`], which owns the
//! retry loop, the fixed inter-attempt delay, and failure reporting.

pub mod executor;
pub mod failure;

pub use executor::RetryingExecutor;
pub use failure::AttemptFailure;
