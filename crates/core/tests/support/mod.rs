//! Shared test helpers for `registrar-core` integration tests.
//!
//! These helpers provide an in-memory registry and a recording event sink so
//! that orchestration tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod events;
pub mod registry;

pub use events::RecordingSink;
pub use registry::{Call, CallKind, MockRegistry, Reply};
