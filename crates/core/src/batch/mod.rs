//! Batch check-and-register orchestration

pub mod orchestrator;

pub use orchestrator::BatchOrchestrator;
