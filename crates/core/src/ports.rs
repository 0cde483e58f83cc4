//! Port interfaces for the registry client
//!
//! The transport and the log sink are external collaborators; the core only
//! talks to them through these traits.

use async_trait::async_trait;
use registrar_domain::{RequestDescriptor, Result, TransportResponse};

/// Executes a single registry request.
///
/// Implementations return `Ok` for any response that was received, whatever
/// its status code, and `Err(RegistrarError::Network)` when no response came
/// back. Status interpretation and retries belong to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one attempt for the given request.
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse>;
}

/// Severity of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventLevel {
    Info,
    Error,
}

/// Sink for human-readable operational events.
pub trait EventSink: Send + Sync {
    /// Record a formatted message at the given level.
    fn record(&self, level: EventLevel, message: &str);
}
