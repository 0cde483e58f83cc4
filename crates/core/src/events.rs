//! Event sink backed by `tracing`.

use registrar_domain::constants::EVENT_TARGET;
use tracing::{error, info};

use crate::ports::{EventLevel, EventSink};

/// Forwards recorded events to the active `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&self, level: EventLevel, message: &str) {
        match level {
            EventLevel::Info => info!(target: EVENT_TARGET, "{message}"),
            EventLevel::Error => error!(target: EVENT_TARGET, "{message}"),
        }
    }
}
