//! Application context - dependency injection container

use std::sync::Arc;

use registrar_core::{BatchOrchestrator, RetryingExecutor, TracingEventSink, Transport};
use registrar_domain::{Config, Result, ScheduleBinding};
use registrar_infra::HttpTransport;

/// Application context - holds the wired workflow and its configuration
pub struct AppContext {
    pub config: Config,
    pub orchestrator: Arc<BatchOrchestrator>,
}

impl AppContext {
    /// Wire the HTTP transport described by `config`.
    ///
    /// # Errors
    /// Returns `RegistrarError::Config` if the registry URL is invalid.
    pub fn new(config: Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::from_config(&config.registry)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Wire the workflow over an arbitrary transport.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let events = Arc::new(TracingEventSink);
        let executor =
            Arc::new(RetryingExecutor::new(transport, events.clone(), config.retry.clone()));
        let orchestrator = Arc::new(BatchOrchestrator::new(
            executor,
            config.registry.endpoints(),
            events,
        ));

        Self { config, orchestrator }
    }

    /// Convert every configured schedule into a binding.
    ///
    /// # Errors
    /// Fails on the first schedule with a malformed expression or no domains.
    pub fn bindings(&self) -> Result<Vec<ScheduleBinding>> {
        self.config.schedules.iter().map(ScheduleBinding::try_from).collect()
    }
}
