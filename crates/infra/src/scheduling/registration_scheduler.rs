//! Cron-driven registration scheduler.
//!
//! Each [`ScheduleBinding`] becomes one cron job. When a job fires it runs the
//! check-then-register workflow for the binding's domains: a single-domain
//! binding goes through `register_one`, anything larger through
//! `register_many`. Every matching instant starts a run, even while an
//! earlier run of the same binding is still going, unless
//! [`RegistrationSchedulerConfig::skip_overlapping`] is set.
//!
//! Expressions are evaluated in UTC.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use registrar_core::BatchOrchestrator;
//! use registrar_domain::{RegistrationDetail, ScheduleBinding};
//! use registrar_infra::scheduling::{RegistrationScheduler, SchedulerResult};
//!
//! # async fn example(orchestrator: Arc<BatchOrchestrator>) -> SchedulerResult<()> {
//! let mut scheduler = RegistrationScheduler::new(orchestrator).await?;
//! let binding = ScheduleBinding::single("0 9 * * *", "launch.io", RegistrationDetail::new())
//!     .expect("valid binding");
//!
//! scheduler.schedule(binding).await?;
//! scheduler.start().await?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use registrar_core::BatchOrchestrator;
use registrar_domain::ScheduleBinding;
use tokio::sync::{Mutex, RwLock};
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Lifecycle timeouts and firing behaviour.
#[derive(Debug, Clone)]
pub struct RegistrationSchedulerConfig {
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
    /// Timeout for adding or removing a job.
    pub job_timeout: Duration,
    /// Drop a tick while the previous run of the same binding is in progress.
    pub skip_overlapping: bool,
}

impl Default for RegistrationSchedulerConfig {
    fn default() -> Self {
        Self {
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
            job_timeout: Duration::from_secs(5),
            skip_overlapping: false,
        }
    }
}

/// Registration scheduler with explicit lifecycle management.
///
/// Once stopped, the scheduler cannot be started again; build a new one.
pub struct RegistrationScheduler {
    scheduler: Arc<RwLock<JobScheduler>>,
    orchestrator: Arc<BatchOrchestrator>,
    config: RegistrationSchedulerConfig,
    jobs: HashMap<Uuid, ScheduleBinding>,
    cancellation: CancellationToken,
    started: bool,
}

impl RegistrationScheduler {
    /// Create a scheduler with the default configuration.
    pub async fn new(orchestrator: Arc<BatchOrchestrator>) -> SchedulerResult<Self> {
        Self::with_config(orchestrator, RegistrationSchedulerConfig::default()).await
    }

    /// Create a scheduler with a custom configuration.
    pub async fn with_config(
        orchestrator: Arc<BatchOrchestrator>,
        config: RegistrationSchedulerConfig,
    ) -> SchedulerResult<Self> {
        let raw_scheduler =
            JobScheduler::new().await.map_err(|e| SchedulerError::CreationFailed(e.to_string()))?;

        Ok(Self {
            scheduler: Arc::new(RwLock::new(raw_scheduler)),
            orchestrator,
            config,
            jobs: HashMap::new(),
            cancellation: CancellationToken::new(),
            started: false,
        })
    }

    /// Register a binding as a cron job and return its job id.
    ///
    /// Bindings may be added before or after `start`.
    ///
    /// # Errors
    /// Returns `SchedulerError::InvalidExpression` if the cron expression is
    /// rejected, or `SchedulerError::JobRegistrationFailed` if the job cannot
    /// be added.
    #[instrument(skip(self, binding), fields(cron = %binding.cron_expression()))]
    pub async fn schedule(&mut self, binding: ScheduleBinding) -> SchedulerResult<Uuid> {
        let orchestrator = self.orchestrator.clone();
        let cancel = self.cancellation.clone();
        let in_flight = self.config.skip_overlapping.then(|| Arc::new(Mutex::new(())));
        let job_binding = binding.clone();

        let job = Job::new_async(binding.cron_expression(), move |job_id, _lock| {
            let orchestrator = orchestrator.clone();
            let cancel = cancel.clone();
            let in_flight = in_flight.clone();
            let binding = job_binding.clone();

            Box::pin(async move {
                if cancel.is_cancelled() {
                    debug!(%job_id, "scheduler cancelled, ignoring tick");
                    return;
                }
                let _guard = match in_flight.map(Mutex::try_lock_owned) {
                    Some(Err(_)) => {
                        warn!(%job_id, "previous run still in progress, skipping tick");
                        return;
                    }
                    Some(Ok(guard)) => Some(guard),
                    None => None,
                };
                fire(&orchestrator, &binding, job_id).await;
            })
        })
        .map_err(|e| SchedulerError::InvalidExpression {
            expression: binding.cron_expression().to_string(),
            reason: e.to_string(),
        })?;

        let job_id = job.guid();
        let scheduler = self.scheduler.clone();
        let job_timeout = self.config.job_timeout;
        tokio::time::timeout(job_timeout, async move {
            let guard = scheduler.read().await;
            guard.add(job).await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { seconds: job_timeout.as_secs() })?
        .map_err(|e| SchedulerError::JobRegistrationFailed(e.to_string()))?;

        debug!(%job_id, domains = binding.domains().len(), "registered schedule");
        self.jobs.insert(job_id, binding);
        Ok(job_id)
    }

    /// Remove a previously scheduled binding.
    ///
    /// # Errors
    /// Returns `SchedulerError::UnknownJob` if the id was never scheduled here.
    #[instrument(skip(self))]
    pub async fn unschedule(&mut self, job_id: Uuid) -> SchedulerResult<ScheduleBinding> {
        if !self.jobs.contains_key(&job_id) {
            return Err(SchedulerError::UnknownJob(job_id));
        }

        let scheduler = self.scheduler.clone();
        let job_timeout = self.config.job_timeout;
        tokio::time::timeout(job_timeout, async move {
            let guard = scheduler.read().await;
            guard.remove(&job_id).await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { seconds: job_timeout.as_secs() })?
        .map_err(|e| SchedulerError::UnscheduleFailed(e.to_string()))?;

        debug!(%job_id, "removed schedule");
        self.jobs.remove(&job_id).ok_or(SchedulerError::UnknownJob(job_id))
    }

    /// Start firing scheduled jobs.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }
        if self.cancellation.is_cancelled() {
            return Err(SchedulerError::StartFailed("scheduler has been shut down".into()));
        }

        let scheduler = self.scheduler.clone();
        let start_timeout = self.config.start_timeout;
        tokio::time::timeout(start_timeout, async move {
            let guard = scheduler.read().await;
            guard.start().await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { seconds: start_timeout.as_secs() })?
        .map_err(|e| SchedulerError::StartFailed(e.to_string()))?;

        self.started = true;
        info!(jobs = self.jobs.len(), "Registration scheduler started");
        Ok(())
    }

    /// Stop the scheduler. Runs already in progress finish on their own.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        let scheduler = self.scheduler.clone();
        let stop_timeout = self.config.stop_timeout;
        tokio::time::timeout(stop_timeout, async move {
            let mut guard = scheduler.write().await;
            guard.shutdown().await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { seconds: stop_timeout.as_secs() })?
        .map_err(|e| SchedulerError::StopFailed(e.to_string()))?;

        self.cancellation.cancel();
        self.started = false;
        info!("Registration scheduler stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.cancellation.is_cancelled()
    }

    /// Bindings currently scheduled, keyed by job id.
    pub fn bindings(&self) -> &HashMap<Uuid, ScheduleBinding> {
        &self.jobs
    }
}

async fn fire(orchestrator: &BatchOrchestrator, binding: &ScheduleBinding, job_id: Uuid) {
    match binding.domains() {
        [domain] => {
            let disposition = orchestrator.register_one(domain, binding.detail()).await;
            info!(%job_id, %domain, registered = disposition.is_registered(), "scheduled registration finished");
        }
        domains => {
            let summary = orchestrator.register_many(domains, binding.detail()).await.summary();
            info!(
                %job_id,
                total = summary.total,
                registered = summary.registered,
                failed = summary.failed,
                "scheduled batch finished"
            );
        }
    }
}

impl Drop for RegistrationScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("RegistrationScheduler dropped while running; cancelling jobs");
            self.cancellation.cancel();

            // Shutdown needs the runtime; outside one the token alone stops firings.
            if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                let scheduler = self.scheduler.clone();
                runtime.spawn(async move {
                    let mut guard = scheduler.write().await;
                    if let Err(err) = guard.shutdown().await {
                        warn!(error = %err, "job scheduler shutdown after drop failed");
                    }
                });
            }
        }
    }
}
