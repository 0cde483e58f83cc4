//! Check-then-register workflow for one or many domains.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use registrar_domain::{
    AvailabilityResult, BatchReport, DomainDisposition, DomainReport, RegistrarError,
    RegistrationDetail, RegistryEndpoints, Result,
};
use tracing::{info, instrument};

use crate::ports::{EventLevel, EventSink};
use crate::registry::{AvailabilityProber, RegistrationSubmitter};
use crate::retry::RetryingExecutor;

/// Drives availability checks and the registrations that depend on them.
///
/// Failures never escape: a domain whose check or registration exhausts its
/// retries is logged with its name and reported as
/// [`DomainDisposition::Failed`], and processing continues with the next
/// domain.
pub struct BatchOrchestrator {
    prober: AvailabilityProber,
    submitter: RegistrationSubmitter,
    events: Arc<dyn EventSink>,
}

impl BatchOrchestrator {
    /// Wire a prober and a submitter over a shared executor.
    pub fn new(
        executor: Arc<RetryingExecutor>,
        endpoints: RegistryEndpoints,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let endpoints = Arc::new(endpoints);
        Self {
            prober: AvailabilityProber::new(executor.clone(), endpoints.clone()),
            submitter: RegistrationSubmitter::new(executor, endpoints),
            events,
        }
    }

    pub fn from_parts(
        prober: AvailabilityProber,
        submitter: RegistrationSubmitter,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self { prober, submitter, events }
    }

    pub fn prober(&self) -> &AvailabilityProber {
        &self.prober
    }

    /// Check one domain and register it if, and only if, it is available.
    #[instrument(skip(self, detail))]
    pub async fn register_one(
        &self,
        domain: &str,
        detail: &RegistrationDetail,
    ) -> DomainDisposition {
        let checked = self.prober.check_availability(domain).await;
        self.settle(domain, checked, detail).await
    }

    /// Check every domain concurrently, then register the available ones one
    /// at a time in input order.
    ///
    /// No registration starts before every check has settled.
    #[instrument(skip(self, domains, detail), fields(domain_count = domains.len()))]
    pub async fn register_many(
        &self,
        domains: &[String],
        detail: &RegistrationDetail,
    ) -> BatchReport {
        let started_at = Utc::now();

        let checks =
            join_all(domains.iter().map(|domain| self.prober.check_availability(domain))).await;

        let mut reports = Vec::with_capacity(domains.len());
        for (domain, checked) in domains.iter().zip(checks) {
            let disposition = self.settle(domain, checked, detail).await;
            reports.push(DomainReport { domain: domain.clone(), disposition });
        }

        let report = BatchReport { started_at, finished_at: Utc::now(), domains: reports };
        let summary = report.summary();
        info!(
            total = summary.total,
            registered = summary.registered,
            rejected = summary.rejected,
            skipped = summary.skipped,
            failed = summary.failed,
            "batch finished"
        );
        report
    }

    async fn settle(
        &self,
        domain: &str,
        checked: Result<AvailabilityResult>,
        detail: &RegistrationDetail,
    ) -> DomainDisposition {
        let availability = match checked {
            Ok(availability) => availability,
            Err(err) => return self.failed(domain, "availability check", &err),
        };

        if !availability.status.is_available() {
            self.events.record(
                EventLevel::Info,
                &format!("{domain} is {}, skipping registration", availability.status),
            );
            return DomainDisposition::Skipped { status: availability.status };
        }

        match self.submitter.register_domain(domain, detail).await {
            Ok(outcome) => {
                if outcome.succeeded {
                    self.events.record(
                        EventLevel::Info,
                        &format!("{domain} registered: {}", outcome.response),
                    );
                } else {
                    self.events.record(
                        EventLevel::Error,
                        &format!("{domain} registration rejected: {}", outcome.response),
                    );
                }
                DomainDisposition::Registered { outcome }
            }
            Err(err) => self.failed(domain, "registration", &err),
        }
    }

    fn failed(&self, domain: &str, stage: &str, err: &RegistrarError) -> DomainDisposition {
        self.events.record(EventLevel::Error, &format!("{domain}: {stage} failed: {err}"));
        DomainDisposition::Failed { error: err.to_string() }
    }
}
