//! Availability lookups for single domains.

use std::sync::Arc;

use registrar_domain::constants::DOMAIN_FIELD;
use registrar_domain::{AvailabilityResult, RegistryEndpoints, RequestDescriptor, Result};
use tracing::{debug, instrument};

use crate::retry::RetryingExecutor;

/// Checks whether a domain can be registered.
#[derive(Clone)]
pub struct AvailabilityProber {
    executor: Arc<RetryingExecutor>,
    endpoints: Arc<RegistryEndpoints>,
}

impl AvailabilityProber {
    pub fn new(executor: Arc<RetryingExecutor>, endpoints: Arc<RegistryEndpoints>) -> Self {
        Self { executor, endpoints }
    }

    /// Build the read-only check request for a domain.
    pub fn check_request(&self, domain: &str) -> RequestDescriptor {
        RequestDescriptor::get(
            self.endpoints.check_path.clone(),
            vec![(DOMAIN_FIELD.to_string(), domain.to_string())],
            self.endpoints.credentials.clone(),
        )
    }

    /// Check one domain.
    ///
    /// Only the `status` field of the response is interpreted; a response
    /// without a recognizable status yields `AvailabilityStatus::Unknown`.
    ///
    /// # Errors
    /// Propagates `RegistrarError::ExhaustedRetries` from the executor.
    #[instrument(skip(self))]
    pub async fn check_availability(&self, domain: &str) -> Result<AvailabilityResult> {
        let request = self.check_request(domain);
        let body = self.executor.execute(&request).await?;
        let result = AvailabilityResult::from_response(domain, body);

        debug!(status = %result.status, "availability checked");
        Ok(result)
    }
}
