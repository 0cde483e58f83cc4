//! Registration submission for single domains.

use std::sync::Arc;

use registrar_domain::constants::DOMAIN_FIELD;
use registrar_domain::{
    RegistrationDetail, RegistrationOutcome, RegistryEndpoints, RequestDescriptor, Result,
};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::retry::RetryingExecutor;

/// Submits registration requests.
///
/// The registration detail is forwarded without validation; anything the
/// registry rejects surfaces as an attempt failure.
#[derive(Clone)]
pub struct RegistrationSubmitter {
    executor: Arc<RetryingExecutor>,
    endpoints: Arc<RegistryEndpoints>,
}

impl RegistrationSubmitter {
    pub fn new(executor: Arc<RetryingExecutor>, endpoints: Arc<RegistryEndpoints>) -> Self {
        Self { executor, endpoints }
    }

    /// Build the write request. The `domain` field always wins over a
    /// same-named key in the detail.
    pub fn register_request(&self, domain: &str, detail: &RegistrationDetail) -> RequestDescriptor {
        let mut body = detail.fields().clone();
        body.insert(DOMAIN_FIELD.to_string(), Value::String(domain.to_string()));

        RequestDescriptor::post(
            self.endpoints.register_path.clone(),
            Value::Object(body),
            self.endpoints.credentials.clone(),
        )
    }

    /// Register one domain.
    ///
    /// # Errors
    /// Propagates `RegistrarError::ExhaustedRetries` from the executor.
    #[instrument(skip(self, detail))]
    pub async fn register_domain(
        &self,
        domain: &str,
        detail: &RegistrationDetail,
    ) -> Result<RegistrationOutcome> {
        let request = self.register_request(domain, detail);
        let body = self.executor.execute(&request).await?;
        let outcome = RegistrationOutcome::from_response(domain, body);

        debug!(succeeded = outcome.succeeded, "registration submitted");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use registrar_domain::{Credentials, RequestMethod, RetryConfig, TransportResponse};
    use serde_json::json;

    use super::*;
    use crate::ports::{EventLevel, EventSink, Transport};

    struct FixedTransport(TransportResponse);

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(&self, _request: &RequestDescriptor) -> Result<TransportResponse> {
            Ok(self.0.clone())
        }
    }

    struct NullSink;

    impl EventSink for NullSink {
        fn record(&self, _level: EventLevel, _message: &str) {}
    }

    fn submitter(response: TransportResponse) -> RegistrationSubmitter {
        let executor = Arc::new(RetryingExecutor::new(
            Arc::new(FixedTransport(response)),
            Arc::new(NullSink),
            RetryConfig::new(0, 1),
        ));
        let endpoints = RegistryEndpoints::new(Credentials::new("reseller", "key-123"));
        RegistrationSubmitter::new(executor, Arc::new(endpoints))
    }

    #[test]
    fn register_request_merges_detail_under_domain() {
        let detail = RegistrationDetail::new()
            .with_field("years", 2)
            .with_field("domain", "spoofed.io");
        let request =
            submitter(TransportResponse::new(200, json!({}))).register_request("real.io", &detail);

        assert_eq!(request.method(), RequestMethod::Post);
        assert_eq!(request.endpoint(), "/domains/register");
        assert_eq!(request.body(), Some(&json!({ "domain": "real.io", "years": 2 })));
    }

    #[tokio::test]
    async fn explicit_failure_body_is_not_a_success() {
        let outcome = submitter(TransportResponse::new(200, json!({ "success": false })))
            .register_domain("real.io", &RegistrationDetail::new())
            .await
            .expect("registry answered");

        assert!(!outcome.succeeded);
        assert_eq!(outcome.domain, "real.io");
    }
}
