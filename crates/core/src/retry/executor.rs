//! Bounded-retry request execution with a fixed delay between attempts.

use std::sync::Arc;

use registrar_domain::{RegistrarError, RequestDescriptor, Result, RetryConfig};
use serde_json::Value;
use tracing::{debug, instrument};

use super::failure::AttemptFailure;
use crate::ports::{EventLevel, EventSink, Transport};

/// Per-call retry bookkeeping. Lives for exactly one `execute` invocation.
#[derive(Debug)]
struct RetryState {
    attempt: u32,
    max_attempts: u32,
    last_error: Option<AttemptFailure>,
}

impl RetryState {
    fn new(max_attempts: u32) -> Self {
        Self { attempt: 0, max_attempts, last_error: None }
    }

    fn has_attempts_left(&self) -> bool {
        self.attempt < self.max_attempts
    }
}

/// Wraps a [`Transport`] with bounded retries and failure reporting.
///
/// Every failed attempt is recorded on the event sink with its attempt
/// number. Between attempts the caller is suspended for the configured fixed
/// delay; the delay never grows. After the last attempt a terminal event is
/// recorded and `RegistrarError::ExhaustedRetries` is returned.
pub struct RetryingExecutor {
    transport: Arc<dyn Transport>,
    events: Arc<dyn EventSink>,
    config: RetryConfig,
}

impl RetryingExecutor {
    pub fn new(
        transport: Arc<dyn Transport>,
        events: Arc<dyn EventSink>,
        config: RetryConfig,
    ) -> Self {
        Self { transport, events, config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute the request, returning the body of the first 2xx response.
    ///
    /// # Errors
    /// Returns `RegistrarError::ExhaustedRetries` carrying the most recent
    /// failure once every attempt has failed.
    #[instrument(
        skip(self, request),
        fields(method = %request.method(), endpoint = request.endpoint())
    )]
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<Value> {
        let mut state = RetryState::new(self.config.max_attempts());
        let delay = self.config.retry_delay();

        while state.has_attempts_left() {
            state.attempt += 1;

            let failure = match self.transport.send(request).await {
                Ok(response) if response.is_success() => {
                    debug!(attempt = state.attempt, status = response.status, "request succeeded");
                    return Ok(response.body);
                }
                Ok(response) => AttemptFailure::from_response(response),
                Err(err) => AttemptFailure::from(err),
            };

            self.events.record(
                EventLevel::Error,
                &format!(
                    "{} {} attempt {}/{} failed: {}",
                    request.method(),
                    request.endpoint(),
                    state.attempt,
                    state.max_attempts,
                    failure
                ),
            );

            let stop = failure.stops_retries(self.config.failure_policy);
            state.last_error = Some(failure);

            if stop {
                debug!(attempt = state.attempt, "permanent failure, not retrying");
                break;
            }

            if state.has_attempts_left() && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        let last_error = state
            .last_error
            .map_or_else(|| "no attempt was made".to_string(), |failure| failure.to_string());

        self.events.record(
            EventLevel::Error,
            &format!(
                "{} {} failed after {} attempts: {}",
                request.method(),
                request.endpoint(),
                state.attempt,
                last_error
            ),
        );

        Err(RegistrarError::ExhaustedRetries { attempts: state.attempt, last_error })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use registrar_domain::{Credentials, FailurePolicy, TransportResponse};
    use serde_json::json;
    use tokio::time::Instant;

    use super::*;

    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<TransportResponse>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<Result<TransportResponse>>) -> Self {
            Self { replies: Mutex::new(replies.into()), calls: Mutex::new(0) }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, _request: &RequestDescriptor) -> Result<TransportResponse> {
            *self.calls.lock().unwrap() += 1;
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RegistrarError::Network("script exhausted".into())))
        }
    }

    #[derive(Default)]
    struct CollectingSink {
        events: Mutex<Vec<(EventLevel, String)>>,
    }

    impl CollectingSink {
        fn messages(&self) -> Vec<String> {
            self.events.lock().unwrap().iter().map(|(_, msg)| msg.clone()).collect()
        }
    }

    impl EventSink for CollectingSink {
        fn record(&self, level: EventLevel, message: &str) {
            self.events.lock().unwrap().push((level, message.to_string()));
        }
    }

    fn request() -> RequestDescriptor {
        RequestDescriptor::get(
            "/domains/check",
            vec![("domain".into(), "example.com".into())],
            Credentials::new("u", "k"),
        )
    }

    fn ok(body: Value) -> Result<TransportResponse> {
        Ok(TransportResponse::new(200, body))
    }

    /// Paused-clock sleeps may round up to the next timer tick.
    fn assert_waited(started: Instant, expected: Duration) {
        let elapsed = started.elapsed();
        assert!(elapsed >= expected, "waited {elapsed:?}, expected {expected:?}");
        assert!(elapsed < expected + Duration::from_millis(20), "waited {elapsed:?}");
    }

    fn executor(
        replies: Vec<Result<TransportResponse>>,
        config: RetryConfig,
    ) -> (RetryingExecutor, Arc<ScriptedTransport>, Arc<CollectingSink>) {
        let transport = Arc::new(ScriptedTransport::new(replies));
        let sink = Arc::new(CollectingSink::default());
        let executor = RetryingExecutor::new(transport.clone(), sink.clone(), config);
        (executor, transport, sink)
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_success_logs_nothing_and_waits_nothing() {
        let (executor, transport, sink) =
            executor(vec![ok(json!({ "status": "available" }))], RetryConfig::default());

        let started = Instant::now();
        let body = executor.execute(&request()).await.expect("success");

        assert_eq!(body, json!({ "status": "available" }));
        assert_eq!(transport.calls(), 1);
        assert!(sink.messages().is_empty());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_k_failures_with_k_delays() {
        let replies = vec![
            Err(RegistrarError::Network("connection reset".into())),
            Ok(TransportResponse::new(502, json!("bad gateway"))),
            ok(json!({ "ok": true })),
        ];
        let (executor, transport, sink) = executor(replies, RetryConfig::default());

        let started = Instant::now();
        let body = executor.execute(&request()).await.expect("eventual success");

        assert_eq!(body, json!({ "ok": true }));
        assert_eq!(transport.calls(), 3);
        assert_waited(started, Duration::from_millis(400));

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("attempt 1/5"));
        assert!(messages[0].contains("connection reset"));
        assert!(messages[1].contains("attempt 2/5"));
        assert!(messages[1].contains("HTTP 502: bad gateway"));
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_reports_last_failure() {
        let replies = (1..=5)
            .map(|n| Ok(TransportResponse::new(500, json!(format!("failure {n}")))))
            .collect();
        let (executor, transport, sink) = executor(replies, RetryConfig::default());

        let started = Instant::now();
        let err = executor.execute(&request()).await.expect_err("exhausted");

        assert_eq!(
            err,
            RegistrarError::ExhaustedRetries {
                attempts: 5,
                last_error: "HTTP 500: failure 5".into()
            }
        );
        assert_eq!(transport.calls(), 5);
        // no delay after the final attempt
        assert_waited(started, Duration::from_millis(800));

        let messages = sink.messages();
        assert_eq!(messages.len(), 6);
        assert!(messages[5].contains("failed after 5 attempts"));
        assert!(messages[5].contains("failure 5"));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_fixed_not_exponential() {
        let replies = vec![
            Err(RegistrarError::Network("down".into())),
            Err(RegistrarError::Network("down".into())),
            Err(RegistrarError::Network("down".into())),
            ok(json!({})),
        ];
        let (executor, _, _) = executor(replies, RetryConfig::new(50, 5));

        let started = Instant::now();
        executor.execute(&request()).await.expect("success on fourth attempt");

        assert_waited(started, Duration::from_millis(150));
    }

    #[tokio::test(start_paused = true)]
    async fn client_errors_are_retried_by_default() {
        let replies = vec![Ok(TransportResponse::new(400, json!("bad contact"))), ok(json!({}))];
        let (executor, transport, _) = executor(replies, RetryConfig::default());

        executor.execute(&request()).await.expect("retried past 400");
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_on_permanent_gives_up_on_client_errors() {
        let replies = vec![Ok(TransportResponse::new(422, json!("invalid tld"))), ok(json!({}))];
        let config = RetryConfig::default().with_failure_policy(FailurePolicy::StopOnPermanent);
        let (executor, transport, sink) = executor(replies, config);

        let started = Instant::now();
        let err = executor.execute(&request()).await.expect_err("permanent failure");

        assert_eq!(
            err,
            RegistrarError::ExhaustedRetries { attempts: 1, last_error: "HTTP 422: invalid tld".into() }
        );
        assert_eq!(transport.calls(), 1);
        assert_eq!(sink.messages().len(), 2);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_max_retries_still_attempts_once() {
        let (executor, transport, _) = executor(
            vec![Err(RegistrarError::Network("refused".into()))],
            RetryConfig::new(200, 0),
        );

        let err = executor.execute(&request()).await.expect_err("single attempt fails");
        assert!(matches!(err, RegistrarError::ExhaustedRetries { attempts: 1, .. }));
        assert_eq!(transport.calls(), 1);
    }
}
