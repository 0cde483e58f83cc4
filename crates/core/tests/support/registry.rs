use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use registrar_core::Transport;
use registrar_domain::{
    RegistrarError, RequestDescriptor, RequestMethod, Result as DomainResult, TransportResponse,
};
use serde_json::{json, Value};

/// Scripted answer for one attempt.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, Value),
    NetworkError(String),
}

impl Reply {
    pub fn available() -> Self {
        Self::Status(200, json!({ "status": "available" }))
    }

    pub fn unavailable() -> Self {
        Self::Status(200, json!({ "status": "unavailable" }))
    }

    pub fn registered(order_id: u64) -> Self {
        Self::Status(200, json!({ "success": true, "orderId": order_id }))
    }

    pub fn server_error() -> Self {
        Self::Status(503, json!("service unavailable"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Check,
    Register,
}

/// One attempt seen by the mock, in the order it was logged.
#[derive(Debug, Clone)]
pub struct Call {
    pub kind: CallKind,
    pub domain: String,
    pub request: RequestDescriptor,
}

/// In-memory registry implementing the `Transport` port.
///
/// Replies are scripted per domain and per operation. The last scripted reply
/// repeats once the queue is down to one entry. Unscripted domains answer
/// with a network error. Checks are logged when they complete; registrations
/// are logged when they start.
#[derive(Default)]
pub struct MockRegistry {
    checks: Mutex<HashMap<String, VecDeque<Reply>>>,
    registrations: Mutex<HashMap<String, VecDeque<Reply>>>,
    check_latency: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<Call>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_check(self, domain: &str, replies: Vec<Reply>) -> Self {
        self.checks.lock().unwrap().insert(domain.to_string(), replies.into());
        self
    }

    pub fn on_register(self, domain: &str, replies: Vec<Reply>) -> Self {
        self.registrations.lock().unwrap().insert(domain.to_string(), replies.into());
        self
    }

    pub fn with_check_latency(self, domain: &str, latency: Duration) -> Self {
        self.check_latency.lock().unwrap().insert(domain.to_string(), latency);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, kind: CallKind) -> Vec<Call> {
        self.calls().into_iter().filter(|call| call.kind == kind).collect()
    }

    pub fn registered_domains(&self) -> Vec<String> {
        self.calls_of(CallKind::Register).into_iter().map(|call| call.domain).collect()
    }

    fn next_reply(table: &Mutex<HashMap<String, VecDeque<Reply>>>, domain: &str) -> Option<Reply> {
        let mut table = table.lock().unwrap();
        let queue = table.get_mut(domain)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn record(&self, kind: CallKind, domain: &str, request: &RequestDescriptor) {
        self.calls.lock().unwrap().push(Call {
            kind,
            domain: domain.to_string(),
            request: request.clone(),
        });
    }
}

#[async_trait]
impl Transport for MockRegistry {
    async fn send(&self, request: &RequestDescriptor) -> DomainResult<TransportResponse> {
        let (kind, domain) = match request.method() {
            RequestMethod::Get => {
                (CallKind::Check, request.query_param("domain").unwrap_or_default().to_string())
            }
            RequestMethod::Post => (
                CallKind::Register,
                request
                    .body()
                    .and_then(|body| body.get("domain"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            ),
        };

        let reply = match kind {
            CallKind::Check => {
                let latency = self.check_latency.lock().unwrap().get(&domain).copied();
                if let Some(latency) = latency {
                    tokio::time::sleep(latency).await;
                }
                self.record(kind, &domain, request);
                Self::next_reply(&self.checks, &domain)
            }
            CallKind::Register => {
                self.record(kind, &domain, request);
                Self::next_reply(&self.registrations, &domain)
            }
        };

        match reply {
            Some(Reply::Status(status, body)) => Ok(TransportResponse::new(status, body)),
            Some(Reply::NetworkError(message)) => Err(RegistrarError::Network(message)),
            None => Err(RegistrarError::Network(format!("no route for {domain}"))),
        }
    }
}
