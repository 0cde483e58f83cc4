//! Request and response shapes exchanged with the transport adapter.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP verb used for a registry call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry account credentials.
///
/// The key is skipped on serialization and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_user: String,
    #[serde(skip_serializing)]
    pub api_key: String,
}

impl Credentials {
    pub fn new(api_user: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { api_user: api_user.into(), api_key: api_key.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_user", &self.api_user)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// A fully-formed request for a single registry call.
///
/// Descriptors are immutable once built: the executor only borrows them, so
/// every attempt sends exactly what the caller constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: RequestMethod,
    endpoint: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    credentials: Credentials,
}

impl RequestDescriptor {
    /// Build a read-only request with query parameters.
    pub fn get(
        endpoint: impl Into<String>,
        query: Vec<(String, String)>,
        credentials: Credentials,
    ) -> Self {
        Self { method: RequestMethod::Get, endpoint: endpoint.into(), query, body: None, credentials }
    }

    /// Build a write request carrying a JSON body.
    pub fn post(endpoint: impl Into<String>, body: Value, credentials: Credentials) -> Self {
        Self {
            method: RequestMethod::Post,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: Some(body),
            credentials,
        }
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Look up a single query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Raw answer from the registry: status code and decoded body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn credentials_debug_hides_key() {
        let creds = Credentials::new("reseller", "s3cret");
        let rendered = format!("{creds:?}");

        assert!(rendered.contains("reseller"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn credentials_serialization_skips_key() {
        let creds = Credentials::new("reseller", "s3cret");
        let json = serde_json::to_value(&creds).unwrap();

        assert_eq!(json, json!({ "api_user": "reseller" }));
    }

    #[test]
    fn get_descriptor_exposes_query_params() {
        let descriptor = RequestDescriptor::get(
            "/domains/check",
            vec![("domain".into(), "example.com".into())],
            Credentials::new("u", "k"),
        );

        assert_eq!(descriptor.method(), RequestMethod::Get);
        assert_eq!(descriptor.query_param("domain"), Some("example.com"));
        assert_eq!(descriptor.query_param("missing"), None);
        assert!(descriptor.body().is_none());
    }

    #[test]
    fn response_success_range() {
        assert!(TransportResponse::new(200, Value::Null).is_success());
        assert!(TransportResponse::new(204, Value::Null).is_success());
        assert!(!TransportResponse::new(302, Value::Null).is_success());
        assert!(!TransportResponse::new(500, Value::Null).is_success());
    }
}
