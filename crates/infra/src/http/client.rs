use std::time::Duration;

use async_trait::async_trait;
use registrar_core::Transport;
use registrar_domain::{
    RegistrarError, RegistryConfig, RequestDescriptor, RequestMethod, TransportResponse,
};
use reqwest::{Client as ReqwestClient, Method};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::InfraError;

/// Registry transport over HTTP.
///
/// Performs exactly one request per call and returns whatever the registry
/// answered, whatever the status code. Retrying is the executor's job.
#[derive(Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    base_url: String,
}

impl HttpTransport {
    /// Start building a transport for the given registry base URL.
    pub fn builder(base_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url)
    }

    /// Build a transport from the registry section of the configuration.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistrarError> {
        let mut builder =
            Self::builder(config.base_url.clone()).timeout(config.request_timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an endpoint path against the base URL, keeping any base path.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, InfraError> {
        let joined = if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        };
        Ok(Url::parse(&joined)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, RegistrarError> {
        let url = self.endpoint_url(request.endpoint())?;
        let credentials = request.credentials();

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method()), url.clone())
            .basic_auth(&credentials.api_user, Some(&credentials.api_key));

        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let method = request.method();
        debug!(%method, %url, "sending registry request");

        let response = builder.send().await.map_err(InfraError::from)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(InfraError::from)?;

        debug!(%method, %url, %status, "received registry response");
        Ok(TransportResponse::new(status.as_u16(), decode_body(&bytes)))
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl HttpTransportBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            user_agent: None,
            default_headers: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpTransport, RegistrarError> {
        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(InfraError::from)?;

        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(InfraError::from)?;

        Ok(HttpTransport { client, base_url })
    }
}

fn to_reqwest_method(method: RequestMethod) -> Method {
    match method {
        RequestMethod::Get => Method::GET,
        RequestMethod::Post => Method::POST,
    }
}

/// Decode a response body as JSON, falling back to a JSON string.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
