//! Conversions from external infrastructure errors into domain errors.

use std::fmt;

use registrar_domain::RegistrarError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RegistrarError);

impl fmt::Display for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for InfraError {}

impl From<InfraError> for RegistrarError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RegistrarError> for InfraError {
    fn from(value: RegistrarError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoRegistrarError {
    fn into_registrar(self) -> RegistrarError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RegistrarError */
/* -------------------------------------------------------------------------- */

impl IntoRegistrarError for HttpError {
    fn into_registrar(self) -> RegistrarError {
        if self.is_builder() {
            return RegistrarError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if self.is_timeout() {
            return RegistrarError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return RegistrarError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() || self.is_body() {
            return RegistrarError::Network(format!("failed to read HTTP response body: {self}"));
        }

        RegistrarError::Network(format!("HTTP error: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_registrar())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → RegistrarError */
/* -------------------------------------------------------------------------- */

impl IntoRegistrarError for url::ParseError {
    fn into_registrar(self) -> RegistrarError {
        RegistrarError::Config(format!("invalid registry URL: {self}"))
    }
}

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        InfraError(value.into_registrar())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
