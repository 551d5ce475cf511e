//! Submission transports.
//!
//! [`SubmitTransport`] is the seam between the pipeline and the network.
//! [`HttpTransport`] posts the record as JSON with reqwest; tests substitute
//! a scripted transport.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use formsmith_core::{FormsmithResult, Settings};

use crate::record::SubmissionRecord;

/// Why a post failed. The message is shown to the user verbatim after
/// `"Submission failed: "`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    /// Creates a transport error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// Returns the failure reason.
    pub fn reason(&self) -> &str {
        &self.0
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// Delivers one submission record to a remote endpoint.
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    /// Posts `record` once. Any response body is ignored.
    async fn post(&self, record: &SubmissionRecord) -> Result<(), TransportError>;
}

/// Posts submissions as JSON over HTTP.
///
/// Any 2xx response is success. Other statuses fail with `"HTTP <code>"`;
/// connection and timeout failures carry reqwest's message.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport posting to `endpoint` with no timeout.
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            timeout: None,
        }
    }

    /// Creates a transport from the configured endpoint and timeout.
    pub fn from_settings(settings: &Settings) -> FormsmithResult<Self> {
        let endpoint = settings.submit_endpoint()?;
        Ok(Self::new(endpoint).with_timeout(settings.request_timeout()))
    }

    /// Sets the per-request timeout. `None` waits indefinitely.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the endpoint URL.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    async fn post(&self, record: &SubmissionRecord) -> Result<(), TransportError> {
        let mut request = self.client.post(self.endpoint.clone()).json(record);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!(endpoint = %self.endpoint, entries = record.len(), "posting submission");
        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "submission accepted");
            Ok(())
        } else {
            Err(TransportError(format!("HTTP {}", status.as_u16())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_uses_configured_values() {
        let settings = Settings {
            submit_url: "http://127.0.0.1:9/forms".to_string(),
            request_timeout_secs: Some(5),
            ..Settings::default()
        };
        let transport = HttpTransport::from_settings(&settings).unwrap();
        assert_eq!(transport.endpoint().as_str(), "http://127.0.0.1:9/forms");
        assert_eq!(transport.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_settings_rejects_bad_url() {
        let settings = Settings {
            submit_url: "not a url".to_string(),
            ..Settings::default()
        };
        assert!(HttpTransport::from_settings(&settings).is_err());
    }

    #[test]
    fn test_default_has_no_timeout() {
        let transport = HttpTransport::from_settings(&Settings::default()).unwrap();
        assert_eq!(transport.timeout, None);
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::new("HTTP 503");
        assert_eq!(err.to_string(), "HTTP 503");
        assert_eq!(err.reason(), "HTTP 503");
    }
}
