//! Settings for formsmith.
//!
//! The [`Settings`] struct holds everything the engine needs from its
//! environment: where submissions go, how long notifications stay on screen,
//! and how logging is configured. Settings are passed explicitly to the
//! components that need them; load them with
//! [`settings_loader`](crate::settings_loader).

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FormsmithError;

/// The endpoint submissions are posted to when none is configured.
pub const DEFAULT_SUBMIT_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// The complete set of formsmith settings.
///
/// # Examples
///
/// ```
/// use formsmith_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.notification_duration_ms, 3000);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Submission ───────────────────────────────────────────────────

    /// The URL every submission is posted to.
    pub submit_url: String,
    /// Request timeout in seconds. `None` leaves the transport default.
    pub request_timeout_secs: Option<u64>,

    // ── Notifications ────────────────────────────────────────────────

    /// How long transient notifications stay visible, in milliseconds.
    pub notification_duration_ms: u64,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level or filter directive (e.g. "info", "formsmith_forms=debug").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            submit_url: DEFAULT_SUBMIT_URL.to_string(),
            request_timeout_secs: None,
            notification_duration_ms: 3000,
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parses and checks the submission endpoint.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not parse or its scheme
    /// is not `http`/`https`.
    pub fn submit_endpoint(&self) -> Result<Url, FormsmithError> {
        let url = Url::parse(&self.submit_url).map_err(|e| {
            FormsmithError::ConfigurationError(format!(
                "Invalid submit_url '{}': {e}",
                self.submit_url
            ))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FormsmithError::ConfigurationError(format!(
                "submit_url must use http or https, got '{other}'"
            ))),
        }
    }

    /// Checks that the settings are usable.
    pub fn validate(&self) -> Result<(), FormsmithError> {
        self.submit_endpoint()?;
        if self.request_timeout_secs == Some(0) {
            return Err(FormsmithError::ConfigurationError(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns how long notifications stay visible.
    pub const fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }

    /// Returns the configured request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert_eq!(s.submit_url, DEFAULT_SUBMIT_URL);
        assert_eq!(s.request_timeout_secs, None);
        assert_eq!(s.notification_duration_ms, 3000);
        assert_eq!(s.log_level, "info");
        assert!(s.extra.is_empty());
    }

    #[test]
    fn test_notification_duration() {
        let s = Settings::default();
        assert_eq!(s.notification_duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_request_timeout() {
        let mut s = Settings::default();
        assert!(s.request_timeout().is_none());
        s.request_timeout_secs = Some(10);
        assert_eq!(s.request_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_submit_endpoint_parses() {
        let s = Settings::default();
        let url = s.submit_endpoint().unwrap();
        assert_eq!(url.host_str(), Some("jsonplaceholder.typicode.com"));
        assert_eq!(url.path(), "/posts");
    }

    #[test]
    fn test_submit_endpoint_rejects_garbage() {
        let s = Settings {
            submit_url: "not a url".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            s.validate(),
            Err(FormsmithError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_submit_endpoint_rejects_other_schemes() {
        let s = Settings {
            submit_url: "ftp://example.com/forms".to_string(),
            ..Settings::default()
        };
        let err = s.submit_endpoint().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let s = Settings {
            request_timeout_secs: Some(0),
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_settings_serde_roundtrip() {
        let s = Settings::default();
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.submit_url, s.submit_url);
        assert_eq!(back.notification_duration_ms, s.notification_duration_ms);
    }
}
