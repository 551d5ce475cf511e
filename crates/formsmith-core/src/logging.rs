//! Logging integration for formsmith.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating spans that group
//! the log lines of one submission.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. "debug", "info",
/// "`formsmith_forms=debug`"); an unparsable filter falls back to "info". In
/// debug mode a pretty, human-readable format is used; otherwise a structured
/// JSON format is used. Installing twice is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one form submission.
///
/// # Examples
///
/// ```
/// use formsmith_core::logging::submission_span;
///
/// let span = submission_span(3);
/// let _guard = span.enter();
/// tracing::info!("dispatching");
/// ```
pub fn submission_span(field_count: usize) -> tracing::Span {
    tracing::info_span!("submission", fields = field_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        let settings = Settings {
            log_level: "not a [valid filter".to_string(),
            ..Settings::default()
        };
        setup_logging(&settings);
        setup_logging(&Settings::default());
    }

    #[test]
    fn test_submission_span_enter() {
        let span = submission_span(2);
        let _guard = span.enter();
        tracing::debug!("inside submission span");
    }
}
