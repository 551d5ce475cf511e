//! # formsmith-submit
//!
//! Submission of authored forms. Submitting validates every field locally,
//! snapshots the values into a flat [`SubmissionRecord`], and posts it once
//! to the configured endpoint, reporting the outcome through a
//! [`Notifier`].
//!
//! - [`record`] - The normalized label/value snapshot
//! - [`transport`] - The [`SubmitTransport`] seam and its reqwest implementation
//! - [`notify`] - Transient user notifications
//! - [`pipeline`] - The two-phase [`SubmissionPipeline`]

pub mod notify;
pub mod pipeline;
pub mod record;
pub mod transport;

pub use notify::{Notification, NotificationLevel, Notifier, TracingNotifier};
pub use pipeline::{InFlight, SubmissionPipeline, SubmissionStatus};
pub use record::{SubmissionEntry, SubmissionRecord};
pub use transport::{HttpTransport, SubmitTransport, TransportError};
