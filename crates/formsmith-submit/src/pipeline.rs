//! The submission pipeline.
//!
//! Submitting runs in two phases. [`SubmissionPipeline::begin`] works on the
//! collection synchronously: it reveals every validation error, refuses empty
//! or invalid forms, and snapshots the values into a [`SubmissionRecord`].
//! [`InFlight::finish`] then posts that snapshot once, without borrowing the
//! collection, so fields stay editable while the request is outstanding.
//!
//! Only one submission may be in flight per pipeline. A second `begin` while
//! one is outstanding fails with `SubmissionInFlight` and makes no request.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::Instrument;

use formsmith_core::logging::submission_span;
use formsmith_core::{FormsmithError, FormsmithResult, Settings, ValidationError};
use formsmith_forms::FieldCollection;

use crate::notify::{Notification, Notifier};
use crate::record::SubmissionRecord;
use crate::transport::SubmitTransport;

/// Shown when submitting a form with no fields.
pub const EMPTY_FORM_MESSAGE: &str = "No fields to submit.";
/// Shown when any field fails its rules.
pub const INVALID_FORM_MESSAGE: &str = "Please fix validation errors before submitting.";
/// Shown after the endpoint accepted a submission.
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// A snapshot of the pipeline's observable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionStatus {
    /// `true` while a request is outstanding.
    pub submitting: bool,
    /// The record of the last successful submission.
    pub last_result: Option<SubmissionRecord>,
    /// The message of the last failed submission.
    pub last_error: Option<String>,
}

/// Validates, snapshots, and posts forms.
#[derive(Clone)]
pub struct SubmissionPipeline {
    transport: Arc<dyn SubmitTransport>,
    notifier: Arc<dyn Notifier>,
    notification_duration: Duration,
    state: Arc<Mutex<SubmissionStatus>>,
}

impl SubmissionPipeline {
    /// Creates a pipeline using the configured notification duration.
    pub fn new(
        transport: Arc<dyn SubmitTransport>,
        notifier: Arc<dyn Notifier>,
        settings: &Settings,
    ) -> Self {
        Self {
            transport,
            notifier,
            notification_duration: settings.notification_duration(),
            state: Arc::new(Mutex::new(SubmissionStatus::default())),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn status(&self) -> SubmissionStatus {
        lock(&self.state).clone()
    }

    /// Returns `true` while a submission is outstanding.
    pub fn is_submitting(&self) -> bool {
        lock(&self.state).submitting
    }

    /// Runs the local phase of a submission.
    ///
    /// Every control is marked touched first, so a refused form shows all of
    /// its errors. On success the pipeline is marked as submitting and the
    /// returned [`InFlight`] must be finished to post the record.
    ///
    /// # Errors
    ///
    /// - `SubmissionInFlight` if a previous submission has not finished.
    /// - `EmptyForm` if the collection has no fields.
    /// - `Validation` listing every violation, grouped by field label.
    pub fn begin(&self, fields: &mut FieldCollection) -> FormsmithResult<InFlight> {
        let mut state = lock(&self.state);
        if state.submitting {
            tracing::warn!("submission already in flight");
            return Err(FormsmithError::SubmissionInFlight);
        }

        fields.mark_all_touched();

        if fields.is_empty() {
            drop(state);
            self.notify(Notification::error(
                EMPTY_FORM_MESSAGE,
                self.notification_duration,
            ));
            return Err(FormsmithError::EmptyForm);
        }

        if !fields.is_valid() {
            drop(state);
            let field_errors = fields.validation_errors();
            tracing::debug!(invalid_fields = field_errors.len(), "submission refused");
            self.notify(Notification::error(
                INVALID_FORM_MESSAGE,
                self.notification_duration,
            ));
            return Err(FormsmithError::Validation(ValidationError::with_field_errors(
                INVALID_FORM_MESSAGE,
                field_errors,
            )));
        }

        let record = SubmissionRecord::from_collection(fields);
        state.submitting = true;
        state.last_result = None;
        state.last_error = None;
        drop(state);

        let span = submission_span(record.len());
        span.in_scope(|| tracing::info!("submission started"));

        Ok(InFlight {
            pipeline: self.clone(),
            record,
            span,
            finished: false,
        })
    }

    /// Runs both phases: [`begin`](Self::begin), then posts the record.
    ///
    /// Returns the record that was accepted by the endpoint.
    pub async fn submit(&self, fields: &mut FieldCollection) -> FormsmithResult<SubmissionRecord> {
        self.begin(fields)?.finish().await
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }
}

impl fmt::Debug for SubmissionPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionPipeline")
            .field("notification_duration", &self.notification_duration)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// A submission that passed local checks and awaits its network phase.
///
/// Dropping it unfinished abandons the submission and clears the
/// submitting flag.
#[must_use = "an in-flight submission does nothing until finished"]
pub struct InFlight {
    pipeline: SubmissionPipeline,
    record: SubmissionRecord,
    span: tracing::Span,
    finished: bool,
}

impl InFlight {
    /// Returns the record that will be posted.
    pub const fn record(&self) -> &SubmissionRecord {
        &self.record
    }

    /// Posts the record exactly once and reports the outcome.
    ///
    /// On success the record becomes the pipeline's `last_result`. On
    /// failure `last_error` holds `"Submission failed: <reason>"` and the
    /// same text is notified.
    pub async fn finish(mut self) -> FormsmithResult<SubmissionRecord> {
        let record = std::mem::take(&mut self.record);
        let outcome = self
            .pipeline
            .transport
            .post(&record)
            .instrument(self.span.clone())
            .await;
        self.finished = true;

        let pipeline = &self.pipeline;
        let duration = pipeline.notification_duration;
        match outcome {
            Ok(()) => {
                {
                    let mut state = lock(&pipeline.state);
                    state.submitting = false;
                    state.last_result = Some(record.clone());
                }
                self.span.in_scope(|| tracing::info!("submission succeeded"));
                pipeline.notify(Notification::success(SUCCESS_MESSAGE, duration));
                Ok(record)
            }
            Err(err) => {
                let error = FormsmithError::SubmissionTransport(err.reason().to_string());
                let message = error.to_string();
                {
                    let mut state = lock(&pipeline.state);
                    state.submitting = false;
                    state.last_error = Some(message.clone());
                }
                self.span
                    .in_scope(|| tracing::warn!(reason = err.reason(), "submission failed"));
                pipeline.notify(Notification::error(message, duration));
                Err(error)
            }
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.finished {
            lock(&self.pipeline.state).submitting = false;
            self.span
                .in_scope(|| tracing::warn!("submission abandoned before it was sent"));
        }
    }
}

impl fmt::Debug for InFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlight")
            .field("record", &self.record)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

fn lock(state: &Mutex<SubmissionStatus>) -> MutexGuard<'_, SubmissionStatus> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use async_trait::async_trait;
    use formsmith_forms::FieldType;

    #[derive(Default)]
    struct Recorder {
        posts: Mutex<Vec<SubmissionRecord>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl SubmitTransport for Recorder {
        async fn post(&self, record: &SubmissionRecord) -> Result<(), TransportError> {
            self.posts.lock().unwrap().push(record.clone());
            match &self.fail_with {
                Some(reason) => Err(TransportError::new(reason.clone())),
                None => Ok(()),
            }
        }
    }

    #[derive(Default)]
    struct Toasts(Mutex<Vec<Notification>>);

    impl Notifier for Toasts {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    impl Toasts {
        fn messages(&self) -> Vec<String> {
            self.0.lock().unwrap().iter().map(|n| n.message.clone()).collect()
        }
    }

    fn pipeline(fail_with: Option<&str>) -> (SubmissionPipeline, Arc<Recorder>, Arc<Toasts>) {
        let transport = Arc::new(Recorder {
            fail_with: fail_with.map(String::from),
            ..Recorder::default()
        });
        let toasts = Arc::new(Toasts::default());
        let pipeline =
            SubmissionPipeline::new(transport.clone(), toasts.clone(), &Settings::default());
        (pipeline, transport, toasts)
    }

    fn one_text_field(required: bool, value: &str) -> FieldCollection {
        let mut fields = FieldCollection::new();
        fields.insert(0, FieldType::Text).unwrap();
        fields.select(0).unwrap();
        fields.draft_mut().unwrap().required = required;
        fields.commit().unwrap();
        fields.set_value(0, value.into()).unwrap();
        fields
    }

    #[tokio::test]
    async fn test_empty_form_is_refused() {
        let (pipeline, transport, toasts) = pipeline(None);
        let mut fields = FieldCollection::new();
        let err = pipeline.submit(&mut fields).await.unwrap_err();
        assert!(matches!(err, FormsmithError::EmptyForm));
        assert!(transport.posts.lock().unwrap().is_empty());
        assert_eq!(toasts.messages(), vec![EMPTY_FORM_MESSAGE]);
        assert!(!pipeline.is_submitting());
    }

    #[tokio::test]
    async fn test_invalid_form_is_refused_and_touched() {
        let (pipeline, transport, toasts) = pipeline(None);
        let mut fields = one_text_field(true, "");
        assert!(!fields.get(0).unwrap().control().touched());

        let err = pipeline.submit(&mut fields).await.unwrap_err();
        let FormsmithError::Validation(validation) = err else {
            panic!("expected validation error");
        };
        assert_eq!(validation.field_errors.len(), 1);
        assert_eq!(validation.field_errors[0].field, "Text");
        assert_eq!(validation.field_errors[0].errors[0].code, "required");
        assert!(fields.get(0).unwrap().control().touched());
        assert!(transport.posts.lock().unwrap().is_empty());
        assert_eq!(toasts.messages(), vec![INVALID_FORM_MESSAGE]);
    }

    #[tokio::test]
    async fn test_success_records_result() {
        let (pipeline, transport, toasts) = pipeline(None);
        let mut fields = one_text_field(false, "hello");
        let record = pipeline.submit(&mut fields).await.unwrap();

        assert_eq!(record.value_of("Text"), Some("hello"));
        assert_eq!(transport.posts.lock().unwrap().len(), 1);
        let status = pipeline.status();
        assert!(!status.submitting);
        assert_eq!(status.last_result, Some(record));
        assert_eq!(status.last_error, None);
        assert_eq!(toasts.messages(), vec![SUCCESS_MESSAGE]);
    }

    #[tokio::test]
    async fn test_failure_records_error() {
        let (pipeline, transport, toasts) = pipeline(Some("HTTP 500"));
        let mut fields = one_text_field(false, "x");
        let err = pipeline.submit(&mut fields).await.unwrap_err();

        assert_eq!(err.to_string(), "Submission failed: HTTP 500");
        assert_eq!(transport.posts.lock().unwrap().len(), 1);
        let status = pipeline.status();
        assert!(!status.submitting);
        assert_eq!(status.last_result, None);
        assert_eq!(status.last_error.as_deref(), Some("Submission failed: HTTP 500"));
        assert_eq!(toasts.messages(), vec!["Submission failed: HTTP 500"]);
    }

    #[tokio::test]
    async fn test_new_submission_clears_previous_error() {
        let (failing, _, _) = pipeline(Some("offline"));
        let mut fields = one_text_field(false, "x");
        let _ = failing.submit(&mut fields).await;
        assert!(failing.status().last_error.is_some());

        let in_flight = failing.begin(&mut fields).unwrap();
        assert_eq!(failing.status().last_error, None);
        assert!(failing.is_submitting());
        drop(in_flight);
    }

    #[test]
    fn test_second_begin_is_rejected_while_in_flight() {
        let (pipeline, transport, _) = pipeline(None);
        let mut fields = one_text_field(false, "x");
        let first = pipeline.begin(&mut fields).unwrap();
        assert!(matches!(
            pipeline.begin(&mut fields),
            Err(FormsmithError::SubmissionInFlight)
        ));
        assert!(transport.posts.lock().unwrap().is_empty());
        drop(first);
    }

    #[test]
    fn test_dropped_in_flight_clears_flag() {
        let (pipeline, _, _) = pipeline(None);
        let mut fields = one_text_field(false, "x");
        let in_flight = pipeline.begin(&mut fields).unwrap();
        assert!(pipeline.is_submitting());
        drop(in_flight);
        assert!(!pipeline.is_submitting());
        assert!(pipeline.begin(&mut fields).is_ok());
    }

    #[test]
    fn test_record_snapshot_ignores_later_edits() {
        let (pipeline, _, _) = pipeline(None);
        let mut fields = one_text_field(false, "before");
        let in_flight = pipeline.begin(&mut fields).unwrap();
        fields.set_value(0, "after".into()).unwrap();
        assert_eq!(in_flight.record().value_of("Text"), Some("before"));
    }
}
