//! End-to-end submission scenarios: local validation, dispatch, and the
//! in-flight guard, driven through a scripted transport.

use formsmith_core::FormsmithError;
use formsmith_forms::{DropEvent, FieldCollection, FieldType, FieldValue, Palette};
use formsmith_submit::{NotificationLevel, SubmissionEntry};
use formsmith_test::{collection_with, configure, mock_pipeline, MockResponse, MockTransport};

// ============================================================================
// Local validation phase
// ============================================================================

#[tokio::test]
async fn test_empty_collection_never_posts() {
    let transport = MockTransport::new();
    let (pipeline, outbox) = mock_pipeline(&transport);
    let mut fields = FieldCollection::new();

    let err = pipeline.submit(&mut fields).await.unwrap_err();

    assert!(matches!(err, FormsmithError::EmptyForm));
    assert_eq!(transport.post_count(), 0);
    outbox.assert_count(1);
    outbox.assert_last("No fields to submit.");
    outbox.assert_last_level(NotificationLevel::Error);
}

#[tokio::test]
async fn test_required_name_scenario() {
    let transport = MockTransport::new();
    let (pipeline, outbox) = mock_pipeline(&transport);
    let mut fields = collection_with(&[FieldType::Text]);
    configure(&mut fields, 0, |draft| {
        draft.label = "Name".into();
        draft.required = true;
    });

    let err = pipeline.submit(&mut fields).await.unwrap_err();
    let FormsmithError::Validation(validation) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(validation.field_errors[0].field, "Name");
    assert_eq!(transport.post_count(), 0);
    assert!(fields.get(0).unwrap().control().touched());
    assert_eq!(fields.get(0).unwrap().control().visible_errors().len(), 1);
    outbox.assert_last("Please fix validation errors before submitting.");

    fields.set_value(0, "Ada".into()).unwrap();
    let record = pipeline.submit(&mut fields).await.unwrap();

    assert_eq!(transport.post_count(), 1);
    assert_eq!(
        transport.last_post().unwrap().entries(),
        &[SubmissionEntry::new("Name", "Ada")]
    );
    assert_eq!(pipeline.status().last_result, Some(record.clone()));
    assert_eq!(record.entries(), &[SubmissionEntry::new("Name", "Ada")]);
    outbox.assert_last("Form submitted successfully!");
}

#[tokio::test]
async fn test_every_violation_is_reported() {
    let transport = MockTransport::new();
    let (pipeline, _outbox) = mock_pipeline(&transport);
    let mut fields = collection_with(&[FieldType::Text, FieldType::Textarea, FieldType::Date]);
    configure(&mut fields, 0, |draft| {
        draft.label = "Code".into();
        draft.pattern = Some("[A-Z]{3}".into());
        draft.min_length = Some(3);
    });
    configure(&mut fields, 2, |draft| draft.required = true);
    fields.set_value(0, "ab".into()).unwrap();

    let err = pipeline.submit(&mut fields).await.unwrap_err();
    let FormsmithError::Validation(validation) = err else {
        panic!("expected a validation error");
    };
    let fields_reported: Vec<_> = validation
        .field_errors
        .iter()
        .map(|group| group.field.as_str())
        .collect();
    assert_eq!(fields_reported, vec!["Code", "Date"]);
    assert_eq!(validation.field_errors[0].errors.len(), 2);
    assert_eq!(transport.post_count(), 0);
}

// ============================================================================
// Dispatch phase
// ============================================================================

#[tokio::test]
async fn test_checkbox_scenario_joins_choices() {
    let transport = MockTransport::new();
    let (pipeline, _outbox) = mock_pipeline(&transport);
    let mut fields = collection_with(&[FieldType::Checkbox]);
    fields.toggle_choice(0, "Option 1", true).unwrap();
    fields.toggle_choice(0, "Option 2", true).unwrap();

    pipeline.submit(&mut fields).await.unwrap();

    assert_eq!(
        transport.last_post().unwrap().value_of("Checkbox"),
        Some("Option 1, Option 2")
    );
}

#[tokio::test]
async fn test_reordered_fields_submit_in_new_order() {
    let transport = MockTransport::new();
    let (pipeline, _outbox) = mock_pipeline(&transport);
    let mut fields = collection_with(&[FieldType::Text, FieldType::Text]);
    configure(&mut fields, 0, |draft| draft.label = "A".into());
    configure(&mut fields, 1, |draft| draft.label = "B".into());
    fields.set_value(0, "a-value".into()).unwrap();
    fields.set_value(1, "b-value".into()).unwrap();

    fields
        .apply_drop(&Palette::default(), DropEvent::Reorder { from: 0, to: 1 })
        .unwrap();
    pipeline.submit(&mut fields).await.unwrap();

    assert_eq!(
        transport.last_post().unwrap().entries(),
        &[
            SubmissionEntry::new("B", "b-value"),
            SubmissionEntry::new("A", "a-value"),
        ]
    );
}

#[tokio::test]
async fn test_transport_failure_then_retry_by_user() {
    let transport = MockTransport::new().then_respond(MockResponse::fail("HTTP 502"));
    let (pipeline, outbox) = mock_pipeline(&transport);
    let mut fields = collection_with(&[FieldType::Select]);
    fields.set_value(0, "Option 2".into()).unwrap();

    let err = pipeline.submit(&mut fields).await.unwrap_err();
    assert_eq!(err.to_string(), "Submission failed: HTTP 502");
    let status = pipeline.status();
    assert!(!status.submitting);
    assert_eq!(status.last_error.as_deref(), Some("Submission failed: HTTP 502"));
    outbox.assert_last("Submission failed: HTTP 502");

    pipeline.submit(&mut fields).await.unwrap();
    let status = pipeline.status();
    assert_eq!(status.last_error, None);
    assert_eq!(
        status.last_result.unwrap().value_of("Select"),
        Some("Option 2")
    );
    assert_eq!(transport.post_count(), 2);
}

// ============================================================================
// In-flight behavior
// ============================================================================

#[tokio::test]
async fn test_concurrent_submit_is_rejected() {
    let transport = MockTransport::gated();
    let (pipeline, _outbox) = mock_pipeline(&transport);
    let mut fields = collection_with(&[FieldType::Text]);

    let in_flight = pipeline.begin(&mut fields).unwrap();
    let task = tokio::spawn(in_flight.finish());
    transport.wait_for_post().await;
    assert!(pipeline.status().submitting);

    let err = pipeline.submit(&mut fields).await.unwrap_err();
    assert!(matches!(err, FormsmithError::SubmissionInFlight));
    assert_eq!(transport.post_count(), 1);

    transport.release();
    task.await.unwrap().unwrap();
    assert!(!pipeline.status().submitting);
}

#[tokio::test]
async fn test_fields_stay_editable_while_in_flight() {
    let transport = MockTransport::gated();
    let (pipeline, _outbox) = mock_pipeline(&transport);
    let mut fields = collection_with(&[FieldType::Text]);
    fields.set_value(0, "sent".into()).unwrap();

    let task = tokio::spawn(pipeline.begin(&mut fields).unwrap().finish());
    transport.wait_for_post().await;

    fields.set_value(0, "edited".into()).unwrap();
    fields.insert(1, FieldType::Radio).unwrap();
    configure(&mut fields, 0, |draft| draft.label = "Renamed".into());

    transport.release();
    let record = task.await.unwrap().unwrap();

    assert_eq!(record.entries(), &[SubmissionEntry::new("Text", "sent")]);
    assert_eq!(
        fields.get(0).unwrap().control().value(),
        &FieldValue::from("edited")
    );
    assert_eq!(fields.count(), 2);
}
