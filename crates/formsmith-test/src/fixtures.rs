//! Ready-made sessions, collections, and pipelines.

use std::sync::Arc;

use formsmith_auth::{Role, SessionContext};
use formsmith_core::Settings;
use formsmith_forms::{FieldCollection, FieldType};
use formsmith_submit::SubmissionPipeline;

use crate::mock_transport::MockTransport;
use crate::notification_outbox::NotificationOutbox;

/// A session logged in as admin.
pub const fn admin_session() -> SessionContext {
    SessionContext::with_role(Role::Admin)
}

/// A session logged in as a plain user.
pub const fn user_session() -> SessionContext {
    SessionContext::with_role(Role::User)
}

/// Builds a collection holding one freshly dropped field per type, in order.
///
/// # Panics
///
/// Panics if a field cannot be inserted.
pub fn collection_with(types: &[FieldType]) -> FieldCollection {
    let mut fields = FieldCollection::new();
    for (index, field_type) in types.iter().enumerate() {
        fields
            .insert(index, *field_type)
            .expect("fixture insert failed");
    }
    fields
}

/// Renames and reconfigures the field at `index` through an edit session.
///
/// # Panics
///
/// Panics if the session cannot be opened or committed.
pub fn configure(
    fields: &mut FieldCollection,
    index: usize,
    edit: impl FnOnce(&mut formsmith_forms::FieldDraft),
) {
    fields.select(index).expect("fixture select failed");
    edit(fields.draft_mut().expect("fixture session missing"));
    fields.commit().expect("fixture commit failed");
}

/// A pipeline wired to the given mock transport and a fresh outbox.
pub fn mock_pipeline(transport: &MockTransport) -> (SubmissionPipeline, NotificationOutbox) {
    let outbox = NotificationOutbox::new();
    let pipeline = SubmissionPipeline::new(
        Arc::new(transport.clone()),
        Arc::new(outbox.clone()),
        &Settings::default(),
    );
    (pipeline, outbox)
}
