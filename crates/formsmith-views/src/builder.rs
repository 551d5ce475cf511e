//! The form builder view.
//!
//! [`FormBuilderView`] is the surface a host UI drives. It owns the field
//! collection and the submission pipeline, and checks the session before
//! every operation: structural and configuration changes need the admin
//! role, filling in and submitting need any logged-in role.

use std::sync::Arc;

use formsmith_auth::{Role, SessionContext};
use formsmith_core::{FormsmithError, FormsmithResult, Settings};
use formsmith_forms::{DropEvent, FieldCollection, FieldDraft, FieldValue, Palette};
use formsmith_submit::{
    InFlight, Notifier, SubmissionPipeline, SubmissionRecord, SubmissionStatus, SubmitTransport,
};

use crate::snapshot::{field_views, FieldView};

/// The interactive form builder for one session.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use formsmith_auth::{Role, SessionContext};
/// use formsmith_core::Settings;
/// use formsmith_forms::{DropEvent, FieldType, Palette};
/// use formsmith_submit::{HttpTransport, TracingNotifier};
/// use formsmith_views::FormBuilderView;
///
/// let settings = Settings::default();
/// let mut view = FormBuilderView::open(
///     SessionContext::with_role(Role::Admin),
///     Arc::new(HttpTransport::from_settings(&settings).unwrap()),
///     Arc::new(TracingNotifier),
///     &settings,
/// )
/// .unwrap();
///
/// let palette_index = Palette::default().position(FieldType::Text).unwrap();
/// view.on_drop(DropEvent::FromPalette { palette_index, to: 0 }).unwrap();
/// assert_eq!(view.fields().count(), 1);
/// ```
#[derive(Debug)]
pub struct FormBuilderView {
    session: SessionContext,
    palette: Palette,
    fields: FieldCollection,
    pipeline: SubmissionPipeline,
}

impl FormBuilderView {
    /// Opens the builder for a logged-in session with an empty canvas.
    ///
    /// # Errors
    ///
    /// `NotLoggedIn` if the session has no role.
    pub fn open(
        session: SessionContext,
        transport: Arc<dyn SubmitTransport>,
        notifier: Arc<dyn Notifier>,
        settings: &Settings,
    ) -> FormsmithResult<Self> {
        let role = session.require_login()?;
        tracing::debug!(role = %role, "opening form builder");
        Ok(Self {
            session,
            palette: Palette::default(),
            fields: FieldCollection::new(),
            pipeline: SubmissionPipeline::new(transport, notifier, settings),
        })
    }

    /// Replaces the palette offered to the user.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    // ── Read-only state ─────────────────────────────────────────────

    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    pub const fn role(&self) -> Option<Role> {
        self.session.role()
    }

    /// Returns `true` if editing affordances should be shown.
    pub const fn can_edit(&self) -> bool {
        self.session.can_edit()
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    pub const fn fields(&self) -> &FieldCollection {
        &self.fields
    }

    /// Returns a render-ready snapshot of every field.
    pub fn field_views(&self) -> Vec<FieldView> {
        field_views(&self.fields)
    }

    /// Returns the submission state.
    pub fn status(&self) -> SubmissionStatus {
        self.pipeline.status()
    }

    // ── Editing (admin only) ─────────────────────────────────────────

    /// Applies a drop from the palette or a reorder within the canvas.
    pub fn on_drop(&mut self, event: DropEvent) -> FormsmithResult<()> {
        self.session.require_admin("change the form layout")?;
        self.fields.apply_drop(&self.palette, event)
    }

    /// Opens the edit session on the field at `index`.
    pub fn select_field(&mut self, index: usize) -> FormsmithResult<()> {
        self.session.require_admin("edit fields")?;
        self.fields.select(index).map(|_| ())
    }

    /// Deletes the field at `index`.
    pub fn delete_field(&mut self, index: usize) -> FormsmithResult<()> {
        self.session.require_admin("delete fields")?;
        self.fields.remove_at(index).map(|removed| {
            tracing::debug!(id = %removed.definition().id, "field deleted");
        })
    }

    /// Returns the draft of the open edit session.
    pub fn draft_mut(&mut self) -> FormsmithResult<&mut FieldDraft> {
        self.session.require_admin("edit fields")?;
        self.fields.draft_mut()
    }

    /// Replaces the draft's options from comma-separated text.
    pub fn update_options(&mut self, raw: &str) -> FormsmithResult<()> {
        self.session.require_admin("edit fields")?;
        self.fields.update_options(raw)
    }

    /// Commits the open edit session.
    pub fn save_edit(&mut self) -> FormsmithResult<()> {
        self.session.require_admin("edit fields")?;
        self.fields.commit()
    }

    /// Discards the open edit session.
    pub fn cancel_edit(&mut self) -> FormsmithResult<()> {
        self.session.require_admin("edit fields")?;
        self.fields.discard()
    }

    // ── Filling in (any role) ────────────────────────────────────────

    /// Sets the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<FieldValue>) -> FormsmithResult<()> {
        self.session.require_login()?;
        self.fields.set_value(index, value.into())
    }

    /// Checks or unchecks one option of the checkbox field at `index`.
    pub fn toggle_checkbox(
        &mut self,
        index: usize,
        option: &str,
        checked: bool,
    ) -> FormsmithResult<()> {
        self.session.require_login()?;
        self.fields.toggle_choice(index, option, checked)
    }

    /// Validates and posts the form, waiting for the outcome.
    pub async fn submit(&mut self) -> FormsmithResult<SubmissionRecord> {
        self.session.require_login()?;
        self.pipeline.submit(&mut self.fields).await
    }

    /// Runs the local phase of a submission and returns the pending post.
    ///
    /// The view stays usable while the returned [`InFlight`] is awaited.
    pub fn begin_submit(&mut self) -> FormsmithResult<InFlight> {
        self.session.require_login()?;
        self.pipeline.begin(&mut self.fields)
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Ends the session. Any open edit session is discarded and every
    /// later operation fails with `NotLoggedIn`.
    pub fn logout(&mut self) {
        match self.fields.discard() {
            Ok(()) | Err(FormsmithError::NoActiveSession) => {}
            Err(err) => tracing::warn!(error = %err, "discarding edit session on logout"),
        }
        self.session.logout();
    }
}
