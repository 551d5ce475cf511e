//! Edit sessions: scratch copies of one field's configuration.
//!
//! While a field is selected for editing, its editable attributes and its
//! current value are copied into a [`FieldDraft`]. The draft is either
//! committed back onto the field as a whole or thrown away; the field itself
//! is never touched mid-edit.
//!
//! The state machine ([`EditState`]) is owned by
//! [`FieldCollection`](crate::collection::FieldCollection), which makes "at
//! most one open session" a property of the type rather than a runtime
//! check.

use formsmith_core::utils::text::split_comma_list;
use formsmith_core::FormsmithError;

use crate::binder::RuleSet;
use crate::control::Control;
use crate::field::{FieldDefinition, FieldValue};

/// The editable attributes of a field plus its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDraft {
    /// Display label.
    pub label: String,
    /// Whether a value must be entered.
    pub required: bool,
    /// Help text.
    pub help_text: Option<String>,
    /// Options, for option-bearing field types only.
    pub options: Option<Vec<String>>,
    /// Minimum value length.
    pub min_length: Option<usize>,
    /// Maximum value length.
    pub max_length: Option<usize>,
    /// Regular expression the value must match.
    pub pattern: Option<String>,
    /// The field's value.
    pub value: FieldValue,
}

impl FieldDraft {
    /// Copies the editable state of a field.
    pub fn capture(definition: &FieldDefinition, control: &Control) -> Self {
        Self {
            label: definition.label.clone(),
            required: definition.required,
            help_text: definition.help_text.clone(),
            options: definition.options.clone(),
            min_length: definition.min_length,
            max_length: definition.max_length,
            pattern: definition.pattern.clone(),
            value: control.value().clone(),
        }
    }

    /// Replaces the options from a comma-separated list, dropping blanks.
    ///
    /// Fails with `InvalidEdit` if the field has no options.
    pub fn set_options_from_text(&mut self, raw: &str) -> Result<(), FormsmithError> {
        let Some(options) = self.options.as_mut() else {
            return Err(FormsmithError::InvalidEdit(
                "this field type has no options".to_string(),
            ));
        };
        *options = split_comma_list(raw);
        Ok(())
    }

    /// Builds the definition that results from applying this draft to
    /// `definition`: editable attributes are overwritten, id and type kept.
    pub fn merged_onto(&self, definition: &FieldDefinition) -> FieldDefinition {
        FieldDefinition {
            id: definition.id.clone(),
            field_type: definition.field_type,
            label: self.label.clone(),
            required: self.required,
            help_text: self.help_text.clone().filter(|h| !h.is_empty()),
            options: self.options.clone(),
            min_length: self.min_length,
            max_length: self.max_length,
            pattern: self.pattern.clone().filter(|p| !p.is_empty()),
        }
    }

    /// Checks that this draft can be committed onto `definition` and returns
    /// the merged definition with its derived rules.
    pub fn prepare_commit(
        &self,
        definition: &FieldDefinition,
    ) -> Result<(FieldDefinition, RuleSet), FormsmithError> {
        let merged = self.merged_onto(definition);
        merged.check_consistency()?;
        self.value.check_shape(merged.field_type)?;
        let rules = RuleSet::derive(&merged)?;
        Ok((merged, rules))
    }
}

/// An open edit session on the field at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    index: usize,
    field_id: String,
    /// The scratch copy being edited.
    pub draft: FieldDraft,
}

impl EditSession {
    /// Opens a session on the field at `index`.
    pub fn open(index: usize, definition: &FieldDefinition, control: &Control) -> Self {
        Self {
            index,
            field_id: definition.id.clone(),
            draft: FieldDraft::capture(definition, control),
        }
    }

    /// The index of the field being edited.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The id of the field being edited.
    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub(crate) fn retarget(&mut self, index: usize) {
        self.index = index;
    }
}

/// The edit state machine: `Closed` or `Open` on exactly one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    /// No field is being edited.
    #[default]
    Closed,
    /// One field is being edited.
    Open(EditSession),
}

impl EditState {
    /// Returns the open session, if any.
    pub const fn session(&self) -> Option<&EditSession> {
        match self {
            Self::Closed => None,
            Self::Open(session) => Some(session),
        }
    }

    /// Returns the open session mutably, if any.
    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        match self {
            Self::Closed => None,
            Self::Open(session) => Some(session),
        }
    }

    /// Returns the index of the field being edited, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.session().map(EditSession::index)
    }

    /// Returns `true` if a session is open.
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Closes the session, returning it.
    pub fn take(&mut self) -> Option<EditSession> {
        match std::mem::take(self) {
            Self::Closed => None,
            Self::Open(session) => Some(session),
        }
    }
}
