//! The field collection: the ordered fields of the form being authored.
//!
//! Each [`FieldEntry`] pairs a [`FieldDefinition`] with its [`Control`], so
//! every structural operation (insert, move, remove) moves both together and
//! the two can never drift out of alignment.
//!
//! The collection also owns the [`EditState`]. Structural operations keep an
//! open edit session pointed at the same logical field: removing the edited
//! field discards the session, and operations that shift the edited field's
//! position shift the session with it.

use formsmith_core::{FieldErrors, FormsmithError, FormsmithResult};

use crate::binder::{self, RuleSet};
use crate::control::Control;
use crate::edit_session::{EditSession, EditState, FieldDraft};
use crate::field::{FieldDefinition, FieldIdGenerator, FieldType, FieldValue};
use crate::palette::{DropEvent, Palette};

/// One field of the form: its definition and its live control.
#[derive(Debug, Clone)]
pub struct FieldEntry {
    definition: FieldDefinition,
    control: Control,
}

impl FieldEntry {
    /// Returns the field definition.
    pub const fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    /// Returns the control.
    pub const fn control(&self) -> &Control {
        &self.control
    }
}

/// The ordered fields of a form plus the edit state.
///
/// # Examples
///
/// ```
/// use formsmith_forms::collection::FieldCollection;
/// use formsmith_forms::field::FieldType;
///
/// let mut fields = FieldCollection::new();
/// fields.insert(0, FieldType::Text).unwrap();
/// fields.insert(1, FieldType::Checkbox).unwrap();
/// fields.move_within(1, 0).unwrap();
/// assert_eq!(fields.get(0).unwrap().definition().field_type, FieldType::Checkbox);
/// assert_eq!(fields.count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct FieldCollection {
    entries: Vec<FieldEntry>,
    edit: EditState,
    ids: FieldIdGenerator,
}

impl FieldCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Structure ────────────────────────────────────────────────────

    /// Inserts a fresh field of `field_type` at `position` (`0..=count`).
    ///
    /// The field gets a new unique id, the capitalized type name as label,
    /// seed options if its type has options, an empty value, and the rules
    /// derived from its definition.
    pub fn insert(&mut self, position: usize, field_type: FieldType) -> FormsmithResult<&FieldEntry> {
        self.check_position(position)?;
        let id = self.next_unique_id();
        let definition = FieldDefinition::new(id, field_type);
        self.insert_definition(position, definition)
    }

    /// Inserts a pre-built definition at `position` (`0..=count`).
    ///
    /// Fails if the definition is inconsistent (see
    /// [`FieldDefinition::check_consistency`]), the id is already used, or
    /// the pattern does not compile.
    pub fn insert_definition(
        &mut self,
        position: usize,
        definition: FieldDefinition,
    ) -> FormsmithResult<&FieldEntry> {
        self.check_position(position)?;
        definition.check_consistency()?;
        if self.contains_id(&definition.id) {
            return Err(FormsmithError::InvalidEdit(format!(
                "duplicate field id '{}'",
                definition.id
            )));
        }

        let mut control = Control::new(definition.field_type);
        binder::bind(&definition, &mut control)?;

        tracing::debug!(
            id = %definition.id,
            field_type = %definition.field_type,
            position,
            "inserting field"
        );
        self.entries.insert(position, FieldEntry { definition, control });

        if let Some(session) = self.edit.session_mut() {
            if session.index() >= position {
                session.retarget(session.index() + 1);
            }
        }
        Ok(&self.entries[position])
    }

    /// Moves the field at `from` to `to`. Values travel with their field.
    pub fn move_within(&mut self, from: usize, to: usize) -> FormsmithResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        tracing::debug!(from, to, "moved field");

        if let Some(session) = self.edit.session_mut() {
            let selected = session.index();
            let shifted = if selected == from {
                to
            } else if from < selected && to >= selected {
                selected - 1
            } else if from > selected && to <= selected {
                selected + 1
            } else {
                selected
            };
            session.retarget(shifted);
        }
        Ok(())
    }

    /// Removes and returns the field at `index`.
    ///
    /// Removing the field being edited discards the edit session; removing a
    /// field before it keeps the session on the same field.
    pub fn remove_at(&mut self, index: usize) -> FormsmithResult<FieldEntry> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        tracing::debug!(id = %removed.definition.id, index, "removed field");

        match self.edit.selected_index() {
            Some(selected) if selected == index => {
                self.edit.take();
                tracing::debug!(index, "edited field removed, edit session discarded");
            }
            Some(selected) if selected > index => {
                if let Some(session) = self.edit.session_mut() {
                    session.retarget(selected - 1);
                }
            }
            _ => {}
        }
        Ok(removed)
    }

    /// Applies a completed drag-and-drop gesture.
    pub fn apply_drop(&mut self, palette: &Palette, event: DropEvent) -> FormsmithResult<()> {
        match event {
            DropEvent::Reorder { from, to } => self.move_within(from, to),
            DropEvent::FromPalette { palette_index, to } => {
                let field_type = palette.get(palette_index).ok_or_else(|| {
                    let err = FormsmithError::InvalidIndex {
                        index: palette_index,
                        len: palette.field_types().len(),
                    };
                    tracing::warn!(error = %err, "drop from unknown palette token");
                    err
                })?;
                self.insert(to, field_type).map(|_| ())
            }
        }
    }

    // ── Access ───────────────────────────────────────────────────────

    /// Returns the number of fields.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the collection has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the field at `index`.
    pub fn get(&self, index: usize) -> Option<&FieldEntry> {
        self.entries.get(index)
    }

    /// Iterates over the fields in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldEntry> {
        self.entries.iter()
    }

    /// Iterates over the field definitions in order.
    pub fn definitions(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.entries.iter().map(FieldEntry::definition)
    }

    /// Returns the position of the field with the given id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.definition.id == id)
    }

    // ── Values ───────────────────────────────────────────────────────

    /// Sets the value of the field at `index` and re-validates it.
    pub fn set_value(&mut self, index: usize, value: FieldValue) -> FormsmithResult<()> {
        self.check_index(index)?;
        self.entries[index].control.set_value(value)
    }

    /// Checks or unchecks an option of the checkbox field at `index`.
    pub fn toggle_choice(&mut self, index: usize, option: &str, checked: bool) -> FormsmithResult<()> {
        self.check_index(index)?;
        self.entries[index].control.toggle_choice(option, checked)
    }

    /// Marks every control as touched.
    pub fn mark_all_touched(&mut self) {
        for entry in &mut self.entries {
            entry.control.mark_touched();
        }
    }

    /// Returns `true` if every control passes its rules.
    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(|e| e.control.is_valid())
    }

    /// Returns the violations of every invalid field, in field order.
    pub fn validation_errors(&self) -> Vec<FieldErrors> {
        self.entries
            .iter()
            .filter(|e| !e.control.is_valid())
            .map(|e| FieldErrors::new(e.definition.label.clone(), e.control.errors().to_vec()))
            .collect()
    }

    // ── Edit session ─────────────────────────────────────────────────

    /// Opens an edit session on the field at `index`.
    ///
    /// Any open session is discarded first, without committing. An invalid
    /// index leaves no session open.
    pub fn select(&mut self, index: usize) -> FormsmithResult<&EditSession> {
        if let Some(previous) = self.edit.take() {
            if previous.index() != index {
                tracing::debug!(
                    previous = previous.index(),
                    next = index,
                    "switching edit session, discarding draft"
                );
            }
        }
        self.check_index(index)?;
        let entry = &self.entries[index];
        tracing::debug!(index, id = %entry.definition.id, "edit session opened");
        self.edit = EditState::Open(EditSession::open(index, &entry.definition, &entry.control));
        self.edit.session().ok_or(FormsmithError::NoActiveSession)
    }

    /// Returns the edit state.
    pub const fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Returns the open edit session, if any.
    pub const fn session(&self) -> Option<&EditSession> {
        self.edit.session()
    }

    /// Returns the index of the field being edited, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.edit.selected_index()
    }

    /// Returns the open session's draft for editing.
    pub fn draft_mut(&mut self) -> FormsmithResult<&mut FieldDraft> {
        self.edit
            .session_mut()
            .map(|session| &mut session.draft)
            .ok_or(FormsmithError::NoActiveSession)
    }

    /// Replaces the draft's options from a comma-separated list.
    pub fn update_options(&mut self, raw: &str) -> FormsmithResult<()> {
        self.draft_mut()?.set_options_from_text(raw)
    }

    /// Commits the open session onto its field and closes it.
    ///
    /// The field's editable attributes and its value are overwritten, its
    /// rules re-derived, and its value re-validated. If the draft cannot be
    /// committed, nothing changes and the session stays open.
    pub fn commit(&mut self) -> FormsmithResult<()> {
        let (index, merged, rules, value) = {
            let session = self.edit.session().ok_or(FormsmithError::NoActiveSession)?;
            let index = session.index();
            let Some(entry) = self.entries.get(index) else {
                let len = self.entries.len();
                self.edit.take();
                tracing::warn!(index, len, "edit session points past the collection, discarded");
                return Err(FormsmithError::InvalidIndex { index, len });
            };
            let (merged, rules): (FieldDefinition, RuleSet) =
                session.draft.prepare_commit(&entry.definition)?;
            (index, merged, rules, session.draft.value.clone())
        };

        let entry = &mut self.entries[index];
        entry.control.set_value(value)?;
        entry.control.set_rules(rules);
        entry.definition = merged;
        self.edit.take();
        tracing::debug!(index, id = %entry.definition.id, "edit session committed");
        Ok(())
    }

    /// Closes the open session without changing anything.
    pub fn discard(&mut self) -> FormsmithResult<()> {
        let session = self.edit.take().ok_or(FormsmithError::NoActiveSession)?;
        tracing::debug!(index = session.index(), "edit session discarded");
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn check_index(&self, index: usize) -> FormsmithResult<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(self.invalid_index(index))
        }
    }

    fn check_position(&self, position: usize) -> FormsmithResult<()> {
        if position <= self.entries.len() {
            Ok(())
        } else {
            Err(self.invalid_index(position))
        }
    }

    fn invalid_index(&self, index: usize) -> FormsmithError {
        let len = self.entries.len();
        tracing::warn!(index, len, "invalid field index");
        FormsmithError::InvalidIndex { index, len }
    }

    fn contains_id(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.definition.id == id)
    }

    fn next_unique_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if !self.contains_id(&id) {
                return id;
            }
        }
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = &'a FieldEntry;
    type IntoIter = std::slice::Iter<'a, FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
