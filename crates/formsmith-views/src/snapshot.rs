//! Render-ready snapshots of the builder state.
//!
//! A host UI draws the canvas from [`FieldView`] values rather than reaching
//! into the collection. Snapshots serialize to JSON for web front ends.

use serde::Serialize;

use formsmith_core::{FormsmithError, FormsmithResult};
use formsmith_forms::{FieldCollection, FieldType, FieldValue};

/// Everything needed to draw one field on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    /// Position on the canvas.
    pub index: usize,
    /// The field's unique identifier.
    pub id: String,
    /// The field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Display label.
    pub label: String,
    /// Whether a value must be entered.
    pub required: bool,
    /// Help text shown next to the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Choices offered by select, checkbox, and radio fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// The current value.
    pub value: FieldValue,
    /// Messages of the violations the user should see. Empty until the
    /// field has been touched.
    pub errors: Vec<String>,
    /// Whether the field is the target of the open edit session.
    pub selected: bool,
}

/// Builds one [`FieldView`] per field, in canvas order.
pub fn field_views(fields: &FieldCollection) -> Vec<FieldView> {
    let selected = fields.selected_index();
    fields
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let def = entry.definition();
            let control = entry.control();
            FieldView {
                index,
                id: def.id.clone(),
                field_type: def.field_type,
                label: def.label.clone(),
                required: def.required,
                help_text: def.help_text.clone(),
                options: def.options.clone(),
                value: control.value().clone(),
                errors: control
                    .visible_errors()
                    .iter()
                    .map(|e| e.message.clone())
                    .collect(),
                selected: selected == Some(index),
            }
        })
        .collect()
}

/// Converts the snapshot to a JSON array.
///
/// # Errors
///
/// `SerializationError` if a view cannot be represented as JSON.
pub fn field_views_to_json(fields: &FieldCollection) -> FormsmithResult<serde_json::Value> {
    serde_json::to_value(field_views(fields))
        .map_err(|e| FormsmithError::SerializationError(e.to_string()))
}
