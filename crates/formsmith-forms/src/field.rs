//! Field definitions and field values.
//!
//! A [`FieldDefinition`] is plain data describing one field of the form being
//! authored: its type, label, and constraints. A [`FieldValue`] is the value a
//! user has entered for a field; its shape is fixed by the field type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use formsmith_core::utils::text::capfirst;
use formsmith_core::FormsmithError;

/// The options every option-bearing field starts with.
pub const SEED_OPTIONS: [&str; 2] = ["Option 1", "Option 2"];

/// The kind of a field. Fixed when the field is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// A single-line text input.
    Text,
    /// A multi-line text input.
    Textarea,
    /// A drop-down with one selected option.
    Select,
    /// A group of checkboxes with any number of selected options.
    Checkbox,
    /// A date input.
    Date,
    /// A group of radio buttons with one selected option.
    Radio,
}

impl FieldType {
    /// Every field type, in palette order.
    pub const ALL: [Self; 6] = [
        Self::Text,
        Self::Textarea,
        Self::Select,
        Self::Checkbox,
        Self::Date,
        Self::Radio,
    ];

    /// Returns the lowercase identifier of this type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Radio => "radio",
        }
    }

    /// Returns `true` if fields of this type carry a list of options.
    pub const fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::Checkbox | Self::Radio)
    }

    /// Returns `true` if fields of this type hold several selected values.
    pub const fn is_multi_valued(self) -> bool {
        matches!(self, Self::Checkbox)
    }

    /// The label a freshly dropped field gets: the capitalized type name.
    pub fn default_label(self) -> String {
        capfirst(self.as_str())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FormsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FormsmithError::InvalidValue(format!("unknown field type '{s}'")))
    }
}

/// Static description of one form field.
///
/// `options` is `Some` exactly when the field type has options; the
/// constructor establishes this and the edit session preserves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique identifier within the collection.
    pub id: String,
    /// The field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Display label. Never empty.
    pub label: String,
    /// Whether a value must be entered.
    pub required: bool,
    /// Help text shown next to the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Choices offered by select, checkbox, and radio fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Minimum value length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum value length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression the whole value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldDefinition {
    /// Creates a field with the defaults a dropped palette token gets.
    ///
    /// # Examples
    ///
    /// ```
    /// use formsmith_forms::field::{FieldDefinition, FieldType};
    ///
    /// let field = FieldDefinition::new("field_1", FieldType::Radio);
    /// assert_eq!(field.label, "Radio");
    /// assert!(!field.required);
    /// assert_eq!(field.options.as_deref(), Some(&["Option 1".to_string(), "Option 2".to_string()][..]));
    ///
    /// let field = FieldDefinition::new("field_2", FieldType::Date);
    /// assert!(field.options.is_none());
    /// ```
    pub fn new(id: impl Into<String>, field_type: FieldType) -> Self {
        let options = field_type
            .has_options()
            .then(|| SEED_OPTIONS.iter().map(ToString::to_string).collect());
        Self {
            id: id.into(),
            field_type,
            label: field_type.default_label(),
            required: false,
            help_text: None,
            options,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    /// Returns `true` if the options invariant holds for this definition.
    pub const fn options_consistent(&self) -> bool {
        self.options.is_some() == self.field_type.has_options()
    }

    /// Checks the invariants every stored definition must satisfy: a
    /// non-empty label, options exactly for option-bearing types, and a
    /// minimum length no greater than the maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use formsmith_forms::field::{FieldDefinition, FieldType};
    ///
    /// let mut field = FieldDefinition::new("field_1", FieldType::Text);
    /// assert!(field.check_consistency().is_ok());
    ///
    /// field.min_length = Some(10);
    /// field.max_length = Some(3);
    /// assert!(field.check_consistency().is_err());
    /// ```
    pub fn check_consistency(&self) -> Result<(), FormsmithError> {
        if self.label.trim().is_empty() {
            return Err(FormsmithError::InvalidEdit("label must not be empty".to_string()));
        }
        if !self.options_consistent() {
            return Err(FormsmithError::InvalidEdit(format!(
                "{} fields {} options",
                self.field_type,
                if self.field_type.has_options() {
                    "require"
                } else {
                    "cannot have"
                }
            )));
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > 0 && max > 0 && min > max {
                return Err(FormsmithError::InvalidEdit(format!(
                    "min length {min} exceeds max length {max}"
                )));
            }
        }
        Ok(())
    }
}

/// The value entered for a field.
///
/// Checkbox fields hold the list of selected options; every other type holds
/// a single string (select and radio hold the selected option, date holds
/// the date as entered).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A single string value.
    Text(String),
    /// The selected options of a checkbox field, in selection order.
    Choices(Vec<String>),
}

impl FieldValue {
    /// Returns the empty value for a field of the given type.
    pub const fn empty_for(field_type: FieldType) -> Self {
        if field_type.is_multi_valued() {
            Self::Choices(Vec::new())
        } else {
            Self::Text(String::new())
        }
    }

    /// Returns `true` if this value has the shape required by `field_type`.
    pub const fn fits(&self, field_type: FieldType) -> bool {
        matches!(
            (self, field_type.is_multi_valued()),
            (Self::Choices(_), true) | (Self::Text(_), false)
        )
    }

    /// Checks that this value has the shape required by `field_type`.
    pub fn check_shape(&self, field_type: FieldType) -> Result<(), FormsmithError> {
        if self.fits(field_type) {
            Ok(())
        } else {
            let expected = if field_type.is_multi_valued() {
                "a list of selected options"
            } else {
                "a single string"
            };
            Err(FormsmithError::InvalidValue(format!(
                "{field_type} fields hold {expected}"
            )))
        }
    }

    /// Returns `true` for an empty string or an empty selection.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Choices(c) => c.is_empty(),
        }
    }

    /// Returns the length rules are measured against: characters for text,
    /// number of selected options for choices.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(s) => s.chars().count(),
            Self::Choices(c) => c.len(),
        }
    }

    /// Flattens the value into the string that is submitted.
    ///
    /// # Examples
    ///
    /// ```
    /// use formsmith_forms::field::FieldValue;
    ///
    /// let v = FieldValue::Choices(vec!["Option 1".into(), "Option 2".into()]);
    /// assert_eq!(v.to_submission_string(), "Option 1, Option 2");
    /// ```
    pub fn to_submission_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Choices(c) => c.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(choices: Vec<String>) -> Self {
        Self::Choices(choices)
    }
}

/// Generates collection-unique field ids of the form `field_<unix millis>`.
///
/// Two fields dropped within the same millisecond get a `_<n>` suffix so ids
/// stay unique.
#[derive(Debug, Default, Clone)]
pub struct FieldIdGenerator {
    last_millis: i64,
    collisions: u32,
}

impl FieldIdGenerator {
    /// Creates a new generator.
    pub const fn new() -> Self {
        Self {
            last_millis: 0,
            collisions: 0,
        }
    }

    /// Returns a fresh id based on the current time.
    pub fn next_id(&mut self) -> String {
        self.next_id_at(chrono::Utc::now().timestamp_millis())
    }

    /// Returns a fresh id for the given timestamp.
    pub fn next_id_at(&mut self, millis: i64) -> String {
        if millis <= self.last_millis {
            self.collisions += 1;
            format!("field_{}_{}", self.last_millis, self.collisions)
        } else {
            self.last_millis = millis;
            self.collisions = 0;
            format!("field_{millis}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_roundtrip_names() {
        for t in FieldType::ALL {
            assert_eq!(t.as_str().parse::<FieldType>().unwrap(), t);
            assert_eq!(t.to_string(), t.as_str());
        }
    }

    #[test]
    fn test_field_type_unknown() {
        let err = "slider".parse::<FieldType>().unwrap_err();
        assert!(err.to_string().contains("slider"));
    }

    #[test]
    fn test_field_type_serde_lowercase() {
        let json = serde_json::to_string(&FieldType::Textarea).unwrap();
        assert_eq!(json, "\"textarea\"");
        let t: FieldType = serde_json::from_str("\"checkbox\"").unwrap();
        assert_eq!(t, FieldType::Checkbox);
    }

    #[test]
    fn test_default_labels() {
        assert_eq!(FieldType::Text.default_label(), "Text");
        assert_eq!(FieldType::Textarea.default_label(), "Textarea");
        assert_eq!(FieldType::Checkbox.default_label(), "Checkbox");
    }

    #[test]
    fn test_new_definition_options_invariant() {
        for t in FieldType::ALL {
            let def = FieldDefinition::new("f", t);
            assert!(def.options_consistent());
            if t.has_options() {
                assert_eq!(
                    def.options,
                    Some(vec!["Option 1".to_string(), "Option 2".to_string()])
                );
            } else {
                assert!(def.options.is_none());
            }
        }
    }

    #[test]
    fn test_check_consistency() {
        let mut def = FieldDefinition::new("f", FieldType::Text);
        assert!(def.check_consistency().is_ok());

        def.min_length = Some(5);
        def.max_length = Some(5);
        assert!(def.check_consistency().is_ok());
        def.max_length = Some(0);
        assert!(def.check_consistency().is_ok());
        def.max_length = Some(4);
        assert!(matches!(def.check_consistency(), Err(FormsmithError::InvalidEdit(_))));

        let mut def = FieldDefinition::new("f", FieldType::Select);
        def.options = None;
        let err = def.check_consistency().unwrap_err();
        assert!(err.to_string().contains("require"));

        let mut def = FieldDefinition::new("f", FieldType::Date);
        def.label = "  ".into();
        assert!(def.check_consistency().is_err());
    }

    #[test]
    fn test_definition_serializes_camel_case() {
        let mut def = FieldDefinition::new("field_1", FieldType::Text);
        def.min_length = Some(2);
        def.help_text = Some("Your name".into());
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["minLength"], 2);
        assert_eq!(json["helpText"], "Your name");
        assert!(json.get("options").is_none());
    }

    #[test]
    fn test_value_shapes() {
        assert_eq!(
            FieldValue::empty_for(FieldType::Checkbox),
            FieldValue::Choices(vec![])
        );
        assert_eq!(
            FieldValue::empty_for(FieldType::Select),
            FieldValue::Text(String::new())
        );
        assert!(FieldValue::from("x").fits(FieldType::Radio));
        assert!(!FieldValue::from("x").fits(FieldType::Checkbox));
        assert!(FieldValue::Choices(vec![]).check_shape(FieldType::Date).is_err());
    }

    #[test]
    fn test_value_len_counts_chars() {
        assert_eq!(FieldValue::from("héllo").len(), 5);
        assert_eq!(
            FieldValue::Choices(vec!["a".into(), "b".into()]).len(),
            2
        );
        assert!(FieldValue::from("").is_empty());
    }

    #[test]
    fn test_submission_string() {
        assert_eq!(FieldValue::from("Ada").to_submission_string(), "Ada");
        assert_eq!(FieldValue::Choices(vec![]).to_submission_string(), "");
        assert_eq!(
            FieldValue::Choices(vec!["Option 2".into()]).to_submission_string(),
            "Option 2"
        );
    }

    #[test]
    fn test_id_generator_unique_within_same_millisecond() {
        let mut ids = FieldIdGenerator::new();
        let a = ids.next_id_at(1_700_000_000_000);
        let b = ids.next_id_at(1_700_000_000_000);
        let c = ids.next_id_at(1_700_000_000_001);
        assert_eq!(a, "field_1700000000000");
        assert_eq!(b, "field_1700000000000_1");
        assert_eq!(c, "field_1700000000001");
    }

    #[test]
    fn test_id_generator_clock_going_backwards() {
        let mut ids = FieldIdGenerator::new();
        let a = ids.next_id_at(2_000);
        let b = ids.next_id_at(1_000);
        assert_ne!(a, b);
    }
}
