//! Submission records: the normalized snapshot of a form's values.

use serde::{Deserialize, Serialize};

use formsmith_forms::FieldCollection;

/// One submitted field: its label and its value flattened to a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEntry {
    /// The field label at submit time.
    pub label: String,
    /// The field value; checkbox selections are joined with `", "`.
    pub value: String,
}

impl SubmissionEntry {
    /// Creates an entry.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The ordered label/value pairs of one submission.
///
/// Serializes as a bare JSON array of `{"label", "value"}` objects.
///
/// # Examples
///
/// ```
/// use formsmith_submit::record::{SubmissionEntry, SubmissionRecord};
///
/// let record = SubmissionRecord::new(vec![SubmissionEntry::new("Name", "Ada")]);
/// assert_eq!(
///     serde_json::to_string(&record).unwrap(),
///     r#"[{"label":"Name","value":"Ada"}]"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionRecord(Vec<SubmissionEntry>);

impl SubmissionRecord {
    /// Wraps a list of entries.
    pub const fn new(entries: Vec<SubmissionEntry>) -> Self {
        Self(entries)
    }

    /// Snapshots the current label and value of every field, in order.
    pub fn from_collection(fields: &FieldCollection) -> Self {
        Self(
            fields
                .iter()
                .map(|entry| {
                    SubmissionEntry::new(
                        entry.definition().label.clone(),
                        entry.control().value().to_submission_string(),
                    )
                })
                .collect(),
        )
    }

    /// Returns the entries.
    pub fn entries(&self) -> &[SubmissionEntry] {
        &self.0
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value submitted for the first field labelled `label`.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value.as_str())
    }
}
