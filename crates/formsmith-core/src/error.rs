//! Core error types for formsmith.
//!
//! This module provides the error enum [`FormsmithError`] that covers
//! structural errors on the field collection, validation failures, edit
//! session errors, submission errors, session/role errors, and configuration
//! errors.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional per-field errors.
///
/// Validation errors are either simple (a single rule violation on one
/// value) or compound (a list of violations grouped by field label, as
/// produced when a whole form fails to validate).
///
/// # Examples
///
/// ```
/// use formsmith_core::error::{FieldErrors, ValidationError};
///
/// // Simple validation error
/// let err = ValidationError::new("This field is required.", "required");
///
/// // Field-level validation errors
/// let err = ValidationError::with_field_errors(
///     "Please fix validation errors before submitting.",
///     vec![FieldErrors::new(
///         "Email",
///         vec![ValidationError::new("This field is required.", "required")],
///     )],
/// );
/// assert_eq!(err.field_errors.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the rule that failed (e.g. "required", "pattern").
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
    /// Per-field validation errors, in field order.
    pub field_errors: Vec<FieldErrors>,
}

/// The validation errors reported for one field of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    /// The label of the offending field.
    pub field: String,
    /// The rule violations of that field, in rule order.
    pub errors: Vec<ValidationError>,
}

impl FieldErrors {
    /// Creates a new group of errors for the field labelled `field`.
    pub fn new(field: impl Into<String>, errors: Vec<ValidationError>) -> Self {
        Self {
            field: field.into(),
            errors,
        }
    }
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            field_errors: Vec::new(),
        }
    }

    /// Creates a `ValidationError` summarising per-field errors.
    pub fn with_field_errors(message: impl Into<String>, field_errors: Vec<FieldErrors>) -> Self {
        Self {
            message: message.into(),
            code: "invalid".to_string(),
            params: HashMap::new(),
            field_errors,
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns the first rule violation, descending into field errors.
    pub fn first_violation(&self) -> Option<&Self> {
        if self.field_errors.is_empty() {
            return Some(self);
        }
        self.field_errors
            .iter()
            .flat_map(|group| group.errors.iter())
            .next()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        }
        let mut first = self.message.is_empty();
        for group in &self.field_errors {
            for error in &group.errors {
                if first {
                    first = false;
                } else {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {error}", group.field)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for formsmith.
///
/// Every error is recoverable by the user: none of them leaves the field
/// collection in an inconsistent state. [`FormsmithError::surfaces_to_user`]
/// tells the caller whether the error should be shown as a notification or
/// only logged.
#[derive(Error, Debug)]
pub enum FormsmithError {
    // ── Structure ────────────────────────────────────────────────────

    /// A structural operation received an index outside the collection.
    #[error("Invalid field index {index} (collection has {len} fields)")]
    InvalidIndex {
        /// The offending index.
        index: usize,
        /// The collection length at the time of the call.
        len: usize,
    },

    // ── Submission ───────────────────────────────────────────────────

    /// Submit was attempted with no fields.
    #[error("No fields to submit.")]
    EmptyForm,

    /// One or more fields failed their validation rules.
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// The dispatch to the remote endpoint failed.
    #[error("Submission failed: {0}")]
    SubmissionTransport(String),

    /// A submission is already in flight.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    // ── Field configuration ──────────────────────────────────────────

    /// A field's pattern is not a valid regular expression.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as entered.
        pattern: String,
        /// Why the pattern failed to compile.
        reason: String,
    },

    /// An edit session carries attributes that cannot be committed.
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    /// A value has the wrong shape for its field type.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Commit or discard was requested with no open edit session.
    #[error("No field is being edited")]
    NoActiveSession,

    // ── Session / role ───────────────────────────────────────────────

    /// The operation needs a logged-in session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Login was attempted while a role is already set.
    #[error("A role is already set for this session")]
    AlreadyLoggedIn,

    /// The current role may not perform the operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormsmithError {
    /// Returns `true` if this error should be shown to the end user.
    ///
    /// Out-of-range indices come from the UI offering stale positions; they
    /// are logged and the operation aborted, but never surfaced.
    pub const fn surfaces_to_user(&self) -> bool {
        !matches!(self, Self::InvalidIndex { .. })
    }

    /// Returns the short code of this error, suitable for log fields.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidIndex { .. } => "invalid_index",
            Self::EmptyForm => "empty_form",
            Self::Validation(_) => "validation",
            Self::SubmissionTransport(_) => "submission_transport",
            Self::SubmissionInFlight => "submission_in_flight",
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::InvalidEdit(_) => "invalid_edit",
            Self::InvalidValue(_) => "invalid_value",
            Self::NoActiveSession => "no_active_session",
            Self::NotLoggedIn => "not_logged_in",
            Self::AlreadyLoggedIn => "already_logged_in",
            Self::PermissionDenied(_) => "permission_denied",
            Self::ConfigurationError(_) => "configuration",
            Self::SerializationError(_) => "serialization",
            Self::IoError(_) => "io",
        }
    }
}

/// A convenience type alias for `Result<T, FormsmithError>`.
pub type FormsmithResult<T> = Result<T, FormsmithError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_simple() {
        let err = ValidationError::new("This field is required.", "required");
        assert_eq!(err.to_string(), "This field is required.");
    }

    #[test]
    fn test_validation_error_display_field_errors() {
        let err = ValidationError::with_field_errors(
            "Please fix validation errors before submitting.",
            vec![
                FieldErrors::new(
                    "Name",
                    vec![ValidationError::new("This field is required.", "required")],
                ),
                FieldErrors::new(
                    "Zip",
                    vec![ValidationError::new("Enter a valid value.", "pattern")],
                ),
            ],
        );
        let text = err.to_string();
        assert!(text.starts_with("Please fix validation errors before submitting."));
        assert!(text.contains("Name: This field is required."));
        assert!(text.contains("; Zip: Enter a valid value."));
    }

    #[test]
    fn test_validation_error_with_param() {
        let err = ValidationError::new("Too short.", "min_length").with_param("min", "8");
        assert_eq!(err.params.get("min").unwrap(), "8");
    }

    #[test]
    fn test_first_violation() {
        let simple = ValidationError::new("Too short.", "min_length");
        assert_eq!(simple.first_violation().unwrap().code, "min_length");

        let compound = ValidationError::with_field_errors(
            "",
            vec![
                FieldErrors::new("A", vec![]),
                FieldErrors::new("B", vec![ValidationError::new("x", "pattern")]),
            ],
        );
        assert_eq!(compound.first_violation().unwrap().code, "pattern");
    }

    #[test]
    fn test_surfaces_to_user() {
        assert!(!FormsmithError::InvalidIndex { index: 4, len: 2 }.surfaces_to_user());
        assert!(FormsmithError::EmptyForm.surfaces_to_user());
        assert!(FormsmithError::SubmissionTransport("timeout".into()).surfaces_to_user());
        assert!(
            FormsmithError::Validation(ValidationError::new("x", "required")).surfaces_to_user()
        );
    }

    #[test]
    fn test_error_display() {
        let err = FormsmithError::InvalidIndex { index: 3, len: 1 };
        assert_eq!(err.to_string(), "Invalid field index 3 (collection has 1 fields)");
        let err = FormsmithError::SubmissionTransport("HTTP 500".into());
        assert_eq!(err.to_string(), "Submission failed: HTTP 500");
        assert_eq!(FormsmithError::EmptyForm.to_string(), "No fields to submit.");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(FormsmithError::EmptyForm.code(), "empty_form");
        assert_eq!(FormsmithError::NotLoggedIn.code(), "not_logged_in");
        assert_eq!(
            FormsmithError::PermissionDenied("edit".into()).code(),
            "permission_denied"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FormsmithError = io_err.into();
        assert_eq!(err.code(), "io");
        assert!(err.to_string().contains("file missing"));
    }
}
