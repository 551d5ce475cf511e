//! Field value validators.
//!
//! Each validator checks a single constraint on a [`FieldValue`]. Except for
//! [`RequiredValidator`], validators accept empty values: an empty optional
//! field is valid no matter its length or pattern constraints.

use std::fmt;

use regex::Regex;

use formsmith_core::{FormsmithError, ValidationError};

use crate::field::FieldValue;

/// A trait for validating field values.
///
/// # Examples
///
/// ```
/// use formsmith_forms::validators::{Validator, MaxLengthValidator};
/// use formsmith_forms::field::FieldValue;
///
/// let v = MaxLengthValidator::new(5);
/// assert!(v.validate(&FieldValue::from("hi")).is_ok());
/// assert!(v.validate(&FieldValue::from("toolong")).is_err());
/// ```
pub trait Validator: Send + Sync + fmt::Debug {
    /// Validates the given value, returning an error if invalid.
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError>;

    /// Returns a human-readable name for this validator.
    fn name(&self) -> &str;

    /// Returns a description of the rule, used to compare rule sets.
    fn describe(&self) -> String;
}

/// Rejects empty strings and empty selections.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredValidator;

impl Validator for RequiredValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::new("This field is required.", "required"));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "RequiredValidator"
    }

    fn describe(&self) -> String {
        "required".to_string()
    }
}

/// What [`FieldValue::len`] counts for this value.
const fn length_unit(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Text(_) => "characters",
        FieldValue::Choices(_) => "selections",
    }
}

/// Validates that a value meets a minimum length requirement.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    /// The minimum required length.
    pub min_length: usize,
}

impl MinLengthValidator {
    /// Creates a new `MinLengthValidator` with the given minimum length.
    pub const fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        let len = value.len();
        if !value.is_empty() && len < self.min_length {
            return Err(ValidationError::new(
                format!(
                    "Ensure this value has at least {} {} (it has {len}).",
                    self.min_length,
                    length_unit(value)
                ),
                "min_length",
            )
            .with_param("min", self.min_length.to_string())
            .with_param("actual", len.to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MinLengthValidator"
    }

    fn describe(&self) -> String {
        format!("min_length({})", self.min_length)
    }
}

/// Validates that a value does not exceed a maximum length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    /// The maximum allowed length.
    pub max_length: usize,
}

impl MaxLengthValidator {
    /// Creates a new `MaxLengthValidator` with the given maximum length.
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        let len = value.len();
        if len > self.max_length {
            return Err(ValidationError::new(
                format!(
                    "Ensure this value has at most {} {} (it has {len}).",
                    self.max_length,
                    length_unit(value)
                ),
                "max_length",
            )
            .with_param("max", self.max_length.to_string())
            .with_param("actual", len.to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MaxLengthValidator"
    }

    fn describe(&self) -> String {
        format!("max_length({})", self.max_length)
    }
}

/// Validates that a whole text value matches a regular expression.
///
/// The pattern is anchored at both ends unless it already starts with `^`
/// or ends with `$`. Checkbox selections are not pattern-checked.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    source: String,
    regex: Regex,
}

impl PatternValidator {
    /// Compiles `pattern` into a validator.
    pub fn new(pattern: &str) -> Result<Self, FormsmithError> {
        let anchored = anchor(pattern);
        let regex = Regex::new(&anchored).map_err(|e| FormsmithError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns the pattern as entered.
    pub fn pattern(&self) -> &str {
        &self.source
    }
}

fn anchor(pattern: &str) -> String {
    let mut anchored = String::with_capacity(pattern.len() + 6);
    if !pattern.starts_with('^') {
        anchored.push('^');
    }
    if pattern.starts_with('^') || pattern.ends_with('$') {
        anchored.push_str(pattern);
    } else {
        anchored.push_str("(?:");
        anchored.push_str(pattern);
        anchored.push(')');
    }
    if !pattern.ends_with('$') {
        anchored.push('$');
    }
    anchored
}

impl Validator for PatternValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        match value {
            FieldValue::Text(s) if !s.is_empty() && !self.regex.is_match(s) => Err(
                ValidationError::new("Enter a value matching the required pattern.", "pattern")
                    .with_param("pattern", self.source.clone()),
            ),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "PatternValidator"
    }

    fn describe(&self) -> String {
        format!("pattern({})", self.source)
    }
}
