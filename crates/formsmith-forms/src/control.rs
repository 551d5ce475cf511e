//! Controls: the live, mutable counterpart of a field definition.
//!
//! A [`Control`] holds the value entered for its field, the rules bound to
//! it, and the validation verdict. The verdict is recomputed whenever the
//! value or the rules change, so it is always current.

use formsmith_core::{FormsmithError, ValidationError};

use crate::binder::RuleSet;
use crate::field::{FieldType, FieldValue};

/// Runtime state of one field.
#[derive(Debug, Clone)]
pub struct Control {
    field_type: FieldType,
    value: FieldValue,
    rules: RuleSet,
    touched: bool,
    errors: Vec<ValidationError>,
}

impl Control {
    /// Creates a control with the empty value for `field_type` and no rules.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            value: FieldValue::empty_for(field_type),
            rules: RuleSet::empty(),
            touched: false,
            errors: Vec::new(),
        }
    }

    /// Returns the current value.
    pub const fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Replaces the value and re-validates.
    ///
    /// Fails with `InvalidValue` if the value's shape does not match the
    /// field type; the control is left unchanged in that case.
    pub fn set_value(&mut self, value: FieldValue) -> Result<(), FormsmithError> {
        value.check_shape(self.field_type)?;
        self.value = value;
        self.revalidate();
        Ok(())
    }

    /// Selects or deselects a checkbox option.
    ///
    /// Selected options keep the order in which they were first checked and
    /// never repeat.
    pub fn toggle_choice(&mut self, option: &str, checked: bool) -> Result<(), FormsmithError> {
        let FieldValue::Choices(selected) = &mut self.value else {
            return Err(FormsmithError::InvalidValue(format!(
                "{} fields have no checkable options",
                self.field_type
            )));
        };
        if checked {
            if !selected.iter().any(|s| s == option) {
                selected.push(option.to_string());
            }
        } else {
            selected.retain(|s| s != option);
        }
        self.revalidate();
        Ok(())
    }

    /// Returns `true` if `option` is currently selected.
    pub fn is_checked(&self, option: &str) -> bool {
        matches!(&self.value, FieldValue::Choices(selected) if selected.iter().any(|s| s == option))
    }

    /// Returns the bound rules.
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Replaces the bound rules and re-validates the current value.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
        self.revalidate();
    }

    /// Marks the control as touched so its errors are displayed.
    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// Returns `true` once the control has been touched.
    pub const fn touched(&self) -> bool {
        self.touched
    }

    /// Returns `true` if the current value passes every bound rule.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the current rule violations, in rule order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the errors that should be displayed: none until touched.
    pub fn visible_errors(&self) -> &[ValidationError] {
        if self.touched {
            &self.errors
        } else {
            &[]
        }
    }

    fn revalidate(&mut self) {
        self.errors = self.rules.validate(&self.value);
    }
}
