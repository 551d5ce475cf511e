//! The validation binder.
//!
//! A [`RuleSet`] is derived from a [`FieldDefinition`]'s constraint
//! attributes and attached to the field's [`Control`]. Derivation is a pure
//! function of the definition, and binding replaces the control's previous
//! rules wholesale, so constraints can be removed as well as added.

use std::fmt;
use std::sync::Arc;

use formsmith_core::{FormsmithError, ValidationError};

use crate::control::Control;
use crate::field::{FieldDefinition, FieldValue};
use crate::validators::{
    MaxLengthValidator, MinLengthValidator, PatternValidator, RequiredValidator, Validator,
};

/// An ordered set of validation rules: required, minimum length, maximum
/// length, pattern. Each rule is present only when its attribute is set.
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<Arc<dyn Validator>>,
}

impl RuleSet {
    /// Returns a rule set with no rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Derives the rule set for a field definition.
    ///
    /// A zero length limit or an empty pattern counts as unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use formsmith_forms::binder::RuleSet;
    /// use formsmith_forms::field::{FieldDefinition, FieldType};
    ///
    /// let mut def = FieldDefinition::new("field_1", FieldType::Text);
    /// def.required = true;
    /// def.max_length = Some(10);
    /// let rules = RuleSet::derive(&def).unwrap();
    /// assert_eq!(rules.describe(), vec!["required", "max_length(10)"]);
    /// ```
    pub fn derive(definition: &FieldDefinition) -> Result<Self, FormsmithError> {
        let mut rules: Vec<Arc<dyn Validator>> = Vec::new();
        if definition.required {
            rules.push(Arc::new(RequiredValidator));
        }
        if let Some(min) = definition.min_length.filter(|n| *n > 0) {
            rules.push(Arc::new(MinLengthValidator::new(min)));
        }
        if let Some(max) = definition.max_length.filter(|n| *n > 0) {
            rules.push(Arc::new(MaxLengthValidator::new(max)));
        }
        if let Some(pattern) = definition.pattern.as_deref().filter(|p| !p.is_empty()) {
            rules.push(Arc::new(PatternValidator::new(pattern)?));
        }
        Ok(Self { rules })
    }

    /// Runs every rule against `value`, collecting all violations in rule order.
    pub fn validate(&self, value: &FieldValue) -> Vec<ValidationError> {
        self.rules
            .iter()
            .filter_map(|rule| rule.validate(value).err())
            .collect()
    }

    /// Returns the rule descriptions, in order.
    pub fn describe(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.describe()).collect()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.describe() == other.describe()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.describe()).finish()
    }
}

/// Derives the rules for `definition` and binds them to `control`,
/// replacing whatever rules it had and re-validating its current value.
///
/// On error (an unparsable pattern) the control is left untouched.
pub fn bind(definition: &FieldDefinition, control: &mut Control) -> Result<(), FormsmithError> {
    let rules = RuleSet::derive(definition)?;
    tracing::debug!(field = %definition.id, rules = ?rules, "binding validation rules");
    control.set_rules(rules);
    Ok(())
}
