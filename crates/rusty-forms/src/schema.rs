// File: rusty-forms/src/schema.rs
// Purpose: State schema (field seeds) and validator schema (field rules)

use crate::error::{FormError, Result};
use crate::value::FieldValue;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Name of a form field, unique per form
pub type FieldName = String;

/// Current value of every field
pub type FieldValues = BTreeMap<FieldName, FieldValue>;

/// Current error message of every field (`""` = valid)
pub type FieldErrors = BTreeMap<FieldName, String>;

/// Touched flag of every field
pub type DirtyFields = BTreeMap<FieldName, bool>;

/// Seed entry for one field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldState {
    pub value: FieldValue,
    pub error: String,
}

impl FieldState {
    pub fn new(value: impl Into<FieldValue>) -> Self {
        Self {
            value: value.into(),
            error: String::new(),
        }
    }
}

/// Initial values of a form, keyed by field name
///
/// Only used to seed the engine; the engine splits it into independent
/// value/error/dirty maps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateSchema {
    fields: BTreeMap<FieldName, FieldState>,
}

impl StateSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field seeded with `value`
    pub fn field(mut self, name: impl Into<FieldName>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), FieldState::new(value));
        self
    }

    /// Add a field with a full seed entry
    pub fn insert(&mut self, name: impl Into<FieldName>, state: FieldState) {
        self.fields.insert(name.into(), state);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &FieldName> {
        self.fields.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &FieldState)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Seed values, one per field
    pub fn values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|(name, state)| (name.clone(), state.value.clone()))
            .collect()
    }
}

impl<N: Into<FieldName>, V: Into<FieldValue>> FromIterator<(N, V)> for StateSchema {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(StateSchema::new(), |schema, (name, value)| schema.field(name, value))
    }
}

/// Predicate called with the candidate value and all current values
pub type Predicate = Arc<dyn Fn(&FieldValue, &FieldValues) -> bool + Send + Sync>;

/// Custom check with the message reported when it fails
#[derive(Clone)]
pub struct Validator {
    predicate: Predicate,
    pub error: String,
}

impl Validator {
    pub fn new<F>(predicate: F, error: impl Into<String>) -> Self
    where
        F: Fn(&FieldValue, &FieldValues) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            error: error.into(),
        }
    }

    /// Validator that only looks at the field's own text
    pub fn text<F>(check: F, error: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(
            move |value, _| check(&value.to_display_string()),
            error,
        )
    }

    /// Regex validator; `field` is only used to report a malformed pattern
    pub fn pattern(field: &str, pattern: &str, error: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::text(move |text| regex.is_match(text), error))
    }

    pub fn test(&self, value: &FieldValue, values: &FieldValues) -> bool {
        (self.predicate)(value, values)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Cross-field equality check against `target_field`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRule {
    pub target_field: FieldName,
    pub error: String,
}

impl CompareRule {
    pub fn new(target_field: impl Into<FieldName>, error: impl Into<String>) -> Self {
        Self {
            target_field: target_field.into(),
            error: error.into(),
        }
    }

    /// Rules with an empty target or message never run
    pub fn is_active(&self) -> bool {
        !self.target_field.is_empty() && !self.error.is_empty()
    }
}

/// Validation rule for one field
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub validator: Option<Validator>,
    pub compare: Option<CompareRule>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Shorthand for `validator(Validator::new(..))`
    pub fn check<F>(self, predicate: F, error: impl Into<String>) -> Self
    where
        F: Fn(&FieldValue, &FieldValues) -> bool + Send + Sync + 'static,
    {
        self.validator(Validator::new(predicate, error))
    }

    pub fn compare(mut self, target_field: impl Into<FieldName>, error: impl Into<String>) -> Self {
        self.compare = Some(CompareRule::new(target_field, error));
        self
    }
}

/// Validation rules keyed by field name
///
/// Fields without a rule are optional and always valid.
#[derive(Debug, Clone, Default)]
pub struct ValidatorSchema {
    rules: BTreeMap<FieldName, FieldRule>,
}

impl ValidatorSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, name: impl Into<FieldName>, rule: FieldRule) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    pub fn insert(&mut self, name: impl Into<FieldName>, rule: FieldRule) {
        self.rules.insert(name.into(), rule);
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.rules.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &FieldRule)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fields whose compare rule points at `target`
    pub fn comparing_to<'a>(
        &'a self,
        target: &'a str,
    ) -> impl Iterator<Item = (&'a FieldName, &'a CompareRule)> + 'a {
        self.rules.iter().filter_map(move |(name, rule)| {
            rule.compare
                .as_ref()
                .filter(|compare| compare.is_active() && compare.target_field == target)
                .map(|compare| (name, compare))
        })
    }

    /// Check that every rule refers to fields of `state`
    pub fn check_against(&self, state: &StateSchema) -> Result<()> {
        self.check_names(|name| state.contains(name))
    }

    pub(crate) fn check_names(&self, has_field: impl Fn(&str) -> bool) -> Result<()> {
        for (name, rule) in &self.rules {
            if !has_field(name) {
                return Err(FormError::UnknownField {
                    field: name.clone(),
                });
            }

            if let Some(compare) = &rule.compare {
                if !has_field(&compare.target_field) {
                    return Err(FormError::UnknownCompareTarget {
                        field: name.clone(),
                        target: compare.target_field.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
