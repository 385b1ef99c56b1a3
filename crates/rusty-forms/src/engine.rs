// File: rusty-forms/src/engine.rs
// Purpose: Form state engine - live values, errors, dirty flags and the submit gate

use crate::error::{FormError, Result};
use crate::schema::{
    DirtyFields, FieldErrors, FieldName, FieldValues, StateSchema, ValidatorSchema,
};
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, trace, warn};

/// Message reported for an empty required field
pub const REQUIRED_FIELD_ERROR: &str = "This is required field.";

/// Callback invoked with the current values on a successful submit
pub type SubmitCallback = Box<dyn FnMut(&FieldValues)>;

/// State of the submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitGate {
    /// Untouched form, or at least one field reports an error
    Locked,
    /// Touched form with no errors
    Unlocked,
}

impl fmt::Display for SubmitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitGate::Locked => write!(f, "locked"),
            SubmitGate::Unlocked => write!(f, "unlocked"),
        }
    }
}

/// Result of a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submit callback ran
    Submitted,
    /// A field reported an error; the callback was not called
    Withheld,
}

/// Change event coming from an input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEvent {
    pub name: FieldName,
    pub value: FieldValue,
}

impl FieldEvent {
    pub fn new(name: impl Into<FieldName>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Read-only copy of everything a view needs to render the form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub values: FieldValues,
    pub errors: FieldErrors,
    pub dirty: DirtyFields,
    pub form_dirty: bool,
    pub submit_disabled: bool,
}

/// Outcome of running one field's rule
#[derive(Debug, Default)]
struct FieldVerdict {
    error: String,
    /// Compare target whose value now matches this field
    matched_target: Option<FieldName>,
}

impl FieldVerdict {
    fn valid() -> Self {
        Self::default()
    }

    fn invalid(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            matched_target: None,
        }
    }
}

/// Schema-driven form validation engine
///
/// Owns the live `values`, `errors` and `dirty` maps of one form. All three
/// always share the key set of the state schema in effect, and they only
/// change through the methods below. `submit_disabled` is recomputed after
/// every mutation:
///
/// ```text
/// submit_disabled = !form_dirty || any(errors != "")
/// ```
///
/// # Example
///
/// ```
/// use rusty_forms::{FieldRule, FormEngine, StateSchema, ValidatorSchema};
///
/// let state = StateSchema::new().field("name", "");
/// let rules = ValidatorSchema::new().rule("name", FieldRule::new().required());
///
/// let mut form = FormEngine::new(state, rules, |values| {
///     println!("submitted {:?}", values);
/// })?;
///
/// assert!(form.submit_disabled());
/// form.handle_field_change("name", "Bob")?;
/// assert!(!form.submit_disabled());
/// # Ok::<(), rusty_forms::FormError>(())
/// ```
pub struct FormEngine {
    schema: StateSchema,
    validators: ValidatorSchema,
    values: FieldValues,
    errors: FieldErrors,
    dirty: DirtyFields,
    form_dirty: bool,
    submit_disabled: bool,
    on_submit: SubmitCallback,
}

impl FormEngine {
    /// Build an engine from a state schema, its rules and a submit callback
    ///
    /// Every field is validated against its seeded value, but the submit gate
    /// starts locked until the first change regardless of the outcome.
    pub fn new<F>(schema: StateSchema, validators: ValidatorSchema, on_submit: F) -> Result<Self>
    where
        F: FnMut(&FieldValues) + 'static,
    {
        validators.check_against(&schema)?;

        let mut engine = Self {
            schema,
            validators,
            values: FieldValues::new(),
            errors: FieldErrors::new(),
            dirty: DirtyFields::new(),
            form_dirty: false,
            submit_disabled: true,
            on_submit: Box::new(on_submit),
        };
        engine.seed();
        engine.recompute_gate();

        debug!(
            fields = engine.values.len(),
            rules = engine.validators.len(),
            invalid = engine.invalid_count(),
            "Form engine created"
        );

        Ok(engine)
    }

    /// Validate `value` for field `name` against `current_values`
    ///
    /// Pure: returns the error message (`""` when valid) without touching
    /// engine state. Checks run in order and the first failure wins:
    /// required, optional-empty short circuit, predicate, compare.
    pub fn validate_field(&self, name: &str, value: &FieldValue, current_values: &FieldValues) -> String {
        self.evaluate_field(name, value, current_values).error
    }

    /// Apply a user change to one field
    pub fn handle_field_change(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.ensure_field(name)?;
        let value = value.into();

        self.dirty.insert(name.to_string(), true);
        self.form_dirty = true;
        self.values.insert(name.to_string(), value);

        let verdict = self.evaluate_field(name, &self.values[name], &self.values);
        debug!(field = name, error = %verdict.error, "Field changed");
        self.errors.insert(name.to_string(), verdict.error);

        self.revalidate_compare_partners(name, verdict.matched_target);
        self.recompute_gate();
        Ok(())
    }

    /// Apply a change event
    pub fn handle_event(&mut self, event: FieldEvent) -> Result<()> {
        self.handle_field_change(&event.name, event.value)
    }

    /// Attempt to submit the form
    ///
    /// Fails closed: when any field reports an error the callback is not
    /// called and nothing changes. Repeated valid submissions each call the
    /// callback.
    pub fn handle_submit(&mut self) -> SubmitOutcome {
        if self.has_errors() {
            warn!(invalid = self.invalid_count(), "Submission withheld, form has errors");
            return SubmitOutcome::Withheld;
        }

        info!(fields = self.values.len(), "Submitting form");
        (self.on_submit)(&self.values);
        SubmitOutcome::Submitted
    }

    /// Set a field value programmatically, without validating it
    pub fn set_field_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.ensure_field(name)?;

        self.values.insert(name.to_string(), value.into());
        self.dirty.insert(name.to_string(), true);
        self.form_dirty = true;

        debug!(field = name, "Field value set");
        self.recompute_gate();
        Ok(())
    }

    /// Set a field error programmatically, without validating or touching dirty flags
    pub fn set_field_error(&mut self, name: &str, error: impl Into<String>) -> Result<()> {
        self.ensure_field(name)?;

        let error = error.into();
        debug!(field = name, error = %error, "Field error set");
        self.errors.insert(name.to_string(), error);

        self.recompute_gate();
        Ok(())
    }

    /// Replace the state schema wholesale, keeping the current rules
    ///
    /// Values, errors and dirty flags are rebuilt from `schema` and freshly
    /// validated. The replacement counts as a change to the form. On error the
    /// engine is left untouched.
    pub fn replace_schema(&mut self, schema: StateSchema) -> Result<()> {
        self.validators.check_against(&schema)?;

        self.schema = schema;
        self.seed();
        self.form_dirty = true;
        self.recompute_gate();

        debug!(
            fields = self.values.len(),
            invalid = self.invalid_count(),
            "State schema replaced"
        );
        Ok(())
    }

    /// Replace the validation rules and revalidate every current value
    ///
    /// Does not mark the form dirty. On error the engine is left untouched.
    pub fn replace_validator_schema(&mut self, validators: ValidatorSchema) -> Result<()> {
        validators.check_names(|name| self.values.contains_key(name))?;

        self.validators = validators;
        self.errors = self.validate_all();
        self.recompute_gate();

        debug!(
            rules = self.validators.len(),
            invalid = self.invalid_count(),
            "Validator schema replaced"
        );
        Ok(())
    }

    /// Whether any field currently reports an error
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|error| !error.is_empty())
    }

    pub fn submit_disabled(&self) -> bool {
        self.submit_disabled
    }

    pub fn gate(&self) -> SubmitGate {
        if self.submit_disabled {
            SubmitGate::Locked
        } else {
            SubmitGate::Unlocked
        }
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn dirty(&self) -> &DirtyFields {
        &self.dirty
    }

    /// Whether any change happened since construction
    pub fn is_dirty(&self) -> bool {
        self.form_dirty
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Error message of a field; `Some("")` means valid
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(|error| error.as_str())
    }

    pub fn is_field_dirty(&self, name: &str) -> bool {
        self.dirty.get(name).copied().unwrap_or(false)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &FieldName> {
        self.values.keys()
    }

    pub fn schema(&self) -> &StateSchema {
        &self.schema
    }

    pub fn validators(&self) -> &ValidatorSchema {
        &self.validators
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self.values.clone(),
            errors: self.errors.clone(),
            dirty: self.dirty.clone(),
            form_dirty: self.form_dirty,
            submit_disabled: self.submit_disabled,
        }
    }

    fn ensure_field(&self, name: &str) -> Result<()> {
        if self.values.contains_key(name) {
            Ok(())
        } else {
            Err(FormError::UnknownFieldChange {
                field: name.to_string(),
            })
        }
    }

    /// Rebuild values, errors and dirty flags from the state schema
    fn seed(&mut self) {
        self.values = self.schema.values();
        self.dirty = self.values.keys().map(|name| (name.clone(), false)).collect();
        self.errors = self.validate_all();
    }

    fn validate_all(&self) -> FieldErrors {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), self.validate_field(name, value, &self.values)))
            .collect()
    }

    fn evaluate_field(&self, name: &str, value: &FieldValue, current_values: &FieldValues) -> FieldVerdict {
        let Some(rule) = self.validators.get(name) else {
            return FieldVerdict::valid();
        };

        if value.is_empty() {
            return if rule.required {
                FieldVerdict::invalid(REQUIRED_FIELD_ERROR)
            } else {
                FieldVerdict::valid()
            };
        }

        if let Some(validator) = &rule.validator {
            if !validator.test(value, current_values) {
                return FieldVerdict::invalid(validator.error.clone());
            }
        }

        if let Some(compare) = rule.compare.as_ref().filter(|compare| compare.is_active()) {
            let target = current_values
                .get(&compare.target_field)
                .filter(|target| !target.is_empty());

            if let Some(target) = target {
                if value != target {
                    return FieldVerdict::invalid(compare.error.clone());
                }
                return FieldVerdict {
                    error: String::new(),
                    matched_target: Some(compare.target_field.clone()),
                };
            }
        }

        FieldVerdict::valid()
    }

    /// Clear stale mismatch errors on the other side of a compare pair
    ///
    /// Only fields that currently hold an error are revalidated, so this can
    /// clear or refresh an error but never flag an untouched partner.
    fn revalidate_compare_partners(&mut self, changed: &str, matched_target: Option<FieldName>) {
        let mut stale: Vec<FieldName> = matched_target
            .into_iter()
            .filter(|target| target != changed && self.has_error(target))
            .collect();

        stale.extend(
            self.validators
                .comparing_to(changed)
                .filter(|(source, compare)| {
                    source.as_str() != changed && self.error(source) == Some(compare.error.as_str())
                })
                .map(|(source, _)| source.clone()),
        );

        for field in stale {
            let error = self.validate_field(&field, &self.values[&field], &self.values);
            trace!(field = %field, error = %error, "Compare partner revalidated");
            self.errors.insert(field, error);
        }
    }

    fn has_error(&self, name: &str) -> bool {
        self.errors.get(name).is_some_and(|error| !error.is_empty())
    }

    fn invalid_count(&self) -> usize {
        self.errors.values().filter(|error| !error.is_empty()).count()
    }

    fn recompute_gate(&mut self) {
        self.submit_disabled = !self.form_dirty || self.has_errors();
        trace!(
            form_dirty = self.form_dirty,
            submit_disabled = self.submit_disabled,
            "Submit gate recomputed"
        );
    }
}

impl fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEngine")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("dirty", &self.dirty)
            .field("form_dirty", &self.form_dirty)
            .field("submit_disabled", &self.submit_disabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldRule;

    fn engine(state: StateSchema, rules: ValidatorSchema) -> FormEngine {
        FormEngine::new(state, rules, |_| {}).unwrap()
    }

    #[test]
    fn test_field_without_rule_always_valid() {
        let form = engine(StateSchema::new().field("nickname", ""), ValidatorSchema::new());

        assert_eq!(form.error("nickname"), Some(""));
        assert_eq!(form.validate_field("nickname", &FieldValue::from("anything"), form.values()), "");
    }

    #[test]
    fn test_initial_pass_flags_seeded_values() {
        let state = StateSchema::new().field("age", "abc");
        let rules = ValidatorSchema::new().rule(
            "age",
            FieldRule::new().check(|value, _| value.to_display_string().parse::<u32>().is_ok(), "Not a number"),
        );

        let form = engine(state, rules);
        assert_eq!(form.error("age"), Some("Not a number"));
        assert!(!form.is_dirty());
        assert!(form.submit_disabled());
    }

    #[test]
    fn test_predicate_failure_skips_compare() {
        let state = StateSchema::new().field("a", "").field("b", "x");
        let rules = ValidatorSchema::new().rule(
            "a",
            FieldRule::new()
                .check(|value, _| value.to_display_string().len() > 3, "too short")
                .compare("b", "mismatch"),
        );
        let form = engine(state, rules);

        let values = form.values().clone();
        assert_eq!(form.validate_field("a", &FieldValue::from("y"), &values), "too short");
        assert_eq!(form.validate_field("a", &FieldValue::from("yyyy"), &values), "mismatch");
    }

    #[test]
    fn test_compare_skipped_while_target_empty() {
        let state = StateSchema::new().field("a", "").field("b", "");
        let rules = ValidatorSchema::new().rule("a", FieldRule::new().compare("b", "mismatch"));
        let form = engine(state, rules);

        assert_eq!(form.validate_field("a", &FieldValue::from("x"), form.values()), "");
    }

    #[test]
    fn test_inactive_compare_rule_never_runs() {
        let state = StateSchema::new().field("a", "").field("b", "y");
        let rules = ValidatorSchema::new().rule("a", FieldRule::new().compare("b", ""));
        let form = engine(state, rules);

        assert_eq!(form.validate_field("a", &FieldValue::from("x"), form.values()), "");
    }

    #[test]
    fn test_gate_display() {
        assert_eq!(SubmitGate::Locked.to_string(), "locked");
        assert_eq!(SubmitGate::Unlocked.to_string(), "unlocked");
    }

    #[test]
    fn test_debug_omits_callback() {
        let form = engine(StateSchema::new().field("a", "1"), ValidatorSchema::new());
        let rendered = format!("{:?}", form);
        assert!(rendered.starts_with("FormEngine"));
        assert!(rendered.contains("submit_disabled: true"));
    }
}
