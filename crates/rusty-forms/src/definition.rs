// File: rusty-forms/src/definition.rs
// Purpose: Declarative form definitions loaded from TOML

use crate::engine::FormEngine;
use crate::error::{FormError, Result};
use crate::schema::{FieldRule, FieldValues, StateSchema, Validator, ValidatorSchema};
use crate::value::FieldValue;
use anyhow::Context;
use rusty_forms_validation as checks;
use rusty_forms_validation::PasswordTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A whole form: metadata plus one entry per field
///
/// ```toml
/// [form]
/// name = "signup"
///
/// [fields.first_name]
/// value = "Vincent"
/// required = true
/// alpha = true
/// message = "Invalid first name format."
///
/// [fields.password]
/// required = true
/// compare = { to = "confirm_password", error = "Password does not match to confirm password" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FormDefinition {
    #[serde(default)]
    pub form: FormMeta,

    #[serde(default)]
    pub fields: BTreeMap<String, FieldDefinition>,
}

/// Form metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormMeta {
    #[serde(default = "default_form_name")]
    pub name: String,
}

/// One field: its seed value and its rule
///
/// At most one built-in check (`pattern`, `email`, `url`, `alpha`, `tags`,
/// `min_length`/`max_length`, `min`/`max`, `password`, `one_of`,
/// `equals_field`) may be set; `message` overrides its default error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    #[serde(default = "FieldValue::empty")]
    pub value: FieldValue,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub email: bool,

    #[serde(default)]
    pub url: bool,

    #[serde(default)]
    pub alpha: bool,

    #[serde(default)]
    pub tags: bool,

    #[serde(default)]
    pub min_length: Option<usize>,

    #[serde(default)]
    pub max_length: Option<usize>,

    /// Numeric lower bound (field text must parse as a number)
    #[serde(default)]
    pub min: Option<f64>,

    /// Numeric upper bound
    #[serde(default)]
    pub max: Option<f64>,

    /// "basic", "medium" or "strong"
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub one_of: Option<Vec<String>>,

    /// Value must equal this other field's value
    #[serde(default)]
    pub equals_field: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub compare: Option<CompareDefinition>,
}

/// `compare = { to = "...", error = "..." }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CompareDefinition {
    pub to: String,
    pub error: String,
}

/// Built-in check selected by a field definition
#[derive(Debug, Clone, PartialEq)]
enum BuiltinCheck {
    Pattern(String),
    Email,
    Url,
    Alpha,
    Tags,
    Length { min: Option<usize>, max: Option<usize> },
    Number { min: Option<f64>, max: Option<f64> },
    Password(PasswordTier),
    OneOf(Vec<String>),
    EqualsField(String),
}

fn default_form_name() -> String {
    "form".to_string()
}

impl Default for FormMeta {
    fn default() -> Self {
        Self {
            name: default_form_name(),
        }
    }
}

impl Default for FieldDefinition {
    fn default() -> Self {
        Self {
            value: FieldValue::empty(),
            required: false,
            pattern: None,
            email: false,
            url: false,
            alpha: false,
            tags: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            password: None,
            one_of: None,
            equals_field: None,
            message: None,
            compare: None,
        }
    }
}

impl FormDefinition {
    /// Parse a definition from TOML text
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let definition: FormDefinition =
            toml::from_str(content).context("Failed to parse form definition")?;
        Ok(definition)
    }

    /// Load a definition from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form definition: {:?}", path))?;

        let definition: FormDefinition = toml::from_str(&content)
            .with_context(|| format!("Failed to parse form definition: {:?}", path))?;

        Ok(definition)
    }

    /// Seed values of every field
    pub fn state_schema(&self) -> StateSchema {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value.clone()))
            .collect()
    }

    /// Compile the field rules
    pub fn validator_schema(&self) -> Result<ValidatorSchema> {
        let mut schema = ValidatorSchema::new();

        for (name, field) in &self.fields {
            let mut rule = FieldRule::new();
            rule.required = field.required;

            if let Some(check) = field.builtin_check(name)? {
                if let BuiltinCheck::EqualsField(other) = &check {
                    if !self.fields.contains_key(other) {
                        return Err(FormError::UnknownCompareTarget {
                            field: name.clone(),
                            target: other.clone(),
                        });
                    }
                }
                let message = field
                    .message
                    .clone()
                    .unwrap_or_else(|| check.default_message(name));
                rule = rule.validator(check.into_validator(name, message)?);
            } else if field.message.is_some() {
                return Err(FormError::Config(format!(
                    "field `{}` sets `message` without a check",
                    name
                )));
            }

            if let Some(compare) = &field.compare {
                rule = rule.compare(compare.to.clone(), compare.error.clone());
            }

            schema.insert(name.clone(), rule);
        }

        Ok(schema)
    }

    /// Build a ready engine for this form
    pub fn build<F>(&self, on_submit: F) -> Result<FormEngine>
    where
        F: FnMut(&FieldValues) + 'static,
    {
        FormEngine::new(self.state_schema(), self.validator_schema()?, on_submit)
    }
}

impl FieldDefinition {
    fn builtin_check(&self, name: &str) -> Result<Option<BuiltinCheck>> {
        let mut found = Vec::new();

        if let Some(pattern) = &self.pattern {
            found.push(BuiltinCheck::Pattern(pattern.clone()));
        }
        if self.email {
            found.push(BuiltinCheck::Email);
        }
        if self.url {
            found.push(BuiltinCheck::Url);
        }
        if self.alpha {
            found.push(BuiltinCheck::Alpha);
        }
        if self.tags {
            found.push(BuiltinCheck::Tags);
        }
        if self.min_length.is_some() || self.max_length.is_some() {
            found.push(BuiltinCheck::Length {
                min: self.min_length,
                max: self.max_length,
            });
        }
        if self.min.is_some() || self.max.is_some() {
            found.push(BuiltinCheck::Number {
                min: self.min,
                max: self.max,
            });
        }
        if let Some(tier) = &self.password {
            let tier = tier
                .parse::<PasswordTier>()
                .map_err(|e| FormError::Config(format!("field `{}`: {}", name, e)))?;
            found.push(BuiltinCheck::Password(tier));
        }
        if let Some(allowed) = &self.one_of {
            found.push(BuiltinCheck::OneOf(allowed.clone()));
        }
        if let Some(other) = &self.equals_field {
            found.push(BuiltinCheck::EqualsField(other.clone()));
        }

        if found.len() > 1 {
            return Err(FormError::Config(format!(
                "field `{}` sets {} checks, at most one is allowed",
                name,
                found.len()
            )));
        }

        Ok(found.pop())
    }
}

impl BuiltinCheck {
    fn default_message(&self, field: &str) -> String {
        match self {
            BuiltinCheck::Pattern(_) | BuiltinCheck::Alpha => format!("Invalid {} format.", label(field)),
            BuiltinCheck::Email => "Invalid email address.".to_string(),
            BuiltinCheck::Url => "Invalid URL.".to_string(),
            BuiltinCheck::Tags => "Invalid tag format.".to_string(),
            BuiltinCheck::Length { min: Some(min), max: Some(max) } => {
                format!("Must be between {} and {} characters.", min, max)
            }
            BuiltinCheck::Length { min: Some(min), .. } => format!("Must be at least {} characters.", min),
            BuiltinCheck::Length { max, .. } => {
                format!("Must be at most {} characters.", max.unwrap_or_default())
            }
            BuiltinCheck::Number { min, max } => match (min, max) {
                (Some(min), Some(max)) => format!("Must be a number between {} and {}.", min, max),
                (Some(min), None) => format!("Must be a number of at least {}.", min),
                (None, Some(max)) => format!("Must be a number of at most {}.", max),
                (None, None) => "Must be a number.".to_string(),
            },
            BuiltinCheck::Password(tier) => format!("Password does not meet the {} requirement.", tier),
            BuiltinCheck::OneOf(allowed) => format!("Must be one of: {}.", allowed.join(", ")),
            BuiltinCheck::EqualsField(other) => format!("Must match {}.", label(other)),
        }
    }

    fn into_validator(self, field: &str, message: String) -> Result<Validator> {
        let validator = match self {
            BuiltinCheck::Pattern(pattern) => return Validator::pattern(field, &pattern, message),
            BuiltinCheck::Email => Validator::text(checks::is_valid_email, message),
            BuiltinCheck::Url => Validator::text(checks::is_valid_url, message),
            BuiltinCheck::Alpha => Validator::text(checks::is_alpha, message),
            BuiltinCheck::Tags => Validator::text(checks::is_tag_list, message),
            BuiltinCheck::Length { min, max } => Validator::text(
                move |text| {
                    min.map_or(true, |min| checks::min_length(text, min))
                        && max.map_or(true, |max| checks::max_length(text, max))
                },
                message,
            ),
            BuiltinCheck::Number { min, max } => {
                Validator::text(move |text| checks::is_number_in_range(text, min, max), message)
            }
            BuiltinCheck::Password(tier) => {
                Validator::text(move |text| checks::is_password(text, tier), message)
            }
            BuiltinCheck::OneOf(allowed) => {
                Validator::text(move |text| checks::is_one_of(text, &allowed), message)
            }
            BuiltinCheck::EqualsField(other) => Validator::new(
                move |value, values| values.get(&other) == Some(value),
                message,
            ),
        };
        Ok(validator)
    }
}

/// "first_name" -> "first name"
fn label(field: &str) -> String {
    field.replace('_', " ")
}
