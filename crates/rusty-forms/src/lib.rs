//! # rusty-forms
//!
//! A schema-driven form state engine. Describe the fields (initial values) and
//! how each one is validated (required, predicate, cross-field compare); the
//! engine keeps the live values, per-field errors, per-field dirty flags and
//! the submit gate, and only calls your submit callback when the form is valid.
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_forms::{FieldRule, FormEngine, StateSchema, SubmitOutcome, Validator, ValidatorSchema};
//!
//! let state = StateSchema::new()
//!     .field("first_name", "")
//!     .field("last_name", "");
//!
//! let name_rule = |error: &str| {
//!     Validator::pattern("name", "^[a-zA-Z]+$", error).map(|v| FieldRule::new().required().validator(v))
//! };
//! let rules = ValidatorSchema::new()
//!     .rule("first_name", name_rule("Invalid first name format.")?)
//!     .rule("last_name", name_rule("Invalid last name format.")?);
//!
//! let mut form = FormEngine::new(state, rules, |values| {
//!     println!("submitted: {:?}", values);
//! })?;
//!
//! form.handle_field_change("first_name", "Bob")?;
//! form.handle_field_change("last_name", "Lee")?;
//! assert!(!form.submit_disabled());
//! assert_eq!(form.handle_submit(), SubmitOutcome::Submitted);
//! # Ok::<(), rusty_forms::FormError>(())
//! ```
//!
//! ## Declarative forms
//!
//! [`FormDefinition`] describes the same thing in TOML, using the predicates
//! from `rusty-forms-validation`.

pub mod definition;
pub mod engine;
pub mod error;
pub mod schema;
pub mod value;

pub use definition::{CompareDefinition, FieldDefinition, FormDefinition, FormMeta};
pub use engine::{
    FieldEvent, FormEngine, FormSnapshot, SubmitCallback, SubmitGate, SubmitOutcome,
    REQUIRED_FIELD_ERROR,
};
pub use error::{FormError, Result};
pub use schema::{
    CompareRule, DirtyFields, FieldErrors, FieldName, FieldRule, FieldState, FieldValues,
    Predicate, StateSchema, Validator, ValidatorSchema,
};
pub use value::FieldValue;

// Predicates for building validators by hand
pub use rusty_forms_validation as validation;
