// File: rusty-forms/src/error.rs
// Purpose: Configuration errors raised by the form engine

use thiserror::Error;

/// Errors raised when a form is misconfigured or addressed with an unknown field
///
/// Field validation failures are not errors: they are messages stored in the
/// engine's `errors` map.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("validator rule for `{field}` has no matching field in the state schema")]
    UnknownField { field: String },

    #[error("field `{field}` compares against `{target}`, which is not in the state schema")]
    UnknownCompareTarget { field: String, target: String },

    #[error("invalid pattern `{pattern}` for field `{field}`: {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("no field named `{field}` in this form")]
    UnknownFieldChange { field: String },

    #[error("invalid form definition: {0}")]
    Config(String),
}

impl FormError {
    /// Whether this error belongs to the invalid-schema class
    ///
    /// These are programmer errors detected while building or replacing a schema.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(
            self,
            FormError::UnknownField { .. }
                | FormError::UnknownCompareTarget { .. }
                | FormError::InvalidPattern { .. }
                | FormError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
