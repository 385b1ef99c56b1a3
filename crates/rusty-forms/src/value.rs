// File: rusty-forms/src/value.rs
// Purpose: Field value type held by the form engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2^53, the bound below which every integer is exact in an f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Value of a single form field
///
/// Scalars only: a form input produces text, and programmatic pre-fills may
/// carry numbers or flags. Deserializes from plain JSON/TOML scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    #[default]
    Null,
}

impl FieldValue {
    /// Empty string value, the seed for an untouched text input
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    /// Whether the value counts as "no input"
    ///
    /// `Null`, `""`, `false`, `0` and `NaN` are all empty. Required checks and
    /// the optional-field short circuit both use this.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Bool(b) => !*b,
            FieldValue::Number(n) => *n == 0.0 || n.is_nan(),
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Null => true,
        }
    }

    /// Text slice for `Text` values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render the value for display and for string-based predicates
    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => {
                // Whole numbers print without ".0" while they are exact in an i64
                if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            FieldValue::Text(s) => s.clone(),
            FieldValue::Null => String::new(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FieldValue::Null)]
    #[case(FieldValue::from(""))]
    #[case(FieldValue::from(false))]
    #[case(FieldValue::from(0))]
    #[case(FieldValue::Number(f64::NAN))]
    fn test_empty_values(#[case] value: FieldValue) {
        assert!(value.is_empty());
    }

    #[rstest]
    #[case(FieldValue::from("a"))]
    #[case(FieldValue::from(" "))]
    #[case(FieldValue::from(true))]
    #[case(FieldValue::from(-1))]
    #[case(FieldValue::from(0.5))]
    fn test_non_empty_values(#[case] value: FieldValue) {
        assert!(!value.is_empty());
    }

    #[test]
    fn test_strict_equality() {
        assert_ne!(FieldValue::from("1"), FieldValue::from(1));
        assert_eq!(FieldValue::from("abc"), FieldValue::Text("abc".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::from(42).to_display_string(), "42");
        assert_eq!(FieldValue::from(1.5).to_display_string(), "1.5");
        assert_eq!(FieldValue::Null.to_display_string(), "");
        assert_eq!(FieldValue::from("Bob").to_string(), "Bob");
    }

    #[rstest]
    #[case(1e20, "100000000000000000000")]
    #[case(-1e20, "-100000000000000000000")]
    #[case(9_007_199_254_740_991.0, "9007199254740991")]
    #[case(-3.0, "-3")]
    fn test_display_large_numbers(#[case] n: f64, #[case] expected: &str) {
        assert_eq!(FieldValue::from(n).to_display_string(), expected);
    }

    #[test]
    fn test_deserialize_scalars() {
        let text: FieldValue = serde_json::from_str("\"Lee\"").unwrap();
        let number: FieldValue = serde_json::from_str("18").unwrap();
        let flag: FieldValue = serde_json::from_str("true").unwrap();
        let null: FieldValue = serde_json::from_str("null").unwrap();

        assert_eq!(text, FieldValue::from("Lee"));
        assert_eq!(number, FieldValue::from(18));
        assert_eq!(flag, FieldValue::from(true));
        assert_eq!(null, FieldValue::Null);
    }
}
