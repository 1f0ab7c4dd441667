//! Field-level validation errors
//!
//! Drafts are validated with `validator`; the resulting errors are folded
//! into a [`ValidationFailure`], a map from field path (camelCase, as seen by
//! API clients) to a [`FieldError`] carrying the failure kind and the
//! offending value.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub message: String,
    pub kind: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldError {
    pub fn required(path: &str) -> Self {
        Self {
            message: format!("Path `{}` is required.", path),
            kind: "required".to_string(),
            path: path.to_string(),
            value: None,
        }
    }

    pub fn cast(path: &str, value: &str) -> Self {
        Self {
            message: format!(
                "Cast to Number failed for value \"{}\" at path \"{}\"",
                value, path
            ),
            kind: "cast".to_string(),
            path: path.to_string(),
            value: Some(Value::String(value.to_string())),
        }
    }

    pub fn invalid_enum(path: &str, value: &str) -> Self {
        Self {
            message: format!("`{}` is not a valid enum value for path `{}`.", value, path),
            kind: "enum".to_string(),
            path: path.to_string(),
            value: Some(Value::String(value.to_string())),
        }
    }

    /// A reference field naming a user that does not exist.
    pub fn unknown_user(path: &str, id: &str) -> Self {
        Self {
            message: format!("No user found with ID {} for path `{}`.", id, path),
            kind: "ref".to_string(),
            path: path.to_string(),
            value: Some(Value::String(id.to_string())),
        }
    }

    pub fn unique(path: &str, value: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: "unique".to_string(),
            path: path.to_string(),
            value: Some(Value::String(value.to_string())),
        }
    }

    /// Translate one `validator` error raised on `field` into a field error.
    pub fn from_validator(field: &str, err: &ValidationError) -> Self {
        let value = err.params.get("value").filter(|v| !v.is_null()).cloned();
        let path = match err.params.get("index").and_then(Value::as_u64) {
            Some(index) => format!("{}.{}", field, index),
            None => field.to_string(),
        };

        match err.code.as_ref() {
            "required" => Self::required(&path),
            "enum" => {
                let shown = value.as_ref().map(display_value).unwrap_or_default();
                Self::invalid_enum(&path, &shown)
            }
            "length" | "minlength" | "maxlength" => length_error(path, err, value),
            "range" => range_error(path, err, value),
            code => Self {
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Path `{}` is invalid ({}).", path, code)),
                kind: code.to_string(),
                path,
                value,
            },
        }
    }
}

fn length_error(path: String, err: &ValidationError, value: Option<Value>) -> FieldError {
    let text = value.as_ref().map(display_value).unwrap_or_default();
    let len = text.chars().count() as u64;
    let min = err.params.get("min").and_then(Value::as_u64);
    let max = err.params.get("max").and_then(Value::as_u64);

    // An empty string counts as missing, like an absent value
    if text.is_empty() && min.is_some_and(|min| min > 0) {
        return FieldError {
            value: None,
            ..FieldError::required(&path)
        };
    }

    match (min, max) {
        (Some(min), _) if len < min || err.code == "minlength" => FieldError {
            message: format!(
                "Path `{}` (`{}`) is shorter than the minimum allowed length ({}).",
                path, text, min
            ),
            kind: "minlength".to_string(),
            path,
            value,
        },
        (_, Some(max)) => FieldError {
            message: format!(
                "Path `{}` (`{}`) is longer than the maximum allowed length ({}).",
                path, text, max
            ),
            kind: "maxlength".to_string(),
            path,
            value,
        },
        _ => FieldError {
            message: format!("Path `{}` (`{}`) has an invalid length.", path, text),
            kind: "length".to_string(),
            path,
            value,
        },
    }
}

fn range_error(path: String, err: &ValidationError, value: Option<Value>) -> FieldError {
    let number = value.as_ref().and_then(Value::as_f64);
    let min = err.params.get("min").and_then(Value::as_f64);
    let max = err.params.get("max").and_then(Value::as_f64);
    let shown = value.as_ref().map(display_value).unwrap_or_default();

    match (number, min, max) {
        (Some(n), Some(min), _) if n < min => FieldError {
            message: format!(
                "Path `{}` ({}) is less than minimum allowed value ({}).",
                path, shown, min
            ),
            kind: "min".to_string(),
            path,
            value,
        },
        (_, _, Some(max)) => FieldError {
            message: format!(
                "Path `{}` ({}) is more than maximum allowed value ({}).",
                path, shown, max
            ),
            kind: "max".to_string(),
            path,
            value,
        },
        _ => FieldError {
            message: format!("Path `{}` ({}) is out of range.", path, shown),
            kind: "range".to_string(),
            path,
            value,
        },
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `first_name` -> `firstName`
pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Every field error collected while validating one record.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    record: &'static str,
    errors: BTreeMap<String, FieldError>,
}

impl ValidationFailure {
    pub fn new(record: &'static str) -> Self {
        Self {
            record,
            errors: BTreeMap::new(),
        }
    }

    pub fn errors(&self) -> &BTreeMap<String, FieldError> {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FieldError> {
        self.errors.get(path)
    }

    /// Record an error. The first error seen for a path wins.
    pub fn push(&mut self, error: FieldError) {
        self.errors.entry(error.path.clone()).or_insert(error);
    }

    /// Fold the errors reported by `validator::Validate::validate`.
    pub fn merge(&mut self, errors: &ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            let path = to_camel_case(&field);
            for err in errs.iter() {
                self.push(FieldError::from_validator(&path, err));
            }
        }
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation failed", self.record)
    }
}

impl std::error::Error for ValidationFailure {}
