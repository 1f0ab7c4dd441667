//! Lenient input values accepted in request bodies.

use serde::Deserialize;

use super::validation::{FieldError, ValidationFailure};

/// A number sent either as a JSON number or as a numeric string (`"-10"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Resolve to a number, recording a cast error under `path` otherwise.
    pub fn resolve(&self, path: &str, failure: &mut ValidationFailure) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Some(n),
                _ => {
                    failure.push(FieldError::cast(path, s));
                    None
                }
            },
        }
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Optional numeric input resolved in one go.
pub fn resolve_numeric(
    input: Option<&NumericInput>,
    path: &str,
    failure: &mut ValidationFailure,
) -> Option<f64> {
    input.and_then(|n| n.resolve(path, failure))
}

/// Tags sent as a list or as a single string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    Many(Vec<String>),
    One(String),
}

impl TagsInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Many(tags) => tags,
            Self::One(tag) => vec![tag],
        }
    }
}

impl From<Vec<String>> for TagsInput {
    fn from(tags: Vec<String>) -> Self {
        Self::Many(tags)
    }
}
