//! Submitted payloads and their validation rules.
//!
//! Each form turns a raw, loosely typed submission into a normalized domain
//! value. Bad input is reported as [`Validation::Invalid`] with one message
//! per failing field, in field declaration order.

pub mod listing;
pub mod review;

pub use listing::ListingSubmission;
pub use review::ReviewSubmission;

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::ValidationErrors;

use crate::error::AppError;

/// Outcome of validating a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Valid(T),
    Invalid(Vec<String>),
}

impl<T> Validation<T> {
    /// Converts the outcome into a handler result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] carrying the messages joined by `,`.
    pub fn into_result(self) -> Result<T, AppError> {
        match self {
            Validation::Valid(value) => Ok(value),
            Validation::Invalid(messages) => Err(AppError::bad_request(messages.join(","))),
        }
    }
}

/// Reads a submission's nested object, e.g. the `listing` in `{"listing": {...}}`.
///
/// On failure returns the message to report: missing or `null` is required,
/// anything other than an object has the wrong type.
pub(crate) fn read_object<T: DeserializeOwned>(
    scope: &str,
    raw: Option<Value>,
) -> Result<T, String> {
    match raw {
        None | Some(Value::Null) => Err(format!("\"{scope}\" is required")),
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map_err(|_| format!("\"{scope}\" must be of type object")),
        Some(_) => Err(format!("\"{scope}\" must be of type object")),
    }
}

/// Reads a text field; blank, missing or `null` input becomes `None`.
///
/// Form posts always carry strings, JSON bodies may carry any value. On a
/// non-string the error is the message to report for the field.
pub(crate) fn read_text(raw: Option<&Value>) -> Result<Option<String>, &'static str> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(normalize_text(Some(text))),
        Some(_) => Err("must be a string"),
    }
}

/// Reads a finite number from a JSON number or form text.
///
/// Blank, missing or `null` input becomes `None`.
pub(crate) fn read_number(raw: Option<&Value>) -> Result<Option<f64>, &'static str> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>().ok()
        }
        Some(_) => None,
    };

    value
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or("must be a number")
}

/// Trims text; blank or missing input becomes `None`.
pub(crate) fn normalize_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Collects field errors from validator and from the parsing step,
/// formatted as `"<scope>.<field>" <message>` and sorted by `order`.
pub(crate) struct FieldErrors {
    scope: &'static str,
    order: &'static [&'static str],
    errors: Vec<(usize, String)>,
}

impl FieldErrors {
    pub(crate) fn new(scope: &'static str, order: &'static [&'static str]) -> Self {
        Self {
            scope,
            order,
            errors: Vec::new(),
        }
    }

    fn position(&self, field: &str) -> usize {
        self.order
            .iter()
            .position(|f| *f == field)
            .unwrap_or(self.order.len())
    }

    /// Whether a declared field already has an error.
    pub(crate) fn has(&self, field: &str) -> bool {
        let position = self.position(field);
        position < self.order.len() && self.errors.iter().any(|(p, _)| *p == position)
    }

    pub(crate) fn push(&mut self, field: &str, message: &str) {
        let position = self.position(field);
        self.errors.push((
            position,
            format!("\"{}.{}\" {}", self.scope, field, message),
        ));
    }

    /// Adds the errors reported by a `validator` run, except for fields that
    /// already failed to parse.
    pub(crate) fn extend(&mut self, errors: &ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            let field: &str = &field;
            if self.has(field) {
                continue;
            }
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_deref()
                    .unwrap_or("is invalid")
                    .to_string();
                self.push(field, &message);
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages in field order; the sort is stable within one field.
    pub(crate) fn into_messages(mut self) -> Vec<String> {
        self.errors.sort_by_key(|(position, _)| *position);
        self.errors.into_iter().map(|(_, message)| message).collect()
    }
}
