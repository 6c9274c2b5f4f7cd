//! Field-path validation of parsed model output.
//!
//! Model output is untrusted: every typed value is pulled out of a
//! `serde_json::Value` through a `Validator`, which records a `FieldError`
//! for each missing or ill-typed field instead of stopping at the first one.
//! A payload is accepted only if no error was recorded.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Location in the payload, e.g. `weeks[2].quests[0].resources[1].link`.
    pub path: String,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

/// All field errors found in one payload. Never empty.
#[derive(Debug, Clone, Error)]
#[error("model output failed validation: {}", summarize(.errors))]
pub struct SchemaViolations {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            reason: reason.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `value` as an object, recording an error otherwise.
    pub fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
        match value.as_object() {
            Some(map) => Some(map),
            None => {
                self.error(path, format!("expected an object, found {}", type_name(value)));
                None
            }
        }
    }

    /// Present and non-null, or an error.
    fn present<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'v Value> {
        match obj.get(key) {
            Some(Value::Null) | None => {
                self.error(child_path(path, key), "missing required field");
                None
            }
            Some(value) => Some(value),
        }
    }

    pub fn require_str(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<String> {
        let value = self.present(obj, path, key)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.error(
                    child_path(path, key),
                    format!("expected a string, found {}", type_name(value)),
                );
                None
            }
        }
    }

    /// A number in `[0, 1]`.
    pub fn require_unit_interval(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<f64> {
        let value = self.present(obj, path, key)?;
        match value.as_f64() {
            Some(n) if (0.0..=1.0).contains(&n) => Some(n),
            Some(n) => {
                self.error(
                    child_path(path, key),
                    format!("must be between 0 and 1, got {n}"),
                );
                None
            }
            None => {
                self.error(
                    child_path(path, key),
                    format!("expected a number, found {}", type_name(value)),
                );
                None
            }
        }
    }

    /// An integer within `range`. Whole-valued floats (`2.0`) are accepted.
    pub fn require_int(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
        range: RangeInclusive<i64>,
    ) -> Option<i64> {
        let value = self.present(obj, path, key)?;
        let n = value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        });

        match n {
            Some(n) if range.contains(&n) => Some(n),
            Some(n) => {
                self.error(
                    child_path(path, key),
                    format!(
                        "must be between {} and {}, got {n}",
                        range.start(),
                        range.end()
                    ),
                );
                None
            }
            None => {
                self.error(
                    child_path(path, key),
                    format!("expected an integer, found {}", type_name(value)),
                );
                None
            }
        }
    }

    pub fn require_array<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'v [Value]> {
        let value = self.present(obj, path, key)?;
        self.array_of(value, &child_path(path, key))
    }

    /// Absent or null reads as an empty array; any other non-array is an error.
    pub fn optional_array<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'v [Value]> {
        match obj.get(key) {
            Some(Value::Null) | None => Some(&[]),
            Some(value) => self.array_of(value, &child_path(path, key)),
        }
    }

    fn array_of<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v [Value]> {
        match value.as_array() {
            Some(items) => Some(items.as_slice()),
            None => {
                self.error(path, format!("expected an array, found {}", type_name(value)));
                None
            }
        }
    }

    /// Every element must be a string; offending elements are reported and skipped.
    pub fn string_list(&mut self, items: &[Value], path: &str) -> Vec<String> {
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| match item.as_str() {
                Some(s) => Some(s.to_string()),
                None => {
                    self.error(
                        index_path(path, i),
                        format!("expected a string, found {}", type_name(item)),
                    );
                    None
                }
            })
            .collect()
    }

    /// `Ok(value)` if nothing was recorded, otherwise every recorded error.
    ///
    /// A `None` value with no recorded error is a caller bug and is reported
    /// as an error at the root rather than panicking.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, SchemaViolations> {
        match value {
            Some(value) if self.is_clean() => Ok(value),
            _ if !self.is_clean() => Err(SchemaViolations {
                errors: self.errors,
            }),
            _ => Err(SchemaViolations {
                errors: vec![FieldError {
                    path: String::new(),
                    reason: "payload could not be read".to_string(),
                }],
            }),
        }
    }
}
