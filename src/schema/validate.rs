use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{FieldKind, FieldSchema};
use crate::models::coordinate::{number_from_value, Coordinate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required field absent, null or blank
    Missing,
    /// Value present but does not fit the field kind
    WrongKind { expected: String },
}

/// One problem with one field; `path` is dotted for composite members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub path: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{}: required", self.path),
            ViolationKind::WrongKind { expected } => {
                write!(f, "{}: expected {}", self.path, expected)
            }
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

pub(super) fn validate_fields(
    fields: &[FieldSchema],
    record: &Map<String, Value>,
    prefix: &str,
    out: &mut Vec<FieldViolation>,
) {
    for field in fields {
        let path = join(prefix, &field.name);

        let value = match record.get(&field.name) {
            Some(v) if !is_blank(v) => v,
            _ => {
                if field.required {
                    out.push(FieldViolation {
                        path,
                        kind: ViolationKind::Missing,
                    });
                }
                continue;
            }
        };

        let fits = match &field.kind {
            FieldKind::String => value.is_string(),
            FieldKind::Number => number_from_value(value).is_some_and(f64::is_finite),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Enum { options } => value
                .as_str()
                .is_some_and(|s| options.iter().any(|o| o == s)),
            FieldKind::Location => {
                Coordinate::from_value(value).is_some_and(|c| c.is_valid())
            }
            FieldKind::Reference { .. } => value.is_string(),
            FieldKind::Composite { fields } => match value.as_object() {
                Some(inner) => {
                    validate_fields(fields, inner, &path, out);
                    true
                }
                None => false,
            },
        };

        if !fits {
            out.push(FieldViolation {
                path,
                kind: ViolationKind::WrongKind {
                    expected: field.kind.name().to_string(),
                },
            });
        }
    }
}
