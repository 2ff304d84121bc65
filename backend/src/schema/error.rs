//! Errors raised while validating, merging, and paginating records.

use std::fmt;

use pagination::PaginationError;
use serde::Serialize;
use serde_json::Value;
use validator::ValidationErrors;

/// Field path used when a failure cannot be tied to a single field.
pub const ROOT_FIELD: &str = "$";

const MISSING_FIELD: &str = "missing_field";
const INVALID_TYPE: &str = "invalid_type";

/// One offending field reported by a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Path of the offending field, e.g. `email` or `data[2].email`.
    pub field: String,
    /// Machine-readable rule identifier, e.g. `missing_field` or `email`.
    pub code: String,
    /// Human-readable explanation.
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Structured validation failure listing every offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Issues in the order they were detected.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Paths of the offending fields.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.field.as_str())
    }

    /// Prefix every field path with the position of the failing item.
    pub(crate) fn at_index(mut self, collection: &str, index: usize) -> Self {
        for issue in &mut self.issues {
            issue.field = if issue.field == ROOT_FIELD {
                format!("{collection}[{index}]")
            } else {
                format!("{collection}[{index}].{}", issue.field)
            };
        }
        self
    }

    /// Translate a decode failure reported by `serde_json`.
    pub(crate) fn from_decode(err: &serde_json::Error) -> Self {
        let message = err.to_string();
        let issue = match missing_field_name(&message) {
            Some(field) => FieldIssue::new(
                field,
                MISSING_FIELD,
                format!("missing required field: {field}"),
            ),
            None => FieldIssue::new(ROOT_FIELD, INVALID_TYPE, message.clone()),
        };
        Self {
            issues: vec![issue],
        }
    }
}

fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split_once('`').map(|(name, _)| name)
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut issues: Vec<FieldIssue> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                let field = field.to_string();
                failures.iter().map(move |failure| {
                    let message = failure.message.as_ref().map_or_else(
                        || format!("{field} failed the {} rule", failure.code),
                        ToString::to_string,
                    );
                    FieldIssue::new(field.clone(), failure.code.to_string(), message)
                })
            })
            .collect();
        // validator reports fields through a hash map.
        issues.sort_by(|a, b| a.field.cmp(&b.field));
        Self { issues }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed")?;
        for (position, issue) in self.issues.iter().enumerate() {
            let separator = if position == 0 { ": " } else { "; " };
            write!(f, "{separator}{}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Failures raised by the generic record utility.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Merged or supplied fields do not satisfy the record's rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A merge source could not be viewed as a field mapping.
    #[error("merge source {index} is {kind}, expected a mapping of fields")]
    UnsupportedSource {
        /// Position of the rejected source.
        index: usize,
        /// JSON kind of the rejected source.
        kind: &'static str,
    },
    /// A record dumped to something other than a field mapping.
    #[error("record dumped to {kind}, expected a mapping of fields")]
    NotARecord {
        /// JSON kind the record produced.
        kind: &'static str,
    },
    /// A record or source could not be dumped to a field mapping.
    #[error("failed to dump fields: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The pagination envelope rejected the supplied extras.
    #[error(transparent)]
    Envelope(#[from] PaginationError),
}

/// Name the JSON kind of a value for diagnostics.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[expect(dead_code, reason = "decoded only to provoke serde errors")]
    struct Person {
        name: String,
        age: u8,
    }

    fn decode_error(value: Value) -> ValidationError {
        let err = serde_json::from_value::<Person>(value).expect_err("decode must fail");
        ValidationError::from_decode(&err)
    }

    #[rstest]
    fn missing_field_is_named() {
        let err = decode_error(json!({ "age": 3 }));
        let issue = &err.issues()[0];
        assert_eq!(issue.field, "name");
        assert_eq!(issue.code, MISSING_FIELD);
    }

    #[rstest]
    fn type_mismatch_reports_root() {
        let err = decode_error(json!({ "name": "x", "age": "old" }));
        let issue = &err.issues()[0];
        assert_eq!(issue.field, ROOT_FIELD);
        assert_eq!(issue.code, INVALID_TYPE);
        assert!(issue.message.contains("invalid type"));
    }

    #[rstest]
    #[case("name", "data[3].name")]
    #[case(ROOT_FIELD, "data[3]")]
    fn index_prefix_is_applied(#[case] field: &str, #[case] expected: &str) {
        let err = ValidationError {
            issues: vec![FieldIssue::new(field, MISSING_FIELD, "missing")],
        };
        let shifted = err.at_index("data", 3);
        assert_eq!(shifted.fields().collect::<Vec<_>>(), vec![expected]);
    }

    #[rstest]
    fn display_lists_every_issue() {
        let err = ValidationError {
            issues: vec![
                FieldIssue::new("email", "email", "bad address"),
                FieldIssue::new("name", MISSING_FIELD, "missing required field: name"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "validation failed: email: bad address; name: missing required field: name"
        );
    }

    #[rstest]
    #[case(json!(null), "null")]
    #[case(json!(3), "a number")]
    #[case(json!([1]), "an array")]
    #[case(json!({}), "a mapping")]
    fn kinds_are_named(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(kind_of(&value), expected);
    }
}
