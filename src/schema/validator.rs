use std::collections::BTreeMap;

use reqwest::Url;
use serde_json::Value;

use super::error::SchemaError;
use super::rules::{FieldKind, FieldRule};
use super::Schema;
use crate::model::Record;

/// Field name to the messages shown under it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Result of checking a draft against a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// Every editable field, trimmed, with blanks turned into null.
    Valid(Record),
    Invalid(FieldErrors),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }
}

const REQUIRED: &str = "Required";

impl Schema {
    /// Validates a raw draft.
    ///
    /// Missing editable fields count as null. Read-only fields in the input
    /// are ignored; they never reach the normalized record.
    pub fn validate(&self, raw: &Record) -> Result<Validation, SchemaError> {
        for name in raw.keys() {
            if self.rule(name).is_none() {
                return Err(SchemaError::UnknownField {
                    entity: self.entity,
                    field: name.clone(),
                });
            }
        }

        let mut normalized = Record::new();
        let mut errors = FieldErrors::new();
        for rule in self.editable() {
            let value = raw.get(rule.name).unwrap_or(&Value::Null);
            match check(rule, value) {
                Ok(clean) => {
                    normalized.insert(rule.name.to_string(), clean);
                }
                Err(messages) => {
                    errors.insert(rule.name.to_string(), messages);
                }
            }
        }

        if errors.is_empty() {
            Ok(Validation::Valid(normalized))
        } else {
            Ok(Validation::Invalid(errors))
        }
    }

    /// Checks one field on its own, for live feedback while typing.
    pub fn validate_field(
        &self,
        name: &str,
        value: &Value,
    ) -> Result<Result<Value, Vec<String>>, SchemaError> {
        let rule = self.writable(name)?;
        Ok(check(rule, value))
    }
}

fn check(rule: &FieldRule, value: &Value) -> Result<Value, Vec<String>> {
    match rule.kind {
        FieldKind::Integer => check_integer(rule, value),
        FieldKind::Choice(options) => check_choice(rule, options, value),
        FieldKind::Text | FieldKind::Url => check_text(rule, value),
    }
}

fn absent(rule: &FieldRule) -> Result<Value, Vec<String>> {
    if rule.required {
        Err(vec![REQUIRED.to_string()])
    } else {
        Ok(Value::Null)
    }
}

fn check_text(rule: &FieldRule, value: &Value) -> Result<Value, Vec<String>> {
    let raw = match value {
        Value::Null => return absent(rule),
        Value::String(s) => s,
        _ => return Err(vec!["Expected string".to_string()]),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        // Blank counts as absent for optional fields and as too short for
        // required ones.
        return if rule.required {
            Err(vec![rule.too_short_message()])
        } else {
            Ok(Value::Null)
        };
    }

    // Bounds apply to what the user typed. The minimum must also hold for
    // the trimmed value, or the stored row would fail its next check.
    let len = raw.chars().count();
    let kept = trimmed.chars().count();
    let mut errors = Vec::new();
    if rule.min_len.is_some_and(|min| len < min || kept < min) {
        errors.push(rule.too_short_message());
    }
    if rule.max_len.is_some_and(|max| len > max) {
        errors.push(rule.too_long_message());
    }
    if rule.kind == FieldKind::Url && Url::parse(trimmed).is_err() {
        errors.push("Invalid url".to_string());
    }

    if errors.is_empty() {
        Ok(Value::String(trimmed.to_string()))
    } else {
        Err(errors)
    }
}

fn check_choice(
    rule: &FieldRule,
    options: &[&str],
    value: &Value,
) -> Result<Value, Vec<String>> {
    match value {
        Value::Null => absent(rule),
        Value::String(s) if options.contains(&s.as_str()) => Ok(value.clone()),
        Value::String(s) => {
            let expected = options
                .iter()
                .map(|option| format!("'{}'", option))
                .collect::<Vec<_>>()
                .join(" | ");
            Err(vec![format!(
                "Invalid enum value. Expected {}, received '{}'",
                expected, s
            )])
        }
        _ => Err(vec!["Expected string".to_string()]),
    }
}

fn check_integer(rule: &FieldRule, value: &Value) -> Result<Value, Vec<String>> {
    match value {
        Value::Null => absent(rule),
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                positive(v)
            } else if n.as_i64().is_some() {
                Err(vec![NOT_POSITIVE.to_string()])
            } else {
                Err(vec![NOT_INTEGER.to_string()])
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return absent(rule);
            }
            if let Ok(v) = trimmed.parse::<u64>() {
                positive(v)
            } else if trimmed.parse::<i64>().is_ok() {
                Err(vec![NOT_POSITIVE.to_string()])
            } else if trimmed.parse::<f64>().is_ok() {
                Err(vec![NOT_INTEGER.to_string()])
            } else {
                Err(vec!["Expected number".to_string()])
            }
        }
        _ => Err(vec!["Expected number".to_string()]),
    }
}

const NOT_POSITIVE: &str = "Number must be greater than 0";
const NOT_INTEGER: &str = "Expected integer";

fn positive(v: u64) -> Result<Value, Vec<String>> {
    if v == 0 {
        Err(vec![NOT_POSITIVE.to_string()])
    } else {
        Ok(Value::from(v))
    }
}
