//! The draft behind an open edit dialog.
//!
//! Field name → value, messages and dirty flag. Only the reducer mutates it.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::Record;
use crate::schema::{FieldErrors, Schema};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    /// Raw input, exactly as entered.
    pub value: Value,
    pub errors: Vec<String>,
    /// Whether the value differs from the one the draft started with.
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Form {
    fields: BTreeMap<String, FieldState>,
    initial: Record,
}

impl Form {
    /// Blank draft for a new row: schema defaults, everything else null.
    pub fn empty(schema: &Schema) -> Self {
        let initial = schema
            .editable()
            .map(|rule| {
                let value = rule
                    .default
                    .map(|d| Value::String(d.to_string()))
                    .unwrap_or(Value::Null);
                (rule.name.to_string(), value)
            })
            .collect();
        Self::from_initial(initial)
    }

    /// Draft over an existing row.
    pub fn seeded(schema: &Schema, row: &Record) -> Self {
        let initial = schema
            .editable()
            .map(|rule| {
                let value = row.get(rule.name).cloned().unwrap_or(Value::Null);
                (rule.name.to_string(), value)
            })
            .collect();
        Self::from_initial(initial)
    }

    fn from_initial(initial: Record) -> Self {
        let fields = initial
            .iter()
            .map(|(name, value)| {
                (
                    name.clone(),
                    FieldState {
                        value: value.clone(),
                        errors: Vec::new(),
                        dirty: false,
                    },
                )
            })
            .collect();
        Self { fields, initial }
    }

    pub fn get(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).map(|field| &field.value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldState)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Replaces one value and re-checks that field alone.
    ///
    /// Returns false (and changes nothing) for fields the draft does not hold.
    pub fn set(&mut self, schema: &Schema, name: &str, value: Value) -> bool {
        let Some(field) = self.fields.get_mut(name) else {
            return false;
        };
        let Ok(checked) = schema.validate_field(name, &value) else {
            return false;
        };

        let initial = self.initial.get(name).unwrap_or(&Value::Null);
        field.dirty = match &checked {
            Ok(normalized) => normalized != initial && value != *initial,
            Err(_) => value != *initial,
        };
        field.errors = checked.err().unwrap_or_default();
        field.value = value;
        true
    }

    /// Raw values of every field, for whole-draft validation.
    pub fn values(&self) -> Record {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value.clone()))
            .collect()
    }

    /// Replaces every field's messages with the ones in `errors`.
    pub fn attach_errors(&mut self, errors: &FieldErrors) {
        for (name, field) in self.fields.iter_mut() {
            field.errors = errors.get(name).cloned().unwrap_or_default();
        }
    }

    pub fn errors(&self) -> FieldErrors {
        self.fields
            .iter()
            .filter(|(_, field)| !field.errors.is_empty())
            .map(|(name, field)| (name.clone(), field.errors.clone()))
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.fields.values().any(|field| field.dirty)
    }
}
