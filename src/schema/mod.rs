//! Declarative per-entity field rules.
//!
//! A [`Schema`] lists one [`FieldRule`] per column. Validation walks the rules
//! in order, checks the raw user input against them and produces either a
//! normalized [`Record`](crate::model::Record) or per-field messages. The same
//! schema drives the update diff, so entities never hand-roll either.

mod diff;
mod error;
mod rules;
mod validator;

pub use diff::diff;
pub use error::SchemaError;
pub use rules::{FieldKind, FieldRule};
pub use validator::{FieldErrors, Validation};

use crate::model::EntityKind;

/// Field rules for one entity.
#[derive(Debug)]
pub struct Schema {
    pub entity: EntityKind,
    /// Column used to address a single row.
    pub key_field: &'static str,
    pub fields: &'static [FieldRule],
}

impl Schema {
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    /// Rules the user may change, in declaration order.
    pub fn editable(&self) -> impl Iterator<Item = &FieldRule> {
        self.fields.iter().filter(|rule| !rule.read_only)
    }

    /// Looks up a rule for writing. Unknown and read-only fields are
    /// programmer errors, not validation failures.
    pub fn writable(&self, name: &str) -> Result<&FieldRule, SchemaError> {
        match self.rule(name) {
            None => Err(SchemaError::UnknownField {
                entity: self.entity,
                field: name.to_string(),
            }),
            Some(rule) if rule.read_only => Err(SchemaError::ReadOnlyField {
                entity: self.entity,
                field: name.to_string(),
            }),
            Some(rule) => Ok(rule),
        }
    }
}
