use serde_json::Value;

use super::Schema;
use crate::model::Record;

/// Editable fields of `normalized` whose value differs from `pristine`.
///
/// Fields absent on either side count as null, so clearing an optional field
/// shows up as an explicit `null` and an untouched null never does.
pub fn diff(schema: &Schema, pristine: &Record, normalized: &Record) -> Record {
    let mut changes = Record::new();
    for rule in schema.editable() {
        let Some(next) = normalized.get(rule.name) else {
            continue;
        };
        let before = pristine.get(rule.name).unwrap_or(&Value::Null);
        if next != before {
            changes.insert(rule.name.to_string(), next.clone());
        }
    }
    changes
}
