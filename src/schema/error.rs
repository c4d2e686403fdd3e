use thiserror::Error;

use crate::model::EntityKind;

/// Misuse of a schema by calling code. Invalid user input never ends up here;
/// it is reported through [`Validation::Invalid`](super::Validation).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("No rule for field '{field}' in the {entity} schema")]
    UnknownField { entity: EntityKind, field: String },

    #[error("Field '{field}' of {entity} is read-only")]
    ReadOnlyField { entity: EntityKind, field: String },
}
