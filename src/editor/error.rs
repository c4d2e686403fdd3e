use thiserror::Error;

use crate::model::EntityKind;
use crate::schema::{FieldErrors, SchemaError};
use crate::sync::SyncError;

/// Everything an editor operation can fail with.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The draft was rejected locally; nothing was sent.
    #[error("Invalid {entity}: {}", field_list(.errors))]
    Validation {
        entity: EntityKind,
        errors: FieldErrors,
    },

    /// The store refused a mutation. Displays the store's own text.
    #[error("{source}")]
    Remote {
        entity: EntityKind,
        #[source]
        source: SyncError,
    },

    #[error("Could not fetch {entity} '{key}': {source}")]
    Fetch {
        entity: EntityKind,
        key: String,
        #[source]
        source: SyncError,
    },

    /// More than one row for a unique key.
    #[error(transparent)]
    Integrity(SyncError),

    #[error("You must be signed in to make changes.")]
    Unauthenticated,

    #[error("No {entity} selected.")]
    NothingSelected { entity: EntityKind },

    /// The row is not among the ones the caller may edit.
    #[error("'{key}' is not one of your {entity} records")]
    NotEditable { entity: EntityKind, key: String },

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("{entity} records cannot be {action}")]
    Unsupported {
        entity: EntityKind,
        action: &'static str,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl EditorError {
    /// Classifies a failed mutation.
    pub(crate) fn remote(entity: EntityKind, source: SyncError) -> Self {
        match source {
            SyncError::Unauthenticated => EditorError::Unauthenticated,
            SyncError::Duplicate { .. } => EditorError::Integrity(source),
            source => EditorError::Remote { entity, source },
        }
    }

    /// Classifies a failed single-row load.
    pub(crate) fn fetch(entity: EntityKind, key: &str, source: SyncError) -> Self {
        match source {
            SyncError::Duplicate { .. } => EditorError::Integrity(source),
            source => EditorError::Fetch {
                entity,
                key: key.to_string(),
                source,
            },
        }
    }
}

fn field_list(errors: &FieldErrors) -> String {
    errors.keys().cloned().collect::<Vec<_>>().join(", ")
}
