use thiserror::Error;

use crate::model::EntityKind;
use crate::store::StoreError;

/// Errors from the sync client.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No session; the request never left the client.
    #[error("You must be signed in to make changes.")]
    Unauthenticated,

    #[error("No {entity} found for '{key}'")]
    NotFound { entity: EntityKind, key: String },

    /// More than one row for a key that must be unique.
    #[error("There are duplicate records for '{key}' ({count} {entity} rows). Please contact system administrator")]
    Duplicate {
        entity: EntityKind,
        key: String,
        count: usize,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to read {entity} row: {source}")]
    Decode {
        entity: EntityKind,
        #[source]
        source: serde_json::Error,
    },
}
