//! Intents for the editor dialog.

use serde_json::Value;

use super::mvi::Intent;
use crate::model::Entity;

#[derive(Debug, Clone)]
pub enum EditorIntent<E> {
    /// Show a freshly fetched row.
    Open { entity: E },

    /// Another row was picked while open. Replaces the snapshot and any
    /// draft with the freshly fetched row.
    Reseed { entity: E },

    /// Blank draft for a new row.
    StartAdd,

    /// Draft over the row being viewed.
    StartEdit,

    SetField { name: String, value: Value },

    /// Discard the draft or the delete dialog.
    Cancel,

    /// Validate and send the draft, or delete the selected row.
    Submit,

    OpenDelete { candidates: Vec<String> },

    SelectForDelete { key: String },

    /// The store accepted the pending mutation.
    Succeeded,

    /// The store refused the pending mutation.
    Failed,

    /// Dismiss the dialog.
    Close,
}

impl<E: Entity> Intent for EditorIntent<E> {}
