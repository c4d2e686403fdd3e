//! State of an editor dialog.

use crate::model::{Entity, Record};

use super::form::Form;
use super::mvi::DialogState;

/// A store call the dialog is waiting on.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { fields: Record },
    /// `key` addresses the row as it was before the edit.
    Update { key: String, changes: Record },
    Delete { key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState<E> {
    /// No dialog.
    Closed,

    /// Read-only view of one row.
    Viewing { entity: E },

    /// A draft is open. `pristine` is the row being edited, `None` when adding.
    Editing { pristine: Option<E>, form: Form },

    /// Waiting on the store. `resume` is where a failure returns to.
    Submitting {
        mutation: Mutation,
        resume: Box<EditorState<E>>,
    },

    /// Delete dialog over the keys the caller may remove.
    ConfirmingDelete {
        candidates: Vec<String>,
        selected: Option<String>,
    },
}

impl<E> Default for EditorState<E> {
    fn default() -> Self {
        EditorState::Closed
    }
}

impl<E: Entity> DialogState for EditorState<E> {}

impl<E> EditorState<E> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    /// Short name for logs and transition errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Viewing { .. } => "viewing",
            Self::Editing { pristine: None, .. } => "adding",
            Self::Editing { .. } => "editing",
            Self::Submitting { .. } => "submitting",
            Self::ConfirmingDelete { .. } => "confirming delete",
        }
    }

    pub fn entity(&self) -> Option<&E> {
        match self {
            Self::Viewing { entity } => Some(entity),
            Self::Editing { pristine, .. } => pristine.as_ref(),
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&Form> {
        match self {
            Self::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn mutation(&self) -> Option<&Mutation> {
        match self {
            Self::Submitting { mutation, .. } => Some(mutation),
            _ => None,
        }
    }

    /// The delete target, if one is picked.
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::ConfirmingDelete { selected, .. } => selected.as_deref(),
            _ => None,
        }
    }
}
