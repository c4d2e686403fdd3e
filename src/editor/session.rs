//! Drives one editor dialog: reducer for state, sync client for I/O.

use std::sync::Arc;

use serde_json::Value;

use super::error::EditorError;
use super::intent::EditorIntent;
use super::messages;
use super::mvi::Reducer;
use super::reducer::EditorReducer;
use super::state::{EditorState, Mutation};
use crate::feedback::FeedbackChannel;
use crate::model::{Entity, Record};
use crate::refresh::RefreshTrigger;
use crate::sync::{SyncClient, SyncOutcome};

/// Dispatch an intent through the reducer and log the transition.
macro_rules! dispatch_editor {
    ($self:expr, $intent:expr) => {{
        let before = $self.state.name();
        $self.state = EditorReducer::<E>::reduce(std::mem::take(&mut $self.state), $intent);
        tracing::debug!(
            entity = %E::KIND,
            from = before,
            to = $self.state.name(),
            "editor transition"
        );
    }};
}

/// One dialog over entity `E`.
///
/// Holds the only draft. Every method that talks to the store runs to
/// completion before returning, so a second submit can never overlap the
/// first.
pub struct EditorSession<E: Entity> {
    state: EditorState<E>,
    sync: SyncClient,
    feedback: Arc<dyn FeedbackChannel>,
    refresh: Arc<dyn RefreshTrigger>,
}

impl<E: Entity> EditorSession<E> {
    pub fn new(
        sync: SyncClient,
        feedback: Arc<dyn FeedbackChannel>,
        refresh: Arc<dyn RefreshTrigger>,
    ) -> Self {
        Self {
            state: EditorState::Closed,
            sync,
            feedback,
            refresh,
        }
    }

    pub fn state(&self) -> &EditorState<E> {
        &self.state
    }

    fn require(&self, action: &'static str, allowed: bool) -> Result<(), EditorError> {
        if allowed {
            Ok(())
        } else {
            Err(EditorError::InvalidTransition {
                action,
                state: self.state.name(),
            })
        }
    }

    /// Fetches the row under `key` and shows it.
    ///
    /// A failed fetch reports it and leaves the dialog closed.
    pub async fn open(&mut self, key: &str) -> Result<(), EditorError> {
        self.require("open", matches!(self.state, EditorState::Closed))?;
        let entity = self.fetch(key).await?;
        dispatch_editor!(self, EditorIntent::Open { entity });
        Ok(())
    }

    /// Switches the open dialog to another of `candidates`, fetching it
    /// fresh.
    ///
    /// Any draft over the previous row is discarded. Keys outside
    /// `candidates` are refused without a fetch.
    pub async fn select(&mut self, key: &str, candidates: &[String]) -> Result<(), EditorError> {
        let current = match &self.state {
            EditorState::Viewing { entity }
            | EditorState::Editing {
                pristine: Some(entity),
                ..
            } => entity.key(),
            _ => {
                return Err(EditorError::InvalidTransition {
                    action: "select",
                    state: self.state.name(),
                })
            }
        };
        ensure_candidate::<E>(key, candidates)?;
        if current == key {
            return Ok(());
        }

        let entity = self.fetch(key).await?;
        dispatch_editor!(self, EditorIntent::Reseed { entity });
        Ok(())
    }

    async fn fetch(&mut self, key: &str) -> Result<E, EditorError> {
        match self.sync.fetch::<E>(key).await {
            Ok(entity) => Ok(entity),
            Err(source) => {
                let err = EditorError::fetch(E::KIND, key, source);
                let notice = match &err {
                    EditorError::Integrity(_) => messages::failed(&err),
                    _ => messages::fetch_failed(E::KIND),
                };
                tracing::warn!(entity = %E::KIND, key, error = %err, "fetch failed");
                self.feedback.notify(notice);
                dispatch_editor!(self, EditorIntent::Close);
                Err(err)
            }
        }
    }

    /// Opens a blank draft.
    pub fn start_add(&mut self) -> Result<(), EditorError> {
        if !E::CREATABLE {
            return Err(EditorError::Unsupported {
                entity: E::KIND,
                action: "added",
            });
        }
        self.require("add", matches!(self.state, EditorState::Closed))?;
        dispatch_editor!(self, EditorIntent::StartAdd);
        Ok(())
    }

    /// Opens a draft over the row being viewed, provided it is one of
    /// `candidates`.
    pub fn start_edit(&mut self, candidates: &[String]) -> Result<(), EditorError> {
        self.require("edit", matches!(self.state, EditorState::Viewing { .. }))?;
        if let Some(entity) = self.state.entity() {
            ensure_candidate::<E>(&entity.key(), candidates)?;
        }
        dispatch_editor!(self, EditorIntent::StartEdit);
        Ok(())
    }

    /// Changes one draft field. Its messages are refreshed immediately.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<(), EditorError> {
        E::schema().writable(name)?;
        self.require("edit a field", matches!(self.state, EditorState::Editing { .. }))?;
        dispatch_editor!(
            self,
            EditorIntent::SetField {
                name: name.to_string(),
                value: value.into(),
            }
        );
        Ok(())
    }

    /// Discards the draft (back to the row) or the delete dialog.
    pub fn cancel(&mut self) {
        dispatch_editor!(self, EditorIntent::Cancel);
    }

    /// Dismisses whatever is open. Ignored while a store call is pending.
    pub fn close(&mut self) {
        dispatch_editor!(self, EditorIntent::Close);
    }

    /// Validates the draft and sends it.
    ///
    /// On success returns the row as the store now holds it, when known.
    /// On a store failure the draft stays open for another try.
    pub async fn submit(&mut self) -> Result<Option<E>, EditorError> {
        self.require("submit", matches!(self.state, EditorState::Editing { .. }))?;
        // A draft field the schema does not know is a caller bug, not a
        // validation message.
        if let Some(form) = self.state.form() {
            E::schema().validate(&form.values())?;
        }
        dispatch_editor!(self, EditorIntent::Submit);
        if self.state.is_submitting() {
            return self.send().await;
        }

        match &self.state {
            EditorState::Editing { form, .. } => Err(EditorError::Validation {
                entity: E::KIND,
                errors: form.errors(),
            }),
            _ => Err(EditorError::InvalidTransition {
                action: "submit",
                state: self.state.name(),
            }),
        }
    }

    /// Runs the pending mutation and settles the dialog.
    async fn send(&mut self) -> Result<Option<E>, EditorError> {
        let Some(mutation) = self.state.mutation().cloned() else {
            return Err(EditorError::InvalidTransition {
                action: "send",
                state: self.state.name(),
            });
        };

        let result = match &mutation {
            Mutation::Create { fields } => self.sync.create::<E>(fields.clone()).await,
            Mutation::Update { key, changes } => {
                self.sync.update::<E>(key, changes.clone()).await
            }
            Mutation::Delete { key } => self.sync.delete::<E>(key).await,
        };

        match result {
            Ok(outcome) => {
                let entity = match outcome {
                    SyncOutcome::Applied(row) => {
                        self.refresh.invalidate();
                        row.and_then(decode::<E>)
                    }
                    SyncOutcome::Unchanged => self.state_pristine(),
                };
                let label = entity
                    .as_ref()
                    .map(E::key)
                    .unwrap_or_else(|| mutation_label::<E>(&mutation));
                let notice = match mutation {
                    Mutation::Create { .. } => messages::created(E::KIND, &label),
                    Mutation::Update { .. } => messages::edited(E::KIND, &label),
                    Mutation::Delete { .. } => messages::deleted(E::KIND, &label),
                };
                self.feedback.notify(notice);
                dispatch_editor!(self, EditorIntent::Succeeded);
                Ok(entity)
            }
            Err(source) => {
                let err = EditorError::remote(E::KIND, source);
                tracing::warn!(
                    entity = %E::KIND,
                    mutation = mutation_kind(&mutation),
                    error = %err,
                    "mutation failed"
                );
                self.feedback.notify(messages::failed(&err));
                dispatch_editor!(self, EditorIntent::Failed);
                Err(err)
            }
        }
    }

    fn state_pristine(&self) -> Option<E> {
        match &self.state {
            EditorState::Submitting { resume, .. } => resume.entity().cloned(),
            _ => None,
        }
    }

    /// Opens the delete dialog over `candidates`, nothing selected.
    pub fn open_delete(&mut self, candidates: Vec<String>) -> Result<(), EditorError> {
        self.require("delete", matches!(self.state, EditorState::Closed))?;
        dispatch_editor!(self, EditorIntent::OpenDelete { candidates });
        Ok(())
    }

    /// Picks the delete target. Keys outside the candidates are ignored.
    pub fn select_for_delete(&mut self, key: &str) -> Result<(), EditorError> {
        self.require(
            "select",
            matches!(self.state, EditorState::ConfirmingDelete { .. }),
        )?;
        dispatch_editor!(
            self,
            EditorIntent::SelectForDelete {
                key: key.to_string(),
            }
        );
        Ok(())
    }

    /// Deletes the selected row.
    ///
    /// With nothing selected, reports it without contacting the store. A
    /// failure keeps the dialog and its selection.
    pub async fn confirm_delete(&mut self) -> Result<(), EditorError> {
        self.require(
            "delete",
            matches!(self.state, EditorState::ConfirmingDelete { .. }),
        )?;
        if self.state.selected().is_none() {
            self.feedback.notify(messages::nothing_selected(E::KIND));
            return Err(EditorError::NothingSelected { entity: E::KIND });
        }

        dispatch_editor!(self, EditorIntent::Submit);
        self.send().await.map(|_| ())
    }
}

fn ensure_candidate<E: Entity>(key: &str, candidates: &[String]) -> Result<(), EditorError> {
    if candidates.iter().any(|candidate| candidate == key) {
        Ok(())
    } else {
        Err(EditorError::NotEditable {
            entity: E::KIND,
            key: key.to_string(),
        })
    }
}

fn mutation_kind(mutation: &Mutation) -> &'static str {
    match mutation {
        Mutation::Create { .. } => "create",
        Mutation::Update { .. } => "update",
        Mutation::Delete { .. } => "delete",
    }
}

fn decode<E: Entity>(row: Record) -> Option<E> {
    match E::from_record(row) {
        Ok(entity) => Some(entity),
        Err(err) => {
            tracing::warn!(entity = %E::KIND, error = %err, "store returned an unreadable row");
            None
        }
    }
}

/// Best name for a row when the store sent none back.
fn mutation_label<E: Entity>(mutation: &Mutation) -> String {
    let key_field = E::schema().key_field;
    let named = |fields: &Record| {
        fields
            .get(key_field)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    match mutation {
        Mutation::Create { fields } => named(fields).unwrap_or_default(),
        Mutation::Update { key, changes } => named(changes).unwrap_or_else(|| key.clone()),
        Mutation::Delete { key } => key.clone(),
    }
}
