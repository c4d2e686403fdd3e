use std::marker::PhantomData;

use super::form::Form;
use super::intent::EditorIntent;
use super::mvi::Reducer;
use super::state::{EditorState, Mutation};
use crate::model::Entity;
use crate::schema::{self, FieldErrors, Validation};

/// Transitions for the editor of one entity. Intents that make no sense in
/// the current state leave it unchanged.
pub struct EditorReducer<E>(PhantomData<E>);

impl<E: Entity> Reducer for EditorReducer<E> {
    type State = EditorState<E>;
    type Intent = EditorIntent<E>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EditorIntent::Open { entity } => match state {
                EditorState::Closed => EditorState::Viewing { entity },
                other => other,
            },

            EditorIntent::Reseed { entity } => match state {
                EditorState::Viewing { .. } => EditorState::Viewing { entity },
                EditorState::Editing {
                    pristine: Some(_), ..
                } => {
                    let form = Form::seeded(E::schema(), &entity.to_record());
                    EditorState::Editing {
                        pristine: Some(entity),
                        form,
                    }
                }
                other => other,
            },

            EditorIntent::StartAdd => match state {
                EditorState::Closed if E::CREATABLE => EditorState::Editing {
                    pristine: None,
                    form: Form::empty(E::schema()),
                },
                other => other,
            },

            EditorIntent::StartEdit => match state {
                EditorState::Viewing { entity } => {
                    let form = Form::seeded(E::schema(), &entity.to_record());
                    EditorState::Editing {
                        pristine: Some(entity),
                        form,
                    }
                }
                other => other,
            },

            EditorIntent::SetField { name, value } => match state {
                EditorState::Editing { pristine, mut form } => {
                    form.set(E::schema(), &name, value);
                    EditorState::Editing { pristine, form }
                }
                other => other,
            },

            EditorIntent::Cancel => match state {
                EditorState::Editing {
                    pristine: Some(entity),
                    ..
                } => EditorState::Viewing { entity },
                other @ EditorState::Submitting { .. } => other,
                _ => EditorState::Closed,
            },

            EditorIntent::Submit => match state {
                EditorState::Editing { pristine, form } => submit_draft(pristine, form),
                EditorState::ConfirmingDelete {
                    candidates,
                    selected: Some(key),
                } => EditorState::Submitting {
                    mutation: Mutation::Delete { key: key.clone() },
                    resume: Box::new(EditorState::ConfirmingDelete {
                        candidates,
                        selected: Some(key),
                    }),
                },
                other => other,
            },

            EditorIntent::OpenDelete { candidates } => match state {
                EditorState::Closed => EditorState::ConfirmingDelete {
                    candidates,
                    selected: None,
                },
                other => other,
            },

            EditorIntent::SelectForDelete { key } => match state {
                EditorState::ConfirmingDelete {
                    candidates,
                    selected,
                } => {
                    let selected = if candidates.contains(&key) {
                        Some(key)
                    } else {
                        selected
                    };
                    EditorState::ConfirmingDelete {
                        candidates,
                        selected,
                    }
                }
                other => other,
            },

            EditorIntent::Succeeded => match state {
                EditorState::Submitting { .. } => EditorState::Closed,
                other => other,
            },

            EditorIntent::Failed => match state {
                EditorState::Submitting { resume, .. } => *resume,
                other => other,
            },

            EditorIntent::Close => match state {
                other @ EditorState::Submitting { .. } => other,
                _ => EditorState::Closed,
            },
        }
    }
}

fn submit_draft<E: Entity>(pristine: Option<E>, mut form: Form) -> EditorState<E> {
    let schema = E::schema();
    let normalized = match schema.validate(&form.values()) {
        Ok(Validation::Valid(normalized)) => normalized,
        Ok(Validation::Invalid(errors)) => {
            form.attach_errors(&errors);
            return EditorState::Editing { pristine, form };
        }
        // Foreign fields are reported by the session before dispatch.
        Err(_) => return EditorState::Editing { pristine, form },
    };

    form.attach_errors(&FieldErrors::new());
    let mutation = match &pristine {
        None => Mutation::Create { fields: normalized },
        Some(entity) => Mutation::Update {
            key: entity.key(),
            changes: schema::diff(schema, &entity.to_record(), &normalized),
        },
    };
    EditorState::Submitting {
        mutation,
        resume: Box::new(EditorState::Editing { pristine, form }),
    }
}
