//! Create/view/edit/delete dialogs.
//!
//! [`EditorReducer`] holds every state transition and does no I/O.
//! [`EditorSession`] feeds it intents, calls the [`SyncClient`](crate::sync::SyncClient)
//! and reports outcomes through the feedback channel.

mod error;
mod form;
mod intent;
mod messages;
pub mod mvi;
mod reducer;
mod session;
mod state;

pub use error::EditorError;
pub use form::{FieldState, Form};
pub use intent::EditorIntent;
pub use reducer::EditorReducer;
pub use session::EditorSession;
pub use state::{EditorState, Mutation};
