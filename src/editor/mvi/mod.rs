//! Unidirectional dialog primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: value describing everything a dialog shows
//! - **Intent**: user action or async result
//! - **Reducer**: pure `(State, Intent) -> State`
//!
//! Side effects (store calls, notices) live outside the reducer, in
//! [`EditorSession`](super::EditorSession).

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::DialogState;
