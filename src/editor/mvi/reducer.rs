use super::intent::Intent;
use super::state::DialogState;

/// The only place dialog state changes.
///
/// Must stay pure: no I/O, no notices, no clocks. Anything the transition
/// needs has to arrive in the intent.
pub trait Reducer {
    type State: DialogState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
