//! Reducer trait.

use super::action::Action;
use super::state::StoreState;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (&State, Action) -> State. Matching
/// exhaustively on `Self::Action` is what makes it total over the
/// scope's action set.
pub trait Reducer: 'static {
    /// The state type this reducer operates on.
    type State: StoreState;

    /// The closed action set this reducer handles.
    type Action: Action;

    /// Process an action and return the next state.
    ///
    /// Returning a value equal to `state` marks the action as a no-op:
    /// the store keeps the previous snapshot and notifies nobody.
    fn reduce(state: &Self::State, action: Self::Action) -> Self::State;
}
