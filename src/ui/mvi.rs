//! MVI building blocks: state, intent, reducer.
//!
//! The session core is written against these traits so the transition
//! logic stays a pure function and can be tested without a terminal.

/// Marker trait for screen state.
///
/// States are immutable values: a reducer consumes the old state and
/// returns a new one, and `PartialEq` lets callers detect changes.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Marker trait for intents.
///
/// An intent is anything that may move the state machine: visitor input,
/// timer expiry, or a completed background task.
pub trait Intent: Send + 'static {}

/// Transition function from `(State, Intent)` to the next state.
///
/// Must be pure; side effects (timers, draws, network) belong to the
/// dispatcher that surrounds the `reduce` call.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
