//! Counter scope driven by `scope-replay`.

use serde::{Deserialize, Serialize};

use crate::mvi::{Action, Event, Reducer, StoreState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterState {
    pub count: i64,
    pub step: i64,
}

impl StoreState for CounterState {}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CounterAction {
    Increment,
    Decrement,
    Reset,
    SetStep(i64),
}

impl Action for CounterAction {
    const KINDS: &'static [&'static str] = &["increment", "decrement", "reset", "set_step"];

    fn kind(&self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Reset => "reset",
            Self::SetStep(_) => "set_step",
        }
    }
}

/// Raw signals a counter widget can emit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CounterEvent {
    Inc,
    Dec,
    Reset,
    Step { by: i64 },
    /// Pointer entered the widget. Carries no domain meaning.
    Hover,
    Blur,
}

impl Event for CounterEvent {
    const KINDS: &'static [&'static str] = &["inc", "dec", "reset", "step", "hover", "blur"];

    fn kind(&self) -> &'static str {
        match self {
            Self::Inc => "inc",
            Self::Dec => "dec",
            Self::Reset => "reset",
            Self::Step { .. } => "step",
            Self::Hover => "hover",
            Self::Blur => "blur",
        }
    }
}

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(state: &CounterState, action: CounterAction) -> CounterState {
        match action {
            CounterAction::Increment => CounterState {
                count: state.count.saturating_add(state.step),
                step: state.step,
            },
            CounterAction::Decrement => CounterState {
                count: state.count.saturating_sub(state.step),
                step: state.step,
            },
            CounterAction::Reset => CounterState {
                count: 0,
                step: state.step,
            },
            CounterAction::SetStep(step) => CounterState {
                count: state.count,
                step,
            },
        }
    }
}

/// Event mapping for the counter.
///
/// `reset` at zero and `step` with `by = 0` are dropped here rather than
/// applied as no-ops; pointer events never map to an action.
pub fn map_event(event: &CounterEvent, state: &CounterState) -> Option<CounterAction> {
    match event {
        CounterEvent::Inc => Some(CounterAction::Increment),
        CounterEvent::Dec => Some(CounterAction::Decrement),
        CounterEvent::Reset if state.count == 0 => None,
        CounterEvent::Reset => Some(CounterAction::Reset),
        CounterEvent::Step { by: 0 } => None,
        CounterEvent::Step { by } => Some(CounterAction::SetStep(*by)),
        CounterEvent::Hover | CounterEvent::Blur => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(count: i64, step: i64) -> CounterState {
        CounterState { count, step }
    }

    #[test]
    fn increment_adds_step() {
        let next = CounterReducer::reduce(&state(0, 1), CounterAction::Increment);
        assert_eq!(next, state(1, 1));
        let next = CounterReducer::reduce(&state(4, 3), CounterAction::Increment);
        assert_eq!(next, state(7, 3));
    }

    #[test]
    fn decrement_saturates() {
        let next = CounterReducer::reduce(&state(i64::MIN, 1), CounterAction::Decrement);
        assert_eq!(next, state(i64::MIN, 1));
    }

    #[test]
    fn reset_keeps_step() {
        let next = CounterReducer::reduce(&state(9, 3), CounterAction::Reset);
        assert_eq!(next, state(0, 3));
    }

    #[test]
    fn set_step_keeps_count() {
        let next = CounterReducer::reduce(&state(9, 3), CounterAction::SetStep(5));
        assert_eq!(next, state(9, 5));
    }

    #[test]
    fn map_depends_only_on_event_and_state() {
        assert_eq!(
            map_event(&CounterEvent::Inc, &state(0, 1)),
            Some(CounterAction::Increment)
        );
        assert_eq!(map_event(&CounterEvent::Reset, &state(0, 1)), None);
        assert_eq!(
            map_event(&CounterEvent::Reset, &state(2, 1)),
            Some(CounterAction::Reset)
        );
        assert_eq!(map_event(&CounterEvent::Step { by: 0 }, &state(2, 1)), None);
        assert_eq!(map_event(&CounterEvent::Hover, &state(2, 1)), None);
        assert_eq!(map_event(&CounterEvent::Blur, &state(2, 1)), None);
    }
}
