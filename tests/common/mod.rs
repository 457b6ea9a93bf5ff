//! Shared test fixtures.

#![allow(dead_code, unused_imports)]

use scopekit::replay::{CounterReducer, CounterState};
use scopekit::{Action, Reducer, Scope, ScopeConfig, Snapshot, StoreState};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;

pub type CounterScope = Scope<CounterReducer, String>;

/// Counter scope starting at `{count: 0, step: 1}`.
pub fn counter_scope() -> CounterScope {
    Scope::create(CounterState { count: 0, step: 1 })
}

pub fn lenient_counter_scope() -> CounterScope {
    Scope::with_config(CounterState { count: 0, step: 1 }, ScopeConfig::lenient())
}

/// Callback that records every `count` it is notified with.
pub fn count_recorder() -> (Rc<RefCell<Vec<i64>>>, impl Fn(&Snapshot<CounterState>)) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |s: &Snapshot<CounterState>| sink.borrow_mut().push(s.count))
}

/// Tab strip state used as a child of a counter scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Tabs {
    pub selected: usize,
    pub len: usize,
}

impl StoreState for Tabs {}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum TabsAction {
    Select(usize),
}

impl Action for TabsAction {
    const KINDS: &'static [&'static str] = &["select"];

    fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
        }
    }
}

pub struct TabsReducer;

impl Reducer for TabsReducer {
    type State = Tabs;
    type Action = TabsAction;

    fn reduce(state: &Tabs, action: TabsAction) -> Tabs {
        match action {
            TabsAction::Select(index) if index < state.len => Tabs {
                selected: index,
                len: state.len,
            },
            TabsAction::Select(_) => state.clone(),
        }
    }
}
