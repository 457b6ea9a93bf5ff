//! Scripted event replay against a counter scope.
//!
//! Backs the `scope-replay` binary: a JSON array of `{kind, data}` events is
//! dispatched one at a time and every step produces one [`ReplayLine`].

mod counter;

pub use counter::{map_event, CounterAction, CounterEvent, CounterReducer, CounterState};

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Config;
use crate::dispatch::{DispatchResult, Dispatcher};
use crate::error::CoordError;
use crate::mvi::TaggedEvent;
use crate::scope::Scope;
use crate::slots::RegistrationToken;

/// Writer id used for slot content given on the command line.
pub const CLI_WRITER: &str = "cli";

/// Outcome of one replayed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayLine {
    pub event: String,
    pub result: StepResult,
    pub count: i64,
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepResult {
    Applied,
    Ignored,
    Error,
}

/// A counter scope with its dispatcher.
pub struct Replay {
    scope: Scope<CounterReducer, String>,
    dispatcher: Dispatcher<CounterReducer, CounterEvent>,
}

impl Replay {
    pub fn new(config: &Config) -> Self {
        let scope = Scope::with_config(
            CounterState {
                count: config.replay.initial_count,
                step: config.replay.step,
            },
            config.scope.clone(),
        );
        let dispatcher = scope.dispatcher(map_event);
        Self { scope, dispatcher }
    }

    pub fn scope(&self) -> &Scope<CounterReducer, String> {
        &self.scope
    }

    /// Register `content` under `name` on behalf of the command line.
    pub fn register_slot(&self, name: &str, content: &str) -> Result<RegistrationToken, CoordError> {
        self.scope
            .registry()
            .register(name, content.to_string(), CLI_WRITER)
    }

    /// Dispatch one event.
    ///
    /// Decoding failures are reported in the returned line rather than
    /// aborting the replay. Scope errors are returned.
    pub fn step(&self, event: TaggedEvent) -> Result<ReplayLine, CoordError> {
        let kind = event.kind.clone();
        let (result, error) = match self.dispatcher.dispatch_tagged(event) {
            Ok(DispatchResult::Applied(_)) => (StepResult::Applied, None),
            Ok(DispatchResult::Ignored) => (StepResult::Ignored, None),
            Err(e) if e.is_scope_error() => return Err(e),
            Err(e) => (StepResult::Error, Some(e.to_string())),
        };

        let snapshot = self.scope.store().get_snapshot()?;
        Ok(ReplayLine {
            event: kind,
            result,
            count: snapshot.count,
            version: snapshot.version(),
            error,
        })
    }

    /// Winning content of every occupied slot.
    pub fn resolved_slots(&self) -> Result<BTreeMap<String, String>, CoordError> {
        let registry = self.scope.registry();
        let mut resolved = BTreeMap::new();
        for name in registry.slot_names()? {
            if let Some(content) = registry.resolve(name.as_str())? {
                resolved.insert(name.to_string(), content);
            }
        }
        Ok(resolved)
    }
}

/// Parse a replay script: a JSON array of `{kind, data}` objects.
pub fn parse_script(text: &str) -> Result<Vec<TaggedEvent>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Parse a `name=content` command-line slot argument.
pub fn parse_slot_arg(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, content)) => Ok((name.to_string(), content.to_string())),
        None => Err(format!("expected name=content, got '{arg}'")),
    }
}
