//! Scoped coordination runtime.
//!
//! A [`Scope`] bounds a piece of shared state and a set of named content
//! slots. Consumers interact with it through four operations:
//!
//! - **subscribe**: [`Store::subscribe`] to snapshots of scope state
//! - **dispatch**: [`Dispatcher::dispatch`] raw events, mapped to typed actions
//! - **register**: [`SlotRegistry::register`] content under a slot name
//! - **resolve**: [`SlotRegistry::resolve`] a slot name to its winning content
//!
//! [`RenderDelegate`] adds a memoized projection of state for an external
//! renderer. Everything runs synchronously on one thread.

pub mod config;
pub mod delegate;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod mvi;
pub mod replay;
pub mod scope;
pub mod slots;
pub mod store;

pub use config::{Config, ConfigError, ScopeConfig};
pub use delegate::RenderDelegate;
pub use dispatch::{DispatchResult, Dispatcher};
pub use error::CoordError;
pub use mvi::{Action, Event, Reducer, StoreState, TaggedAction, TaggedEvent};
pub use scope::{ChildScope, Scope, ScopeId, ScopeRef};
pub use slots::{RegistrationToken, SlotEntry, SlotName, SlotRegistry, Unregistration, WriterId};
pub use store::{Snapshot, Store, Unsubscribe};
