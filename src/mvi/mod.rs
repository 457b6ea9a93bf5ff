//! Typed primitives for unidirectional data flow.
//!
//! Every scope is parameterized by a [`Reducer`], which fixes the state
//! type and the closed set of actions that may change it.
//!
//! # Architecture
//!
//! ```text
//! Event ──→ map ──→ Action ──→ Reducer ──→ State ──→ subscribers
//!   ↑                                                   │
//!   └───────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot value, replaced on every change
//! - **Event**: Raw interaction signal produced by a scope member
//! - **Action**: Closed, typed domain intent
//! - **Reducer**: Pure function `(&State, Action) -> State`

mod action;
mod event;
mod reducer;
mod state;
mod tagged;

pub use action::{Action, TaggedAction};
pub use event::{Event, TaggedEvent};
pub use reducer::Reducer;
pub use state::StoreState;
