//! Event-to-action dispatch.
//!
//! A [`Dispatcher`] turns raw events into the scope's typed actions with a
//! consumer-supplied mapping and applies them through the scope's store.

use serde::de::DeserializeOwned;

use crate::error::CoordError;
use crate::mvi::{Event, Reducer, TaggedEvent};
use crate::store::{Snapshot, Store};

type MapFn<R, E> =
    Box<dyn Fn(&E, &<R as Reducer>::State) -> Option<<R as Reducer>::Action>>;

/// Outcome of one [`Dispatcher::dispatch`] call.
#[derive(Debug)]
pub enum DispatchResult<S> {
    /// The mapped action was applied; carries the resulting snapshot.
    /// A no-op action still reports `Applied` with the unchanged snapshot.
    Applied(Snapshot<S>),
    /// The mapping returned no action; state is untouched.
    Ignored,
}

impl<S> DispatchResult<S> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn snapshot(&self) -> Option<&Snapshot<S>> {
        match self {
            Self::Applied(snapshot) => Some(snapshot),
            Self::Ignored => None,
        }
    }
}

/// Maps events of type `E` onto the action set of `R`.
///
/// The mapping function must be pure: its result may depend only on the
/// event and the state it is handed. This is a caller obligation; the
/// dispatcher does not check it.
pub struct Dispatcher<R: Reducer, E> {
    store: Store<R>,
    map: MapFn<R, E>,
}

impl<R: Reducer, E: Event> Dispatcher<R, E> {
    pub fn new(
        store: Store<R>,
        map: impl Fn(&E, &R::State) -> Option<R::Action> + 'static,
    ) -> Self {
        Self {
            store,
            map: Box::new(map),
        }
    }

    pub fn store(&self) -> &Store<R> {
        &self.store
    }

    /// Map `event` against the current snapshot and apply the result.
    ///
    /// # Errors
    /// `ScopeDisposed` if the owning scope has torn down.
    pub fn dispatch(&self, event: E) -> Result<DispatchResult<R::State>, CoordError> {
        self.store.lifecycle().ensure_live()?;
        let current = self.store.get_snapshot()?;

        let Some(action) = (self.map)(&event, &current) else {
            tracing::trace!(
                scope = %self.store.scope_id(),
                event = event.kind(),
                "Event ignored"
            );
            return Ok(DispatchResult::Ignored);
        };

        tracing::trace!(
            scope = %self.store.scope_id(),
            event = event.kind(),
            "Event mapped to action"
        );
        self.store.apply(action).map(DispatchResult::Applied)
    }

    /// Decode an untyped `{kind, data}` event and dispatch it.
    pub fn dispatch_tagged(
        &self,
        event: TaggedEvent,
    ) -> Result<DispatchResult<R::State>, CoordError>
    where
        E: DeserializeOwned,
    {
        self.store.lifecycle().ensure_live()?;
        let event = event.decode::<E>()?;
        self.dispatch(event)
    }
}
