//! Coordination scopes.
//!
//! A [`Scope`] is the boundary that owns one [`Store`] and one
//! [`SlotRegistry`]. Everything bound to it shares one lifecycle:
//! [`Scope::dispose`] (or dropping the scope) invalidates every
//! subscription, token and handle at once.

mod lifecycle;
mod reference;

pub(crate) use lifecycle::Lifecycle;
pub use reference::ScopeRef;

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use uuid::Uuid;

use crate::config::ScopeConfig;
use crate::delegate::RenderDelegate;
use crate::dispatch::Dispatcher;
use crate::error::CoordError;
use crate::mvi::{Event, Reducer};
use crate::slots::SlotRegistry;
use crate::store::Store;

/// Opaque identifier of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(Uuid);

impl ScopeId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A coordination boundary: state of type `R::State`, slot content of
/// type `C`.
///
/// A scope should cover one concern. Unrelated concerns get their own
/// scope rather than a wider action set.
pub struct Scope<R: Reducer, C: Clone + 'static> {
    lifecycle: Rc<Lifecycle>,
    store: Store<R>,
    registry: SlotRegistry<C>,
}

impl<R: Reducer, C: Clone + 'static> Scope<R, C> {
    /// Create a scope with the default (strict) configuration.
    pub fn create(initial: R::State) -> Self {
        Self::with_config(initial, ScopeConfig::default())
    }

    pub fn with_config(initial: R::State, config: ScopeConfig) -> Self {
        let lifecycle = Rc::new(Lifecycle::new(config));
        tracing::debug!(
            scope = %lifecycle.id(),
            label = ?lifecycle.config().label,
            strict = lifecycle.config().strict_provider_check,
            "Scope created"
        );
        Self {
            store: Store::within(Rc::clone(&lifecycle), initial),
            registry: SlotRegistry::within(Rc::clone(&lifecycle)),
            lifecycle,
        }
    }

    pub fn id(&self) -> ScopeId {
        self.lifecycle.id()
    }

    pub fn config(&self) -> &ScopeConfig {
        self.lifecycle.config()
    }

    pub fn store(&self) -> &Store<R> {
        &self.store
    }

    pub fn registry(&self) -> &SlotRegistry<C> {
        &self.registry
    }

    /// Bind an event-to-action mapping to this scope's store.
    ///
    /// `map` must be a pure function of the event and the current state.
    pub fn dispatcher<E: Event>(
        &self,
        map: impl Fn(&E, &R::State) -> Option<R::Action> + 'static,
    ) -> Dispatcher<R, E> {
        Dispatcher::new(self.store.clone(), map)
    }

    /// Expose this scope's state to an external renderer through `project`.
    pub fn delegate<O: 'static>(
        &self,
        project: impl Fn(&R::State) -> O + 'static,
    ) -> Result<RenderDelegate<R, O>, CoordError> {
        RenderDelegate::new(&self.store, project)
    }

    /// Weak read-only reference, suitable for handing to a child.
    pub fn downgrade(&self) -> ScopeRef<R> {
        ScopeRef::bound(&self.store)
    }

    /// Create a nested scope that can read this one through an explicit
    /// reference. The child inherits this scope's configuration; this
    /// scope keeps no reference to the child.
    pub fn child<CR: Reducer, CC: Clone + 'static>(
        &self,
        initial: CR::State,
    ) -> ChildScope<CR, CC, R> {
        let scope = Scope::with_config(initial, self.config().clone());
        tracing::debug!(scope = %scope.id(), parent = %self.id(), "Nested scope created");
        ChildScope {
            scope,
            parent: self.downgrade(),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle.is_disposed()
    }

    /// Tear the scope down. Idempotent.
    ///
    /// Every subscription and registry entry is dropped before this
    /// returns; later use of any handle bound to the scope fails with
    /// `ScopeDisposed`.
    pub fn dispose(&self) {
        if !self.lifecycle.mark_disposed() {
            return;
        }
        let subscribers = self.store.subscriber_count();
        self.store.release();
        self.registry.release();
        tracing::debug!(scope = %self.id(), subscribers, "Scope disposed");
    }
}

impl<R: Reducer, C: Clone + 'static> Drop for Scope<R, C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<R: Reducer, C: Clone + 'static> fmt::Debug for Scope<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id())
            .field("label", &self.config().label)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// A scope nested inside a parent `P`.
///
/// The dependency edge points one way: the child holds a [`ScopeRef`] to
/// its parent, the parent holds nothing.
pub struct ChildScope<R: Reducer, C: Clone + 'static, P: Reducer> {
    scope: Scope<R, C>,
    parent: ScopeRef<P>,
}

impl<R: Reducer, C: Clone + 'static, P: Reducer> ChildScope<R, C, P> {
    pub fn scope(&self) -> &Scope<R, C> {
        &self.scope
    }

    pub fn parent(&self) -> &ScopeRef<P> {
        &self.parent
    }

    pub fn into_parts(self) -> (Scope<R, C>, ScopeRef<P>) {
        (self.scope, self.parent)
    }
}

impl<R: Reducer, C: Clone + 'static, P: Reducer> Deref for ChildScope<R, C, P> {
    type Target = Scope<R, C>;

    fn deref(&self) -> &Scope<R, C> {
        &self.scope
    }
}
