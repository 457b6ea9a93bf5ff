//! Scoped state store.
//!
//! A [`Store`] owns the single authoritative [`Snapshot`] of one scope,
//! applies actions through the scope's [`Reducer`], and notifies
//! subscribers after every change that produced a different state.
//!
//! # Invariants
//!
//! 1. `apply` either replaces the snapshot or leaves it untouched.
//! 2. A transition whose next state equals the current one keeps the old
//!    snapshot (same identity) and notifies nobody.
//! 3. Subscribers are notified in registration order, once per change.
//! 4. A subscriber added while a pass is running does not see that pass.
//! 5. An `apply` issued from inside a subscriber changes state at once but
//!    its notification pass is queued behind the running one.

mod snapshot;
mod subscribers;

pub use snapshot::Snapshot;
pub use subscribers::Unsubscribe;
pub(crate) use subscribers::SubscriberList;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use serde::de::DeserializeOwned;

use crate::config::ScopeConfig;
use crate::error::CoordError;
use crate::mvi::{Action, Reducer, TaggedAction};
use crate::scope::{Lifecycle, ScopeId};

/// Handle to a scoped store. Clones share the same store.
pub struct Store<R: Reducer> {
    inner: Rc<StoreInner<R>>,
}

pub(crate) struct StoreInner<R: Reducer> {
    lifecycle: Rc<Lifecycle>,
    current: RefCell<Snapshot<R::State>>,
    subscribers: RefCell<SubscriberList<Snapshot<R::State>>>,
    pending: RefCell<VecDeque<Snapshot<R::State>>>,
    notifying: Cell<bool>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Create a standalone store that is its own scope.
    pub fn new(initial: R::State) -> Self {
        Self::within(Rc::new(Lifecycle::new(ScopeConfig::default())), initial)
    }

    pub(crate) fn within(lifecycle: Rc<Lifecycle>, initial: R::State) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                lifecycle,
                current: RefCell::new(Snapshot::initial(initial)),
                subscribers: RefCell::new(SubscriberList::new()),
                pending: RefCell::new(VecDeque::new()),
                notifying: Cell::new(false),
            }),
        }
    }

    pub fn scope_id(&self) -> ScopeId {
        self.inner.lifecycle.id()
    }

    /// Current snapshot.
    ///
    /// After teardown a strict scope fails with `ScopeDisposed`; a lenient
    /// one keeps returning the last snapshot.
    pub fn get_snapshot(&self) -> Result<Snapshot<R::State>, CoordError> {
        self.inner.lifecycle.check_read()?;
        Ok(self.inner.current.borrow().clone())
    }

    /// Apply one action and return the resulting snapshot.
    ///
    /// # Errors
    /// `ScopeDisposed` if the owning scope has torn down. The snapshot is
    /// unchanged on error.
    pub fn apply(&self, action: R::Action) -> Result<Snapshot<R::State>, CoordError> {
        self.inner.lifecycle.ensure_live()?;

        let kind = action.kind();
        let current = self.inner.current.borrow().clone();
        let next = R::reduce(&current, action);

        if next == *current {
            tracing::trace!(
                scope = %self.scope_id(),
                action = kind,
                version = current.version(),
                "Suppressed no-op transition"
            );
            return Ok(current);
        }

        let snapshot = current.successor(next);
        *self.inner.current.borrow_mut() = snapshot.clone();
        tracing::trace!(
            scope = %self.scope_id(),
            action = kind,
            version = snapshot.version(),
            "Applied action"
        );

        self.inner.pending.borrow_mut().push_back(snapshot.clone());
        self.inner.drain_notifications();
        Ok(snapshot)
    }

    /// Decode an untyped `{kind, payload}` action and apply it.
    ///
    /// # Errors
    /// `UnknownActionKind` or `InvalidPayload` from decoding, in which case
    /// the snapshot is unchanged, or any error from [`Store::apply`].
    pub fn apply_tagged(&self, action: TaggedAction) -> Result<Snapshot<R::State>, CoordError>
    where
        R::Action: DeserializeOwned,
    {
        self.inner.lifecycle.ensure_live()?;
        let action = action.decode::<R::Action>()?;
        self.apply(action)
    }

    /// Register a callback invoked with every new snapshot.
    pub fn subscribe(
        &self,
        callback: impl Fn(&Snapshot<R::State>) + 'static,
    ) -> Result<Unsubscribe, CoordError> {
        if !self.inner.lifecycle.check_read()? {
            return Ok(Unsubscribe::inert());
        }

        let (id, _) = self.inner.subscribers.borrow_mut().add(Rc::new(callback));
        let weak: Weak<StoreInner<R>> = Rc::downgrade(&self.inner);
        Ok(Unsubscribe::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.borrow_mut().remove(id);
            }
        }))
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    pub(crate) fn lifecycle(&self) -> &Rc<Lifecycle> {
        &self.inner.lifecycle
    }

    pub(crate) fn downgrade(&self) -> Weak<StoreInner<R>> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn from_inner(inner: Rc<StoreInner<R>>) -> Self {
        Self { inner }
    }

    /// Drop every subscription and queued notification. Called on teardown.
    pub(crate) fn release(&self) {
        self.inner.pending.borrow_mut().clear();
        self.inner.subscribers.borrow_mut().clear();
    }
}

impl<R: Reducer> StoreInner<R> {
    /// Run queued notification passes until the queue is empty.
    ///
    /// Only the outermost caller drains; nested applies just enqueue.
    fn drain_notifications(&self) {
        if self.notifying.replace(true) {
            return;
        }
        let _reset = scopeguard::guard(&self.notifying, |flag| flag.set(false));

        loop {
            let Some(snapshot) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            let receivers = self.subscribers.borrow().live();
            for receiver in receivers {
                if self.lifecycle.is_disposed() {
                    return;
                }
                receiver.deliver(&snapshot);
            }
        }
    }
}

impl<R: Reducer> std::fmt::Debug for Store<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("scope", &self.scope_id())
            .field("snapshot", &*self.inner.current.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
