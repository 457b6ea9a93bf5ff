//! Read-only references to a scope held by code outside it.

use std::rc::{Rc, Weak};

use crate::config::ScopeConfig;
use crate::error::CoordError;
use crate::mvi::Reducer;
use crate::store::{Snapshot, Store, StoreInner, Unsubscribe};

use super::{Lifecycle, ScopeId};

/// Weak, read-only reference to a scope's store.
///
/// This is how a child reads its parent: the reference is handed over
/// explicitly at creation, never looked up. Holding one does not keep
/// the scope alive.
///
/// | target                  | strict          | lenient            |
/// |-------------------------|-----------------|--------------------|
/// | live                    | `Ok(Some(..))`  | `Ok(Some(..))`     |
/// | disposed                | `ScopeDisposed` | `Ok(None)`         |
/// | never bound / dropped   | `MissingScope`  | `Ok(None)`         |
pub struct ScopeRef<R: Reducer> {
    target: Option<(Rc<Lifecycle>, Weak<StoreInner<R>>)>,
    strict: bool,
}

impl<R: Reducer> Clone for ScopeRef<R> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            strict: self.strict,
        }
    }
}

impl<R: Reducer> ScopeRef<R> {
    /// A reference with no scope behind it, as seen by code running
    /// outside any enclosing scope.
    pub fn detached(config: &ScopeConfig) -> Self {
        Self {
            target: None,
            strict: config.strict_provider_check,
        }
    }

    pub(crate) fn bound(store: &Store<R>) -> Self {
        let lifecycle = Rc::clone(store.lifecycle());
        let strict = lifecycle.config().strict_provider_check;
        Self {
            target: Some((lifecycle, store.downgrade())),
            strict,
        }
    }

    pub fn scope_id(&self) -> Option<ScopeId> {
        self.target.as_ref().map(|(lifecycle, _)| lifecycle.id())
    }

    /// True while the referenced scope exists and is not disposed.
    pub fn is_live(&self) -> bool {
        match &self.target {
            Some((lifecycle, weak)) => !lifecycle.is_disposed() && weak.strong_count() > 0,
            None => false,
        }
    }

    /// Current snapshot of the referenced scope.
    pub fn snapshot(&self) -> Result<Option<Snapshot<R::State>>, CoordError> {
        match self.store()? {
            Some(store) => store.get_snapshot().map(Some),
            None => Ok(None),
        }
    }

    /// Subscribe to the referenced scope's store.
    pub fn subscribe(
        &self,
        callback: impl Fn(&Snapshot<R::State>) + 'static,
    ) -> Result<Unsubscribe, CoordError> {
        match self.store()? {
            Some(store) => store.subscribe(callback),
            None => Ok(Unsubscribe::inert()),
        }
    }

    fn store(&self) -> Result<Option<Store<R>>, CoordError> {
        let Some((lifecycle, weak)) = &self.target else {
            return self.missing();
        };
        if !lifecycle.check_read()? {
            return Ok(None);
        }
        match weak.upgrade() {
            Some(inner) => Ok(Some(Store::from_inner(inner))),
            None => self.missing(),
        }
    }

    fn missing(&self) -> Result<Option<Store<R>>, CoordError> {
        if self.strict {
            return Err(CoordError::MissingScope);
        }
        Ok(None)
    }
}

impl<R: Reducer> std::fmt::Debug for ScopeRef<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeRef")
            .field("scope", &self.scope_id())
            .field("live", &self.is_live())
            .field("strict", &self.strict)
            .finish()
    }
}
