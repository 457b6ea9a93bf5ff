//! Disposal state shared by every component bound to one scope.

use std::cell::Cell;

use crate::config::ScopeConfig;
use crate::error::CoordError;

use super::ScopeId;

/// Liveness of a scope.
///
/// Stores, registries and references hold an `Rc<Lifecycle>` so that a
/// single `dispose` call invalidates all of them at once.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    id: ScopeId,
    config: ScopeConfig,
    disposed: Cell<bool>,
}

impl Lifecycle {
    pub(crate) fn new(config: ScopeConfig) -> Self {
        Self {
            id: ScopeId::new(),
            config,
            disposed: Cell::new(false),
        }
    }

    pub(crate) fn id(&self) -> ScopeId {
        self.id
    }

    pub(crate) fn config(&self) -> &ScopeConfig {
        &self.config
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Mark disposed. Returns false if it already was.
    pub(crate) fn mark_disposed(&self) -> bool {
        !self.disposed.replace(true)
    }

    /// Gate for writes: always fails once disposed.
    pub(crate) fn ensure_live(&self) -> Result<(), CoordError> {
        if self.is_disposed() {
            return Err(CoordError::ScopeDisposed { scope: self.id });
        }
        Ok(())
    }

    /// Gate for reads.
    ///
    /// `Ok(true)` when live. Once disposed, strict scopes fail and lenient
    /// scopes return `Ok(false)` so the caller can fall back to absent.
    pub(crate) fn check_read(&self) -> Result<bool, CoordError> {
        if !self.is_disposed() {
            return Ok(true);
        }
        if self.config.strict_provider_check {
            return Err(CoordError::ScopeDisposed { scope: self.id });
        }
        Ok(false)
    }
}
