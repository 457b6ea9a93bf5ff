//! Immutable state snapshots.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// The store's state at one instant.
///
/// Cloning a snapshot clones a pointer, never the state. Two snapshots
/// describe the same state transition exactly when [`Snapshot::ptr_eq`]
/// holds, which is how consumers decide whether to react.
pub struct Snapshot<S> {
    value: Rc<S>,
    version: u64,
}

impl<S> Snapshot<S> {
    pub(crate) fn initial(value: S) -> Self {
        Self {
            value: Rc::new(value),
            version: 0,
        }
    }

    /// Wrap `next` as the snapshot following `self`.
    pub(crate) fn successor(&self, next: S) -> Self {
        Self {
            value: Rc::new(next),
            version: self.version + 1,
        }
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }

    /// Number of applied changes that led to this snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn value(&self) -> &S {
        &self.value
    }
}

impl<S> Clone for Snapshot<S> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            version: self.version,
        }
    }
}

impl<S> Deref for Snapshot<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.value
    }
}

impl<S: fmt::Debug> fmt::Debug for Snapshot<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("version", &self.version)
            .field("value", &*self.value)
            .finish()
    }
}
