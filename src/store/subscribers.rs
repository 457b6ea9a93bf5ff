//! Ordered callback lists and their unsubscribe handles.

use std::cell::Cell;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

struct Entry<T> {
    id: u64,
    alive: Rc<Cell<bool>>,
    callback: Callback<T>,
}

/// Callbacks kept in registration order.
///
/// Notification works on a copy taken by [`SubscriberList::live`], so a
/// callback added during a pass is not part of that pass and one removed
/// during a pass is skipped through its `alive` flag.
pub(crate) struct SubscriberList<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

/// One receiver captured at the start of a notification pass.
pub(crate) struct Receiver<T> {
    alive: Rc<Cell<bool>>,
    callback: Callback<T>,
}

impl<T> Receiver<T> {
    /// Invoke unless the subscriber was removed since the pass started.
    pub(crate) fn deliver(&self, value: &T) {
        if self.alive.get() {
            (self.callback)(value);
        }
    }
}

impl<T> SubscriberList<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Append a callback. Returns its id and liveness flag.
    pub(crate) fn add(&mut self, callback: Callback<T>) -> (u64, Rc<Cell<bool>>) {
        let id = self.next_id;
        self.next_id += 1;
        let alive = Rc::new(Cell::new(true));
        self.entries.push(Entry {
            id,
            alive: Rc::clone(&alive),
            callback,
        });
        (id, alive)
    }

    pub(crate) fn remove(&mut self, id: u64) {
        if let Some(pos) = self.entries.iter().position(|e| e.id == id) {
            let entry = self.entries.remove(pos);
            entry.alive.set(false);
        }
    }

    /// Drop every callback, flagging each one dead.
    pub(crate) fn clear(&mut self) {
        for entry in self.entries.drain(..) {
            entry.alive.set(false);
        }
    }

    pub(crate) fn live(&self) -> Vec<Receiver<T>> {
        self.entries
            .iter()
            .map(|e| Receiver {
                alive: Rc::clone(&e.alive),
                callback: Rc::clone(&e.callback),
            })
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle returned by every `subscribe`-style call.
///
/// Calling [`Unsubscribe::unsubscribe`] removes the callback. Further
/// calls are no-ops. Dropping the handle does NOT unsubscribe.
pub struct Unsubscribe {
    action: Option<Box<dyn Fn()>>,
    done: Cell<bool>,
}

impl Unsubscribe {
    pub(crate) fn new(action: impl Fn() + 'static) -> Self {
        Self {
            action: Some(Box::new(action)),
            done: Cell::new(false),
        }
    }

    /// Handle for a subscription that was never installed (lenient reads
    /// against a disposed scope).
    pub(crate) fn inert() -> Self {
        Self {
            action: None,
            done: Cell::new(true),
        }
    }

    pub fn unsubscribe(&self) {
        if self.done.replace(true) {
            return;
        }
        if let Some(action) = &self.action {
            action();
        }
    }

    /// False once unsubscribed, or if this handle never held a subscription.
    pub fn is_active(&self) -> bool {
        !self.done.get()
    }
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("active", &self.is_active())
            .finish()
    }
}
