//! Render delegates.
//!
//! A [`RenderDelegate`] hands a derived view of store state to an external
//! renderer. It never renders anything itself.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::error::CoordError;
use crate::mvi::Reducer;
use crate::store::{Snapshot, Store, SubscriberList, Unsubscribe};

type ProjectFn<R, O> = Box<dyn Fn(&<R as Reducer>::State) -> O>;

/// Memoized projection of a store's state.
///
/// `project` runs at most once per distinct snapshot, no matter how many
/// output listeners are attached or how often the output is read.
pub struct RenderDelegate<R: Reducer, O: 'static> {
    inner: Rc<DelegateInner<R, O>>,
}

struct DelegateInner<R: Reducer, O: 'static> {
    store: Store<R>,
    project: ProjectFn<R, O>,
    cache: RefCell<Option<(Snapshot<R::State>, Rc<O>)>>,
    listeners: RefCell<SubscriberList<Rc<O>>>,
    projections: Cell<u64>,
    store_subscription: RefCell<Option<Unsubscribe>>,
}

impl<R: Reducer, O: 'static> RenderDelegate<R, O> {
    /// Attach a delegate to `store`.
    ///
    /// # Errors
    /// `ScopeDisposed` when the store's scope is gone and strict.
    pub fn new(
        store: &Store<R>,
        project: impl Fn(&R::State) -> O + 'static,
    ) -> Result<Self, CoordError> {
        let inner = Rc::new(DelegateInner {
            store: store.clone(),
            project: Box::new(project),
            cache: RefCell::new(None),
            listeners: RefCell::new(SubscriberList::new()),
            projections: Cell::new(0),
            store_subscription: RefCell::new(None),
        });

        let weak: Weak<DelegateInner<R, O>> = Rc::downgrade(&inner);
        let subscription = store.subscribe(move |snapshot| {
            if let Some(inner) = weak.upgrade() {
                inner.on_snapshot(snapshot);
            }
        })?;
        *inner.store_subscription.borrow_mut() = Some(subscription);

        Ok(Self { inner })
    }

    /// Output for the store's current snapshot.
    pub fn get_output(&self) -> Result<Rc<O>, CoordError> {
        let snapshot = self.inner.store.get_snapshot()?;
        Ok(self.inner.output_for(&snapshot))
    }

    /// Call `callback` with the new output after every state change.
    pub fn on_output_changed(
        &self,
        callback: impl Fn(&Rc<O>) + 'static,
    ) -> Result<Unsubscribe, CoordError> {
        if !self.inner.store.lifecycle().check_read()? {
            return Ok(Unsubscribe::inert());
        }
        let (id, _) = self.inner.listeners.borrow_mut().add(Rc::new(callback));
        let weak = Rc::downgrade(&self.inner);
        Ok(Unsubscribe::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.borrow_mut().remove(id);
            }
        }))
    }

    /// How many times `project` has run.
    pub fn project_count(&self) -> u64 {
        self.inner.projections.get()
    }
}

impl<R: Reducer, O: 'static> DelegateInner<R, O> {
    fn output_for(&self, snapshot: &Snapshot<R::State>) -> Rc<O> {
        if let Some((cached, output)) = &*self.cache.borrow() {
            if cached.ptr_eq(snapshot) {
                return Rc::clone(output);
            }
        }

        let output = Rc::new((self.project)(snapshot));
        self.projections.set(self.projections.get() + 1);
        *self.cache.borrow_mut() = Some((snapshot.clone(), Rc::clone(&output)));
        output
    }

    fn on_snapshot(&self, snapshot: &Snapshot<R::State>) {
        let receivers = self.listeners.borrow().live();
        if receivers.is_empty() {
            return;
        }
        let output = self.output_for(snapshot);
        for receiver in receivers {
            receiver.deliver(&output);
        }
    }
}

impl<R: Reducer, O: 'static> Drop for DelegateInner<R, O> {
    fn drop(&mut self) {
        if let Some(subscription) = self.store_subscription.get_mut().take() {
            subscription.unsubscribe();
        }
    }
}
