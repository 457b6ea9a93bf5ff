//! Slot registry implementation.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::config::ScopeConfig;
use crate::error::CoordError;
use crate::scope::{Lifecycle, ScopeId};

use super::name::{SlotName, WriterId};

/// One contribution to a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEntry<C> {
    pub name: SlotName,
    pub content: C,
    pub writer: WriterId,
    /// Explicit ordering key, if one was supplied.
    pub order: Option<i64>,
    seq: u64,
}

impl<C> SlotEntry<C> {
    fn rank(&self) -> (i64, u64) {
        (self.order.unwrap_or(0), self.seq)
    }
}

/// Identifies exactly one registered entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationToken {
    scope: ScopeId,
    name: SlotName,
    seq: u64,
}

impl RegistrationToken {
    pub fn name(&self) -> &SlotName {
        &self.name
    }

    pub fn scope_id(&self) -> ScopeId {
        self.scope
    }
}

/// Outcome of [`SlotRegistry::unregister`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unregistration {
    Removed,
    /// The token's entry was already gone; logged as a duplicate.
    AlreadyRemoved,
}

/// Registry of named content for one scope. Clones share the registry.
pub struct SlotRegistry<C> {
    inner: Rc<RegistryInner<C>>,
}

struct RegistryInner<C> {
    lifecycle: Rc<Lifecycle>,
    // Entries per slot, kept sorted by rank, winner last.
    slots: RefCell<BTreeMap<SlotName, Vec<SlotEntry<C>>>>,
    next_seq: Cell<u64>,
}

impl<C> Clone for SlotRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: Clone + 'static> Default for SlotRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone + 'static> SlotRegistry<C> {
    /// Create a standalone registry that is its own scope.
    pub fn new() -> Self {
        Self::within(Rc::new(Lifecycle::new(ScopeConfig::default())))
    }

    pub(crate) fn within(lifecycle: Rc<Lifecycle>) -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                lifecycle,
                slots: RefCell::new(BTreeMap::new()),
                next_seq: Cell::new(0),
            }),
        }
    }

    pub fn scope_id(&self) -> ScopeId {
        self.inner.lifecycle.id()
    }

    /// Register content under `name` with last-write-wins precedence.
    ///
    /// # Errors
    /// `InvalidSlotName` for an empty or malformed name, `ScopeDisposed`
    /// after teardown.
    pub fn register(
        &self,
        name: &str,
        content: C,
        writer: impl Into<WriterId>,
    ) -> Result<RegistrationToken, CoordError> {
        self.insert(name, content, writer.into(), None)
    }

    /// Register content with an explicit ordering key. Highest order wins.
    pub fn register_ordered(
        &self,
        name: &str,
        content: C,
        writer: impl Into<WriterId>,
        order: i64,
    ) -> Result<RegistrationToken, CoordError> {
        self.insert(name, content, writer.into(), Some(order))
    }

    fn insert(
        &self,
        name: &str,
        content: C,
        writer: WriterId,
        order: Option<i64>,
    ) -> Result<RegistrationToken, CoordError> {
        self.inner.lifecycle.ensure_live()?;
        let name = SlotName::new(name)?;

        let seq = self.inner.next_seq.get();
        self.inner.next_seq.set(seq + 1);

        let entry = SlotEntry {
            name: name.clone(),
            content,
            writer,
            order,
            seq,
        };
        tracing::trace!(
            scope = %self.scope_id(),
            slot = %name,
            writer = %entry.writer,
            order = ?order,
            "Registered slot content"
        );

        let mut slots = self.inner.slots.borrow_mut();
        let entries = slots.entry(name.clone()).or_default();
        let rank = entry.rank();
        let pos = entries.partition_point(|e| e.rank() < rank);
        entries.insert(pos, entry);

        Ok(RegistrationToken {
            scope: self.scope_id(),
            name,
            seq,
        })
    }

    /// Replace the content of an existing entry without changing its rank.
    ///
    /// # Errors
    /// `RevokedToken` if the entry was unregistered or the token belongs to
    /// another scope, `ScopeDisposed` after teardown.
    pub fn update(&self, token: &RegistrationToken, content: C) -> Result<(), CoordError> {
        self.inner.lifecycle.ensure_live()?;
        let revoked = || CoordError::RevokedToken {
            name: token.name.to_string(),
        };
        if !self.owns(token) {
            return Err(revoked());
        }

        let mut slots = self.inner.slots.borrow_mut();
        let entry = slots
            .get_mut(&token.name)
            .and_then(|entries| entries.iter_mut().find(|e| e.seq == token.seq))
            .ok_or_else(revoked)?;
        entry.content = content;
        Ok(())
    }

    /// Remove exactly the entry identified by `token`.
    ///
    /// A second call with the same token logs a duplicate and returns
    /// [`Unregistration::AlreadyRemoved`].
    ///
    /// # Errors
    /// `RevokedToken` for a token issued by another scope, `ScopeDisposed`
    /// after teardown.
    pub fn unregister(&self, token: &RegistrationToken) -> Result<Unregistration, CoordError> {
        self.inner.lifecycle.ensure_live()?;
        if !self.owns(token) {
            return Err(CoordError::RevokedToken {
                name: token.name.to_string(),
            });
        }

        let mut slots = self.inner.slots.borrow_mut();
        let removed = match slots.get_mut(&token.name) {
            Some(entries) => {
                let before = entries.len();
                entries.retain(|e| e.seq != token.seq);
                let removed = entries.len() < before;
                if entries.is_empty() {
                    slots.remove(&token.name);
                }
                removed
            }
            None => false,
        };

        if removed {
            tracing::trace!(scope = %self.scope_id(), slot = %token.name, "Unregistered slot content");
            return Ok(Unregistration::Removed);
        }

        let duplicate = CoordError::DuplicateToken {
            name: token.name.to_string(),
        };
        tracing::warn!(scope = %self.scope_id(), error = %duplicate, "Ignoring duplicate unregister");
        Ok(Unregistration::AlreadyRemoved)
    }

    /// Content currently winning `name`, or `None` when nothing is
    /// registered there.
    ///
    /// After teardown a strict scope fails with `ScopeDisposed`; a lenient
    /// one resolves everything as absent.
    pub fn resolve(&self, name: &str) -> Result<Option<C>, CoordError> {
        if !self.inner.lifecycle.check_read()? {
            return Ok(None);
        }
        let slots = self.inner.slots.borrow();
        Ok(slots
            .get(name)
            .and_then(|entries| entries.last())
            .map(|e| e.content.clone()))
    }

    /// Live entries for `name`, winner first.
    pub fn entries(&self, name: &str) -> Result<Vec<SlotEntry<C>>, CoordError> {
        if !self.inner.lifecycle.check_read()? {
            return Ok(Vec::new());
        }
        let slots = self.inner.slots.borrow();
        Ok(slots
            .get(name)
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    /// Names with at least one live entry, sorted.
    pub fn slot_names(&self) -> Result<Vec<SlotName>, CoordError> {
        if !self.inner.lifecycle.check_read()? {
            return Ok(Vec::new());
        }
        Ok(self.inner.slots.borrow().keys().cloned().collect())
    }

    fn owns(&self, token: &RegistrationToken) -> bool {
        token.scope == self.scope_id()
    }

    /// Drop every entry. Called on teardown.
    pub(crate) fn release(&self) {
        self.inner.slots.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SlotRegistry<&'static str> {
        SlotRegistry::new()
    }

    #[test]
    fn unregistered_name_is_absent() {
        let registry = registry();
        assert_eq!(registry.resolve("header").unwrap(), None);
        assert_eq!(registry.resolve("").unwrap(), None);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = registry().register("", "x", "a").unwrap_err();
        assert!(matches!(err, CoordError::InvalidSlotName { .. }));
    }

    #[test]
    fn last_write_wins_without_order() {
        let registry = registry();
        let _a = registry.register("title", "from a", "a").unwrap();
        let b = registry.register("title", "from b", "b").unwrap();
        assert_eq!(registry.resolve("title").unwrap(), Some("from b"));

        registry.unregister(&b).unwrap();
        assert_eq!(registry.resolve("title").unwrap(), Some("from a"));
    }

    #[test]
    fn highest_order_wins_regardless_of_arrival() {
        let registry = registry();
        let _high = registry.register_ordered("header", "high", "a", 5).unwrap();
        let _low = registry.register_ordered("header", "low", "b", 1).unwrap();
        assert_eq!(registry.resolve("header").unwrap(), Some("high"));
    }

    #[test]
    fn equal_order_ties_break_by_recency() {
        let registry = registry();
        registry.register_ordered("header", "first", "a", 3).unwrap();
        registry.register_ordered("header", "second", "b", 3).unwrap();
        assert_eq!(registry.resolve("header").unwrap(), Some("second"));
    }

    #[test]
    fn unordered_entries_rank_at_zero() {
        let registry = registry();
        registry.register_ordered("nav", "negative", "a", -1).unwrap();
        registry.register("nav", "plain", "b").unwrap();
        registry.register_ordered("nav", "old-positive", "c", 1).unwrap();
        let order: Vec<_> = registry
            .entries("nav")
            .unwrap()
            .into_iter()
            .map(|e| e.content)
            .collect();
        assert_eq!(order, vec!["old-positive", "plain", "negative"]);
    }

    #[test]
    fn update_keeps_rank() {
        let registry = registry();
        let a = registry.register("footer", "a1", "a").unwrap();
        registry.register("footer", "b1", "b").unwrap();

        registry.update(&a, "a2").unwrap();
        assert_eq!(registry.resolve("footer").unwrap(), Some("b1"));

        let entries = registry.entries("footer").unwrap();
        assert_eq!(entries[1].content, "a2");
        assert_eq!(entries[1].writer, WriterId::from("a"));
    }

    #[test]
    fn update_after_unregister_is_revoked() {
        let registry = registry();
        let token = registry.register("footer", "x", "a").unwrap();
        registry.unregister(&token).unwrap();
        assert!(matches!(
            registry.update(&token, "y"),
            Err(CoordError::RevokedToken { .. })
        ));
    }

    #[test]
    fn double_unregister_is_reported_not_fatal() {
        let registry = registry();
        let token = registry.register("footer", "x", "a").unwrap();
        assert_eq!(registry.unregister(&token).unwrap(), Unregistration::Removed);
        assert_eq!(
            registry.unregister(&token).unwrap(),
            Unregistration::AlreadyRemoved
        );
        assert!(registry.slot_names().unwrap().is_empty());
    }

    #[test]
    fn unregister_removes_exactly_one_entry() {
        let registry = registry();
        let a = registry.register("menu", "a", "w").unwrap();
        let b = registry.register("menu", "b", "w").unwrap();
        let _c = registry.register("menu", "c", "w").unwrap();

        registry.unregister(&b).unwrap();
        let left: Vec<_> = registry
            .entries("menu")
            .unwrap()
            .into_iter()
            .map(|e| e.content)
            .collect();
        assert_eq!(left, vec!["c", "a"]);
        assert_eq!(a.name().as_str(), "menu");
    }

    #[test]
    fn foreign_token_is_rejected() {
        let ours = registry();
        let theirs = registry();
        let token = theirs.register("header", "x", "a").unwrap();
        assert!(matches!(
            ours.unregister(&token),
            Err(CoordError::RevokedToken { .. })
        ));
        assert_eq!(theirs.resolve("header").unwrap(), Some("x"));
    }

    #[test]
    fn slot_names_are_sorted() {
        let registry = registry();
        registry.register("zeta", "z", "a").unwrap();
        registry.register("alpha", "a", "a").unwrap();
        let names: Vec<_> = registry
            .slot_names()
            .unwrap()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
