mod common;

use common::{counter_scope, lenient_counter_scope, Tabs, TabsAction, TabsReducer};
use scopekit::replay::{CounterAction, CounterReducer};
use scopekit::{CoordError, ScopeConfig, ScopeRef};

#[test]
fn child_reads_parent_through_explicit_reference() {
    let parent = counter_scope();
    let child = parent.child::<TabsReducer, String>(Tabs { selected: 0, len: 3 });

    parent.store().apply(CounterAction::Increment).unwrap();

    let seen = child.parent().snapshot().unwrap().unwrap();
    assert_eq!(seen.count, 1);
    assert_eq!(child.parent().scope_id(), Some(parent.id()));
}

#[test]
fn child_state_is_independent() {
    let parent = counter_scope();
    let child = parent.child::<TabsReducer, String>(Tabs { selected: 0, len: 3 });

    child.store().apply(TabsAction::Select(2)).unwrap();
    child
        .registry()
        .register("title", "tabs".to_string(), "w")
        .unwrap();

    assert_eq!(child.store().get_snapshot().unwrap().selected, 2);
    assert_eq!(parent.store().get_snapshot().unwrap().count, 0);
    assert_eq!(parent.registry().resolve("title").unwrap(), None);
}

#[test]
fn child_can_follow_parent_changes() {
    let parent = counter_scope();
    let child = parent.child::<TabsReducer, String>(Tabs { selected: 0, len: 5 });

    let child_store = child.store().clone();
    let _sub = child
        .parent()
        .subscribe(move |snapshot| {
            let index = snapshot.count.max(0) as usize;
            child_store.apply(TabsAction::Select(index)).unwrap();
        })
        .unwrap();

    parent.store().apply(CounterAction::SetStep(3)).unwrap();
    parent.store().apply(CounterAction::Increment).unwrap();
    assert_eq!(child.store().get_snapshot().unwrap().selected, 3);
}

#[test]
fn disposed_parent_is_reported_to_child() {
    let parent = counter_scope();
    let child = parent.child::<TabsReducer, String>(Tabs { selected: 0, len: 1 });

    parent.dispose();

    assert!(matches!(
        child.parent().snapshot(),
        Err(CoordError::ScopeDisposed { .. })
    ));
    assert!(!child.parent().is_live());
    // The child itself is unaffected.
    assert!(child.store().get_snapshot().is_ok());
}

#[test]
fn dropped_parent_is_reported_as_disposed() {
    let child = {
        let parent = counter_scope();
        parent.child::<TabsReducer, String>(Tabs { selected: 0, len: 1 })
    };
    assert!(matches!(
        child.parent().snapshot(),
        Err(CoordError::ScopeDisposed { .. })
    ));
}

#[test]
fn lenient_child_sees_absent_parent() {
    let parent = lenient_counter_scope();
    let child = parent.child::<TabsReducer, String>(Tabs { selected: 0, len: 1 });
    assert!(!child.config().strict_provider_check);

    parent.dispose();
    assert!(child.parent().snapshot().unwrap().is_none());
    assert!(!child.parent().subscribe(|_| {}).unwrap().is_active());
}

#[test]
fn reading_outside_any_scope_is_missing_scope() {
    let outside: ScopeRef<CounterReducer> = ScopeRef::detached(&ScopeConfig::default());
    assert!(matches!(outside.snapshot(), Err(CoordError::MissingScope)));
    assert!(matches!(
        outside.subscribe(|_| {}),
        Err(CoordError::MissingScope)
    ));
    assert_eq!(outside.scope_id(), None);
}

#[test]
fn lenient_detached_reference_reads_absent() {
    let outside: ScopeRef<CounterReducer> = ScopeRef::detached(&ScopeConfig::lenient());
    assert!(outside.snapshot().unwrap().is_none());
}

#[test]
fn into_parts_keeps_both_sides_usable() {
    let parent = counter_scope();
    let (child, parent_ref) = parent
        .child::<TabsReducer, String>(Tabs { selected: 0, len: 2 })
        .into_parts();
    child.store().apply(TabsAction::Select(1)).unwrap();
    assert_eq!(parent_ref.snapshot().unwrap().unwrap().count, 0);
    assert!(parent_ref.is_live());
}
