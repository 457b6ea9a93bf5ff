//! Base trait for store state.

/// Marker trait for state held by a scoped store.
///
/// States should be:
/// - Immutable (a new value is produced for every change)
/// - Self-contained (all data a consumer needs to derive output)
/// - Comparable (PartialEq is how the store detects a no-op transition)
pub trait StoreState: PartialEq + std::fmt::Debug + 'static {}
