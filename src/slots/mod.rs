//! Named content slots.
//!
//! Producers anywhere in a scope contribute content under a slot name;
//! placement points resolve the name to whichever contribution currently
//! wins precedence.
//!
//! # Precedence
//!
//! Each entry has an effective order: the explicit key passed to
//! [`SlotRegistry::register_ordered`], or 0 for [`SlotRegistry::register`].
//! The entry with the highest order wins; equal orders go to the most
//! recent registration. With no explicit keys this is last-write-wins.
//! [`SlotRegistry::update`] changes content in place and never moves an
//! entry in that ranking.

mod name;
mod registry;

pub use name::{SlotName, WriterId};
pub use registry::{RegistrationToken, SlotEntry, SlotRegistry, Unregistration};
