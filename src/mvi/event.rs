//! Raw interaction signals.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tagged::decode_adjacent;
use crate::error::CoordError;

/// Marker trait for events produced by scope members.
///
/// Events represent:
/// - User interactions (clicks, key presses, focus changes)
/// - System signals (timers, completed background work)
///
/// Events never touch state directly. A dispatcher maps each one to
/// zero or one [`Action`](super::Action).
pub trait Event: std::fmt::Debug + 'static {
    /// Every tag name this event type can carry.
    const KINDS: &'static [&'static str];

    /// Tag name of this event.
    fn kind(&self) -> &'static str;
}

/// An event in its untyped `{kind, data}` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedEvent {
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl TaggedEvent {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    /// Decode into the typed event set `E`.
    pub fn decode<E>(self) -> Result<E, CoordError>
    where
        E: Event + DeserializeOwned,
    {
        if !E::KINDS.contains(&self.kind.as_str()) {
            return Err(CoordError::UnknownEventKind { kind: self.kind });
        }
        decode_adjacent("data", &self.kind, self.data).map_err(|source| {
            CoordError::InvalidPayload {
                kind: self.kind.clone(),
                source,
            }
        })
    }
}
