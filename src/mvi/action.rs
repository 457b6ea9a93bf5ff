//! Closed action sets and their untyped wire form.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tagged::decode_adjacent;
use crate::error::CoordError;

/// A typed domain intent drawn from a scope's closed action set.
///
/// Implementors are normally enums serialized with
/// `#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]`
/// so that [`TaggedAction::decode`] can reconstruct them.
pub trait Action: std::fmt::Debug + 'static {
    /// Every tag name in the closed set.
    const KINDS: &'static [&'static str];

    /// Tag name of this action.
    fn kind(&self) -> &'static str;
}

/// An action in its untyped `{kind, payload}` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedAction {
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl TaggedAction {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Decode into the typed action set `A`.
    ///
    /// # Errors
    /// `UnknownActionKind` if the tag is not in `A::KINDS`,
    /// `InvalidPayload` if the tag is known but the payload does not fit.
    pub fn decode<A>(self) -> Result<A, CoordError>
    where
        A: Action + DeserializeOwned,
    {
        if !A::KINDS.contains(&self.kind.as_str()) {
            return Err(CoordError::UnknownActionKind { kind: self.kind });
        }
        decode_adjacent("payload", &self.kind, self.payload).map_err(|source| {
            CoordError::InvalidPayload {
                kind: self.kind.clone(),
                source,
            }
        })
    }
}
