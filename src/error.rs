//! Error types for the coordination runtime.

use thiserror::Error;

use crate::scope::ScopeId;

/// Errors surfaced at the boundary of every runtime operation.
///
/// All of these are returned synchronously from the call that caused them.
/// The single exception is [`CoordError::DuplicateToken`], which
/// `unregister` logs and swallows.
#[derive(Debug, Error)]
pub enum CoordError {
    /// A read was attempted through a reference that points at no scope.
    #[error("No enclosing scope: the reference was never bound or its scope was dropped")]
    MissingScope,

    /// A handle was used after its owning scope tore down.
    #[error("Scope {scope} has been disposed")]
    ScopeDisposed { scope: ScopeId },

    /// An action tag outside the scope's closed action set.
    #[error("Unknown action kind '{kind}'")]
    UnknownActionKind { kind: String },

    /// An event tag outside the scope's closed event set.
    #[error("Unknown event kind '{kind}'")]
    UnknownEventKind { kind: String },

    /// The tag was known but its payload did not decode.
    #[error("Invalid payload for '{kind}': {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    /// Empty or malformed slot name.
    #[error("Invalid slot name '{name}': {reason}")]
    InvalidSlotName { name: String, reason: &'static str },

    /// `unregister` called twice with the same token.
    #[error("Registration token for slot '{name}' was already unregistered")]
    DuplicateToken { name: String },

    /// `update` called with a token whose entry was removed.
    #[error("Registration token for slot '{name}' no longer refers to a live entry")]
    RevokedToken { name: String },
}

impl CoordError {
    /// True for the errors caused by using a handle outside a live scope.
    pub fn is_scope_error(&self) -> bool {
        matches!(self, Self::MissingScope | Self::ScopeDisposed { .. })
    }
}
