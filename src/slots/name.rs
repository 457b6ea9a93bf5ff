//! Slot and writer identifiers.

use std::borrow::Borrow;
use std::fmt;

use crate::error::CoordError;

/// Name of a placement point.
///
/// Must be non-empty, carry no leading or trailing whitespace and contain
/// no control characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotName(String);

impl SlotName {
    pub fn new(name: impl Into<String>) -> Result<Self, CoordError> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("slot name must not be empty")
        } else if name.trim() != name {
            Some("leading or trailing whitespace")
        } else if name.chars().any(char::is_control) {
            Some("control characters are not allowed")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(CoordError::InvalidSlotName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SlotName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of the scope member contributing content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WriterId(String);

impl WriterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WriterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for WriterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        for name in ["header", "footer-actions", "sidebar.top", "Main Title"] {
            assert_eq!(SlotName::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_empty() {
        let err = SlotName::new("").unwrap_err();
        assert!(matches!(
            err,
            CoordError::InvalidSlotName { reason: "slot name must not be empty", .. }
        ));
    }

    #[test]
    fn rejects_padding_and_control_chars() {
        assert!(SlotName::new(" header").is_err());
        assert!(SlotName::new("header\n").is_err());
        assert!(SlotName::new("head\u{7}er").is_err());
        assert!(SlotName::new("   ").is_err());
    }
}
