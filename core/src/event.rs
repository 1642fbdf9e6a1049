//! Client event decoding.
//!
//! The transport delivers events as a name plus a string-keyed payload.
//! Components turn that pair into a closed enum via [`LiveEvent::decode`], so
//! adding an event kind is a compile-time-checked change.
//!
//! # Example
//!
//! ```
//! use liveview_core::{DecodeError, LiveEvent, Payload};
//!
//! #[derive(Debug, PartialEq)]
//! enum NoteEvent {
//!     Rename { title: String },
//!     Clear,
//! }
//!
//! impl LiveEvent for NoteEvent {
//!     fn decode(name: &str, payload: &Payload) -> Result<Self, DecodeError> {
//!         match name {
//!             "rename" => Ok(Self::Rename {
//!                 title: DecodeError::require(name, payload, "title")?.to_string(),
//!             }),
//!             "clear" => Ok(Self::Clear),
//!             other => Err(DecodeError::UnknownEvent(other.to_string())),
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         match self {
//!             Self::Rename { .. } => "rename",
//!             Self::Clear => "clear",
//!         }
//!     }
//! }
//!
//! let payload = Payload::new().with("title", "Groceries");
//! let event = NoteEvent::decode("rename", &payload).unwrap();
//! assert_eq!(event, NoteEvent::Rename { title: "Groceries".into() });
//! ```

use crate::params::Payload;
use thiserror::Error;

/// Errors raised while decoding a client event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The event name is not part of the component's wire contract.
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// A required payload field is absent.
    #[error("Event `{event}` is missing field `{field}`")]
    MissingField {
        /// Event name
        event: String,
        /// Missing field name
        field: &'static str,
    },

    /// A payload field is present but malformed.
    #[error("Event `{event}` has invalid field `{field}`: {reason}")]
    InvalidField {
        /// Event name
        event: String,
        /// Offending field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl DecodeError {
    /// Look up a required payload field.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingField`] if the field is absent.
    pub fn require<'a>(
        event: &str,
        payload: &'a Payload,
        field: &'static str,
    ) -> Result<&'a str, Self> {
        payload.get(field).ok_or_else(|| Self::MissingField {
            event: event.to_string(),
            field,
        })
    }

    /// Build an [`DecodeError::InvalidField`] error.
    #[must_use]
    pub fn invalid(event: &str, field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            event: event.to_string(),
            field,
            reason: reason.into(),
        }
    }
}

/// A closed set of client events.
pub trait LiveEvent: Sized {
    /// Decode an event from its wire name and payload.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] for unknown names or malformed payloads.
    fn decode(name: &str, payload: &Payload) -> Result<Self, DecodeError>;

    /// The wire name of this event.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_missing_field() {
        let payload = Payload::new();
        let err = DecodeError::require("editTodo", &payload, "text");
        assert_eq!(
            err,
            Err(DecodeError::MissingField {
                event: "editTodo".to_string(),
                field: "text"
            })
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            DecodeError::UnknownEvent("fly".to_string()).to_string(),
            "Unknown event: fly"
        );
        assert_eq!(
            DecodeError::invalid("toggleTodo", "id", "not a uuid").to_string(),
            "Event `toggleTodo` has invalid field `id`: not a uuid"
        );
    }
}
