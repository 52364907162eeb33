//! Record identifiers
//!
//! Seeded records keep whatever id the dataset gives them (`task-001`,
//! `msg5`, ...). Records created at runtime get a ULID with a kind prefix so
//! they sort by creation time.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh, time-sortable identifier
            #[must_use]
            pub fn generate() -> Self {
                Self(format!(concat!($prefix, "-{}"), Ulid::new().to_string().to_lowercase()))
            }

            /// Borrow as string slice
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

record_id!(
    /// Task identifier
    TaskId,
    "task"
);
record_id!(
    /// Staff member or participant identifier
    StaffId,
    "staff"
);
record_id!(
    /// Chat message identifier
    MessageId,
    "msg"
);
record_id!(
    /// Channel or direct-message thread identifier
    ConversationId,
    "conv"
);
record_id!(
    /// Document identifier
    DocumentId,
    "doc"
);
record_id!(
    /// Project identifier
    ProjectId,
    "proj"
);
record_id!(
    /// Client identifier
    ClientId,
    "client"
);
record_id!(
    /// Meeting identifier
    MeetingId,
    "meet"
);
record_id!(
    /// Invoice identifier
    InvoiceId,
    "inv"
);
record_id!(
    /// Calendar event identifier
    EventId,
    "event"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let a = TaskId::generate();
        let b = TaskId::generate();
        assert!(a.as_str().starts_with("task-"));
        assert_ne!(a, b);
    }

    #[test]
    fn seeded_ids_round_trip_through_json() {
        let id = MessageId::new("msg5");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"msg5\"");
        let back: MessageId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
