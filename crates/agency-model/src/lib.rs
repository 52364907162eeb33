//! Agency Model - typed records for the agency dashboard
//!
//! View models shared by the admin dashboard and the client portal:
//! - Tasks with a closed status set and ordered priorities
//! - Chat messages and the conversations they belong to
//! - Document metadata, projects, meetings, invoices and client aggregates
//! - Calendar widget events and chart points
//!
//! Records are validated on the way in. Closed enums are parsed through
//! `FromStr` during deserialization, so an unknown status rejects the record
//! instead of leaking into grouping.
//!
//! # Example
//!
//! ```rust,ignore
//! use agency_model::prelude::*;
//!
//! let task: Task = serde_json::from_str(r#"{"id": "task1", "title": "Draft proposal", "status": "Open"}"#)?;
//! assert_eq!(task.status, TaskStatus::ToDo);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod calendar;
pub mod chart;
pub mod client;
pub mod date;
pub mod document;
pub mod error;
pub mod ids;
pub mod invoice;
pub mod meeting;
pub mod message;
pub mod project;
pub mod task;

pub use calendar::{CalendarEvent, EventDetails, EventKind, EventTime};
pub use chart::ChartPoint;
pub use client::{ActivityEntry, Billing, Client, ClientStatus, ContactInfo, Note};
pub use date::{parse_date, parse_date_lenient, parse_timestamp};
pub use document::{Document, FileCategory};
pub use error::{ModelError, ModelResult};
pub use ids::{
    ClientId, ConversationId, DocumentId, EventId, InvoiceId, MeetingId, MessageId, ProjectId,
    StaffId, TaskId,
};
pub use invoice::{Invoice, InvoiceStatus, Money};
pub use meeting::{Meeting, MeetingStatus, JOIN_WINDOW_MINUTES};
pub use message::{Conversation, ConversationKind, Message, MessageType, Reaction, Sender};
pub use project::{ClientRef, Project, ProjectStatus, StaffRef};
pub use task::{Assignee, Attachment, Comment, Priority, Subtask, Task, TaskKind, TaskStatus};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with agency records
    pub use crate::{
        Assignee, CalendarEvent, Client, Conversation, Document, EventKind, Meeting, Message,
        ModelError, Priority, Project, ProjectStatus, Sender, StaffId, Task, TaskId, TaskKind,
        TaskStatus,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
