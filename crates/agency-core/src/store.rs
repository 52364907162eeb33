//! Data-access capabilities
//!
//! The dashboard consumes records only through these traits. The in-memory
//! implementation backs tests and the CLI; a networked service can implement
//! the same traits.

use crate::error::StoreResult;
use crate::input::{NewDocument, NewTask};
use agency_model::{
    Assignee, CalendarEvent, Client, ClientId, Conversation, ConversationId, Document, DocumentId, EventId,
    Meeting, MeetingId, Message, Project, ProjectId, Sender, Task, TaskId, TaskStatus,
};
use async_trait::async_trait;

/// Task access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks in insertion order
    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;

    /// One task
    async fn get_task(&self, id: &TaskId) -> StoreResult<Task>;

    /// Validate and insert a new task under a generated id
    async fn create_task(&self, new: NewTask) -> StoreResult<Task>;

    /// Move a task to another column
    async fn update_task_status(&self, id: &TaskId, status: TaskStatus) -> StoreResult<Task>;

    /// Assign or unassign (`None`)
    async fn assign_task(&self, id: &TaskId, assignee: Option<Assignee>) -> StoreResult<Task>;

    /// Remove a task
    async fn delete_task(&self, id: &TaskId) -> StoreResult<()>;
}

/// Chat access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Channels and direct threads
    async fn list_conversations(&self) -> StoreResult<Vec<Conversation>>;

    /// Messages of one conversation, in posting order
    async fn list_messages(&self, conversation: &ConversationId) -> StoreResult<Vec<Message>>;

    /// Append a text message stamped with the current time
    async fn post_message(&self, conversation: &ConversationId, sender: Sender, content: String) -> StoreResult<Message>;
}

/// Document metadata access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All document rows
    async fn list_documents(&self) -> StoreResult<Vec<Document>>;

    /// Record an upload stamped with the current time
    async fn add_document(&self, new: NewDocument) -> StoreResult<Document>;

    /// Remove a document row
    async fn delete_document(&self, id: &DocumentId) -> StoreResult<()>;
}

/// Project access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// All projects in insertion order
    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    /// One project
    async fn get_project(&self, id: &ProjectId) -> StoreResult<Project>;
}

/// Client access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// All clients in insertion order
    async fn list_clients(&self) -> StoreResult<Vec<Client>>;

    /// One client
    async fn get_client(&self, id: &ClientId) -> StoreResult<Client>;
}

/// Meeting access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// All meetings in insertion order
    async fn list_meetings(&self) -> StoreResult<Vec<Meeting>>;

    /// Mark a meeting cancelled
    async fn cancel_meeting(&self, id: &MeetingId) -> StoreResult<Meeting>;
}

/// Standalone calendar entries (milestones, time off, internal events)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All standalone entries in insertion order
    async fn list_events(&self) -> StoreResult<Vec<CalendarEvent>>;

    /// Validate and insert; the id must be unused
    async fn add_event(&self, event: CalendarEvent) -> StoreResult<CalendarEvent>;

    /// Remove an entry
    async fn delete_event(&self, id: &EventId) -> StoreResult<()>;
}
