//! In-memory store
//!
//! Seeded from a [`Dataset`], insertion ordered, guarded by
//! `parking_lot::RwLock`. Locks are never held across an await.

use crate::dataset::Dataset;
use crate::error::{StoreError, StoreResult};
use crate::input::{NewDocument, NewTask};
use crate::store::{ClientStore, DocumentStore, EventStore, MeetingStore, MessageStore, ProjectStore, TaskStore};
use agency_model::{
    Assignee, CalendarEvent, Client, ClientId, Conversation, ConversationId, Document, DocumentId, EventId,
    Meeting, MeetingId, MeetingStatus, Message, MessageId, Project, ProjectId, Sender, Task, TaskId, TaskStatus,
};
use agency_view::Clock;
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::hash::Hash;
use std::sync::Arc;

/// Insertion-ordered table keyed by record id
#[derive(Debug)]
struct Table<K, V> {
    kind: &'static str,
    rows: RwLock<IndexMap<K, V>>,
}

impl<K, V> Table<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Display,
    V: Clone,
{
    fn new(kind: &'static str, rows: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            kind,
            rows: RwLock::new(rows.into_iter().collect()),
        }
    }

    fn list(&self) -> Vec<V> {
        self.rows.read().values().cloned().collect()
    }

    fn get(&self, id: &K) -> StoreResult<V> {
        self.rows
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(self.kind, id))
    }

    fn insert(&self, id: K, value: V) -> StoreResult<V> {
        let mut rows = self.rows.write();
        if rows.contains_key(&id) {
            return Err(StoreError::duplicate(self.kind, &id));
        }
        rows.insert(id, value.clone());
        Ok(value)
    }

    fn update(&self, id: &K, change: impl FnOnce(&mut V)) -> StoreResult<V> {
        let mut rows = self.rows.write();
        let row = rows.get_mut(id).ok_or_else(|| StoreError::not_found(self.kind, id))?;
        change(row);
        Ok(row.clone())
    }

    fn remove(&self, id: &K) -> StoreResult<V> {
        self.rows
            .write()
            .shift_remove(id)
            .ok_or_else(|| StoreError::not_found(self.kind, id))
    }

    fn len(&self) -> usize {
        self.rows.read().len()
    }
}

/// Store over in-memory tables
#[derive(Debug)]
pub struct InMemoryStore {
    clock: Arc<dyn Clock>,
    tasks: Table<TaskId, Task>,
    conversations: Table<ConversationId, Conversation>,
    messages: RwLock<IndexMap<ConversationId, Vec<Message>>>,
    documents: Table<DocumentId, Document>,
    projects: Table<ProjectId, Project>,
    clients: Table<ClientId, Client>,
    meetings: Table<MeetingId, Meeting>,
    events: Table<EventId, CalendarEvent>,
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::seeded(Dataset::default(), clock)
    }

    /// Store seeded from a validated dataset
    #[must_use]
    pub fn seeded(dataset: Dataset, clock: Arc<dyn Clock>) -> Self {
        let Dataset {
            tasks,
            conversations,
            mut messages,
            documents,
            projects,
            clients,
            meetings,
            events,
        } = dataset;
        for conversation in &conversations {
            messages.entry(conversation.id.clone()).or_default();
        }
        let store = Self {
            clock,
            tasks: Table::new("task", tasks.into_iter().map(|t| (t.id.clone(), t))),
            conversations: Table::new("conversation", conversations.into_iter().map(|c| (c.id.clone(), c))),
            messages: RwLock::new(messages),
            documents: Table::new("document", documents.into_iter().map(|d| (d.id.clone(), d))),
            projects: Table::new("project", projects.into_iter().map(|p| (p.id.clone(), p))),
            clients: Table::new("client", clients.into_iter().map(|c| (c.id.clone(), c))),
            meetings: Table::new("meeting", meetings.into_iter().map(|m| (m.id.clone(), m))),
            events: Table::new("event", events.into_iter().map(|e| (e.id.clone(), e))),
        };
        tracing::debug!(
            "Seeded in-memory store: {} tasks, {} documents, {} projects",
            store.tasks.len(),
            store.documents.len(),
            store.projects.len()
        );
        store
    }

    /// Insert a fully formed task (seeding and tests)
    ///
    /// # Errors
    /// [`StoreError::Duplicate`] for a taken id, [`StoreError::Validation`]
    /// for a blank title.
    pub fn insert_task(&self, task: Task) -> StoreResult<Task> {
        task.validate()?;
        self.tasks.insert(task.id.clone(), task)
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.tasks.list())
    }

    async fn get_task(&self, id: &TaskId) -> StoreResult<Task> {
        self.tasks.get(id)
    }

    async fn create_task(&self, new: NewTask) -> StoreResult<Task> {
        let task = new.into_task(TaskId::generate())?;
        let task = self.tasks.insert(task.id.clone(), task)?;
        tracing::info!("Created task {}: {}", task.id, task.title);
        Ok(task)
    }

    async fn update_task_status(&self, id: &TaskId, status: TaskStatus) -> StoreResult<Task> {
        let today = self.clock.today();
        let task = self.tasks.update(id, |task| {
            task.status = status;
            task.completed_date = status.is_done().then_some(today);
        })?;
        tracing::info!("Task {} moved to {}", id, status);
        Ok(task)
    }

    async fn assign_task(&self, id: &TaskId, assignee: Option<Assignee>) -> StoreResult<Task> {
        let task = self.tasks.update(id, |task| task.assignee = assignee)?;
        match &task.assignee {
            Some(assignee) => tracing::info!("Task {} assigned to {}", id, assignee.name),
            None => tracing::info!("Task {} unassigned", id),
        }
        Ok(task)
    }

    async fn delete_task(&self, id: &TaskId) -> StoreResult<()> {
        self.tasks.remove(id)?;
        tracing::info!("Deleted task {}", id);
        Ok(())
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn list_conversations(&self) -> StoreResult<Vec<Conversation>> {
        Ok(self.conversations.list())
    }

    async fn list_messages(&self, conversation: &ConversationId) -> StoreResult<Vec<Message>> {
        self.messages
            .read()
            .get(conversation)
            .cloned()
            .ok_or_else(|| StoreError::not_found("conversation", conversation))
    }

    async fn post_message(&self, conversation: &ConversationId, sender: Sender, content: String) -> StoreResult<Message> {
        let message = Message::text(MessageId::generate(), sender, content, self.clock.now());
        message.validate()?;
        self.messages
            .write()
            .get_mut(conversation)
            .ok_or_else(|| StoreError::not_found("conversation", conversation))?
            .push(message.clone());
        tracing::info!("Posted message {} to {}", message.id, conversation);
        Ok(message)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_documents(&self) -> StoreResult<Vec<Document>> {
        Ok(self.documents.list())
    }

    async fn add_document(&self, new: NewDocument) -> StoreResult<Document> {
        let doc = new.into_document(DocumentId::generate(), self.clock.now())?;
        let doc = self.documents.insert(doc.id.clone(), doc)?;
        tracing::info!("Recorded upload {} ({})", doc.name, doc.id);
        Ok(doc)
    }

    async fn delete_document(&self, id: &DocumentId) -> StoreResult<()> {
        let doc = self.documents.remove(id)?;
        tracing::info!("Deleted document {} ({})", doc.name, id);
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for InMemoryStore {
    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.projects.list())
    }

    async fn get_project(&self, id: &ProjectId) -> StoreResult<Project> {
        self.projects.get(id)
    }
}

#[async_trait]
impl ClientStore for InMemoryStore {
    async fn list_clients(&self) -> StoreResult<Vec<Client>> {
        Ok(self.clients.list())
    }

    async fn get_client(&self, id: &ClientId) -> StoreResult<Client> {
        self.clients.get(id)
    }
}

#[async_trait]
impl MeetingStore for InMemoryStore {
    async fn list_meetings(&self) -> StoreResult<Vec<Meeting>> {
        Ok(self.meetings.list())
    }

    async fn cancel_meeting(&self, id: &MeetingId) -> StoreResult<Meeting> {
        let meeting = self.meetings.update(id, |m| m.status = MeetingStatus::Cancelled)?;
        tracing::info!("Cancelled meeting {}: {}", id, meeting.topic);
        Ok(meeting)
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn list_events(&self) -> StoreResult<Vec<CalendarEvent>> {
        Ok(self.events.list())
    }

    async fn add_event(&self, event: CalendarEvent) -> StoreResult<CalendarEvent> {
        event.validate()?;
        let event = self.events.insert(event.id.clone(), event)?;
        tracing::info!("Added calendar event {}: {}", event.id, event.title);
        Ok(event)
    }

    async fn delete_event(&self, id: &EventId) -> StoreResult<()> {
        self.events.remove(id)?;
        tracing::info!("Deleted calendar event {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_model::{EventKind, EventTime};
    use agency_view::FixedClock;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2025, 4, 21, 12, 0, 0).unwrap()))
    }

    fn store() -> InMemoryStore {
        let mut dataset = Dataset::default();
        dataset.tasks = vec![Task::new("t1", "First"), Task::new("t2", "Second")];
        dataset.conversations = vec![Conversation::channel("general", "#general")];
        InMemoryStore::seeded(dataset, clock())
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let store = store();
        let created = store.create_task(NewTask::titled("Third")).await.unwrap();
        let ids: Vec<String> = store.list_tasks().await.unwrap().into_iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["t1".to_string(), "t2".to_string(), created.id.to_string()]);
        assert!(created.id.as_str().starts_with("task-"));
    }

    #[tokio::test]
    async fn status_change_stamps_completion() {
        let store = store();
        let done = store.update_task_status(&"t1".into(), TaskStatus::Done).await.unwrap();
        assert_eq!(done.completed_date, NaiveDate::from_ymd_opt(2025, 4, 21));
        let reopened = store.update_task_status(&"t1".into(), TaskStatus::ToDo).await.unwrap();
        assert_eq!(reopened.completed_date, None);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = store();
        let err = store.get_task(&"nope".into()).await.unwrap_err();
        assert_eq!(err, StoreError::not_found("task", "nope"));
        assert!(store.delete_task(&"nope".into()).await.is_err());
        assert!(store.list_messages(&"missing".into()).await.is_err());
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = store();
        let err = store.insert_task(Task::new("t1", "again")).unwrap_err();
        assert_eq!(err, StoreError::duplicate("task", "t1"));
    }

    #[tokio::test]
    async fn invalid_creation_is_rejected() {
        let store = store();
        let err = store.create_task(NewTask::titled("x").with_status("Blocked")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.list_tasks().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn posting_appends_with_clock_time() {
        let store = store();
        let posted = store
            .post_message(&"general".into(), Sender::new("staff-admin", "Admin"), "hello".into())
            .await
            .unwrap();
        assert_eq!(posted.timestamp, clock().now());
        assert_eq!(store.list_messages(&"general".into()).await.unwrap().len(), 1);
        assert!(store
            .post_message(&"general".into(), Sender::new("a", "A"), "   ".into())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn assign_and_unassign() {
        let store = store();
        let task = store
            .assign_task(&"t2".into(), Some(Assignee::new("staff-bob", "Bob Johnson")))
            .await
            .unwrap();
        assert_eq!(task.assignee_id().map(|id| id.as_str()), Some("staff-bob"));
        let task = store.assign_task(&"t2".into(), None).await.unwrap();
        assert!(task.assignee.is_none());
    }

    #[tokio::test]
    async fn document_and_event_lifecycle() {
        let store = store();
        let doc = store.add_document(NewDocument::named("brief.pdf").uploaded_by("Alice")).await.unwrap();
        assert_eq!(doc.uploaded_on, clock().now());
        store.delete_document(&doc.id).await.unwrap();
        assert!(store.list_documents().await.unwrap().is_empty());

        let event = CalendarEvent::new("e1", "Offsite", EventTime::Date(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()), EventKind::Milestone);
        store.add_event(event.clone()).await.unwrap();
        assert!(matches!(store.add_event(event).await, Err(StoreError::Duplicate { .. })));
        store.delete_event(&"e1".into()).await.unwrap();
    }
}
