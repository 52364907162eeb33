//! JSON dataset
//!
//! One file holds every record kind. Parsing runs each record through the
//! model's serde impls (closed enums, lenient display dates), then
//! [`Dataset::validate`] applies the remaining ingestion checks.

use crate::error::DatasetError;
use agency_model::{
    CalendarEvent, Client, Conversation, ConversationId, Document, Meeting, Message, ModelResult, Project, Task,
};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every record the dashboard shows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    /// Messages per conversation, in posting order
    #[serde(default)]
    pub messages: IndexMap<ConversationId, Vec<Message>>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    /// Standalone calendar entries
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

impl Dataset {
    /// Parse and validate JSON text
    ///
    /// # Errors
    /// [`DatasetError::Parse`] for malformed JSON or unknown enum labels,
    /// and the errors of [`Dataset::validate`].
    pub fn from_json(text: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_str(text)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Read, parse and validate a dataset file
    ///
    /// # Errors
    /// [`DatasetError::Io`] when the file cannot be read, otherwise as
    /// [`Dataset::from_json`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        tracing::debug!("Loading dataset from {}", path.display());
        let text = tokio::fs::read_to_string(path).await.map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&text)?;
        tracing::info!(
            "Loaded dataset: {} tasks, {} messages, {} documents, {} projects, {} clients",
            dataset.tasks.len(),
            dataset.message_count(),
            dataset.documents.len(),
            dataset.projects.len(),
            dataset.clients.len()
        );
        Ok(dataset)
    }

    /// Total messages across conversations
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    /// Per-record checks, unique ids per kind, and known conversations
    ///
    /// # Errors
    /// The first failing record.
    pub fn validate(&self) -> Result<(), DatasetError> {
        check_all("task", &self.tasks, |t| t.id.as_str(), Task::validate)?;
        check_all("conversation", &self.conversations, |c| c.id.as_str(), |_| Ok(()))?;
        check_all("document", &self.documents, |d| d.id.as_str(), Document::validate)?;
        check_all("project", &self.projects, |p| p.id.as_str(), Project::validate)?;
        check_all("client", &self.clients, |c| c.id.as_str(), Client::validate)?;
        check_all("meeting", &self.meetings, |m| m.id.as_str(), Meeting::validate)?;
        check_all("event", &self.events, |e| e.id.as_str(), CalendarEvent::validate)?;

        let known: IndexSet<&ConversationId> = self.conversations.iter().map(|c| &c.id).collect();
        if let Some(unknown) = self.messages.keys().find(|id| !known.contains(id)) {
            return Err(DatasetError::UnknownConversation(unknown.to_string()));
        }
        check_all("message", self.messages.values().flatten(), |m| m.id.as_str(), Message::validate)

    }
}

fn check_all<'a, R: 'a>(
    kind: &'static str,
    records: impl IntoIterator<Item = &'a R>,
    id: impl Fn(&'a R) -> &'a str,
    validate: impl Fn(&R) -> ModelResult<()>,
) -> Result<(), DatasetError> {
    let mut seen = IndexSet::new();
    for record in records {
        let record_id = id(record);
        if !seen.insert(record_id) {
            return Err(DatasetError::DuplicateId {
                kind,
                id: record_id.to_string(),
            });
        }
        validate(record).map_err(|source| {
            tracing::warn!("Rejected {} {}: {}", kind, record_id, source);
            DatasetError::Invalid {
                kind,
                id: record_id.to_string(),
                source,
            }
        })?;
    }
    Ok(())
}
