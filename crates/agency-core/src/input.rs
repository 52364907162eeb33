//! Creation requests
//!
//! Requests carry raw labels and date strings as a form would submit them.
//! Turning one into a record parses every enum and date strictly.

use agency_model::{parse_date, Assignee, Document, ModelError, ModelResult, Task, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// New task form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    /// Free-form details
    #[serde(default)]
    pub description: String,
    /// Client name; empty for internal work
    #[serde(default)]
    pub client: String,
    /// Project name
    #[serde(default)]
    pub project: String,
    /// `yyyy-MM-dd`
    #[serde(default)]
    pub due_date: Option<String>,
    /// Priority label; Medium when absent
    #[serde(default)]
    pub priority: Option<String>,
    /// Status label; To Do when absent
    #[serde(default)]
    pub status: Option<String>,
    /// Assignee; unassigned when absent
    #[serde(default)]
    pub assignee: Option<Assignee>,
    /// Internal rather than client work
    #[serde(default)]
    pub is_internal: bool,
    /// Labels; duplicates collapse
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewTask {
    /// Create request with a title
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// With priority label
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, label: impl Into<String>) -> Self {
        self.priority = Some(label.into());
        self
    }

    /// With status label
    #[inline]
    #[must_use]
    pub fn with_status(mut self, label: impl Into<String>) -> Self {
        self.status = Some(label.into());
        self
    }

    /// With due date string
    #[inline]
    #[must_use]
    pub fn due(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }

    /// Validate and build the task under `id`
    ///
    /// # Errors
    /// Blank title, unknown priority/status label, or a malformed due date.
    pub fn into_task(self, id: TaskId) -> ModelResult<Task> {
        if self.title.trim().is_empty() {
            return Err(ModelError::MissingField("task.title"));
        }
        let mut task = Task::new(id, self.title.trim()).for_client(self.client, self.project);
        task.description = self.description;
        task.priority = self.priority.as_deref().map(str::parse).transpose()?.unwrap_or_default();
        task.status = self.status.as_deref().map(str::parse).transpose()?.unwrap_or_default();
        task.due_date = self.due_date.as_deref().map(parse_date).transpose()?;
        task.assignee = self.assignee;
        task.is_internal = self.is_internal;
        task.tags = self.tags.into_iter().collect();
        Ok(task)
    }
}

/// File metadata for an upload
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    /// File name
    pub name: String,
    /// Type tag such as PDF or PNG
    #[serde(default)]
    pub file_type: String,
    /// Display size
    #[serde(default)]
    pub size: String,
    /// Owning client
    #[serde(default)]
    pub client: String,
    /// Owning project
    #[serde(default)]
    pub project: String,
    /// Uploader name
    #[serde(default)]
    pub uploaded_by: String,
}

impl NewDocument {
    /// Create request for a file name; the type tag defaults to the extension
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let file_type = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_uppercase())
            .unwrap_or_default();
        Self {
            name,
            file_type,
            ..Self::default()
        }
    }

    /// With uploader
    #[inline]
    #[must_use]
    pub fn uploaded_by(mut self, who: impl Into<String>) -> Self {
        self.uploaded_by = who.into();
        self
    }

    /// Validate and build the document row, uploaded at `at`
    ///
    /// # Errors
    /// Blank file name.
    pub fn into_document(self, id: agency_model::DocumentId, at: DateTime<Utc>) -> ModelResult<Document> {
        let doc = Document::new(id, self.name, self.file_type, at)
            .for_client(self.client, self.project)
            .uploaded_by(self.uploaded_by)
            .with_size(self.size);
        doc.validate()?;
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_model::{Priority, TaskStatus};
    use chrono::NaiveDate;

    #[test]
    fn builds_task_with_parsed_fields() {
        let task = NewTask::titled("  Draft proposal ")
            .with_priority("High")
            .with_status("Open")
            .due("2025-04-25")
            .into_task(TaskId::new("task-1"))
            .unwrap();
        assert_eq!(task.title, "Draft proposal");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 4, 25));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(NewTask::titled(" ").into_task(TaskId::new("t")).is_err());
        assert!(NewTask::titled("x").with_status("Blocked").into_task(TaskId::new("t")).is_err());
        assert!(NewTask::titled("x").with_priority("urgent").into_task(TaskId::new("t")).is_err());
        assert!(matches!(
            NewTask::titled("x").due("25/04/2025").into_task(TaskId::new("t")),
            Err(ModelError::InvalidDate { .. })
        ));
    }

    #[test]
    fn document_type_defaults_to_extension() {
        assert_eq!(NewDocument::named("report.final.xlsx").file_type, "XLSX");
        assert_eq!(NewDocument::named("README").file_type, "");
    }
}
