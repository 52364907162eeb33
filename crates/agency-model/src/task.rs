//! Tasks and the enums they are filtered and grouped by
//!
//! [`TaskStatus`] is a closed set. Seed data and creation requests are
//! parsed through [`TaskStatus::from_str`], so a record with an unknown
//! status never reaches Kanban grouping.

use crate::date::{flexible_timestamp, lenient_date};
use crate::error::{ModelError, ModelResult};
use crate::ids::{StaffId, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Priority level
///
/// Ordered `Low < Medium < High < Critical`. Tasks in practice use the first
/// three; `Critical` shows up on projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
    /// Critical (projects only in the seed data)
    Critical,
}

impl Priority {
    /// All priorities, lowest first
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    /// Display label
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    /// High or Critical
    #[inline]
    #[must_use]
    pub fn is_urgent(self) -> bool {
        self >= Priority::High
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ModelError;

    /// Labels are matched exactly; "high" is not "High".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| ModelError::UnknownPriority(s.to_string()))
    }
}

impl TryFrom<String> for Priority {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Task lifecycle status (Kanban column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TaskStatus {
    /// Not started
    #[serde(rename = "To Do")]
    ToDo,
    /// Being worked on
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// Column order on the board
    pub const COLUMNS: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    /// Display label
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Whether the task is finished
    #[inline]
    #[must_use]
    pub fn is_done(self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::ToDo
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" | "Open" => Ok(TaskStatus::ToDo),
            "In Progress" => Ok(TaskStatus::InProgress),
            "Done" | "Completed" => Ok(TaskStatus::Done),
            other => Err(ModelError::unknown_status("task", other)),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Internal vs client-facing work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Agency-internal task
    Internal,
    /// Work for a client
    Client,
}

impl FromStr for TaskKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(TaskKind::Internal),
            "client" => Ok(TaskKind::Client),
            other => Err(ModelError::unknown_value("task type", other)),
        }
    }
}

/// Person a task is assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// Staff id, absent in some seed data
    #[serde(default)]
    pub id: Option<StaffId>,
    /// Display name
    pub name: String,
    /// Avatar URL
    #[serde(default, alias = "img")]
    pub avatar: Option<String>,
}

impl Assignee {
    /// Create assignee with id and name
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<StaffId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            avatar: None,
        }
    }
}

/// Checklist item inside a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    #[serde(default)]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// File attached to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub file_type: String,
}

/// Comment on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "user")]
    pub author: String,
    pub text: String,
    #[serde(with = "flexible_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Task view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier
    pub id: TaskId,
    /// Short title
    #[serde(alias = "name")]
    pub title: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Client name (free text)
    #[serde(default)]
    pub client: String,
    /// Project name (free text)
    #[serde(default)]
    pub project: String,
    /// Due date, `None` when absent or unparseable
    #[serde(default, with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    /// Completion date for finished tasks
    #[serde(default, with = "lenient_date")]
    pub completed_date: Option<NaiveDate>,
    /// Priority
    #[serde(default)]
    pub priority: Priority,
    /// Lifecycle status
    #[serde(default)]
    pub status: TaskStatus,
    /// Assignee, `None` means unassigned
    #[serde(default)]
    pub assignee: Option<Assignee>,
    /// Internal task (not client work)
    #[serde(default)]
    pub is_internal: bool,
    /// Tags, insertion ordered and unique
    #[serde(default)]
    pub tags: IndexSet<String>,
    /// Checklist
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Attachments
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Comments in posting order
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Task {
    /// Create a task with default priority and status
    #[must_use]
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            client: String::new(),
            project: String::new(),
            due_date: None,
            completed_date: None,
            priority: Priority::default(),
            status: TaskStatus::default(),
            assignee: None,
            is_internal: false,
            tags: IndexSet::new(),
            subtasks: Vec::new(),
            attachments: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// With priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// With due date
    #[inline]
    #[must_use]
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// With assignee
    #[inline]
    #[must_use]
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// With client and project
    #[inline]
    #[must_use]
    pub fn for_client(mut self, client: impl Into<String>, project: impl Into<String>) -> Self {
        self.client = client.into();
        self.project = project.into();
        self
    }

    /// Mark as internal
    #[inline]
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.is_internal = true;
        self
    }

    /// With tag (duplicates collapse)
    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// With checklist item
    #[inline]
    #[must_use]
    pub fn with_subtask(mut self, text: impl Into<String>, completed: bool) -> Self {
        let id = format!("sub{}", self.subtasks.len() + 1);
        self.subtasks.push(Subtask {
            id,
            text: text.into(),
            completed,
        });
        self
    }

    /// Internal or client work
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TaskKind {
        if self.is_internal {
            TaskKind::Internal
        } else {
            TaskKind::Client
        }
    }

    /// Id of the assignee, if any
    #[inline]
    #[must_use]
    pub fn assignee_id(&self) -> Option<&StaffId> {
        self.assignee.as_ref().and_then(|a| a.id.as_ref())
    }

    /// (completed, total) checklist items
    #[must_use]
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        (done, self.subtasks.len())
    }

    /// Check ingestion invariants
    ///
    /// # Errors
    /// Returns [`ModelError::MissingField`] when the title is blank.
    pub fn validate(&self) -> ModelResult<()> {
        if self.title.trim().is_empty() {
            return Err(ModelError::MissingField("task.title"));
        }
        Ok(())
    }
}
