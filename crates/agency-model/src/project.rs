//! Projects

use crate::date::lenient_date;
use crate::error::{ModelError, ModelResult};
use crate::ids::{ProjectId, StaffId};
use crate::task::Priority;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ProjectStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Cancelled")]
    Cancelled,
    #[serde(rename = "Overdue")]
    Overdue,
}

impl ProjectStatus {
    /// Every status, in the order the stats cards show them
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
        ProjectStatus::Cancelled,
        ProjectStatus::Overdue,
    ];

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Cancelled => "Cancelled",
            ProjectStatus::Overdue => "Overdue",
        }
    }

    /// Still open for work
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, ProjectStatus::InProgress | ProjectStatus::Overdue)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| ModelError::unknown_status("project", s))
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Client as shown on a project row
///
/// Seed data has either a bare name or an object with initials and logo.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ClientRefRepr")]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub name: String,
    pub initials: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClientRefRepr {
    Name(String),
    #[serde(rename_all = "camelCase")]
    Full {
        name: String,
        #[serde(default)]
        initials: Option<String>,
        #[serde(default)]
        logo_url: Option<String>,
    },
}

impl From<ClientRefRepr> for ClientRef {
    fn from(repr: ClientRefRepr) -> Self {
        match repr {
            ClientRefRepr::Name(name) => ClientRef {
                name,
                initials: None,
                logo_url: None,
            },
            ClientRefRepr::Full {
                name,
                initials,
                logo_url,
            } => ClientRef {
                name,
                initials,
                logo_url,
            },
        }
    }
}

impl From<&str> for ClientRef {
    fn from(name: &str) -> Self {
        ClientRef {
            name: name.to_string(),
            ..ClientRef::default()
        }
    }
}

/// Staff avatar on a project row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRef {
    pub id: StaffId,
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub img: Option<String>,
}

/// Project view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub client: ClientRef,
    pub status: ProjectStatus,
    /// Percent complete, 0-100
    #[serde(default)]
    pub progress: u8,
    #[serde(default, with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "lenient_date", alias = "deadline")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, with = "lenient_date")]
    pub last_updated: Option<NaiveDate>,
    #[serde(default)]
    pub assigned_staff: Vec<StaffRef>,
    #[serde(default)]
    pub priority: Priority,
    /// Contract value in cents (reports)
    #[serde(default)]
    pub value_cents: Option<u64>,
}

impl Project {
    /// Create a project
    #[must_use]
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>, status: ProjectStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client: ClientRef::default(),
            status,
            progress: 0,
            start_date: None,
            due_date: None,
            last_updated: None,
            assigned_staff: Vec::new(),
            priority: Priority::default(),
            value_cents: None,
        }
    }

    /// With client name
    #[inline]
    #[must_use]
    pub fn for_client(mut self, client: impl Into<String>) -> Self {
        self.client = ClientRef {
            name: client.into(),
            ..ClientRef::default()
        };
        self
    }

    /// With progress percentage
    #[inline]
    #[must_use]
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    /// With start and due dates
    #[inline]
    #[must_use]
    pub fn with_dates(mut self, start: Option<NaiveDate>, due: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.due_date = due;
        self
    }

    /// With priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Check ingestion invariants
    ///
    /// # Errors
    /// Blank name or progress above 100.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::MissingField("project.name"));
        }
        if self.progress > 100 {
            return Err(ModelError::ProgressOutOfRange(u16::from(self.progress)));
        }
        Ok(())
    }
}
