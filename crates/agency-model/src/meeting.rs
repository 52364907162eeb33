//! Meetings

use crate::date::flexible_timestamp;
use crate::error::{ModelError, ModelResult};
use crate::ids::MeetingId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How early before the start a meeting link becomes usable
pub const JOIN_WINDOW_MINUTES: i64 = 10;

/// Meeting status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum MeetingStatus {
    Confirmed,
    Pending,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MeetingStatus::Confirmed => "Confirmed",
            MeetingStatus::Pending => "Pending",
            MeetingStatus::Completed => "Completed",
            MeetingStatus::Cancelled => "Cancelled",
        }
    }
}

impl Default for MeetingStatus {
    fn default() -> Self {
        MeetingStatus::Pending
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MeetingStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Confirmed" => Ok(MeetingStatus::Confirmed),
            "Pending" => Ok(MeetingStatus::Pending),
            "Completed" => Ok(MeetingStatus::Completed),
            "Cancelled" => Ok(MeetingStatus::Cancelled),
            other => Err(ModelError::unknown_status("meeting", other)),
        }
    }
}

impl TryFrom<String> for MeetingStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Meeting view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: MeetingId,
    #[serde(alias = "title")]
    pub topic: String,
    #[serde(default)]
    pub project: String,
    #[serde(with = "flexible_timestamp")]
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub duration_minutes: u32,
    /// Counterpart ("Alice Smith (PM)")
    #[serde(default)]
    pub with: String,
    #[serde(default)]
    pub status: MeetingStatus,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub notes_available: bool,
}

impl Meeting {
    /// Create a pending meeting
    #[must_use]
    pub fn new(
        id: impl Into<MeetingId>,
        topic: impl Into<String>,
        date_time: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            project: String::new(),
            date_time,
            duration_minutes,
            with: String::new(),
            status: MeetingStatus::default(),
            meeting_link: None,
            notes_available: false,
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: MeetingStatus) -> Self {
        self.status = status;
        self
    }

    /// With video link
    #[inline]
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.meeting_link = Some(link.into());
        self
    }

    /// Scheduled end
    #[inline]
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.date_time + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Link present and `now` within [start - 10 min, end]
    #[must_use]
    pub fn is_joinable(&self, now: DateTime<Utc>) -> bool {
        if self.meeting_link.is_none() || self.status == MeetingStatus::Cancelled {
            return false;
        }
        let opens = self.date_time - Duration::minutes(JOIN_WINDOW_MINUTES);
        opens <= now && now <= self.end()
    }

    /// Check ingestion invariants
    ///
    /// # Errors
    /// Returns [`ModelError::MissingField`] for a blank topic.
    pub fn validate(&self) -> ModelResult<()> {
        if self.topic.trim().is_empty() {
            return Err(ModelError::MissingField("meeting.topic"));
        }
        Ok(())
    }
}
