//! Calendar widget events
//!
//! The calendar widget owns layout and date math. These types only describe
//! the event array it consumes, with the same camelCase keys.

use crate::error::{ModelError, ModelResult};
use crate::ids::EventId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Event category, which also decides the colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum EventKind {
    ClientMeeting,
    ProjectDeadline,
    InternalTask,
    Milestone,
    InternalMeeting,
    TimeOff,
}

impl EventKind {
    /// Every kind, in filter sidebar order
    pub const ALL: [EventKind; 6] = [
        EventKind::ClientMeeting,
        EventKind::ProjectDeadline,
        EventKind::InternalTask,
        EventKind::Milestone,
        EventKind::InternalMeeting,
        EventKind::TimeOff,
    ];

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EventKind::ClientMeeting => "Client Meeting",
            EventKind::ProjectDeadline => "Project Deadline",
            EventKind::InternalTask => "Internal Task",
            EventKind::Milestone => "Milestone",
            EventKind::InternalMeeting => "Internal Meeting",
            EventKind::TimeOff => "Time Off",
        }
    }

    /// (background, border) colours
    #[must_use]
    pub fn colors(self) -> (&'static str, Option<&'static str>) {
        match self {
            EventKind::ClientMeeting => ("#ef4444", Some("#dc2626")),
            EventKind::ProjectDeadline => ("#1f2937", Some("#111827")),
            EventKind::InternalTask => ("#6b7280", Some("#4b5563")),
            EventKind::Milestone => ("#3b82f6", Some("#2563eb")),
            EventKind::InternalMeeting => ("#10b981", Some("#059669")),
            EventKind::TimeOff => ("#d1d5db", None),
        }
    }

    /// Time off renders as a background band rather than a block
    #[must_use]
    pub fn display(self) -> Option<&'static str> {
        match self {
            EventKind::TimeOff => Some("background"),
            _ => None,
        }
    }
}

impl From<EventKind> for &'static str {
    fn from(kind: EventKind) -> Self {
        kind.label()
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| ModelError::unknown_value("event type", s))
    }
}

impl TryFrom<String> for EventKind {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Start or end of an event: a whole day or a local date-time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventTime {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl EventTime {
    /// Calendar day of this point
    #[must_use]
    pub fn date(self) -> NaiveDate {
        match self {
            EventTime::Date(date) => date,
            EventTime::DateTime(dt) => dt.date(),
        }
    }

    /// Whether this is a whole-day value
    #[must_use]
    pub fn is_date(self) -> bool {
        matches!(self, EventTime::Date(_))
    }
}

impl FromStr for EventTime {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Ok(EventTime::Date(date));
        }
        NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT)
            .map(EventTime::DateTime)
            .map_err(|_| ModelError::InvalidDate {
                input: s.to_string(),
                expected: "yyyy-MM-dd or yyyy-MM-ddTHH:mm:ss",
            })
    }
}

impl TryFrom<String> for EventTime {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventTime> for String {
    fn from(time: EventTime) -> Self {
        time.to_string()
    }
}

impl std::fmt::Display for EventTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventTime::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            EventTime::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

/// Widget `extendedProps`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Person on leave, for time off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,
    #[serde(default, alias = "assigned", skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
}

impl EventDetails {
    /// Details carrying only the kind
    #[must_use]
    pub fn of_kind(kind: EventKind) -> Self {
        Self {
            kind,
            client: None,
            project: None,
            employee: None,
            attendees: Vec::new(),
            meeting_link: None,
        }
    }
}

/// Calendar event as the widget consumes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub start: EventTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub all_day: bool,
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    pub extended_props: EventDetails,
}

impl CalendarEvent {
    /// Create an event coloured by its kind
    #[must_use]
    pub fn new(id: impl Into<EventId>, title: impl Into<String>, start: EventTime, kind: EventKind) -> Self {
        let (background, border) = kind.colors();
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end: None,
            all_day: false,
            background_color: background.to_string(),
            border_color: border.map(str::to_string),
            display: kind.display().map(str::to_string),
            extended_props: EventDetails::of_kind(kind),
        }
    }

    /// With end
    #[inline]
    #[must_use]
    pub fn until(mut self, end: EventTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Mark as all-day
    #[inline]
    #[must_use]
    pub fn all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    /// With details
    #[inline]
    #[must_use]
    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.extended_props = details;
        self
    }

    /// Event category
    #[inline]
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.extended_props.kind
    }

    /// Check ingestion invariants
    ///
    /// # Errors
    /// Blank title, or an end before the start.
    pub fn validate(&self) -> ModelResult<()> {
        if self.title.trim().is_empty() {
            return Err(ModelError::MissingField("event.title"));
        }
        if let Some(end) = self.end {
            if end.date() < self.start.date() {
                return Err(ModelError::InvalidDate {
                    input: end.to_string(),
                    expected: "an end on or after the start",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_widget_shape() {
        let start: EventTime = "2025-04-28".parse().unwrap();
        let event = CalendarEvent::new("event4", "Milestone: Phase 2 Approval", start, EventKind::Milestone).all_day();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "event4",
                "title": "Milestone: Phase 2 Approval",
                "start": "2025-04-28",
                "allDay": true,
                "backgroundColor": "#3b82f6",
                "borderColor": "#2563eb",
                "extendedProps": {"type": "Milestone"}
            })
        );
    }

    #[test]
    fn time_off_is_a_background_band() {
        let start: EventTime = "2025-04-24".parse().unwrap();
        let event = CalendarEvent::new("event5", "Time Off: Alice Smith", start, EventKind::TimeOff);
        assert_eq!(event.display.as_deref(), Some("background"));
        assert_eq!(event.border_color, None);
    }

    #[test]
    fn parses_both_time_forms() {
        assert!("2025-04-22".parse::<EventTime>().unwrap().is_date());
        let timed: EventTime = "2025-04-22T10:00:00".parse().unwrap();
        assert_eq!(timed.to_string(), "2025-04-22T10:00:00");
        assert!("tomorrow".parse::<EventTime>().is_err());
    }

    #[test]
    fn rejects_unknown_event_type() {
        let json = r##"{"id": "e", "title": "x", "start": "2025-04-22", "backgroundColor": "#fff",
                       "extendedProps": {"type": "Holiday"}}"##;
        assert!(serde_json::from_str::<CalendarEvent>(json).is_err());
    }

    #[test]
    fn end_before_start_fails_validation() {
        let event = CalendarEvent::new("e", "x", "2025-04-26".parse().unwrap(), EventKind::TimeOff)
            .until("2025-04-24".parse().unwrap());
        assert!(event.validate().is_err());
    }
}
