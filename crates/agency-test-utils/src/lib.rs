//! Testing utilities for the agency workspace
//!
//! Shared fixtures anchored to one fixed "today", record builders and
//! proptest strategies.

#![allow(missing_docs)]

use agency_model::{
    Assignee, Document, Meeting, Message, Priority, Project, ProjectStatus, Sender, Task, TaskStatus,
};
use agency_view::FixedClock;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

/// Bundled sample dataset (JSON)
pub const SAMPLE_DATASET: &str = include_str!("../../../data/sample.json");

/// Staff id the fixtures treat as the signed-in user
pub const CURRENT_USER: &str = "staff-admin";

/// Fixture "today": 2025-04-21
#[must_use]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 21).unwrap()
}

/// Fixture "now": noon UTC on [`today`]
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 21, 12, 0, 0).unwrap()
}

/// Clock frozen at [`now`]
#[must_use]
pub fn fixed_clock() -> FixedClock {
    FixedClock::at(now())
}

/// Day `offset` days from [`today`]
#[must_use]
pub fn days_from_today(offset: i64) -> NaiveDate {
    today() + Duration::days(offset)
}

/// Instant `hours` hours from [`now`]
#[must_use]
pub fn hours_from_now(hours: i64) -> DateTime<Utc> {
    now() + Duration::hours(hours)
}

/// To Do task with medium priority
#[must_use]
pub fn task(id: &str, title: &str) -> Task {
    Task::new(id, title)
}

/// Task due `offset` days from today with `status`
#[must_use]
pub fn task_due(id: &str, offset: i64, status: TaskStatus) -> Task {
    Task::new(id, format!("Task {id}"))
        .with_due_date(days_from_today(offset))
        .with_status(status)
}

/// Task assigned to `staff` with `priority`
#[must_use]
pub fn assigned_task(id: &str, staff: &str, priority: Priority) -> Task {
    Task::new(id, format!("Task {id}"))
        .with_priority(priority)
        .with_assignee(Assignee::new(staff, staff))
}

/// Text message from a fixed sender
#[must_use]
pub fn message_at(id: &str, at: DateTime<Utc>) -> Message {
    Message::text(id, Sender::new("staff-alice", "Alice Smith"), format!("message {id}"), at)
}

/// PDF uploaded `hours_ago` hours before [`now`]
#[must_use]
pub fn document_uploaded(id: &str, hours_ago: i64, uploader: &str) -> Document {
    Document::new(id, format!("{id}.pdf"), "PDF", hours_from_now(-hours_ago)).uploaded_by(uploader)
}

/// Meeting starting `hours` from [`now`]
#[must_use]
pub fn meeting_in(id: &str, hours: i64) -> Meeting {
    Meeting::new(id, format!("Meeting {id}"), hours_from_now(hours), 30)
}

/// In-progress project due `offset` days from today
#[must_use]
pub fn project_due(id: &str, offset: i64) -> Project {
    Project::new(id, format!("Project {id}"), ProjectStatus::InProgress)
        .with_dates(Some(days_from_today(-30)), Some(days_from_today(offset)))
}

/// Proptest strategies
pub mod strategies {
    use super::{days_from_today, now, Assignee, Message, Priority, Sender, Task, TaskStatus};
    use agency_model::TaskKind;
    use chrono::Duration;
    use proptest::prelude::*;

    pub fn priority() -> impl Strategy<Value = Priority> {
        prop::sample::select(Priority::ALL.to_vec())
    }

    pub fn status() -> impl Strategy<Value = TaskStatus> {
        prop::sample::select(TaskStatus::COLUMNS.to_vec())
    }

    pub fn kind() -> impl Strategy<Value = TaskKind> {
        prop_oneof![Just(TaskKind::Internal), Just(TaskKind::Client)]
    }

    /// Assignee id out of a small pool, or none
    pub fn assignee() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop::sample::select(vec![
            "staff-admin".to_string(),
            "staff-alice".to_string(),
            "staff-bob".to_string(),
        ]))
    }

    /// Client name, empty for internal work
    pub fn client() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["", "Acme Corp", "Globex"])
    }

    /// Project name, possibly empty
    pub fn project() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["", "Website Redesign", "Q2 Budget"])
    }

    /// Task with random filterable fields; due within ±10 days of today
    pub fn task() -> impl Strategy<Value = Task> {
        (
            "[a-z]{1,8}",
            priority(),
            status(),
            kind(),
            assignee(),
            prop::option::of(-10i64..=10),
            client(),
            project(),
        )
            .prop_map(|(title, priority, status, kind, assignee, due, client, project)| {
                let mut task = Task::new(format!("task-{title}"), title)
                    .with_priority(priority)
                    .with_status(status);
                task.is_internal = kind == TaskKind::Internal;
                task.client = client.to_string();
                task.project = project.to_string();
                task.assignee = assignee.map(|id| Assignee::new(id.as_str(), id.as_str()));
                task.due_date = due.map(days_from_today);
                task
            })
    }

    /// Message within the last 30 days
    pub fn message() -> impl Strategy<Value = Message> {
        (0i64..30 * 24 * 60, "[a-z]{1,6}").prop_map(|(minutes_ago, id)| {
            Message::text(
                format!("msg-{id}"),
                Sender::new("staff-alice", "Alice Smith"),
                "hello",
                now() - Duration::minutes(minutes_ago),
            )
        })
    }
}
