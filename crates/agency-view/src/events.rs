//! Calendar feed: meetings, task due dates and project deadlines as widget
//! events
//!
//! Timed events are expressed as local date-times in the clock's offset.

use crate::clock::Clock;
use agency_model::{
    CalendarEvent, EventDetails, EventKind, EventTime, Meeting, MeetingStatus, Project, ProjectStatus, Task,
};

/// Event for a meeting; cancelled meetings have none
///
/// A meeting with a project or counterpart is a client meeting, otherwise
/// an internal one.
#[must_use]
pub fn meeting_event(meeting: &Meeting, clock: &dyn Clock) -> Option<CalendarEvent> {
    if meeting.status == MeetingStatus::Cancelled {
        return None;
    }
    let offset = clock.offset();
    let local = |at: chrono::DateTime<chrono::Utc>| EventTime::DateTime(at.with_timezone(&offset).naive_local());
    let kind = if meeting.project.is_empty() && meeting.with.is_empty() {
        EventKind::InternalMeeting
    } else {
        EventKind::ClientMeeting
    };
    let mut details = EventDetails::of_kind(kind);
    details.project = Some(meeting.project.clone()).filter(|p| !p.is_empty());
    details.attendees = Some(meeting.with.clone()).filter(|w| !w.is_empty()).into_iter().collect();
    details.meeting_link.clone_from(&meeting.meeting_link);
    Some(
        CalendarEvent::new(
            format!("event-meeting-{}", meeting.id),
            meeting.topic.clone(),
            local(meeting.date_time),
            kind,
        )
        .until(local(meeting.end()))
        .with_details(details),
    )
}

/// All-day event on a task's due date; done or undated tasks have none
#[must_use]
pub fn task_event(task: &Task) -> Option<CalendarEvent> {
    let due = task.due_date.filter(|_| !task.status.is_done())?;
    let mut details = EventDetails::of_kind(EventKind::InternalTask);
    details.client = Some(task.client.clone()).filter(|c| !c.is_empty());
    details.project = Some(task.project.clone()).filter(|p| !p.is_empty());
    details.attendees = task.assignee.iter().map(|a| a.name.clone()).collect();
    Some(
        CalendarEvent::new(
            format!("event-task-{}", task.id),
            format!("Task: {}", task.title),
            EventTime::Date(due),
            EventKind::InternalTask,
        )
        .all_day()
        .with_details(details),
    )
}

/// All-day deadline for an open project
#[must_use]
pub fn project_event(project: &Project) -> Option<CalendarEvent> {
    if matches!(project.status, ProjectStatus::Completed | ProjectStatus::Cancelled) {
        return None;
    }
    let due = project.due_date?;
    let client = &project.client.name;
    let title = if client.is_empty() {
        format!("Deadline: {}", project.name)
    } else {
        format!("Deadline: {} - {}", project.name, client)
    };
    let mut details = EventDetails::of_kind(EventKind::ProjectDeadline);
    details.client = Some(client.clone()).filter(|c| !c.is_empty());
    details.project = Some(project.name.clone());
    Some(
        CalendarEvent::new(
            format!("event-project-{}", project.id),
            title,
            EventTime::Date(due),
            EventKind::ProjectDeadline,
        )
        .all_day()
        .with_details(details),
    )
}

/// Merge every source into one feed ordered by start
#[must_use]
pub fn calendar_feed(meetings: &[Meeting], tasks: &[Task], projects: &[Project], clock: &dyn Clock) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = meetings
        .iter()
        .filter_map(|m| meeting_event(m, clock))
        .chain(tasks.iter().filter_map(task_event))
        .chain(projects.iter().filter_map(project_event))
        .collect();
    sort_feed(&mut events);
    events
}

/// Order by day, all-day entries first, then by start
pub fn sort_feed(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| {
        a.start
            .date()
            .cmp(&b.start.date())
            .then_with(|| b.all_day.cmp(&a.all_day))
            .then_with(|| a.start.cmp(&b.start))
    });
}
