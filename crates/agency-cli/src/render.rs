//! Plain-text rendering

use agency_core::{ProjectOverview, RecentFiles, ReportSeries, TaskRow};
use agency_model::{CalendarEvent, Document, Meeting, Task};
use agency_view::{relative_time, Clock, DaySection, KanbanBoard, MeetingSchedule, ProjectStats, TaskStats};
use chrono::{DateTime, Utc};

fn task_line(task: &Task) -> String {
    let assignee = task.assignee.as_ref().map_or("unassigned", |a| a.name.as_str());
    let mut line = format!("  [{}] {} ({})", task.priority, task.title, assignee);
    if !task.client.is_empty() {
        line.push_str(&format!(" - {}", task.client));
    }
    line
}

/// Columns one after another, each with its count
#[must_use]
pub fn board(board: &KanbanBoard) -> String {
    let mut lines = Vec::new();
    for (status, tasks) in board.columns() {
        lines.push(format!("{} ({})", status, tasks.len()));
        lines.extend(tasks.iter().map(task_line));
    }
    lines.join("\n")
}

/// One line per task with its due label and flags
#[must_use]
pub fn task_rows(rows: &[TaskRow]) -> String {
    if rows.is_empty() {
        return "No tasks match".to_string();
    }
    rows.iter()
        .map(|row| {
            let flag = if row.due.overdue {
                " OVERDUE"
            } else if row.due.due_today {
                " TODAY"
            } else {
                ""
            };
            format!("{} | {} | {}{}", task_line(&row.task).trim_start(), row.task.status, row.due_label, flag)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Day separators followed by `HH:MM sender: content`
#[must_use]
pub fn timeline(sections: &[DaySection], clock: &dyn Clock) -> String {
    let offset = clock.offset();
    let mut lines = Vec::new();
    for section in sections {
        lines.push(format!("--- {} ---", section.label));
        for message in &section.messages {
            let at = message.timestamp.with_timezone(&offset).format("%H:%M");
            let content = message.file_name.as_deref().unwrap_or(&message.content);
            lines.push(format!("{} {}: {}", at, message.sender.name, content));
        }
    }
    lines.join("\n")
}

/// Summary cards
#[must_use]
pub fn stats(tasks: &TaskStats, projects: &ProjectStats) -> String {
    let mut lines = vec![
        format!("Tasks: {}", tasks.total),
        format!("  Urgent: {}", tasks.urgent),
        format!("  Due today: {}", tasks.due_today),
        format!("  Overdue: {}", tasks.overdue),
        format!("  Unassigned: {}", tasks.unassigned),
        format!("  In progress: {}", tasks.in_progress),
        format!("  Completed: {}", tasks.completed),
        format!("Projects: {} ({} active)", projects.total, projects.active()),
    ];
    lines.extend(projects.by_status.iter().map(|(status, count)| format!("  {status}: {count}")));
    lines.join("\n")
}

/// Project rows
#[must_use]
pub fn projects(overview: &ProjectOverview) -> String {
    overview
        .projects
        .iter()
        .map(|p| format!("{} | {} | {} | {}%", p.name, p.client.name, p.status, p.progress))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Feed entries: date, time or "all day", kind and title
#[must_use]
pub fn calendar(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "No events".to_string();
    }
    events
        .iter()
        .map(|event| {
            let when = if event.all_day {
                format!("{} all day", event.start.date())
            } else {
                event.start.to_string().replace('T', " ")
            };
            format!("{} | {} | {}", when, event.kind().label(), event.title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn document_line(doc: &Document, now: DateTime<Utc>) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        doc.name,
        doc.file_type,
        doc.size,
        doc.uploaded_by,
        relative_time(doc.uploaded_on, now)
    )
}

/// Document rows
#[must_use]
pub fn documents(docs: &[Document], now: DateTime<Utc>) -> String {
    if docs.is_empty() {
        return "No documents".to_string();
    }
    docs.iter().map(|d| document_line(d, now)).collect::<Vec<_>>().join("\n")
}

/// Upload cards then the newest files
#[must_use]
pub fn recent_files(recent: &RecentFiles, now: DateTime<Utc>) -> String {
    let stats = &recent.stats;
    let mut lines = vec![
        format!("Uploaded recently: {}", stats.recent),
        format!("Uploaded this week: {}", stats.this_week),
        format!("Most active uploader: {}", stats.top_uploader.as_deref().unwrap_or("-")),
        format!("Most common type: {}", stats.top_category.as_deref().unwrap_or("-")),
    ];
    lines.extend(recent.files.iter().map(|d| document_line(d, now)));
    lines.join("\n")
}

fn meeting_line(meeting: &Meeting, clock: &dyn Clock) -> String {
    let start = meeting.date_time.with_timezone(&clock.offset()).format("%b %d, %Y %H:%M");
    let mut line = format!("  {} | {} | {} min | {}", start, meeting.topic, meeting.duration_minutes, meeting.status);
    if meeting.is_joinable(clock.now()) {
        line.push_str(" | join now");
    }
    line
}

/// Upcoming then past meetings
#[must_use]
pub fn meetings(schedule: &MeetingSchedule, clock: &dyn Clock) -> String {
    let mut lines = vec![format!("Upcoming ({})", schedule.upcoming.len())];
    lines.extend(schedule.upcoming.iter().map(|m| meeting_line(m, clock)));
    lines.push(format!("Past ({})", schedule.past.len()));
    lines.extend(schedule.past.iter().map(|m| meeting_line(m, clock)));
    lines.join("\n")
}

/// Every series as `category: value`
#[must_use]
pub fn reports(series: &ReportSeries) -> String {
    let sections = [
        ("Projects by status", &series.projects_by_status),
        ("Tasks by priority", &series.tasks_by_priority),
        ("Revenue by client", &series.revenue_by_client),
        ("Completed per month", &series.completions),
    ];
    let mut lines = Vec::new();
    for (title, points) in sections {
        lines.push(title.to_string());
        lines.extend(points.iter().map(|p| format!("  {}: {}", p.category, p.value)));
    }
    lines.join("\n")
}
