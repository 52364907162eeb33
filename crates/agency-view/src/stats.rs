//! Dashboard summary cards

use crate::classify::Classifier;
use agency_model::{Document, Meeting, Project, ProjectStatus, Task, TaskStatus};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Task summary cards
///
/// Urgent, due-today, overdue and unassigned count only tasks that are not
/// done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Every task
    pub total: usize,
    /// High or Critical priority
    pub urgent: usize,
    /// Due on today's date
    pub due_today: usize,
    /// Due before today
    pub overdue: usize,
    /// No assignee
    pub unassigned: usize,
    /// In the In Progress column
    pub in_progress: usize,
    /// In the Done column
    pub completed: usize,
}

impl TaskStats {
    /// Compute stats against `today`
    #[must_use]
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let mut classifier = Classifier::new(today);
        let mut stats = TaskStats {
            total: tasks.len(),
            ..TaskStats::default()
        };
        for task in tasks {
            match task.status {
                TaskStatus::Done => {
                    stats.completed += 1;
                    continue;
                }
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::ToDo => {}
            }
            let due = classifier.classify_task(task);
            stats.urgent += usize::from(task.priority.is_urgent());
            stats.due_today += usize::from(due.due_today);
            stats.overdue += usize::from(due.overdue);
            stats.unassigned += usize::from(task.assignee.is_none());
        }
        stats
    }
}

/// Project counts per status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    /// Every project
    pub total: usize,
    /// Count per status, every status present
    pub by_status: IndexMap<ProjectStatus, usize>,
}

impl ProjectStats {
    /// Count projects; every status is present, possibly at zero
    #[must_use]
    pub fn compute(projects: &[Project]) -> Self {
        let mut by_status: IndexMap<ProjectStatus, usize> =
            ProjectStatus::ALL.into_iter().map(|status| (status, 0)).collect();
        for project in projects {
            *by_status.entry(project.status).or_default() += 1;
        }
        Self {
            total: projects.len(),
            by_status,
        }
    }

    /// Projects with `status`
    #[must_use]
    pub fn count(&self, status: ProjectStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or_default()
    }

    /// In progress or overdue
    #[must_use]
    pub fn active(&self) -> usize {
        self.by_status
            .iter()
            .filter(|(status, _)| status.is_active())
            .map(|(_, n)| n)
            .sum()
    }
}

/// Recent-files summary cards
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    /// Uploads within the recent window (24 hours by default)
    pub recent: usize,
    /// Uploads within the week window
    pub this_week: usize,
    /// Uploader with the most files; ties go to the first name
    pub top_uploader: Option<String>,
    /// Most common file category label
    pub top_category: Option<String>,
}

impl FileStats {
    /// Compute stats; windows are inclusive `[now - window, now]`
    #[must_use]
    pub fn compute(docs: &[Document], now: DateTime<Utc>, recent: Duration, week: Duration) -> Self {
        let within = |doc: &Document, window: Duration| {
            let at = doc.uploaded_on;
            now - window <= at && at <= now
        };
        Self {
            recent: docs.iter().filter(|d| within(d, recent)).count(),
            this_week: docs.iter().filter(|d| within(d, week)).count(),
            top_uploader: most_common(docs.iter().map(|d| d.uploaded_by.as_str()).filter(|s| !s.is_empty())),
            top_category: most_common(docs.iter().map(|d| d.category().label())),
        }
    }
}

/// Most frequent value; ties go to the lexicographically first
fn most_common<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

/// Meetings split around `now`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MeetingSchedule {
    /// Starting after `now`, soonest first
    pub upcoming: Vec<Meeting>,
    /// Started at or before `now`, most recent first
    pub past: Vec<Meeting>,
}

/// Split meetings into upcoming and past
#[must_use]
pub fn split_meetings(meetings: impl IntoIterator<Item = Meeting>, now: DateTime<Utc>) -> MeetingSchedule {
    let (mut upcoming, mut past): (Vec<Meeting>, Vec<Meeting>) =
        meetings.into_iter().partition(|m| m.date_time > now);
    upcoming.sort_by_key(|m| m.date_time);
    past.sort_by(|a, b| b.date_time.cmp(&a.date_time));
    MeetingSchedule { upcoming, past }
}

/// Documents newest first, optionally truncated
#[must_use]
pub fn recent_documents(docs: impl IntoIterator<Item = Document>, limit: Option<usize>) -> Vec<Document> {
    let mut docs: Vec<Document> = docs.into_iter().collect();
    docs.sort_by(|a, b| b.uploaded_on.cmp(&a.uploaded_on));
    if let Some(limit) = limit {
        docs.truncate(limit);
    }
    docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_model::{Assignee, Priority};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 21).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn task_stats_skip_done_tasks() {
        let yesterday = today().pred_opt().unwrap();
        let tasks = vec![
            Task::new("a", "a").with_priority(Priority::High).with_due_date(yesterday),
            Task::new("b", "b")
                .with_priority(Priority::High)
                .with_due_date(yesterday)
                .with_status(TaskStatus::Done),
            Task::new("c", "c")
                .with_due_date(today())
                .with_status(TaskStatus::InProgress)
                .with_assignee(Assignee::new("s1", "Alice")),
            Task::new("d", "d").with_priority(Priority::Critical),
        ];
        let stats = TaskStats::compute(&tasks, today());
        assert_eq!(
            stats,
            TaskStats {
                total: 4,
                urgent: 2,
                due_today: 1,
                overdue: 1,
                unassigned: 2,
                in_progress: 1,
                completed: 1,
            }
        );
    }

    #[test]
    fn project_stats_include_zero_statuses() {
        let projects = vec![
            Project::new("p1", "A", ProjectStatus::InProgress),
            Project::new("p2", "B", ProjectStatus::Overdue),
            Project::new("p3", "C", ProjectStatus::Completed),
        ];
        let stats = ProjectStats::compute(&projects);
        assert_eq!(stats.by_status.len(), ProjectStatus::ALL.len());
        assert_eq!(stats.count(ProjectStatus::OnHold), 0);
        assert_eq!(stats.active(), 2);
    }

    #[test]
    fn file_stats_windows_and_ties() {
        let docs = vec![
            Document::new("d1", "a.pdf", "PDF", now() - Duration::hours(2)).uploaded_by("Bob"),
            Document::new("d2", "b.png", "PNG", now() - Duration::hours(30)).uploaded_by("Alice"),
            Document::new("d3", "c.pdf", "PDF", now() - Duration::days(9)).uploaded_by("Bob"),
            Document::new("d4", "d.png", "PNG", now() + Duration::hours(1)).uploaded_by("Alice"),
        ];
        let stats = FileStats::compute(&docs, now(), Duration::hours(24), Duration::hours(168));
        assert_eq!(stats.recent, 1);
        assert_eq!(stats.this_week, 2);
        assert_eq!(stats.top_uploader.as_deref(), Some("Alice"));
        assert_eq!(stats.top_category.as_deref(), Some("image"));
    }

    #[test]
    fn meetings_split_and_sorted() {
        let at = |h: i64| now() + Duration::hours(h);
        let meetings = vec![
            Meeting::new("past-far", "x", at(-48), 30),
            Meeting::new("soon", "x", at(2), 30),
            Meeting::new("past-near", "x", at(-1), 30),
            Meeting::new("later", "x", at(50), 30),
        ];
        let schedule = split_meetings(meetings, now());
        let ids = |ms: &[Meeting]| ms.iter().map(|m| m.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids(&schedule.upcoming), vec!["soon", "later"]);
        assert_eq!(ids(&schedule.past), vec!["past-near", "past-far"]);
    }

    #[test]
    fn recent_documents_newest_first() {
        let docs = vec![
            Document::new("old", "a", "PDF", now() - Duration::days(3)),
            Document::new("new", "b", "PDF", now()),
            Document::new("mid", "c", "PDF", now() - Duration::days(1)),
        ];
        let ids: Vec<String> = recent_documents(docs, Some(2)).into_iter().map(|d| d.id.to_string()).collect();
        assert_eq!(ids, vec!["new", "mid"]);
    }
}
