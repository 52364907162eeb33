//! End-to-end runs over the bundled sample dataset

use agency_core::prelude::*;
use agency_core::{MeetingStore, NewDocument, ProjectStore};
use agency_model::{EventKind, Priority, ProjectStatus, Sender, TaskStatus};
use agency_test_utils::{fixed_clock, CURRENT_USER, SAMPLE_DATASET};
use agency_view::{AssigneeCriterion, DocumentFilter, EventFilter, ProjectFilter};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn dashboard() -> Dashboard {
    let clock: Arc<dyn Clock> = Arc::new(fixed_clock());
    let dataset = Dataset::from_json(SAMPLE_DATASET).unwrap();
    let store = Arc::new(InMemoryStore::seeded(dataset, clock.clone()));
    Dashboard::new(Stores::from_memory(store), clock).with_current_user(CURRENT_USER)
}

fn ids<T>(items: &[T], id: impl Fn(&T) -> String) -> Vec<String> {
    items.iter().map(id).collect()
}

#[tokio::test]
async fn high_priority_unassigned_board() {
    let filter = TaskFilter::from_pairs([("priority", "High"), ("type", "all"), ("assignee", "unassigned")]).unwrap();
    let board = dashboard().task_board(&filter).await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board.column(TaskStatus::ToDo)[0].id.as_str(), "task-003");
    assert_eq!(board.columns().count(), 3);
}

#[tokio::test]
async fn my_tasks_and_stats() {
    let dashboard = dashboard();
    let mine = dashboard
        .task_list(&TaskFilter::new().with_assignee(AssigneeCriterion::Me))
        .await
        .unwrap();
    assert_eq!(ids(&mine, |r| r.task.id.to_string()), vec!["task-002", "task-006"]);
    assert!(mine[0].due.due_today);
    assert_eq!(mine[0].due_label, "Apr 21, 2025");
    assert_eq!(mine[1].due_label, "No due date");

    let stats = dashboard.task_stats().await.unwrap();
    assert_eq!(stats.total, 6);
    assert_eq!(stats.urgent, 3);
    assert_eq!(stats.due_today, 1);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.unassigned, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.completed, 2);
}

#[tokio::test]
async fn general_channel_timeline() {
    let sections = dashboard().conversation_timeline(&"general".into()).await.unwrap();
    let labels: Vec<&str> = sections.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["April 13, 2025", "Yesterday", "Today"]);
    assert_eq!(ids(&sections[2].messages, |m| m.id.to_string()), vec!["msg-3", "msg-4"]);
}

#[tokio::test]
async fn unknown_conversation_is_not_found() {
    let err = dashboard().conversation_timeline(&"random".into()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn calendar_merges_every_source() {
    let dashboard = dashboard();
    let feed = dashboard.calendar_feed(&EventFilter::new()).await.unwrap();
    assert_eq!(
        ids(&feed, |e| e.id.to_string()),
        vec![
            "event-task-task-001",
            "event-task-task-002",
            "event-meeting-meet-2",
            "event-meeting-meet-1",
            "event-task-task-003",
            "event-1",
            "event-2",
            "event-project-proj-1",
            "event-project-proj-3",
        ]
    );
    assert_eq!(feed[2].kind(), EventKind::InternalMeeting);

    let time_off = dashboard
        .calendar_feed(&EventFilter::new().with_kind(EventKind::TimeOff))
        .await
        .unwrap();
    assert_eq!(ids(&time_off, |e| e.title.clone()), vec!["Alice - vacation"]);
}

#[tokio::test]
async fn projects_files_and_meetings() {
    let dashboard = dashboard();
    let overview = dashboard
        .project_overview(&ProjectFilter::new().with_status(ProjectStatus::InProgress))
        .await
        .unwrap();
    assert_eq!(ids(&overview.projects, |p| p.id.to_string()), vec!["proj-1"]);
    assert_eq!(overview.stats.total, 3);
    assert_eq!(overview.stats.count(ProjectStatus::OnHold), 1);

    let recent = dashboard.recent_files(None).await.unwrap();
    assert_eq!(recent.stats.recent, 2);
    assert_eq!(recent.stats.this_week, 3);
    assert_eq!(recent.stats.top_uploader.as_deref(), Some("Alice Smith"));
    assert_eq!(recent.stats.top_category.as_deref(), Some("pdf"));
    assert_eq!(ids(&recent.files, |d| d.id.to_string()), vec!["doc-1", "doc-4", "doc-2", "doc-3"]);

    let globex = dashboard
        .document_library(&DocumentFilter::new().for_client("Globex"))
        .await
        .unwrap();
    assert_eq!(ids(&globex, |d| d.id.to_string()), vec!["doc-2", "doc-3"]);

    let schedule = dashboard.meeting_schedule().await.unwrap();
    assert_eq!(ids(&schedule.upcoming, |m| m.id.to_string()), vec!["meet-1"]);
    assert_eq!(ids(&schedule.past, |m| m.id.to_string()), vec!["meet-2", "meet-3"]);
}

#[tokio::test]
async fn report_series_are_ordered() {
    let report = dashboard().report_series().await.unwrap();
    let revenue: Vec<(String, f64)> = report
        .revenue_by_client
        .iter()
        .map(|p| (p.category.clone(), p.value))
        .collect();
    assert_eq!(revenue, vec![("Acme Corp".to_string(), 3700.0), ("Globex".to_string(), 800.0)]);

    let priorities: Vec<&str> = report.tasks_by_priority.iter().map(|p| p.category.as_str()).collect();
    assert_eq!(priorities, vec!["Low", "Medium", "High", "Critical"]);

    let months: Vec<&str> = report.completions.iter().map(|p| p.category.as_str()).collect();
    assert_eq!(months, vec!["Mar", "Apr"]);
    assert_eq!(report.projects_by_status.len(), 3);
}

#[tokio::test]
async fn mutations_show_up_in_views() {
    let dashboard = dashboard();
    let stores = dashboard.stores();

    let created = stores
        .tasks
        .create_task(NewTask::titled("Send proposal").with_priority("High").due("2025-04-21"))
        .await
        .unwrap();
    let stats = dashboard.task_stats().await.unwrap();
    assert_eq!(stats.total, 7);
    assert_eq!(stats.due_today, 2);

    stores.tasks.update_task_status(&created.id, TaskStatus::Done).await.unwrap();
    let done = dashboard
        .task_board(&TaskFilter::new().with_status(TaskStatus::Done))
        .await
        .unwrap();
    assert_eq!(done.column(TaskStatus::Done).len(), 3);

    stores
        .messages
        .post_message(&"general".into(), Sender::new(CURRENT_USER, "Admin User"), "Proposal sent".into())
        .await
        .unwrap();
    let sections = dashboard.conversation_timeline(&"general".into()).await.unwrap();
    assert_eq!(sections[2].messages.len(), 3);

    stores
        .documents
        .add_document(NewDocument::named("Proposal.docx").uploaded_by("Admin User"))
        .await
        .unwrap();
    assert_eq!(dashboard.recent_files(Some(1)).await.unwrap().files[0].name, "Proposal.docx");

    stores.meetings.cancel_meeting(&"meet-1".into()).await.unwrap();
    let feed = dashboard.calendar_feed(&EventFilter::new()).await.unwrap();
    assert!(feed.iter().all(|e| e.id.as_str() != "event-meeting-meet-1"));
    assert!(stores.projects.get_project(&"proj-9".into()).await.is_err());
    assert!(Priority::High.is_urgent());
}
