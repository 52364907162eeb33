//! Dashboard service
//!
//! The only consumer of the stores. Each operation reads what it needs,
//! then runs the pure view functions against the injected clock.

use crate::config::AgencyConfig;
use crate::dataset::Dataset;
use crate::error::AgencyResult;
use crate::memory::InMemoryStore;
use crate::store::{ClientStore, DocumentStore, EventStore, MeetingStore, MessageStore, ProjectStore, TaskStore};
use agency_model::{CalendarEvent, ChartPoint, ConversationId, Document, Project, StaffId, Task};
use agency_view::{
    calendar_feed, due_date_label, monthly_counts, recent_documents, sort_feed, split_meetings, sum_by, tally_by,
    timeline, Classifier, Clock, DaySection, DocumentFilter, DueState, EventFilter, FileStats, Filter,
    FilterContext, KanbanBoard, MeetingSchedule, ProjectFilter, ProjectStats, TaskFilter, TaskStats,
};
use chrono::Duration;
use serde::Serialize;
use std::sync::Arc;

/// One handle per data-access capability
#[derive(Clone)]
pub struct Stores {
    /// Tasks
    pub tasks: Arc<dyn TaskStore>,
    /// Conversations and their messages
    pub messages: Arc<dyn MessageStore>,
    /// Document metadata
    pub documents: Arc<dyn DocumentStore>,
    /// Projects
    pub projects: Arc<dyn ProjectStore>,
    /// Clients with billing
    pub clients: Arc<dyn ClientStore>,
    /// Client and internal meetings
    pub meetings: Arc<dyn MeetingStore>,
    /// Standalone calendar entries
    pub events: Arc<dyn EventStore>,
}

impl Stores {
    /// Every capability backed by one in-memory store
    #[must_use]
    pub fn from_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            tasks: store.clone(),
            messages: store.clone(),
            documents: store.clone(),
            projects: store.clone(),
            clients: store.clone(),
            meetings: store.clone(),
            events: store,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

/// Task row of the list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    /// The task itself
    pub task: Task,
    /// Overdue and due-today flags
    #[serde(flatten)]
    pub due: DueState,
    /// Display date or "No due date"
    pub due_label: String,
}

/// Projects page: filtered rows plus status cards over every project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOverview {
    /// Rows admitted by the filter
    pub projects: Vec<Project>,
    /// Counts over every project
    pub stats: ProjectStats,
}

/// Recent-files page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentFiles {
    /// Upload summary cards
    pub stats: FileStats,
    /// Newest first
    pub files: Vec<Document>,
}

/// Reports page series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSeries {
    /// Project count per status
    pub projects_by_status: Vec<ChartPoint>,
    /// Task count per priority
    pub tasks_by_priority: Vec<ChartPoint>,
    /// Invoiced dollars per client
    pub revenue_by_client: Vec<ChartPoint>,
    /// Completed tasks per month
    pub completions: Vec<ChartPoint>,
}

/// Dashboard service
#[derive(Debug, Clone)]
pub struct Dashboard {
    stores: Stores,
    clock: Arc<dyn Clock>,
    current_user: Option<StaffId>,
    recent_window: Duration,
    week_window: Duration,
}

impl Dashboard {
    /// Service over `stores`, reading time from `clock`
    #[must_use]
    pub fn new(stores: Stores, clock: Arc<dyn Clock>) -> Self {
        let defaults = AgencyConfig::default();
        Self {
            stores,
            clock,
            current_user: None,
            recent_window: defaults.recent_window(),
            week_window: defaults.week_window(),
        }
    }

    /// Load the configured dataset into an in-memory store
    ///
    /// # Errors
    /// Missing dataset path, invalid offset, or a dataset that fails to load.
    pub async fn open(config: &AgencyConfig) -> AgencyResult<Self> {
        let clock: Arc<dyn Clock> = Arc::new(config.clock()?);
        let dataset = Dataset::load(config.dataset_path()?).await?;
        let store = Arc::new(InMemoryStore::seeded(dataset, clock.clone()));
        Ok(Self::new(Stores::from_memory(store), clock).configured(config))
    }

    /// Take user and windows from `config`
    #[must_use]
    pub fn configured(mut self, config: &AgencyConfig) -> Self {
        self.current_user = config.current_user.as_deref().map(StaffId::from);
        self.recent_window = config.recent_window();
        self.week_window = config.week_window();
        self
    }

    /// With signed-in staff id
    #[inline]
    #[must_use]
    pub fn with_current_user(mut self, user: impl Into<StaffId>) -> Self {
        self.current_user = Some(user.into());
        self
    }

    /// Store handles, for mutations
    #[inline]
    #[must_use]
    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Injected clock
    #[inline]
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Filter context for this render
    #[must_use]
    pub fn context(&self) -> FilterContext {
        let ctx = FilterContext::from_clock(self.clock.as_ref());
        match &self.current_user {
            Some(user) => ctx.as_user(user.clone()),
            None => ctx,
        }
    }

    /// Kanban board of the tasks matching `filter`
    ///
    /// # Errors
    /// Store failures.
    pub async fn task_board(&self, filter: &TaskFilter) -> AgencyResult<KanbanBoard> {
        let tasks = self.filtered_tasks(filter).await?;
        tracing::debug!("Task board: {} tasks", tasks.len());
        Ok(KanbanBoard::build(tasks))
    }

    /// Task list rows with due-state flags and labels
    ///
    /// # Errors
    /// Store failures.
    pub async fn task_list(&self, filter: &TaskFilter) -> AgencyResult<Vec<TaskRow>> {
        let tasks = self.filtered_tasks(filter).await?;
        let mut classifier = Classifier::new(self.clock.today());
        let rows = tasks
            .into_iter()
            .map(|task| TaskRow {
                due: classifier.classify_task(&task),
                due_label: due_date_label(task.due_date),
                task,
            })
            .collect();
        Ok(rows)
    }

    /// Summary cards over every task
    ///
    /// # Errors
    /// Store failures.
    pub async fn task_stats(&self) -> AgencyResult<TaskStats> {
        let tasks = self.stores.tasks.list_tasks().await?;
        Ok(TaskStats::compute(&tasks, self.clock.today()))
    }

    /// Messages of a conversation in day sections
    ///
    /// # Errors
    /// Unknown conversation.
    pub async fn conversation_timeline(&self, conversation: &ConversationId) -> AgencyResult<Vec<DaySection>> {
        let messages = self.stores.messages.list_messages(conversation).await?;
        Ok(timeline(messages, self.clock.as_ref()))
    }

    /// Filtered projects with status counts
    ///
    /// # Errors
    /// Store failures.
    pub async fn project_overview(&self, filter: &ProjectFilter) -> AgencyResult<ProjectOverview> {
        let all = self.stores.projects.list_projects().await?;
        let stats = ProjectStats::compute(&all);
        let projects = filter.retain(all, &self.context());
        Ok(ProjectOverview { projects, stats })
    }

    /// Documents matching `filter`, newest first
    ///
    /// # Errors
    /// Store failures.
    pub async fn document_library(&self, filter: &DocumentFilter) -> AgencyResult<Vec<Document>> {
        let docs = self.stores.documents.list_documents().await?;
        Ok(recent_documents(filter.retain(docs, &self.context()), None))
    }

    /// Upload cards plus the newest `limit` files
    ///
    /// # Errors
    /// Store failures.
    pub async fn recent_files(&self, limit: Option<usize>) -> AgencyResult<RecentFiles> {
        let docs = self.stores.documents.list_documents().await?;
        let stats = FileStats::compute(&docs, self.clock.now(), self.recent_window, self.week_window);
        Ok(RecentFiles {
            stats,
            files: recent_documents(docs, limit),
        })
    }

    /// Calendar feed: meetings, task due dates, project deadlines and stored
    /// entries, narrowed by `filter`
    ///
    /// # Errors
    /// Store failures.
    pub async fn calendar_feed(&self, filter: &EventFilter) -> AgencyResult<Vec<CalendarEvent>> {
        let meetings = self.stores.meetings.list_meetings().await?;
        let tasks = self.stores.tasks.list_tasks().await?;
        let projects = self.stores.projects.list_projects().await?;
        let stored = self.stores.events.list_events().await?;

        let mut events = calendar_feed(&meetings, &tasks, &projects, self.clock.as_ref());
        events.extend(stored);
        let mut events = filter.retain(events, &self.context());
        sort_feed(&mut events);
        Ok(events)
    }

    /// Meetings split into upcoming and past
    ///
    /// # Errors
    /// Store failures.
    pub async fn meeting_schedule(&self) -> AgencyResult<MeetingSchedule> {
        let meetings = self.stores.meetings.list_meetings().await?;
        Ok(split_meetings(meetings, self.clock.now()))
    }

    /// Chart series for the reports page
    ///
    /// # Errors
    /// Store failures.
    pub async fn report_series(&self) -> AgencyResult<ReportSeries> {
        let projects = self.stores.projects.list_projects().await?;
        let tasks = self.stores.tasks.list_tasks().await?;
        let clients = self.stores.clients.list_clients().await?;

        let invoices = clients
            .iter()
            .flat_map(|client| client.invoices().iter().map(move |inv| (client.name.as_str(), inv.amount)));
        #[allow(clippy::cast_precision_loss)]
        let revenue_by_client = sum_by(invoices, |(name, _)| *name, |(_, amount)| amount.cents() as f64 / 100.0);

        Ok(ReportSeries {
            projects_by_status: tally_by(projects.iter(), |p| p.status),
            tasks_by_priority: tally_by(tasks.iter(), |t| t.priority),
            revenue_by_client,
            completions: monthly_counts(tasks.iter(), |t| t.completed_date),
        })
    }

    async fn filtered_tasks(&self, filter: &TaskFilter) -> AgencyResult<Vec<Task>> {
        let tasks = self.stores.tasks.list_tasks().await?;
        Ok(filter.retain(tasks, &self.context()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::{
        MockClientStore, MockDocumentStore, MockEventStore, MockMeetingStore, MockMessageStore, MockProjectStore,
        MockTaskStore,
    };
    use agency_model::{Priority, TaskStatus};
    use agency_test_utils::{assigned_task, document_uploaded, fixed_clock, task_due, today, CURRENT_USER};
    use agency_view::AssigneeCriterion;
    use pretty_assertions::assert_eq;

    fn stores_with(tasks: MockTaskStore) -> Stores {
        Stores {
            tasks: Arc::new(tasks),
            messages: Arc::new(MockMessageStore::new()),
            documents: Arc::new(MockDocumentStore::new()),
            projects: Arc::new(MockProjectStore::new()),
            clients: Arc::new(MockClientStore::new()),
            meetings: Arc::new(MockMeetingStore::new()),
            events: Arc::new(MockEventStore::new()),
        }
    }

    fn dashboard(stores: Stores) -> Dashboard {
        Dashboard::new(stores, Arc::new(fixed_clock())).with_current_user(CURRENT_USER)
    }

    fn tasks() -> Vec<Task> {
        vec![
            task_due("late", -2, TaskStatus::ToDo),
            task_due("today", 0, TaskStatus::InProgress),
            task_due("done", -5, TaskStatus::Done),
            assigned_task("mine", CURRENT_USER, Priority::High),
        ]
    }

    #[tokio::test]
    async fn board_keeps_fixed_columns() {
        let mut store = MockTaskStore::new();
        store.expect_list_tasks().times(1).returning(|| Ok(tasks()));
        let board = dashboard(stores_with(store))
            .task_board(&TaskFilter::new().with_assignee(AssigneeCriterion::Me))
            .await
            .unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board.column(TaskStatus::ToDo).len(), 1);
        assert!(board.column(TaskStatus::Done).is_empty());
    }

    #[tokio::test]
    async fn list_rows_carry_due_state() {
        let mut store = MockTaskStore::new();
        store.expect_list_tasks().returning(|| Ok(tasks()));
        let rows = dashboard(stores_with(store)).task_list(&TaskFilter::new()).await.unwrap();
        let flags: Vec<(bool, bool)> = rows.iter().map(|r| (r.due.overdue, r.due.due_today)).collect();
        assert_eq!(flags, vec![(true, false), (false, true), (false, false), (false, false)]);
        assert_eq!(rows[3].due_label, "No due date");
    }

    #[tokio::test]
    async fn stats_use_clock_today() {
        let mut store = MockTaskStore::new();
        store.expect_list_tasks().returning(|| Ok(tasks()));
        let stats = dashboard(stores_with(store)).task_stats().await.unwrap();
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.due_today, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.urgent, 1);
        assert_eq!(dashboard(stores_with(MockTaskStore::new())).context().today, today());
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let mut store = MockTaskStore::new();
        store
            .expect_list_tasks()
            .returning(|| Err(StoreError::not_found("task", "all")));
        let err = dashboard(stores_with(store)).task_stats().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn recent_files_newest_first() {
        let mut docs = MockDocumentStore::new();
        docs.expect_list_documents().returning(|| {
            Ok(vec![
                document_uploaded("old", 100, "Alice"),
                document_uploaded("new", 2, "Bob"),
                document_uploaded("mid", 30, "Alice"),
            ])
        });
        let mut stores = stores_with(MockTaskStore::new());
        stores.documents = Arc::new(docs);
        let recent = dashboard(stores).recent_files(Some(2)).await.unwrap();
        assert_eq!(recent.stats.recent, 1);
        assert_eq!(recent.stats.this_week, 3);
        assert_eq!(recent.stats.top_uploader.as_deref(), Some("Alice"));
        let names: Vec<&str> = recent.files.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["new.pdf", "mid.pdf"]);
    }
}
