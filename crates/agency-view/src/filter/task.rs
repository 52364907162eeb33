//! Task filter state (Kanban board and task list)

use super::{parse_bound, search_matches, Criterion, DateRange, Filter, FilterContext, FilterError, ALL};
use crate::classify::classify_task;
use agency_model::{Priority, StaffId, Task, TaskKind, TaskStatus};
use chrono::NaiveDate;
use std::str::FromStr;

/// Assignee dimension
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssigneeCriterion {
    /// Inactive
    #[default]
    All,
    /// Tasks without an assignee
    Unassigned,
    /// Tasks assigned to the signed-in user
    Me,
    /// Tasks assigned to one staff member
    Person(StaffId),
}

impl AssigneeCriterion {
    /// Whether `task` passes, resolving "me" to `current_user`
    ///
    /// With no signed-in user, "me" matches nothing.
    #[must_use]
    pub fn admits(&self, task: &Task, current_user: Option<&StaffId>) -> bool {
        match self {
            AssigneeCriterion::All => true,
            AssigneeCriterion::Unassigned => task.assignee.is_none(),
            AssigneeCriterion::Me => current_user.is_some_and(|me| task.assignee_id() == Some(me)),
            AssigneeCriterion::Person(id) => task.assignee_id() == Some(id),
        }
    }
}

impl FromStr for AssigneeCriterion {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ALL => Ok(AssigneeCriterion::All),
            "unassigned" => Ok(AssigneeCriterion::Unassigned),
            "me" => Ok(AssigneeCriterion::Me),
            "" => Err(FilterError::invalid("assignee", s, "empty staff id")),
            id => Ok(AssigneeCriterion::Person(StaffId::new(id))),
        }
    }
}

/// Due-state dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueCriterion {
    /// Inactive
    #[default]
    All,
    /// Past due and not done
    Overdue,
    /// Due today and not done
    DueToday,
    /// Due after today and not done
    Upcoming,
    /// No due date
    NoDate,
}

impl DueCriterion {
    /// Whether `task` passes against `today`
    #[must_use]
    pub fn admits(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            DueCriterion::All => true,
            DueCriterion::Overdue => classify_task(task, today).overdue,
            DueCriterion::DueToday => classify_task(task, today).due_today,
            DueCriterion::Upcoming => !task.status.is_done() && task.due_date.is_some_and(|due| due > today),
            DueCriterion::NoDate => task.due_date.is_none(),
        }
    }
}

impl FromStr for DueCriterion {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ALL => Ok(DueCriterion::All),
            "overdue" => Ok(DueCriterion::Overdue),
            "due-today" => Ok(DueCriterion::DueToday),
            "upcoming" => Ok(DueCriterion::Upcoming),
            "no-date" => Ok(DueCriterion::NoDate),
            other => Err(FilterError::invalid(
                "due",
                other,
                "expected all, overdue, due-today, upcoming or no-date",
            )),
        }
    }
}

/// Filter state for tasks
///
/// The default state has every dimension inactive and matches all tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    /// Priority, strict equality
    pub priority: Criterion<Priority>,
    /// Kanban column
    pub status: Criterion<TaskStatus>,
    /// Internal or client work
    pub kind: Criterion<TaskKind>,
    /// Assignee, including unassigned and the signed-in user
    pub assignee: AssigneeCriterion,
    /// Exact client name
    pub client: Criterion<String>,
    /// Exact project name
    pub project: Criterion<String>,
    /// Due state against today
    pub due: DueCriterion,
    /// Inclusive due-date range; undated tasks fail an active range
    pub due_range: DateRange,
    /// Case-insensitive substring of title, client or project
    pub search: Option<String>,
}

impl TaskFilter {
    /// Create filter matching everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `key=value` pairs
    ///
    /// Keys: `priority`, `status`, `type`, `assignee`, `client`, `project`,
    /// `due`, `from`, `to`, `search`. Unknown keys are ignored and absent
    /// keys stay at `"all"`.
    ///
    /// # Errors
    /// [`FilterError`] when a known key carries a value that does not parse,
    /// or when `from` is after `to`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        let (mut from, mut to) = (None, None);
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "priority" => filter.priority = Criterion::parse("priority", value)?,
                "status" => filter.status = Criterion::parse("status", value)?,
                "type" => filter.kind = Criterion::parse("type", value)?,
                "assignee" => filter.assignee = value.parse()?,
                "client" => filter.client = Criterion::parse("client", value)?,
                "project" => filter.project = Criterion::parse("project", value)?,
                "due" => filter.due = value.parse()?,
                "from" => from = parse_bound("from", value)?,
                "to" => to = parse_bound("to", value)?,
                "search" => filter.search = Some(value.to_string()).filter(|s| !s.trim().is_empty()),
                other => tracing::debug!("Ignoring unknown filter key: {}", other),
            }
        }
        filter.due_range = DateRange::new(from, to)?;
        Ok(filter)
    }

    /// Only this priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Criterion::Only(priority);
        self
    }

    /// Only this status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Criterion::Only(status);
        self
    }

    /// Only internal or only client work
    #[inline]
    #[must_use]
    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = Criterion::Only(kind);
        self
    }

    /// Assignee dimension
    #[inline]
    #[must_use]
    pub fn with_assignee(mut self, assignee: AssigneeCriterion) -> Self {
        self.assignee = assignee;
        self
    }

    /// Only this client
    #[inline]
    #[must_use]
    pub fn for_client(mut self, client: impl Into<String>) -> Self {
        self.client = Criterion::Only(client.into());
        self
    }

    /// Only this project
    #[inline]
    #[must_use]
    pub fn for_project(mut self, project: impl Into<String>) -> Self {
        self.project = Criterion::Only(project.into());
        self
    }

    /// Due-state dimension
    #[inline]
    #[must_use]
    pub fn with_due(mut self, due: DueCriterion) -> Self {
        self.due = due;
        self
    }

    /// Due date range
    #[inline]
    #[must_use]
    pub fn within(mut self, range: DateRange) -> Self {
        self.due_range = range;
        self
    }

    /// Free-text search over title, client and project
    #[inline]
    #[must_use]
    pub fn searching(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    /// Whether no dimension is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Filter<Task> for TaskFilter {
    fn matches(&self, task: &Task, ctx: &FilterContext) -> bool {
        self.priority.admits(&task.priority)
            && self.status.admits(&task.status)
            && self.kind.admits(&task.kind())
            && self.assignee.admits(task, ctx.current_user.as_ref())
            && self.client.admits(&task.client)
            && self.project.admits(&task.project)
            && self.due.admits(task, ctx.today)
            && self.due_range.admits(task.due_date)
            && search_matches(
                self.search.as_deref(),
                [task.title.as_str(), task.client.as_str(), task.project.as_str()],
            )
    }
}
