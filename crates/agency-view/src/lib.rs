//! Agency View - filtering, grouping and classification
//!
//! Pure functions over agency records:
//! - Filter evaluation with `"all"` sentinels and strict equality
//! - Grouping by calendar day and into fixed Kanban columns
//! - Overdue / due-today classification against an injected clock
//! - Display labels, summary statistics, chart series and calendar events
//!
//! Nothing here reads the wall clock directly; pass a [`Clock`].
//!
//! # Example
//!
//! ```rust,ignore
//! use agency_view::prelude::*;
//!
//! let clock = FixedClock::on(today);
//! let filter = TaskFilter::from_pairs([("priority", "High"), ("assignee", "unassigned")])?;
//! let visible = filter.retain(tasks, &FilterContext::from_clock(&clock));
//! let board = KanbanBoard::build(visible);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod chart;
pub mod classify;
pub mod clock;
pub mod events;
pub mod filter;
pub mod group;
pub mod labels;
pub mod stats;

pub use chart::{monthly_counts, sum_by, tally_by};
pub use classify::{classify, classify_task, Classifier, DueState};
pub use clock::{offset_from_minutes, Clock, FixedClock, SystemClock};
pub use events::{calendar_feed, meeting_event, project_event, sort_feed, task_event};
pub use filter::{
    matches, AssigneeCriterion, Criterion, DateRange, DocumentFilter, DueCriterion, EventFilter, Filter,
    FilterContext, FilterError, MeetingFilter, ProjectFilter, TaskFilter,
};
pub use group::{group_by, group_by_day, timeline, DaySection, KanbanBoard};
pub use labels::{day_key, day_separator_label, due_date_label, relative_time, separator_label_for_key};
pub use stats::{recent_documents, split_meetings, FileStats, MeetingSchedule, ProjectStats, TaskStats};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with agency views
    pub use crate::{
        Clock, Criterion, DueState, Filter, FilterContext, FixedClock, KanbanBoard, SystemClock, TaskFilter,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
