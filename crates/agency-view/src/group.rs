//! Grouping records into ordered buckets
//!
//! Two shapes:
//! - dynamic keys in ascending order ([`group_by`], [`group_by_day`],
//!   [`timeline`])
//! - a fixed, pre-declared key set ([`KanbanBoard`]), so empty columns
//!   still render

use crate::clock::Clock;
use crate::labels::{day_key, day_separator_label};
use agency_model::{Message, Task, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Group records by key, ascending
///
/// Within a group, records keep their input order.
pub fn group_by<R, K, F>(records: impl IntoIterator<Item = R>, key_fn: F) -> BTreeMap<K, Vec<R>>
where
    K: Ord,
    F: Fn(&R) -> K,
{
    let mut groups: BTreeMap<K, Vec<R>> = BTreeMap::new();
    for record in records {
        groups.entry(key_fn(&record)).or_default().push(record);
    }
    groups
}

/// Group records by the calendar day of a timestamp, in the clock's offset
pub fn group_by_day<R, F>(
    records: impl IntoIterator<Item = R>,
    timestamp: F,
    clock: &dyn Clock,
) -> BTreeMap<NaiveDate, Vec<R>>
where
    F: Fn(&R) -> DateTime<Utc>,
{
    group_by(records, |record| clock.local_date(timestamp(record)))
}

/// Kanban board with the three fixed status columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KanbanBoard {
    columns: IndexMap<TaskStatus, Vec<Task>>,
}

impl KanbanBoard {
    /// Empty board; every column present
    #[must_use]
    pub fn empty() -> Self {
        Self {
            columns: TaskStatus::COLUMNS.into_iter().map(|status| (status, Vec::new())).collect(),
        }
    }

    /// Place each task in its status column, keeping input order
    #[must_use]
    pub fn build(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::empty();
        for task in tasks {
            board.columns.entry(task.status).or_default().push(task);
        }
        board
    }

    /// Tasks in one column
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        self.columns.get(&status).map(Vec::as_slice).unwrap_or_default()
    }

    /// Columns in board order
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> + '_ {
        self.columns.iter().map(|(status, tasks)| (*status, tasks.as_slice()))
    }

    /// Total tasks on the board
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Whether every column is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for KanbanBoard {
    fn default() -> Self {
        Self::empty()
    }
}

/// One day of a chat timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySection {
    /// `yyyy-MM-dd`
    pub key: String,
    /// "Today", "Yesterday" or a long date
    pub label: String,
    /// Messages of the day, oldest first
    pub messages: Vec<Message>,
}

/// Chat timeline: messages bucketed by day, days and messages in order
pub fn timeline(messages: impl IntoIterator<Item = Message>, clock: &dyn Clock) -> Vec<DaySection> {
    let today = clock.today();
    group_by_day(messages, |m| m.timestamp, clock)
        .into_iter()
        .map(|(date, mut messages)| {
            messages.sort_by_key(|m| m.timestamp);
            DaySection {
                key: day_key(date),
                label: day_separator_label(date, today),
                messages,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use agency_model::Sender;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 21, 15, 0, 0).unwrap()
    }

    fn msg(id: &str, at: DateTime<Utc>) -> Message {
        Message::text(id, Sender::new("alice", "Alice"), "hello", at)
    }

    #[test]
    fn empty_board_has_all_columns() {
        let board = KanbanBoard::build(Vec::new());
        let statuses: Vec<TaskStatus> = board.columns().map(|(s, _)| s).collect();
        assert_eq!(statuses, TaskStatus::COLUMNS.to_vec());
        assert!(board.is_empty());
    }

    #[test]
    fn board_keeps_input_order_per_column() {
        let board = KanbanBoard::build(vec![
            Task::new("a", "a").with_status(TaskStatus::Done),
            Task::new("b", "b"),
            Task::new("c", "c").with_status(TaskStatus::Done),
        ]);
        let done: Vec<&str> = board.column(TaskStatus::Done).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(done, vec!["a", "c"]);
        assert_eq!(board.column(TaskStatus::InProgress).len(), 0);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn day_grouping_of_empty_input_is_empty() {
        let clock = FixedClock::at(now());
        let groups = group_by_day(Vec::<Message>::new(), |m| m.timestamp, &clock);
        assert!(groups.is_empty());
    }

    #[test]
    fn three_days_three_buckets() {
        let clock = FixedClock::at(now());
        let sections = timeline(
            vec![
                msg("eight-days", now() - Duration::days(8)),
                msg("today", now() - Duration::hours(1)),
                msg("yesterday", now() - Duration::days(1)),
            ],
            &clock,
        );
        let labels: Vec<&str> = sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["April 13, 2025", "Yesterday", "Today"]);
        assert_eq!(sections[2].key, "2025-04-21");
    }

    #[test]
    fn messages_sorted_within_day() {
        let clock = FixedClock::at(now());
        let sections = timeline(
            vec![msg("late", now() - Duration::minutes(5)), msg("early", now() - Duration::hours(5))],
            &clock,
        );
        let ids: Vec<&str> = sections[0].messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn generic_group_by_is_ascending() {
        let groups = group_by(vec![3, 1, 2, 1], |n| *n);
        let keys: Vec<i32> = groups.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(groups[&1], vec![1, 1]);
    }
}
