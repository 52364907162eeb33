use agency_model::TaskStatus;
use agency_test_utils::{fixed_clock, hours_from_now, message_at, strategies, task_due};
use agency_view::{classify, group_by_day, timeline, Clock, KanbanBoard};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #[test]
    fn prop_day_grouping_keeps_every_record_once(messages in prop::collection::vec(strategies::message(), 0..50)) {
        let clock = fixed_clock();
        let groups = group_by_day(messages.iter().enumerate(), |(_, m)| m.timestamp, &clock);

        let mut seen: HashMap<usize, usize> = HashMap::new();
        for (day, bucket) in &groups {
            for (index, message) in bucket {
                prop_assert_eq!(clock.local_date(message.timestamp), *day);
                *seen.entry(*index).or_default() += 1;
            }
        }
        prop_assert_eq!(seen.len(), messages.len());
        prop_assert!(seen.values().all(|n| *n == 1));
    }

    #[test]
    fn prop_day_keys_ascend(messages in prop::collection::vec(strategies::message(), 0..50)) {
        let sections = timeline(messages, &fixed_clock());
        let keys: Vec<&String> = sections.iter().map(|s| &s.key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn prop_board_keeps_every_task(tasks in prop::collection::vec(strategies::task(), 0..40)) {
        let total = tasks.len();
        let board = KanbanBoard::build(tasks);
        prop_assert_eq!(board.len(), total);
        prop_assert_eq!(board.columns().count(), 3);
        for (status, column) in board.columns() {
            prop_assert!(column.iter().all(|t| t.status == status));
        }
    }
}

#[test]
fn today_yesterday_and_last_week() {
    let clock = fixed_clock();
    let sections = timeline(
        vec![
            message_at("today", hours_from_now(-1)),
            message_at("yesterday", hours_from_now(-24)),
            message_at("last-week", hours_from_now(-24 * 8)),
        ],
        &clock,
    );
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[2].label, "Today");
    assert_eq!(sections[1].label, "Yesterday");
    assert_eq!(sections[0].key, "2025-04-13");
}

#[test]
fn empty_board_still_has_columns() {
    let board = KanbanBoard::build(Vec::new());
    let statuses: Vec<TaskStatus> = board.columns().map(|(status, _)| status).collect();
    assert_eq!(statuses, vec![TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done]);
}

#[test]
fn classification_scenarios() {
    let today = fixed_clock().today();
    let yesterday = task_due("a", -1, TaskStatus::ToDo);
    let done_today = task_due("b", 0, TaskStatus::Done);

    let state = classify(yesterday.due_date, yesterday.status, today);
    assert!(state.overdue && !state.due_today);

    let state = classify(done_today.due_date, done_today.status, today);
    assert!(!state.overdue && !state.due_today);

    let state = classify(None, TaskStatus::ToDo, today);
    assert!(!state.overdue && !state.due_today);
}
