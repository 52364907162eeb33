//! Overdue / due-today classification
//!
//! Derived on demand, never stored on the task. [`Classifier`] memoizes
//! results for one render pass, keyed on (due date, status) under a single
//! "today".

use agency_model::{Task, TaskStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Derived due state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueState {
    /// Due strictly before today and not done
    pub overdue: bool,
    /// Due today and not done
    pub due_today: bool,
}

/// Classify a due date against `today`
///
/// No due date classifies as neither; so does a done task.
#[must_use]
pub fn classify(due: Option<NaiveDate>, status: TaskStatus, today: NaiveDate) -> DueState {
    match due {
        Some(date) if !status.is_done() => DueState {
            overdue: date < today,
            due_today: date == today,
        },
        _ => DueState::default(),
    }
}

/// Classify a task against `today`
#[inline]
#[must_use]
pub fn classify_task(task: &Task, today: NaiveDate) -> DueState {
    classify(task.due_date, task.status, today)
}

/// Memoizing classifier for one render pass
#[derive(Debug)]
pub struct Classifier {
    today: NaiveDate,
    memo: HashMap<(Option<NaiveDate>, TaskStatus), DueState>,
    hits: usize,
}

impl Classifier {
    /// Create classifier for `today`
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            memo: HashMap::new(),
            hits: 0,
        }
    }

    /// Day this classifier compares against
    #[inline]
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Classify, reusing an earlier answer for the same key
    pub fn classify(&mut self, due: Option<NaiveDate>, status: TaskStatus) -> DueState {
        let today = self.today;
        if let Some(state) = self.memo.get(&(due, status)) {
            self.hits += 1;
            return *state;
        }
        let state = classify(due, status, today);
        self.memo.insert((due, status), state);
        state
    }

    /// Classify a task
    #[inline]
    pub fn classify_task(&mut self, task: &Task) -> DueState {
        self.classify(task.due_date, task.status)
    }

    /// Lookups answered from the memo
    #[inline]
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn yesterday_open_is_overdue() {
        let state = classify(Some(day(20)), TaskStatus::ToDo, day(21));
        assert_eq!(
            state,
            DueState {
                overdue: true,
                due_today: false
            }
        );
    }

    #[test]
    fn today_done_is_neither() {
        assert_eq!(classify(Some(day(21)), TaskStatus::Done, day(21)), DueState::default());
    }

    #[test]
    fn no_date_is_neither() {
        assert_eq!(classify(None, TaskStatus::ToDo, day(21)), DueState::default());
    }

    #[test]
    fn today_open_is_due_today() {
        let state = classify(Some(day(21)), TaskStatus::InProgress, day(21));
        assert!(state.due_today);
        assert!(!state.overdue);
    }

    #[test]
    fn future_is_neither() {
        assert_eq!(classify(Some(day(25)), TaskStatus::ToDo, day(21)), DueState::default());
    }

    #[test]
    fn memo_reuses_answers() {
        let mut classifier = Classifier::new(day(21));
        let first = classifier.classify(Some(day(20)), TaskStatus::ToDo);
        let second = classifier.classify(Some(day(20)), TaskStatus::ToDo);
        assert_eq!(first, second);
        assert_eq!(classifier.hits(), 1);
        classifier.classify(Some(day(20)), TaskStatus::Done);
        assert_eq!(classifier.hits(), 1);
    }
}
