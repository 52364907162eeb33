//! Filter evaluation
//!
//! A filter state is a set of dimensions, each either the `"all"` sentinel
//! or one concrete criterion. A record matches when it satisfies every
//! active dimension. Equality is strict; free-text search is the only
//! fuzzy dimension and is opt-in.

mod records;
mod task;

pub use records::{DocumentFilter, EventFilter, MeetingFilter, ProjectFilter};
pub use task::{AssigneeCriterion, DueCriterion, TaskFilter};

use crate::clock::Clock;
use agency_model::StaffId;
use chrono::NaiveDate;
use std::fmt::Display;
use std::str::FromStr;

/// Sentinel for an inactive dimension
pub const ALL: &str = "all";

/// Filter construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// Value for a known key could not be parsed
    #[error("invalid value {value:?} for filter {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Date range whose start is after its end
    #[error("date range starts {from} after it ends {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

impl FilterError {
    /// Shorthand for a bad value
    #[inline]
    pub fn invalid(key: &'static str, value: impl Into<String>, reason: impl Display) -> Self {
        Self::InvalidValue {
            key,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// One filter dimension: everything, or exactly one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion<T> {
    /// Inactive
    All,
    /// Record must equal this value
    Only(T),
}

impl<T> Default for Criterion<T> {
    fn default() -> Self {
        Criterion::All
    }
}

impl<T: PartialEq> Criterion<T> {
    /// Whether `value` passes this dimension
    #[inline]
    #[must_use]
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Criterion::All => true,
            Criterion::Only(expected) => expected == value,
        }
    }
}

impl<T> Criterion<T> {
    /// Whether this dimension constrains anything
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Criterion::Only(_))
    }

    /// Parse `"all"` or a concrete value for filter `key`
    ///
    /// # Errors
    /// [`FilterError::InvalidValue`] when the value does not parse.
    pub fn parse(key: &'static str, raw: &str) -> Result<Self, FilterError>
    where
        T: FromStr,
        T::Err: Display,
    {
        if raw == ALL {
            return Ok(Criterion::All);
        }
        raw.parse()
            .map(Criterion::Only)
            .map_err(|err| FilterError::invalid(key, raw, err))
    }
}

impl<T> From<Option<T>> for Criterion<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Criterion::All, Criterion::Only)
    }
}

/// Inclusive date range; an open end is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// Create range
    ///
    /// # Errors
    /// [`FilterError::InvertedRange`] when `from` is after `to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, FilterError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(FilterError::InvertedRange { from, to });
            }
        }
        Ok(Self { from, to })
    }

    /// Unbounded range
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether either end is set
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Whether `date` is inside; inclusive on both ends
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| from <= date) && self.to.map_or(true, |to| date <= to)
    }

    /// Range check for an optional date
    ///
    /// An inactive range admits everything; an active one rejects records
    /// without a date.
    #[must_use]
    pub fn admits(&self, date: Option<NaiveDate>) -> bool {
        if !self.is_active() {
            return true;
        }
        date.is_some_and(|d| self.contains(d))
    }
}

/// What a filter needs beyond the record itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContext {
    /// Calendar day the due dimension compares against
    pub today: NaiveDate,
    /// Staff id the "me" assignee criterion resolves to
    pub current_user: Option<StaffId>,
}

impl FilterContext {
    /// Context for `today` with no signed-in user
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            current_user: None,
        }
    }

    /// Context from a clock
    #[must_use]
    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::new(clock.today())
    }

    /// Resolve "me" to `user`
    #[inline]
    #[must_use]
    pub fn as_user(mut self, user: impl Into<StaffId>) -> Self {
        self.current_user = Some(user.into());
        self
    }
}

/// Predicate over one kind of record
pub trait Filter<R> {
    /// Whether `record` satisfies every active dimension
    fn matches(&self, record: &R, ctx: &FilterContext) -> bool;

    /// Matching records, in input order
    fn apply<'a>(&self, records: &'a [R], ctx: &FilterContext) -> Vec<&'a R> {
        records.iter().filter(|record| self.matches(record, ctx)).collect()
    }

    /// Matching records by value, in input order
    fn retain(&self, records: Vec<R>, ctx: &FilterContext) -> Vec<R> {
        records.into_iter().filter(|record| self.matches(record, ctx)).collect()
    }
}

/// Free-standing form of [`Filter::matches`]
#[inline]
pub fn matches<R, F: Filter<R> + ?Sized>(record: &R, filter: &F, ctx: &FilterContext) -> bool {
    filter.matches(record, ctx)
}

/// Case-insensitive substring search over several fields
///
/// A blank needle matches everything.
pub(crate) fn search_matches<'a>(needle: Option<&str>, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
    let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
        return true;
    };
    let needle = needle.to_lowercase();
    haystacks
        .into_iter()
        .any(|hay| hay.to_lowercase().contains(&needle))
}

/// Parse an optional `yyyy-MM-dd` bound
pub(crate) fn parse_bound(key: &'static str, raw: &str) -> Result<Option<NaiveDate>, FilterError> {
    if raw == ALL || raw.is_empty() {
        return Ok(None);
    }
    agency_model::parse_date(raw)
        .map(Some)
        .map_err(|err| FilterError::invalid(key, raw, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_model::Priority;

    #[test]
    fn criterion_parses_sentinel() {
        let crit: Criterion<Priority> = Criterion::parse("priority", "all").unwrap();
        assert!(!crit.is_active());
        assert!(crit.admits(&Priority::Low));
    }

    #[test]
    fn criterion_is_strict() {
        let crit: Criterion<Priority> = Criterion::parse("priority", "High").unwrap();
        assert!(crit.admits(&Priority::High));
        assert!(!crit.admits(&Priority::Critical));
        assert!(Criterion::<Priority>::parse("priority", "high").is_err());
    }

    #[test]
    fn date_range_is_inclusive() {
        let from = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
        let range = DateRange::new(Some(from), Some(to)).unwrap();
        assert!(range.contains(from));
        assert!(range.contains(to));
        assert!(!range.contains(to.succ_opt().unwrap()));
        assert!(!range.admits(None));
        assert!(DateRange::unbounded().admits(None));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let from = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(
            DateRange::new(Some(from), Some(to)),
            Err(FilterError::InvertedRange { from, to })
        );
    }

    #[test]
    fn search_ignores_case_and_blank() {
        assert!(search_matches(Some("ALPHA"), ["Project Alpha"]));
        assert!(search_matches(Some("  "), ["anything"]));
        assert!(search_matches(None, ["anything"]));
        assert!(!search_matches(Some("beta"), ["Project Alpha", "Client X"]));
    }
}
