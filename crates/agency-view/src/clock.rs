//! Clock abstraction
//!
//! Everything that depends on "now" (overdue checks, Today/Yesterday labels,
//! day grouping, recent-file windows) reads it from a [`Clock`]. Calendar days
//! are taken in the clock's fixed UTC offset.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Source of the current instant and the local calendar
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Offset that decides where a calendar day starts
    fn offset(&self) -> FixedOffset {
        Utc.fix()
    }

    /// Calendar day of an instant, in this clock's offset
    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset()).date_naive()
    }

    /// Today's calendar day
    fn today(&self) -> NaiveDate {
        self.local_date(self.now())
    }
}

/// Build an offset from minutes east of UTC
///
/// Returns `None` outside ±24 hours.
#[must_use]
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

/// Wall clock with a fixed offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Wall clock with days in UTC
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Wall clock with days in the given offset
    #[must_use]
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    /// Frozen at `now`, days in UTC
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            offset: Utc.fix(),
        }
    }

    /// Frozen at noon UTC on `date`
    #[must_use]
    pub fn on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        Self::at(noon)
    }

    /// Use a different day boundary
    #[inline]
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn offset_moves_the_day_boundary() {
        let late_evening = Utc.with_ymd_and_hms(2025, 4, 21, 23, 30, 0).unwrap();
        let utc = FixedClock::at(late_evening);
        let tokyo = utc.with_offset(offset_from_minutes(9 * 60).unwrap());
        assert_eq!(utc.today(), NaiveDate::from_ymd_opt(2025, 4, 21).unwrap());
        assert_eq!(tokyo.today(), NaiveDate::from_ymd_opt(2025, 4, 22).unwrap());
    }

    #[test]
    fn offset_range_is_checked() {
        assert!(offset_from_minutes(-300).is_some());
        assert!(offset_from_minutes(24 * 60).is_none());
        assert!(offset_from_minutes(i32::MAX).is_none());
    }

    #[test]
    fn fixed_clock_on_date_is_that_day() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 21).unwrap();
        assert_eq!(FixedClock::on(date).today(), date);
    }
}
