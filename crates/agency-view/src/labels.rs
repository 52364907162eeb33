//! Display labels derived at render time

use chrono::{DateTime, NaiveDate, Utc};

/// Shown for a date that failed to parse
pub const INVALID_DATE: &str = "Invalid Date";
/// Shown for a missing due date
pub const NO_DUE_DATE: &str = "No due date";

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// `yyyy-MM-dd` group key for a day
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// "Today", "Yesterday" or "April 7, 2025"
#[must_use]
pub fn day_separator_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%B %-d, %Y").to_string()
    }
}

/// Separator label for a `yyyy-MM-dd` group key
///
/// A key that does not parse renders as [`INVALID_DATE`].
#[must_use]
pub fn separator_label_for_key(key: &str, today: NaiveDate) -> String {
    NaiveDate::parse_from_str(key, DAY_KEY_FORMAT)
        .map_or_else(|_| INVALID_DATE.to_string(), |date| day_separator_label(date, today))
}

/// "Apr 07, 2025" or "No due date"
#[must_use]
pub fn due_date_label(due: Option<NaiveDate>) -> String {
    due.map_or_else(|| NO_DUE_DATE.to_string(), |date| date.format("%b %d, %Y").to_string())
}

/// Distance between `then` and `now` in words, with direction
///
/// Buckets follow the usual "time ago" phrasing: "less than a minute ago",
/// "5 minutes ago", "about 2 hours ago", "in 3 days", "about 1 month ago",
/// "over 1 year ago".
#[must_use]
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let distance = distance_in_words(seconds.unsigned_abs());
    if seconds >= 0 {
        format!("{distance} ago")
    } else {
        format!("in {distance}")
    }
}

const MINUTES_IN_DAY: u64 = 1_440;
const MINUTES_IN_MONTH: u64 = 43_200;
const MINUTES_IN_TWO_MONTHS: u64 = 86_400;

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Integer division rounding half up
fn div_round(n: u64, d: u64) -> u64 {
    (n + d / 2) / d
}

fn distance_in_words(seconds: u64) -> String {
    let minutes = div_round(seconds, 60);
    match minutes {
        0 => "less than a minute".to_string(),
        1..=44 => plural(minutes, "minute"),
        45..=89 => "about 1 hour".to_string(),
        m if m < MINUTES_IN_DAY => format!("about {}", plural(div_round(m, 60), "hour")),
        m if m < 2_520 => "1 day".to_string(),
        m if m < MINUTES_IN_MONTH => plural(div_round(m, MINUTES_IN_DAY), "day"),
        m if m < MINUTES_IN_TWO_MONTHS => format!("about {}", plural(div_round(m, MINUTES_IN_MONTH), "month")),
        m => {
            let months = m / MINUTES_IN_MONTH;
            if months < 12 {
                return plural(div_round(m, MINUTES_IN_MONTH), "month");
            }
            let years = months / 12;
            match months % 12 {
                0..=2 => format!("about {}", plural(years, "year")),
                3..=8 => format!("over {}", plural(years, "year")),
                _ => format!("almost {}", plural(years + 1, "year")),
            }
        }
    }
}
