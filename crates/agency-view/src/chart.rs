//! Chart series
//!
//! Every series comes out in a deterministic order: categories ascending,
//! months chronological.

use agency_model::ChartPoint;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Count records per category
pub fn tally_by<R, K, F>(records: impl IntoIterator<Item = R>, category: F) -> Vec<ChartPoint>
where
    K: Ord + ToString,
    F: Fn(&R) -> K,
{
    sum_by(records, category, |_| 1.0)
}

/// Sum a value per category
pub fn sum_by<R, K, F, V>(records: impl IntoIterator<Item = R>, category: F, value: V) -> Vec<ChartPoint>
where
    K: Ord + ToString,
    F: Fn(&R) -> K,
    V: Fn(&R) -> f64,
{
    let mut totals: BTreeMap<K, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(category(&record)).or_default() += value(&record);
    }
    totals
        .into_iter()
        .map(|(key, total)| ChartPoint::new(key.to_string(), total))
        .collect()
}

/// Count records per month of a date, oldest month first
///
/// Labels are "Jan", "Feb", ...; when the data spans more than one year
/// they carry the year ("Jan 2025"). Records without a date are skipped.
pub fn monthly_counts<R, F>(records: impl IntoIterator<Item = R>, date: F) -> Vec<ChartPoint>
where
    F: Fn(&R) -> Option<NaiveDate>,
{
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for record in records {
        if let Some(day) = date(&record) {
            *counts.entry((day.year(), day.month())).or_default() += 1;
        }
    }
    let multi_year = counts.keys().next().map(|(y, _)| y) != counts.keys().next_back().map(|(y, _)| y);
    counts
        .into_iter()
        .filter_map(|((year, month), count)| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            let label = if multi_year {
                first.format("%b %Y").to_string()
            } else {
                first.format("%b").to_string()
            };
            #[allow(clippy::cast_precision_loss)]
            let value = count as f64;
            Some(ChartPoint::new(label, value))
        })
        .collect()
}
