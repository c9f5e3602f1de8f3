//! Picks one representative sample per calendar day out of a 3-hourly series.
//!
//! A sample taken around midday is preferred. Days that have no midday sample
//! (typically the partial first and last day of the series) are backfilled with
//! their earliest sample, so the output covers as many days as the input does,
//! up to [`MAX_DAYS`].

use std::{collections::HashSet, ops::RangeInclusive};

use chrono::{Local, NaiveDate, TimeZone, Timelike};

use crate::model::{DailyForecast, ForecastEntry};

pub const MAX_DAYS: usize = 5;

/// Local hours (inclusive) considered "midday".
pub const MIDDAY_HOURS: RangeInclusive<u32> = 11..=14;

/// Reduce `entries` using the machine's local time zone.
pub fn reduce(entries: &[ForecastEntry]) -> Vec<DailyForecast> {
    reduce_in(entries, &Local)
}

/// Reduce `entries`, computing dates and hours in `tz`.
///
/// Output follows input order, so a time-ordered series yields ascending dates.
/// Each day carries its representative sample's own max/min, not an aggregate.
pub fn reduce_in<Tz: TimeZone>(entries: &[ForecastEntry], tz: &Tz) -> Vec<DailyForecast> {
    let dated: Vec<(NaiveDate, u32, &ForecastEntry)> = entries
        .iter()
        .filter_map(|entry| {
            let local = entry.time_in(tz)?;
            Some((local.date_naive(), local.hour(), entry))
        })
        .collect();

    let mut claimed: HashSet<NaiveDate> = HashSet::new();
    let mut picked: Vec<usize> = Vec::with_capacity(MAX_DAYS);

    for (idx, (date, hour, _)) in dated.iter().enumerate() {
        if picked.len() == MAX_DAYS {
            break;
        }
        if MIDDAY_HOURS.contains(hour) && claimed.insert(*date) {
            picked.push(idx);
        }
    }

    for (idx, (date, _, _)) in dated.iter().enumerate() {
        if picked.len() == MAX_DAYS {
            break;
        }
        if claimed.insert(*date) {
            picked.push(idx);
        }
    }

    picked.sort_unstable();

    picked
        .into_iter()
        .map(|idx| {
            let (date, _, entry) = dated[idx];
            DailyForecast::from_entry(date, entry)
        })
        .collect()
}
