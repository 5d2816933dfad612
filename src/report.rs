//! Summary statistics over a publication's history. Pure reads, no decisions.

use crate::models::VolumeEvent;
use crate::stats::{
    average, coefficient_of_variation, frequency_distribution_table, interquartile_range,
    percentage, standard_deviation, FrequencyBucket, Limits,
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Full-history statistics for a publication.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub average: i64,
    /// Lower edge of the ±20% acceptance band.
    pub band_80: i64,
    /// Upper edge of the ±20% acceptance band.
    pub band_120: i64,
    pub stddev: i64,
    pub cv: i64,
    pub q1: f64,
    pub q3: f64,
    pub frequency_table: Option<Vec<FrequencyBucket>>,
}

/// Combine the statistics primitives over the full history.
pub fn summarize(amounts: &[i64]) -> Summary {
    let avg = average(amounts, Limits::NONE);
    let stddev = standard_deviation(amounts, None, Limits::NONE);
    let (q1, q3) = interquartile_range(amounts);
    Summary {
        average: avg,
        band_80: percentage(80, avg),
        band_120: percentage(120, avg),
        stddev,
        cv: coefficient_of_variation(stddev, avg),
        q1,
        q3,
        frequency_table: frequency_distribution_table(amounts, Limits::NONE, None),
    }
}

/// Events within the trailing week `[now - 7 days, now]`, unfiltered by any
/// statistical test.
pub fn weekly_slice(events: &[VolumeEvent], now: NaiveDate) -> Vec<VolumeEvent> {
    let start = now - Duration::days(7);
    events
        .iter()
        .filter(|e| e.date >= start && e.date <= now)
        .cloned()
        .collect()
}
