//! Day-of-week anomaly trigger: recent same-weekday baseline vs recorded amount.

use crate::models::Publication;
use crate::stats::{average, percentage, Limits};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use tracing::debug;

/// Whether to notify about a recorded amount, and with what message.
///
/// The core only decides; delivery belongs to the external notification
/// sink. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertDecision {
    pub should_alert: bool,
    pub message: String,
}

impl AlertDecision {
    fn quiet() -> AlertDecision {
        AlertDecision {
            should_alert: false,
            message: String::new(),
        }
    }
}

/// Decide whether `recorded_amount` is low enough, relative to the recent
/// same-weekday average, to warrant an alert.
///
/// Baseline: events within six calendar months before `as_of` that share
/// `event_date`'s weekday. Alerts when the recorded amount falls below 80%
/// of that baseline's average. Independent of the validation verdict; runs
/// on recorded or merged events only.
pub fn should_alert(
    publication: &Publication,
    event_date: NaiveDate,
    recorded_amount: i64,
    as_of: NaiveDate,
) -> AlertDecision {
    let cutoff = as_of
        .checked_sub_months(Months::new(6))
        .unwrap_or(NaiveDate::MIN);
    let weekday = event_date.weekday();

    let relevant: Vec<i64> = publication
        .events
        .iter()
        .filter(|e| e.date >= cutoff && e.date.weekday() == weekday)
        .map(|e| e.amount)
        .collect();

    let avg = average(&relevant, Limits::NONE);
    let threshold = percentage(80, avg);

    if recorded_amount < threshold {
        debug!(
            publication = %publication.name,
            recorded_amount,
            threshold,
            baseline_points = relevant.len(),
            "Volume below weekday threshold"
        );
        AlertDecision {
            should_alert: true,
            message: format!(
                "Article count ({recorded_amount}) is below the expected threshold ({:.2}) for publication {}.",
                threshold as f64, publication.name
            ),
        }
    } else {
        AlertDecision::quiet()
    }
}
